use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::notification::JsonRpcNotification;
use crate::types::{JsonRpcVersion, RequestId};

/// Parameters for a JSON-RPC request
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RequestParams {
    /// Positional parameters as an array
    Array(Vec<Value>),
    /// Named parameters as an object
    Object(Map<String, Value>),
}

impl RequestParams {
    /// Read params out of a document member. Only arrays and objects qualify.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(RequestParams::Array(items.clone())),
            Value::Object(map) => Some(RequestParams::Object(map.clone())),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RequestParams::Object(map) => map.len(),
            RequestParams::Array(vec) => vec.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into a positional list. Object values come out in the map's key order.
    pub fn into_values(self) -> Vec<Value> {
        match self {
            RequestParams::Array(vec) => vec,
            RequestParams::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            RequestParams::Object(map) => Value::Object(map.clone()),
            RequestParams::Array(arr) => Value::Array(arr.clone()),
        }
    }
}

impl From<Map<String, Value>> for RequestParams {
    fn from(map: Map<String, Value>) -> Self {
        RequestParams::Object(map)
    }
}

impl From<Vec<Value>> for RequestParams {
    fn from(vec: Vec<Value>) -> Self {
        RequestParams::Array(vec)
    }
}

/// A JSON-RPC call: a request that carries an `id` and expects a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<RequestParams>,
    pub id: RequestId,
}

impl JsonRpcRequest {
    pub fn new(id: RequestId, method: impl Into<String>, params: Option<RequestParams>) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            method: method.into(),
            params,
            id,
        }
    }
}

/// Either kind of outbound request envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestEnvelope {
    Call(JsonRpcRequest),
    Notification(JsonRpcNotification),
}

impl RequestEnvelope {
    pub fn method(&self) -> &str {
        match self {
            RequestEnvelope::Call(req) => &req.method,
            RequestEnvelope::Notification(notif) => &notif.method,
        }
    }

    pub fn id(&self) -> Option<&RequestId> {
        match self {
            RequestEnvelope::Call(req) => Some(&req.id),
            RequestEnvelope::Notification(_) => None,
        }
    }

    pub fn params(&self) -> Option<&RequestParams> {
        match self {
            RequestEnvelope::Call(req) => req.params.as_ref(),
            RequestEnvelope::Notification(notif) => notif.params.as_ref(),
        }
    }

    pub fn is_notification(&self) -> bool {
        matches!(self, RequestEnvelope::Notification(_))
    }

    /// The envelope as a JSON document
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert(crate::keys::JSONRPC.into(), Value::from(crate::JSONRPC_VERSION));
        object.insert(crate::keys::METHOD.into(), Value::from(self.method()));
        if let Some(params) = self.params() {
            object.insert(crate::keys::PARAMS.into(), params.to_value());
        }
        if let Some(id) = self.id() {
            object.insert(crate::keys::ID.into(), id.clone().into());
        }
        Value::Object(object)
    }
}

impl From<JsonRpcRequest> for RequestEnvelope {
    fn from(request: JsonRpcRequest) -> Self {
        Self::Call(request)
    }
}

impl From<JsonRpcNotification> for RequestEnvelope {
    fn from(notification: JsonRpcNotification) -> Self {
        Self::Notification(notification)
    }
}
