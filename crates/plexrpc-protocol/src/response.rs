use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::JsonRpcError;
use crate::types::{JsonRpcVersion, RequestId};

/// A successful JSON-RPC response. `result` may legally be JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    pub result: Value,
    pub id: RequestId,
}

impl JsonRpcResponse {
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            result,
            id,
        }
    }

    pub fn null(id: RequestId) -> Self {
        Self::success(id, Value::Null)
    }
}

impl<T> From<(RequestId, T)> for JsonRpcResponse
where
    T: Into<Value>,
{
    fn from((id, result): (RequestId, T)) -> Self {
        Self::success(id, result.into())
    }
}

/// Union type that represents either a successful response or an error response
/// This ensures JSON-RPC 2.0 compliance by keeping success and error responses separate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcMessage {
    /// Error response with error field
    Error(JsonRpcError),
    /// Successful response with result field
    Response(JsonRpcResponse),
}

impl JsonRpcMessage {
    pub fn success(id: RequestId, result: Value) -> Self {
        Self::Response(JsonRpcResponse::success(id, result))
    }

    pub fn error(error: JsonRpcError) -> Self {
        Self::Error(error)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, JsonRpcMessage::Error(_))
    }

    pub fn id(&self) -> &RequestId {
        match self {
            JsonRpcMessage::Response(resp) => &resp.id,
            JsonRpcMessage::Error(err) => &err.id,
        }
    }

    pub fn result(&self) -> Option<&Value> {
        match self {
            JsonRpcMessage::Response(resp) => Some(&resp.result),
            JsonRpcMessage::Error(_) => None,
        }
    }

    pub fn error_code(&self) -> Option<i64> {
        match self {
            JsonRpcMessage::Error(err) => Some(err.code()),
            JsonRpcMessage::Response(_) => None,
        }
    }
}

impl From<JsonRpcResponse> for JsonRpcMessage {
    fn from(response: JsonRpcResponse) -> Self {
        Self::Response(response)
    }
}

impl From<JsonRpcError> for JsonRpcMessage {
    fn from(error: JsonRpcError) -> Self {
        Self::Error(error)
    }
}

/// What one inbound document produces.
///
/// `Nothing` means the transport must send nothing at all: it is not an empty
/// array and not an empty string.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Single(JsonRpcMessage),
    Batch(Vec<JsonRpcMessage>),
    Nothing,
}

impl DispatchOutcome {
    /// The outcome as a JSON document, `None` when nothing is to be sent
    pub fn to_value(&self) -> Option<Value> {
        match self {
            DispatchOutcome::Single(message) => serde_json::to_value(message).ok(),
            DispatchOutcome::Batch(messages) => serde_json::to_value(messages).ok(),
            DispatchOutcome::Nothing => None,
        }
    }

    /// Convert to JSON string if there's a response to send
    pub fn to_json_string(&self) -> Option<String> {
        match self {
            DispatchOutcome::Single(message) => serde_json::to_string(message).ok(),
            DispatchOutcome::Batch(messages) => serde_json::to_string(messages).ok(),
            DispatchOutcome::Nothing => None,
        }
    }

    /// Check if this outcome needs a response
    pub fn needs_response(&self) -> bool {
        !matches!(self, DispatchOutcome::Nothing)
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, DispatchOutcome::Batch(_))
    }

    /// All messages in output order
    pub fn messages(&self) -> &[JsonRpcMessage] {
        match self {
            DispatchOutcome::Single(message) => std::slice::from_ref(message),
            DispatchOutcome::Batch(messages) => messages,
            DispatchOutcome::Nothing => &[],
        }
    }
}

impl From<JsonRpcMessage> for DispatchOutcome {
    fn from(message: JsonRpcMessage) -> Self {
        Self::Single(message)
    }
}
