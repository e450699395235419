//! Structural validation of one inbound request object.

use plexrpc_protocol::{JsonRpcVersion, RequestId, RequestParams, keys};
use serde_json::Value;
use thiserror::Error;

/// Why an inbound envelope is an Invalid Request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestViolation {
    #[error("request is not an object")]
    NotAnObject,

    #[error("request object is empty")]
    EmptyObject,

    #[error("jsonrpc member is missing or not \"2.0\"")]
    BadVersion,

    #[error("method member is missing")]
    MissingMethod,

    #[error("method member is not a string")]
    MethodNotString,

    #[error("params member is neither an array nor an object")]
    BadParams,

    #[error("unexpected member {0:?}")]
    UnknownKey(String),

    #[error("id member is an array or an object")]
    BadId,

    #[error("empty document")]
    EmptyDocument,

    #[error("batch array is empty")]
    EmptyBatch,

    #[error("batch of {len} elements exceeds limit of {max}")]
    BatchTooLarge { len: usize, max: usize },

    #[error("named params {supplied:?} do not match declared {declared:?}")]
    NamedParamsMismatch {
        declared: Vec<String>,
        supplied: Vec<String>,
    },
}

/// A structurally valid request: a call when `id` is present, else a notification
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub method: String,
    pub params: Option<RequestParams>,
    pub id: Option<RequestId>,
}

impl ValidatedRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// Check one request object: non-empty, `jsonrpc` exactly `"2.0"`, string
/// `method`, array or object `params` when present, scalar `id` when present,
/// and no other members.
pub fn validate_request(element: &Value) -> Result<ValidatedRequest, RequestViolation> {
    let object = element.as_object().ok_or(RequestViolation::NotAnObject)?;
    if object.is_empty() {
        return Err(RequestViolation::EmptyObject);
    }

    if !JsonRpcVersion::matches(object.get(keys::JSONRPC)) {
        return Err(RequestViolation::BadVersion);
    }

    let method = match object.get(keys::METHOD) {
        None => return Err(RequestViolation::MissingMethod),
        Some(Value::String(method)) => method.clone(),
        Some(_) => return Err(RequestViolation::MethodNotString),
    };

    let params = match object.get(keys::PARAMS) {
        None => None,
        Some(value) => Some(RequestParams::from_value(value).ok_or(RequestViolation::BadParams)?),
    };

    if let Some(key) = object
        .keys()
        .find(|key| ![keys::JSONRPC, keys::METHOD, keys::PARAMS, keys::ID].contains(&key.as_str()))
    {
        return Err(RequestViolation::UnknownKey(key.clone()));
    }

    let id = match object.get(keys::ID) {
        None => None,
        Some(value) => Some(RequestId::from_value(value).ok_or(RequestViolation::BadId)?),
    };

    Ok(ValidatedRequest { method, params, id })
}
