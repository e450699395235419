use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error_codes;
use crate::types::{JsonRpcVersion, RequestId};

/// JSON-RPC error codes.
///
/// Every variant carries a fixed companion message; the message text is part of
/// the wire contract and must match verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonRpcErrorCode {
    ParseError,
    UnsupportedEncoding,
    InvalidCharacter,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    ServerError(i64), // -32099 to -32000
}

impl JsonRpcErrorCode {
    pub fn code(&self) -> i64 {
        match self {
            JsonRpcErrorCode::ParseError => error_codes::PARSE_ERROR,
            JsonRpcErrorCode::UnsupportedEncoding => error_codes::UNSUPPORTED_ENCODING,
            JsonRpcErrorCode::InvalidCharacter => error_codes::INVALID_CHARACTER,
            JsonRpcErrorCode::InvalidRequest => error_codes::INVALID_REQUEST,
            JsonRpcErrorCode::MethodNotFound => error_codes::METHOD_NOT_FOUND,
            JsonRpcErrorCode::InvalidParams => error_codes::INVALID_PARAMS,
            JsonRpcErrorCode::InternalError => error_codes::INTERNAL_ERROR,
            JsonRpcErrorCode::ServerError(code) => *code,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            JsonRpcErrorCode::ParseError
            | JsonRpcErrorCode::UnsupportedEncoding
            | JsonRpcErrorCode::InvalidCharacter => "Parse error",
            JsonRpcErrorCode::InvalidRequest => "Invalid Request",
            JsonRpcErrorCode::MethodNotFound => "Method not found",
            JsonRpcErrorCode::InvalidParams => "Invalid params",
            JsonRpcErrorCode::InternalError => "Internal error",
            JsonRpcErrorCode::ServerError(_) => "Server error",
        }
    }

    /// Classify a raw code. `None` when the code is outside every band.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            error_codes::PARSE_ERROR => Some(JsonRpcErrorCode::ParseError),
            error_codes::UNSUPPORTED_ENCODING => Some(JsonRpcErrorCode::UnsupportedEncoding),
            error_codes::INVALID_CHARACTER => Some(JsonRpcErrorCode::InvalidCharacter),
            error_codes::INVALID_REQUEST => Some(JsonRpcErrorCode::InvalidRequest),
            error_codes::METHOD_NOT_FOUND => Some(JsonRpcErrorCode::MethodNotFound),
            error_codes::INVALID_PARAMS => Some(JsonRpcErrorCode::InvalidParams),
            error_codes::INTERNAL_ERROR => Some(JsonRpcErrorCode::InternalError),
            c if Self::is_server_error_code(c) => Some(JsonRpcErrorCode::ServerError(c)),
            _ => None,
        }
    }

    pub fn is_server_error_code(code: i64) -> bool {
        (error_codes::SERVER_ERROR_START..=error_codes::SERVER_ERROR_END).contains(&code)
    }

    /// True when `message` is the exact companion text for this code.
    pub fn accepts_message(&self, message: &str) -> bool {
        self.message() == message
    }
}

impl fmt::Display for JsonRpcErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// JSON-RPC Error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcErrorObject {
    pub fn new(code: JsonRpcErrorCode, data: Option<Value>) -> Self {
        Self {
            code: code.code(),
            message: code.message().to_string(),
            data,
        }
    }

    pub fn parse_error() -> Self {
        Self::new(JsonRpcErrorCode::ParseError, None)
    }

    pub fn invalid_request() -> Self {
        Self::new(JsonRpcErrorCode::InvalidRequest, None)
    }

    pub fn method_not_found() -> Self {
        Self::new(JsonRpcErrorCode::MethodNotFound, None)
    }

    pub fn invalid_params() -> Self {
        Self::new(JsonRpcErrorCode::InvalidParams, None)
    }

    pub fn internal_error() -> Self {
        Self::new(JsonRpcErrorCode::InternalError, None)
    }

    /// Implementation-defined server error. Codes outside -32099..=-32000 are
    /// reported as an internal error instead.
    pub fn server_error(code: i64) -> Self {
        if JsonRpcErrorCode::is_server_error_code(code) {
            Self::new(JsonRpcErrorCode::ServerError(code), None)
        } else {
            Self::internal_error()
        }
    }

    /// The taxonomy entry for this object, if the code and message are a legal pair.
    pub fn kind(&self) -> Option<JsonRpcErrorCode> {
        JsonRpcErrorCode::from_code(self.code).filter(|kind| kind.accepts_message(&self.message))
    }
}

/// JSON-RPC Error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    pub error: JsonRpcErrorObject,
    pub id: RequestId,
}

impl JsonRpcError {
    pub fn new(id: RequestId, error: JsonRpcErrorObject) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            error,
            id,
        }
    }

    pub fn parse_error() -> Self {
        Self::new(RequestId::Null, JsonRpcErrorObject::parse_error())
    }

    /// Invalid requests never echo an id, even when the malformed request had one.
    pub fn invalid_request() -> Self {
        Self::new(RequestId::Null, JsonRpcErrorObject::invalid_request())
    }

    pub fn method_not_found(id: RequestId) -> Self {
        Self::new(id, JsonRpcErrorObject::method_not_found())
    }

    pub fn invalid_params(id: RequestId) -> Self {
        Self::new(id, JsonRpcErrorObject::invalid_params())
    }

    /// Internal errors are reported with a null id.
    pub fn internal_error() -> Self {
        Self::new(RequestId::Null, JsonRpcErrorObject::internal_error())
    }

    pub fn server_error(id: RequestId, code: i64) -> Self {
        Self::new(id, JsonRpcErrorObject::server_error(code))
    }

    pub fn code(&self) -> i64 {
        self.error.code
    }
}

impl fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "JSON-RPC Error {}: {}",
            self.error.code, self.error.message
        )
    }
}

impl std::error::Error for JsonRpcError {}
