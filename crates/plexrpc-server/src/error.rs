use plexrpc_protocol::{JsonRpcError, JsonRpcErrorCode, RequestId};
use serde_json::Value;
use thiserror::Error;

/// Result type returned by method handlers
pub type HandlerResult = Result<Value, HandlerError>;

/// Failures a handler can report.
///
/// Reasons are for logs only: the wire message is always the fixed text of the
/// error code.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Reported as `-32602 Invalid params`, keyed to the request id
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// Reported as an implementation-defined server error, keyed to the request id
    #[error("server error {code}: {reason}")]
    Server { code: i64, reason: String },

    /// Reported as `-32603 Internal error` with a null id
    #[error("internal failure: {0}")]
    Internal(String),
}

impl HandlerError {
    pub fn invalid_params(reason: impl Into<String>) -> Self {
        Self::InvalidParams(reason.into())
    }

    pub fn server(code: i64, reason: impl Into<String>) -> Self {
        Self::Server {
            code,
            reason: reason.into(),
        }
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal(reason.into())
    }

    /// The error envelope a call with `id` answers with.
    ///
    /// Internal failures lose the id and answer with `null`; so do server errors
    /// whose code lies outside -32099..=-32000, which are reported as internal.
    pub fn to_response(&self, id: RequestId) -> JsonRpcError {
        match self {
            HandlerError::InvalidParams(_) => JsonRpcError::invalid_params(id),
            HandlerError::Server { code, .. } if JsonRpcErrorCode::is_server_error_code(*code) => {
                JsonRpcError::server_error(id, *code)
            }
            HandlerError::Server { .. } | HandlerError::Internal(_) => JsonRpcError::internal_error(),
        }
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidParams(err.to_string())
    }
}
