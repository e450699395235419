//! Error types for client operations

use plexrpc_protocol::CodecError;
use serde_json::Value;
use thiserror::Error;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Error type for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// A call-type tag other than `call` or `notification`
    #[error("Invalid call type: {0:?}")]
    InvalidCallType(String),

    /// JSON text could not be parsed or produced
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// The response document is not a legal JSON-RPC response
    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] ResponseViolation),

    /// The server answered with an error envelope
    #[error("Server error (code {code}): {message}")]
    ServerError {
        code: i64,
        message: String,
        data: Option<Value>,
    },
}

impl ClientError {
    pub fn server_error(code: i64, message: impl Into<String>, data: Option<Value>) -> Self {
        Self::ServerError {
            code,
            message: message.into(),
            data,
        }
    }

    /// Get the error code if this is a server error
    pub fn error_code(&self) -> Option<i64> {
        match self {
            Self::ServerError { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_protocol_error(&self) -> bool {
        matches!(self, Self::InvalidResponse(_) | Self::Codec(_))
    }
}

/// Why a response document failed validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResponseViolation {
    #[error("document is null or empty")]
    EmptyDocument,

    #[error("response is not an object")]
    NotAnObject,

    #[error("expected a single response, got a batch")]
    UnexpectedBatch,

    #[error("member set {0:?} is not exactly jsonrpc, result|error, id")]
    KeySet(Vec<String>),

    #[error("jsonrpc member is not \"2.0\"")]
    BadVersion,

    #[error("error member is not a well-formed error object")]
    MalformedError,

    #[error("error code {0} is outside every reserved band")]
    UnknownErrorCode(i64),

    #[error("error code {code} does not pair with message {message:?}")]
    MismatchedMessage { code: i64, message: String },

    #[error("id {0} is not an integer")]
    IdNotInteger(Value),

    #[error("id {id} is outside the issued range 1..={issued}")]
    IdOutOfRange { id: i64, issued: u64 },
}
