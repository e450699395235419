//! # JSON-RPC 2.0 Protocol Core
//!
//! Envelope types, request identifiers and the fixed JSON-RPC 2.0 error taxonomy
//! shared by the plexrpc client and server crates. Nothing in here knows about a
//! transport: documents come in and go out as [`serde_json::Value`] trees.
//!
//! ## Features
//! - Request, notification, success and error envelopes with exact wire shapes
//! - Error codes paired with their verbatim wire messages
//! - A pluggable JSON codec seam with a `serde_json` default
//! - Dispatch outcomes that distinguish "send nothing" from an empty payload

pub mod codec;
pub mod error;
pub mod notification;
pub mod prelude;
pub mod request;
pub mod response;
pub mod types;

// Re-export main types
pub use codec::{CodecError, JsonCodec, SerdeJsonCodec};
pub use error::{JsonRpcError, JsonRpcErrorCode, JsonRpcErrorObject};
pub use notification::JsonRpcNotification;
pub use request::{JsonRpcRequest, RequestEnvelope, RequestParams};
pub use response::{DispatchOutcome, JsonRpcMessage, JsonRpcResponse};
pub use types::{JsonRpcVersion, RequestId};

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const UNSUPPORTED_ENCODING: i64 = -32701;
    pub const INVALID_CHARACTER: i64 = -32702;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;

    // Server error range: -32099 to -32000
    pub const SERVER_ERROR_START: i64 = -32099;
    pub const SERVER_ERROR_END: i64 = -32000;
}

/// Envelope member names
pub mod keys {
    pub const JSONRPC: &str = "jsonrpc";
    pub const METHOD: &str = "method";
    pub const PARAMS: &str = "params";
    pub const ID: &str = "id";
    pub const RESULT: &str = "result";
    pub const ERROR: &str = "error";
    pub const CODE: &str = "code";
    pub const MESSAGE: &str = "message";
}
