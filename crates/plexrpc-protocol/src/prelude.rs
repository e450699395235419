//! # JSON-RPC Protocol Prelude
//!
//! This module provides convenient re-exports of the most commonly used types
//! from the protocol crate.
//!
//! ```rust
//! use plexrpc_protocol::prelude::*;
//! ```

// Core JSON-RPC types
pub use crate::codec::{CodecError, JsonCodec, SerdeJsonCodec};
pub use crate::error::{JsonRpcError, JsonRpcErrorCode, JsonRpcErrorObject};
pub use crate::notification::JsonRpcNotification;
pub use crate::request::{JsonRpcRequest, RequestEnvelope, RequestParams};
pub use crate::response::{DispatchOutcome, JsonRpcMessage, JsonRpcResponse};
pub use crate::types::{JsonRpcVersion, RequestId};

// Standard error codes
pub use crate::error_codes::*;
