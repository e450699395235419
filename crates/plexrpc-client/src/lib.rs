//! # JSON-RPC 2.0 Client
//!
//! Builds request and notification envelopes over a monotonically increasing
//! identifier space, and classifies and validates response documents against
//! the fixed JSON-RPC 2.0 error taxonomy. Transport is up to the caller.
//!
//! ```rust
//! use plexrpc_client::{RequestBuilder, RequestId, RequestParams};
//! use serde_json::json;
//!
//! let builder = RequestBuilder::new();
//! let validator = builder.validator();
//!
//! let request = builder.build_call("subtract", RequestParams::from_value(&json!([42, 23])));
//! assert_eq!(request.id, RequestId::from(1u64));
//!
//! assert!(validator.validate(&json!({"jsonrpc": "2.0", "result": 19, "id": 1})));
//! assert!(!validator.validate(&json!({"jsonrpc": "2.0", "result": 19, "id": 2})));
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod prelude;
pub mod validator;

pub use builder::{BatchEntry, CallType, IdSpace, RequestBuilder};
pub use client::{JsonRpcClient, into_result};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ResponseViolation};
pub use validator::{ResponseValidator, ValidatedResponse};

pub use plexrpc_protocol::{
    JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, RequestEnvelope, RequestId, RequestParams,
};
