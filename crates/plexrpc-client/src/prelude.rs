//! # JSON-RPC Client Prelude
//!
//! ```rust
//! use plexrpc_client::prelude::*;
//! ```

pub use crate::builder::{BatchEntry, CallType, IdSpace, RequestBuilder};
pub use crate::client::{JsonRpcClient, into_result};
pub use crate::config::ClientConfig;
pub use crate::error::{ClientError, ClientResult, ResponseViolation};
pub use crate::validator::{ResponseValidator, ValidatedResponse};

pub use plexrpc_protocol::prelude::*;
