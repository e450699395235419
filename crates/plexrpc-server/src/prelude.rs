//! # JSON-RPC Server Prelude
//!
//! ```rust
//! use plexrpc_server::prelude::*;
//! ```

pub use crate::binding::bind_params;
pub use crate::config::DispatcherConfig;
pub use crate::dispatch::RequestDispatcher;
pub use crate::envelope::{RequestViolation, ValidatedRequest, validate_request};
pub use crate::error::{HandlerError, HandlerResult};
pub use crate::handler::{CallArgs, MethodHandler};
pub use crate::registry::{MethodBinding, MethodRegistry, ParamSpec};

#[cfg(feature = "async")]
pub use crate::r#async::{AsyncMethodHandler, AsyncMethodRegistry, AsyncRequestDispatcher};

pub use plexrpc_protocol::prelude::*;
