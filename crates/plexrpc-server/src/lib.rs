//! # JSON-RPC 2.0 Server
//!
//! A transport agnostic JSON-RPC 2.0 server core: a [`MethodRegistry`] binding
//! method names to handlers and their formal parameter names, and a
//! [`RequestDispatcher`] that validates inbound documents (single or batch),
//! binds positional, named or variadic parameters, invokes handlers and builds
//! the response envelope, or nothing at all for notifications.
//!
//! ```rust
//! use plexrpc_server::{CallArgs, MethodRegistry, RequestDispatcher};
//! use serde_json::json;
//!
//! let mut registry = MethodRegistry::new();
//! registry.register("subtract", &["subtrahend", "minuend"], |args: CallArgs| {
//!     Ok(json!(args.i64_at(0)? - args.i64_at(1)?))
//! });
//!
//! let dispatcher = RequestDispatcher::new(registry);
//! let outcome = dispatcher.handle_str(
//!     r#"{"jsonrpc": "2.0", "method": "subtract", "params": [42, 23], "id": 1}"#,
//! );
//! assert_eq!(
//!     outcome.to_value(),
//!     Some(json!({"jsonrpc": "2.0", "result": 19, "id": 1}))
//! );
//! ```

pub mod binding;
pub mod config;
pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod prelude;
pub mod registry;

mod pipeline;

#[cfg(feature = "async")]
pub mod r#async;

pub use binding::bind_params;
pub use config::DispatcherConfig;
pub use dispatch::RequestDispatcher;
pub use envelope::{RequestViolation, ValidatedRequest, validate_request};
pub use error::{HandlerError, HandlerResult};
pub use handler::{CallArgs, MethodHandler};
pub use registry::{MethodBinding, MethodRegistry, ParamSpec};

#[cfg(feature = "async")]
pub use r#async::{AsyncMethodHandler, AsyncMethodRegistry, AsyncRequestDispatcher, FunctionHandler};

pub use plexrpc_protocol::{DispatchOutcome, JsonRpcMessage};
