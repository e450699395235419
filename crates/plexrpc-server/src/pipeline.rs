//! Dispatch steps shared by the sync and async dispatchers.
//!
//! Everything up to handler invocation and everything after it is pure and
//! lives here; the dispatchers only differ in how they call the handler.

use std::sync::Arc;

use plexrpc_protocol::{DispatchOutcome, JsonRpcError, JsonRpcMessage, RequestId};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::binding::bind_params;
use crate::config::DispatcherConfig;
use crate::envelope::{RequestViolation, validate_request};
use crate::error::{HandlerError, HandlerResult};
use crate::handler::CallArgs;
use crate::registry::MethodRegistry;

/// Shape of a parsed inbound document
pub(crate) enum Document<'a> {
    Single(&'a Value),
    Batch(&'a [Value]),
    Rejected(RequestViolation),
}

pub(crate) fn classify<'a>(document: &'a Value, config: &DispatcherConfig) -> Document<'a> {
    match document {
        Value::Object(_) => Document::Single(document),
        Value::Array(elements) if elements.is_empty() => Document::Rejected(RequestViolation::EmptyBatch),
        Value::Array(elements) => match config.max_batch_len {
            Some(max) if config.batch_too_large(elements.len()) => {
                Document::Rejected(RequestViolation::BatchTooLarge {
                    len: elements.len(),
                    max,
                })
            }
            _ => Document::Batch(elements),
        },
        Value::Null => Document::Rejected(RequestViolation::EmptyDocument),
        _ => Document::Rejected(RequestViolation::NotAnObject),
    }
}

/// A resolved, bound handler call waiting to be run
pub(crate) struct Invocation<H: ?Sized> {
    pub method: String,
    pub id: Option<RequestId>,
    pub handler: Arc<H>,
    pub args: CallArgs,
}

pub(crate) enum Step<H: ?Sized> {
    /// Answer without invoking anything
    Reply(JsonRpcMessage),
    /// Notification for an unknown method
    Silent,
    Invoke(Invocation<H>),
}

enum Rejection {
    Invalid(RequestViolation),
    MethodNotFound(RequestId),
}

impl Rejection {
    fn into_message(self) -> JsonRpcMessage {
        match self {
            Rejection::Invalid(_) => JsonRpcError::invalid_request().into(),
            Rejection::MethodNotFound(id) => JsonRpcError::method_not_found(id).into(),
        }
    }
}

impl From<RequestViolation> for Rejection {
    fn from(violation: RequestViolation) -> Self {
        Rejection::Invalid(violation)
    }
}

fn resolve<H: ?Sized>(
    registry: &MethodRegistry<H>,
    element: &Value,
) -> Result<Option<Invocation<H>>, Rejection> {
    let request = validate_request(element)?;

    let Some(binding) = registry.resolve(&request.method) else {
        return match request.id {
            Some(id) => Err(Rejection::MethodNotFound(id)),
            None => {
                debug!(method = %request.method, "Ignoring notification for unknown method");
                Ok(None)
            }
        };
    };

    let args = bind_params(binding.params(), request.params)?;
    Ok(Some(Invocation {
        method: request.method,
        id: request.id,
        handler: Arc::clone(binding.handler()),
        args,
    }))
}

/// Validate one request object and resolve what to do with it
pub(crate) fn prepare<H: ?Sized>(registry: &MethodRegistry<H>, element: &Value) -> Step<H> {
    match resolve(registry, element) {
        Ok(Some(invocation)) => {
            debug!(
                method = %invocation.method,
                notification = invocation.id.is_none(),
                args = invocation.args.len(),
                "Dispatching method"
            );
            Step::Invoke(invocation)
        }
        Ok(None) => Step::Silent,
        Err(rejection) => {
            match &rejection {
                Rejection::Invalid(reason) => warn!(reason = %reason, "Rejected invalid request"),
                Rejection::MethodNotFound(id) => warn!(id = %id, "Method not found"),
            }
            Step::Reply(rejection.into_message())
        }
    }
}

/// Turn a handler outcome into the response, if any, owed to the caller
pub(crate) fn conclude(
    method: &str,
    id: Option<RequestId>,
    result: HandlerResult,
) -> Option<JsonRpcMessage> {
    match (id, result) {
        (Some(id), Ok(value)) => Some(JsonRpcMessage::success(id, value)),
        (Some(id), Err(err)) => {
            let response = err.to_response(id);
            match &err {
                HandlerError::InvalidParams(_) => {
                    warn!(method = %method, reason = %err, "Handler rejected params")
                }
                _ if response.id.is_null() => {
                    error!(method = %method, reason = %err, "Handler failed, reporting internal error")
                }
                _ => warn!(method = %method, reason = %err, "Handler reported server error"),
            }
            Some(response.into())
        }
        (None, Ok(_)) => None,
        (None, Err(err)) => {
            warn!(method = %method, reason = %err, "Notification handler failed");
            None
        }
    }
}

/// Outcome of a batch: notifications leave no trace, and a batch of nothing
/// but notifications produces no response at all
pub(crate) fn collect_batch(responses: impl IntoIterator<Item = Option<JsonRpcMessage>>) -> DispatchOutcome {
    let messages: Vec<JsonRpcMessage> = responses.into_iter().flatten().collect();
    if messages.is_empty() {
        DispatchOutcome::Nothing
    } else {
        DispatchOutcome::Batch(messages)
    }
}

pub(crate) fn single(response: Option<JsonRpcMessage>) -> DispatchOutcome {
    response.map_or(DispatchOutcome::Nothing, DispatchOutcome::Single)
}

pub(crate) fn parse_failure(reason: &dyn std::fmt::Display) -> DispatchOutcome {
    warn!(reason = %reason, "Failed to parse inbound document");
    DispatchOutcome::Single(JsonRpcError::parse_error().into())
}

pub(crate) fn rejected(violation: RequestViolation) -> DispatchOutcome {
    warn!(reason = %violation, "Rejected inbound document");
    DispatchOutcome::Single(JsonRpcError::invalid_request().into())
}
