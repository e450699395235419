//! Async handlers and the async request dispatcher.
//!
//! Validation, binding and response construction are the same as in
//! [`RequestDispatcher`](crate::RequestDispatcher); handlers are awaited and
//! batch elements may run concurrently. Output order always follows input
//! order.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use plexrpc_protocol::{CodecError, DispatchOutcome, JsonCodec, JsonRpcMessage, SerdeJsonCodec};
use serde_json::Value;
use tracing::debug;

use crate::config::DispatcherConfig;
use crate::error::HandlerResult;
use crate::handler::CallArgs;
use crate::pipeline::{self, Document, Step};
use crate::registry::{MethodRegistry, ParamSpec};

/// Trait for handling JSON-RPC method calls asynchronously
///
/// As with [`MethodHandler`](crate::MethodHandler), return an error instead of
/// panicking; panics propagate out of the dispatcher.
#[async_trait]
pub trait AsyncMethodHandler: Send + Sync {
    async fn call(&self, args: CallArgs) -> HandlerResult;
}

/// Adapter turning an async closure into an [`AsyncMethodHandler`]
pub struct FunctionHandler<F> {
    handler_fn: F,
}

impl<F> FunctionHandler<F> {
    pub fn new(handler_fn: F) -> Self {
        Self { handler_fn }
    }
}

#[async_trait]
impl<F, Fut> AsyncMethodHandler for FunctionHandler<F>
where
    F: Fn(CallArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    async fn call(&self, args: CallArgs) -> HandlerResult {
        (self.handler_fn)(args).await
    }
}

/// Registry of async handlers
pub type AsyncMethodRegistry = MethodRegistry<dyn AsyncMethodHandler>;

impl MethodRegistry<dyn AsyncMethodHandler> {
    /// Register an async closure taking the formal parameters `params`, in that order
    pub fn register_async<F, Fut>(&mut self, name: impl Into<String>, params: &[&str], handler: F)
    where
        F: Fn(CallArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.insert(name, ParamSpec::fixed(params), Arc::new(FunctionHandler::new(handler)));
    }

    /// Register an async closure receiving every supplied value as a positional list
    pub fn register_variadic_async<F, Fut>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(CallArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.insert(name, ParamSpec::Variadic, Arc::new(FunctionHandler::new(handler)));
    }

    /// Register any [`AsyncMethodHandler`] implementation
    pub fn register_async_handler<T>(&mut self, name: impl Into<String>, params: ParamSpec, handler: T)
    where
        T: AsyncMethodHandler + 'static,
    {
        self.insert(name, params, Arc::new(handler));
    }
}

/// Async counterpart of [`RequestDispatcher`](crate::RequestDispatcher)
pub struct AsyncRequestDispatcher {
    registry: AsyncMethodRegistry,
    codec: Arc<dyn JsonCodec>,
    config: DispatcherConfig,
}

impl AsyncRequestDispatcher {
    pub fn new(registry: AsyncMethodRegistry) -> Self {
        Self {
            registry,
            codec: Arc::new(SerdeJsonCodec),
            config: DispatcherConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_codec(mut self, codec: Arc<dyn JsonCodec>) -> Self {
        self.codec = codec;
        self
    }

    pub fn registry(&self) -> &AsyncMethodRegistry {
        &self.registry
    }

    /// Late registration; must not race with dispatch
    pub fn registry_mut(&mut self) -> &mut AsyncMethodRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub async fn handle_str(&self, text: &str) -> DispatchOutcome {
        if self.config.log_payloads {
            debug!(payload = %text, "Inbound document");
        }
        match self.codec.parse(text) {
            Ok(document) => self.handle_value(&document).await,
            Err(err) => pipeline::parse_failure(&err),
        }
    }

    pub async fn handle_value(&self, document: &Value) -> DispatchOutcome {
        match pipeline::classify(document, &self.config) {
            Document::Single(element) => pipeline::single(self.handle_element(element).await),
            Document::Batch(elements) => {
                debug!(
                    len = elements.len(),
                    concurrent = self.config.concurrent_batches,
                    "Dispatching batch"
                );
                if self.config.concurrent_batches {
                    let responses =
                        join_all(elements.iter().map(|element| self.handle_element(element))).await;
                    pipeline::collect_batch(responses)
                } else {
                    let mut responses = Vec::with_capacity(elements.len());
                    for element in elements {
                        responses.push(self.handle_element(element).await);
                    }
                    pipeline::collect_batch(responses)
                }
            }
            Document::Rejected(violation) => pipeline::rejected(violation),
        }
    }

    /// Text in, text out: `None` when the transport must send nothing
    pub async fn respond(&self, text: &str) -> Result<Option<String>, CodecError> {
        self.handle_str(text)
            .await
            .to_value()
            .map(|document| self.codec.serialize(&document))
            .transpose()
    }

    async fn handle_element(&self, element: &Value) -> Option<JsonRpcMessage> {
        match pipeline::prepare(&self.registry, element) {
            Step::Reply(message) => Some(message),
            Step::Silent => None,
            Step::Invoke(invocation) => {
                let result = invocation.handler.call(invocation.args).await;
                pipeline::conclude(&invocation.method, invocation.id, result)
            }
        }
    }
}

impl From<AsyncMethodRegistry> for AsyncRequestDispatcher {
    fn from(registry: AsyncMethodRegistry) -> Self {
        Self::new(registry)
    }
}
