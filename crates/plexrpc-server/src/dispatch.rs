//! Synchronous request dispatcher.

use std::sync::Arc;

use plexrpc_protocol::{CodecError, DispatchOutcome, JsonCodec, JsonRpcMessage, SerdeJsonCodec};
use serde_json::Value;
use tracing::debug;

use crate::config::DispatcherConfig;
use crate::handler::MethodHandler;
use crate::pipeline::{self, Document, Step};
use crate::registry::MethodRegistry;

/// Validates inbound documents, binds parameters, invokes registered methods and
/// builds the responses. Batch elements run sequentially in array order.
pub struct RequestDispatcher {
    registry: MethodRegistry<dyn MethodHandler>,
    codec: Arc<dyn JsonCodec>,
    config: DispatcherConfig,
}

impl RequestDispatcher {
    pub fn new(registry: MethodRegistry<dyn MethodHandler>) -> Self {
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

    pub fn registry(&self) -> &MethodRegistry<dyn MethodHandler> {
        &self.registry
    }

    /// Late registration; must not race with dispatch
    pub fn registry_mut(&mut self) -> &mut MethodRegistry<dyn MethodHandler> {
        &mut self.registry
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Parse raw text and dispatch it. Unparseable text yields a Parse error
    /// with a null id.
    pub fn handle_str(&self, text: &str) -> DispatchOutcome {
        if self.config.log_payloads {
            debug!(payload = %text, "Inbound document");
        }
        match self.codec.parse(text) {
            Ok(document) => self.handle_value(&document),
            Err(err) => pipeline::parse_failure(&err),
        }
    }

    /// Dispatch an already parsed document
    pub fn handle_value(&self, document: &Value) -> DispatchOutcome {
        match pipeline::classify(document, &self.config) {
            Document::Single(element) => pipeline::single(self.handle_element(element)),
            Document::Batch(elements) => {
                debug!(len = elements.len(), "Dispatching batch");
                pipeline::collect_batch(elements.iter().map(|element| self.handle_element(element)))
            }
            Document::Rejected(violation) => pipeline::rejected(violation),
        }
    }

    /// Text in, text out: `None` when the transport must send nothing
    pub fn respond(&self, text: &str) -> Result<Option<String>, CodecError> {
        self.handle_str(text)
            .to_value()
            .map(|document| self.codec.serialize(&document))
            .transpose()
    }

    fn handle_element(&self, element: &Value) -> Option<JsonRpcMessage> {
        match pipeline::prepare(&self.registry, element) {
            Step::Reply(message) => Some(message),
            Step::Silent => None,
            Step::Invoke(invocation) => {
                let result = invocation.handler.call(invocation.args);
                pipeline::conclude(&invocation.method, invocation.id, result)
            }
        }
    }
}

impl From<MethodRegistry<dyn MethodHandler>> for RequestDispatcher {
    fn from(registry: MethodRegistry<dyn MethodHandler>) -> Self {
        Self::new(registry)
    }
}
