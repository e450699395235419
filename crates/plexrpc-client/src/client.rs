//! Client facade bundling a builder and a validator over one id space

use std::sync::Arc;

use plexrpc_protocol::{
    JsonCodec, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, RequestEnvelope, RequestParams,
    SerdeJsonCodec,
};
use serde_json::Value;
use tracing::debug;

use crate::builder::{BatchEntry, RequestBuilder};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, ResponseViolation};
use crate::validator::{ResponseValidator, ValidatedResponse};

/// JSON-RPC client: builds outbound envelopes and checks what comes back.
///
/// No transport is involved; the caller moves the text.
pub struct JsonRpcClient {
    builder: RequestBuilder,
    validator: ResponseValidator,
    codec: Arc<dyn JsonCodec>,
}

impl JsonRpcClient {
    pub fn new(config: ClientConfig) -> Self {
        let builder = RequestBuilder::new().with_config(config);
        let validator = builder.validator();
        Self {
            builder,
            validator,
            codec: Arc::new(SerdeJsonCodec),
        }
    }

    pub fn with_codec(mut self, codec: Arc<dyn JsonCodec>) -> Self {
        self.codec = codec;
        self
    }

    pub fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    pub fn validator(&self) -> &ResponseValidator {
        &self.validator
    }

    pub fn call(&self, method: impl Into<String>, params: Option<RequestParams>) -> JsonRpcRequest {
        self.builder.build_call(method, params)
    }

    pub fn notify(&self, method: impl Into<String>, params: Option<RequestParams>) -> JsonRpcNotification {
        self.builder.build_notification(method, params)
    }

    pub fn batch(&self, entries: impl IntoIterator<Item = BatchEntry>) -> Vec<RequestEnvelope> {
        self.builder.build_batch(entries)
    }

    /// Serialize one envelope to wire text
    pub fn encode(&self, envelope: &RequestEnvelope) -> ClientResult<String> {
        Ok(self.codec.serialize(&envelope.to_value())?)
    }

    /// Serialize a batch to wire text
    pub fn encode_batch(&self, envelopes: &[RequestEnvelope]) -> ClientResult<String> {
        let document = Value::Array(envelopes.iter().map(RequestEnvelope::to_value).collect());
        Ok(self.codec.serialize(&document)?)
    }

    /// Parse and validate response text
    pub fn decode(&self, text: &str) -> ClientResult<ValidatedResponse> {
        let document = self.codec.parse(text)?;
        self.validator.inspect(&document).map_err(|violation| {
            debug!(reason = %violation, "Rejected response");
            ClientError::from(violation)
        })
    }

    /// Parse, validate and unwrap a single response into its result value.
    ///
    /// Error envelopes become [`ClientError::ServerError`].
    pub fn decode_result(&self, text: &str) -> ClientResult<Value> {
        match self.decode(text)? {
            ValidatedResponse::Single(message) => into_result(message),
            ValidatedResponse::Batch(_) => Err(ResponseViolation::UnexpectedBatch.into()),
        }
    }
}

impl Default for JsonRpcClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

/// Result value of a success message, or the server's error
pub fn into_result(message: JsonRpcMessage) -> ClientResult<Value> {
    match message {
        JsonRpcMessage::Response(response) => Ok(response.result),
        JsonRpcMessage::Error(error) => Err(ClientError::server_error(
            error.error.code,
            error.error.message,
            error.error.data,
        )),
    }
}
