//! JSON text codec seam.
//!
//! The protocol core never parses text itself; it asks a [`JsonCodec`] to turn
//! text into a document and back. [`SerdeJsonCodec`] is the default.

use serde_json::Value;
use thiserror::Error;

/// Failures of the text codec
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON parse error: {0}")]
    Parse(String),

    #[error("JSON serialize error: {0}")]
    Serialize(String),
}

/// Text <-> document conversion used at the dispatch and validation edges
pub trait JsonCodec: Send + Sync {
    fn parse(&self, text: &str) -> Result<Value, CodecError>;

    fn serialize(&self, document: &Value) -> Result<String, CodecError>;
}

/// `serde_json` backed codec
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonCodec;

impl JsonCodec for SerdeJsonCodec {
    fn parse(&self, text: &str) -> Result<Value, CodecError> {
        serde_json::from_str(text).map_err(|e| CodecError::Parse(e.to_string()))
    }

    fn serialize(&self, document: &Value) -> Result<String, CodecError> {
        serde_json::to_string(document).map_err(|e| CodecError::Serialize(e.to_string()))
    }
}
