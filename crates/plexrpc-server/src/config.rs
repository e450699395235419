//! Configuration types for the request dispatcher

use serde::{Deserialize, Serialize};

/// Dispatcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Longest batch array accepted; longer batches are a single Invalid Request
    pub max_batch_len: Option<usize>,

    /// Evaluate batch elements concurrently (async dispatcher only)
    pub concurrent_batches: bool,

    /// Include raw inbound text in debug logs
    pub log_payloads: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            max_batch_len: None,
            concurrent_batches: true,
            log_payloads: false,
        }
    }
}

impl DispatcherConfig {
    pub fn with_max_batch_len(mut self, max: usize) -> Self {
        self.max_batch_len = Some(max);
        self
    }

    pub fn with_concurrent_batches(mut self, enabled: bool) -> Self {
        self.concurrent_batches = enabled;
        self
    }

    pub fn with_log_payloads(mut self, enabled: bool) -> Self {
        self.log_payloads = enabled;
        self
    }

    /// Whether a batch of `len` elements exceeds the configured limit
    pub fn batch_too_large(&self, len: usize) -> bool {
        self.max_batch_len.is_some_and(|max| len > max)
    }
}
