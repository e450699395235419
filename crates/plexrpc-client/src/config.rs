//! Configuration types for the client

use serde::{Deserialize, Serialize};

/// Main client configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Trace every built envelope
    pub log_envelopes: bool,
}

impl ClientConfig {
    pub fn with_log_envelopes(mut self, enabled: bool) -> Self {
        self.log_envelopes = enabled;
        self
    }
}
