//! Request and notification envelope construction.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use plexrpc_protocol::{JsonRpcNotification, JsonRpcRequest, RequestEnvelope, RequestId, RequestParams};
use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::validator::ResponseValidator;

/// Client-side identifier counter.
///
/// Starts at 0; every call advances it by one and is stamped with the new
/// value, so issued ids are `1..=current()`. Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct IdSpace {
    counter: Arc<AtomicU64>,
}

impl IdSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the counter and return the new id
    pub fn next_id(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The highest id issued so far, 0 before the first call
    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }
}

/// Whether a batch entry expects a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallType {
    Call,
    Notification,
}

impl FromStr for CallType {
    type Err = ClientError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "call" => Ok(CallType::Call),
            "notification" => Ok(CallType::Notification),
            other => Err(ClientError::InvalidCallType(other.to_string())),
        }
    }
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallType::Call => write!(f, "call"),
            CallType::Notification => write!(f, "notification"),
        }
    }
}

/// One element of a batch to build
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub method: String,
    pub params: Option<RequestParams>,
    pub call_type: CallType,
}

impl BatchEntry {
    pub fn new(method: impl Into<String>, params: Option<RequestParams>, call_type: CallType) -> Self {
        Self {
            method: method.into(),
            params,
            call_type,
        }
    }

    pub fn call(method: impl Into<String>, params: Option<RequestParams>) -> Self {
        Self::new(method, params, CallType::Call)
    }

    pub fn notification(method: impl Into<String>, params: Option<RequestParams>) -> Self {
        Self::new(method, params, CallType::Notification)
    }
}

/// Builds request envelopes over one identifier space
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    ids: IdSpace,
    config: ClientConfig,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Build over an existing identifier space
    pub fn with_ids(ids: IdSpace) -> Self {
        Self {
            ids,
            config: ClientConfig::default(),
        }
    }

    pub fn ids(&self) -> &IdSpace {
        &self.ids
    }

    /// A validator checking ids against this builder's counter
    pub fn validator(&self) -> ResponseValidator {
        ResponseValidator::new(self.ids.clone())
    }

    /// A call envelope stamped with the next id. `params` is omitted when `None`.
    pub fn build_call(&self, method: impl Into<String>, params: Option<RequestParams>) -> JsonRpcRequest {
        let id = self.ids.next_id();
        let request = JsonRpcRequest::new(RequestId::from(id), method, params);
        debug!(method = %request.method, id = id, "Built call");
        if self.config.log_envelopes {
            trace!(envelope = ?request, "Call envelope");
        }
        request
    }

    /// A notification envelope; the id counter is left untouched
    pub fn build_notification(
        &self,
        method: impl Into<String>,
        params: Option<RequestParams>,
    ) -> JsonRpcNotification {
        let notification = JsonRpcNotification::new(method, params);
        debug!(method = %notification.method, "Built notification");
        if self.config.log_envelopes {
            trace!(envelope = ?notification, "Notification envelope");
        }
        notification
    }

    /// Build every entry in order; each call entry takes the next id
    pub fn build_batch(&self, entries: impl IntoIterator<Item = BatchEntry>) -> Vec<RequestEnvelope> {
        entries
            .into_iter()
            .map(|entry| match entry.call_type {
                CallType::Call => self.build_call(entry.method, entry.params).into(),
                CallType::Notification => self.build_notification(entry.method, entry.params).into(),
            })
            .collect()
    }
}
