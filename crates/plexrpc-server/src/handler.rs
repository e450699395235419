//! Method handler seam and the argument list handed to it.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{HandlerError, HandlerResult};

/// Ordered argument list a handler is invoked with.
///
/// Positional params arrive verbatim, named params arrive reordered into the
/// declared formal order, and variadic methods receive every supplied value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs(Vec<Value>);

impl CallArgs {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }

    /// The argument at `index`, or `InvalidParams` when absent
    pub fn require(&self, index: usize) -> Result<&Value, HandlerError> {
        self.0
            .get(index)
            .ok_or_else(|| HandlerError::invalid_params(format!("missing argument {}", index)))
    }

    pub fn i64_at(&self, index: usize) -> Result<i64, HandlerError> {
        self.require(index)?
            .as_i64()
            .ok_or_else(|| HandlerError::invalid_params(format!("argument {} is not an integer", index)))
    }

    pub fn f64_at(&self, index: usize) -> Result<f64, HandlerError> {
        self.require(index)?
            .as_f64()
            .ok_or_else(|| HandlerError::invalid_params(format!("argument {} is not a number", index)))
    }

    pub fn str_at(&self, index: usize) -> Result<&str, HandlerError> {
        self.require(index)?
            .as_str()
            .ok_or_else(|| HandlerError::invalid_params(format!("argument {} is not a string", index)))
    }

    /// Deserialize the argument at `index` into any serde type
    pub fn parse_at<T: DeserializeOwned>(&self, index: usize) -> Result<T, HandlerError> {
        let value = self.require(index)?.clone();
        Ok(serde_json::from_value(value)?)
    }
}

impl From<Vec<Value>> for CallArgs {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl IntoIterator for CallArgs {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CallArgs {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Synchronous method handler.
///
/// Plain closures `Fn(CallArgs) -> HandlerResult` implement this trait.
///
/// Report failures as [`HandlerError::Internal`](crate::HandlerError::Internal)
/// rather than panicking. A panic is not caught by the dispatcher: it unwinds
/// out of `handle_str`/`handle_value`, even for a notification whose failure
/// would otherwise be swallowed.
pub trait MethodHandler: Send + Sync {
    fn call(&self, args: CallArgs) -> HandlerResult;
}

impl<F> MethodHandler for F
where
    F: Fn(CallArgs) -> HandlerResult + Send + Sync,
{
    fn call(&self, args: CallArgs) -> HandlerResult {
        self(args)
    }
}
