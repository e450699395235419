//! Method table: name -> handler plus its formal parameter list.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::HandlerResult;
use crate::handler::{CallArgs, MethodHandler};

/// How a method's actual parameters are bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamSpec {
    /// Declared formal parameter names, in invocation order
    Fixed(Vec<String>),
    /// No formal list; every supplied value is passed through positionally
    Variadic,
}

impl ParamSpec {
    pub fn fixed(names: &[&str]) -> Self {
        ParamSpec::Fixed(names.iter().map(|name| name.to_string()).collect())
    }

    pub fn is_variadic(&self) -> bool {
        matches!(self, ParamSpec::Variadic)
    }

    /// Declared names; empty for variadic bindings
    pub fn names(&self) -> &[String] {
        match self {
            ParamSpec::Fixed(names) => names,
            ParamSpec::Variadic => &[],
        }
    }
}

/// A registered method: its parameter binding and the handler invoked for it
pub struct MethodBinding<H: ?Sized> {
    params: ParamSpec,
    handler: Arc<H>,
}

impl<H: ?Sized> MethodBinding<H> {
    pub fn new(params: ParamSpec, handler: Arc<H>) -> Self {
        Self { params, handler }
    }

    pub fn params(&self) -> &ParamSpec {
        &self.params
    }

    pub fn handler(&self) -> &Arc<H> {
        &self.handler
    }
}

impl<H: ?Sized> Clone for MethodBinding<H> {
    fn clone(&self) -> Self {
        Self {
            params: self.params.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<H: ?Sized> fmt::Debug for MethodBinding<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodBinding")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Name -> [`MethodBinding`] table owned by one server instance.
///
/// Registering a name twice replaces the earlier binding. The table is meant to
/// be filled before dispatch starts; mutation during live dispatch has to be
/// synchronized by the caller.
pub struct MethodRegistry<H: ?Sized = dyn MethodHandler> {
    methods: HashMap<String, MethodBinding<H>>,
}

impl<H: ?Sized> MethodRegistry<H> {
    pub fn new() -> Self {
        Self {
            methods: HashMap::new(),
        }
    }

    /// Store a binding under `name`, replacing any earlier one
    pub fn insert(&mut self, name: impl Into<String>, params: ParamSpec, handler: Arc<H>) {
        let name = name.into();
        let binding = MethodBinding::new(params, handler);
        if self.methods.insert(name.clone(), binding).is_some() {
            debug!(method = %name, "Replaced existing method registration");
        } else {
            debug!(method = %name, "Registered method");
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn resolve(&self, name: &str) -> Option<&MethodBinding<H>> {
        self.methods.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<MethodBinding<H>> {
        self.methods.remove(name)
    }

    /// Registered method names, sorted
    pub fn methods(&self) -> Vec<String> {
        let mut names: Vec<String> = self.methods.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<H: ?Sized> Default for MethodRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> fmt::Debug for MethodRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodRegistry")
            .field("methods", &self.methods())
            .finish()
    }
}

impl MethodRegistry<dyn MethodHandler> {
    /// Register a closure taking the formal parameters `params`, in that order
    pub fn register<F>(&mut self, name: impl Into<String>, params: &[&str], handler: F)
    where
        F: Fn(CallArgs) -> HandlerResult + Send + Sync + 'static,
    {
        self.insert(name, ParamSpec::fixed(params), Arc::new(handler));
    }

    /// Register a closure receiving every supplied value as a positional list
    pub fn register_variadic<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(CallArgs) -> HandlerResult + Send + Sync + 'static,
    {
        self.insert(name, ParamSpec::Variadic, Arc::new(handler));
    }

    /// Register any [`MethodHandler`] implementation
    pub fn register_handler<T>(&mut self, name: impl Into<String>, params: ParamSpec, handler: T)
    where
        T: MethodHandler + 'static,
    {
        self.insert(name, params, Arc::new(handler));
    }
}
