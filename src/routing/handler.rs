//! Handler groups and handler descriptors.
//!
//! A handler group owns a base path tag and lists its handlers; each handler
//! carries an optional path suffix, its declared parameters and a plain
//! function that invokes it on the group instance.

use std::fmt;

use crate::convert::ToDocument;
use crate::dispatch::{Arguments, DispatchError};

/// Native value returned by a handler, converted after invocation.
pub type Reply = Box<dyn ToDocument>;

/// Invocation function of a handler on its group instance.
pub type HandlerFn<G> = fn(&G, &Arguments) -> Result<Reply, DispatchError>;

/// Declared type of a handler parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Int,
    Float,
    Bool,
    Str,
    /// A declared type with no coercion rule.
    Other(&'static str),
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Int => f.write_str("int"),
            ParamKind::Float => f.write_str("float"),
            ParamKind::Bool => f.write_str("bool"),
            ParamKind::Str => f.write_str("string"),
            ParamKind::Other(name) => f.write_str(name),
        }
    }
}

/// Where a parameter's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    /// The remainder of the request path after the template's marker.
    Path,
    /// A `key=value` pair of the query string.
    Query,
    /// Declared but never bound by the dispatcher.
    Untagged,
}

impl fmt::Display for ParamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamSource::Path => f.write_str("path variable"),
            ParamSource::Query => f.write_str("query parameter"),
            ParamSource::Untagged => f.write_str("untagged parameter"),
        }
    }
}

/// A declared handler parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub source: ParamSource,
}

impl ParamSpec {
    pub fn query(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            source: ParamSource::Query,
        }
    }

    pub fn path(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            source: ParamSource::Path,
        }
    }

    pub fn untagged(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            source: ParamSource::Untagged,
        }
    }
}

/// One endpoint of a handler group.
pub struct Handler<G> {
    pub(crate) name: &'static str,
    pub(crate) suffix: Option<&'static str>,
    pub(crate) params: Vec<ParamSpec>,
    pub(crate) invoke: HandlerFn<G>,
}

impl<G> Handler<G> {
    /// A handler without a path suffix; it binds to the bare base template.
    pub fn new(name: &'static str, invoke: HandlerFn<G>) -> Self {
        Self {
            name,
            suffix: None,
            params: Vec::new(),
            invoke,
        }
    }

    /// Path suffix appended to the group's base template.
    pub fn at(&mut self, suffix: &'static str) -> &mut Self {
        self.suffix = Some(suffix);
        self
    }

    /// Declare the next parameter.
    pub fn param(&mut self, spec: ParamSpec) -> &mut Self {
        self.params.push(spec);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn suffix(&self) -> Option<&'static str> {
        self.suffix
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }
}

impl<G> fmt::Debug for Handler<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("name", &self.name)
            .field("suffix", &self.suffix)
            .field("params", &self.params)
            .finish()
    }
}

/// Handlers of one group, in declaration order.
#[derive(Debug)]
pub struct Routes<G> {
    handlers: Vec<Handler<G>>,
}

impl<G> Routes<G> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Declare a handler; chain `at` and `param` on the result.
    pub fn handler(&mut self, name: &'static str, invoke: HandlerFn<G>) -> &mut Handler<G> {
        let index = self.handlers.len();
        self.handlers.push(Handler::new(name, invoke));
        &mut self.handlers[index]
    }

    pub fn handlers(&self) -> &[Handler<G>] {
        &self.handlers
    }

    pub fn into_handlers(self) -> Vec<Handler<G>> {
        self.handlers
    }
}

impl<G> Default for Routes<G> {
    fn default() -> Self {
        Self::new()
    }
}

/// A set of related handlers sharing a base path tag.
///
/// Instances are shared across concurrent requests; any mutable state they
/// hold must bring its own synchronization.
pub trait HandlerGroup: Send + Sync + 'static {
    /// Base tag; the group's templates start with `/{base_tag}/`.
    fn base_tag(&self) -> &str;

    /// Declare the group's handlers in order.
    fn register(&self, routes: &mut Routes<Self>)
    where
        Self: Sized;
}
