//! Request dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! request path "/api/args?n=2&text=PA"
//!     → dispatcher.rs (split off query, look up RouteTable)
//!     → params.rs (bind query/path values, coerce to declared kinds)
//!     → RouteEntry::invoke (handler on its group instance)
//!     → convert (native reply → Document)
//! ```
//!
//! # Design Decisions
//! - Synchronous and lock-free: the route table is read-only
//! - Coercion is a closed set of kinds with one rule each
//! - A route miss is an explicit outcome chosen by `RouteMissPolicy`

pub mod dispatcher;
pub mod params;

use thiserror::Error;

use crate::convert::ConvertError;
use crate::routing::{ParamKind, ParamSource};

pub use dispatcher::Dispatcher;
pub use params::{ArgValue, Arguments};

/// Errors raised while dispatching a request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// No route template matches the request path.
    #[error("no route matches '{path}'")]
    NotFound { path: String },

    /// A tagged parameter has no value in the request.
    #[error("missing {location} '{name}'")]
    MissingParameter {
        name: String,
        location: ParamSource,
    },

    /// A parameter value that does not parse as its declared kind.
    #[error("parameter '{name}' expects {kind}, got '{value}'")]
    InvalidParameter {
        name: String,
        kind: ParamKind,
        value: String,
    },

    /// A parameter declared with a type that has no coercion rule.
    #[error("parameter '{name}' has unsupported type {declared}")]
    UnsupportedParameterType { name: String, declared: String },

    /// A handler read an argument that was never bound.
    #[error("argument '{name}' was not bound")]
    MissingArgument { name: String },

    /// A handler read an argument as the wrong kind.
    #[error("argument '{name}' is {found}, not {expected}")]
    ArgumentType {
        name: String,
        expected: ParamKind,
        found: ParamKind,
    },

    /// The handler itself failed.
    #[error("handler failed: {0}")]
    Handler(String),

    /// The handler's reply could not be converted.
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

impl DispatchError {
    /// Failure raised from inside a handler.
    pub fn handler(message: impl Into<String>) -> Self {
        DispatchError::Handler(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DispatchError::NotFound { .. })
    }
}
