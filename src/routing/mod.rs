//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Table construction (at startup):
//!     HandlerGroup[] (declaration order)
//!     → handler.rs (base tag, handlers, parameter specs)
//!     → template.rs (parse "/base/suffix", optional "{name}" placeholder)
//!     → table.rs (apply duplicate policy, freeze as immutable RouteTable)
//!
//! Per request:
//!     request path → RouteTable lookup → RouteEntry + captured path variable
//! ```
//!
//! # Design Decisions
//! - Handlers are registered by ordinary code, not discovered by reflection
//! - Templates are parsed once; malformed templates fail the build
//! - Colliding templates are resolved by an explicit, configured policy
//! - Immutable after construction (shared via Arc without locks)

pub mod handler;
pub mod table;
pub mod template;

use thiserror::Error;

pub use handler::{
    Handler, HandlerFn, HandlerGroup, ParamKind, ParamSource, ParamSpec, Reply, Routes,
};
pub use table::{RouteEntry, RouteTable, RouteTableBuilder};
pub use template::{PathMatch, Template};

/// Errors raised while building the route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Two handlers computed the same template under the `reject` policy.
    #[error("template '{template}' of handler '{handler}' is already bound to '{existing}'")]
    DuplicateTemplate {
        template: String,
        existing: String,
        handler: String,
    },

    /// A template whose placeholder cannot be matched.
    #[error("invalid template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },
}
