//! Document model subsystem.
//!
//! # Data Flow
//! ```text
//! handler return value
//!     → convert (ToDocument)
//!     → value.rs (Document tree, invariants checked at construction)
//!     → visit.rs (tree-wide checks: keys, array homogeneity)
//!     → text.rs (pretty JSON text for the HTTP adapter)
//! ```
//!
//! # Design Decisions
//! - Documents are immutable; `filter`/`map` always build new values
//! - Duplicate field names fail at construction, never at serialization
//! - Numbers remember whether they are integral or fractional
//! - Output only: there is no JSON parser

pub mod text;
pub mod value;
pub mod visit;

pub use value::{Array, Document, DocumentError, DocumentKind, Field, Number, Object};
