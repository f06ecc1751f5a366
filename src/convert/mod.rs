//! Structural conversion from native values to documents.
//!
//! # Data Flow
//! ```text
//! handler return value (Box<dyn ToDocument>)
//!     → impls.rs (primitives, options, sequences, maps, pairs, serde_json)
//!     → record.rs (records describe their fields, enums name their variant)
//!     → Document
//! ```
//!
//! # Design Decisions
//! - No runtime introspection: each type states its own shape
//! - Every branch is total; values that have no lossless document form fail
//!   with `UnsupportedType` instead of being dropped or guessed at
//! - Map keys must be strings; anything else fails with `NonStringKey`

pub mod impls;
pub mod record;

use thiserror::Error;

use crate::document::{Document, DocumentError};

pub use impls::MapKey;
pub use record::{Record, Symbolic};

/// Errors raised while converting a native value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// A map key that is not a string.
    #[error("map key {key} is not a string")]
    NonStringKey { key: String },

    /// A value with no lossless document representation.
    #[error("unsupported value of type {type_name}: {reason}")]
    UnsupportedType {
        type_name: &'static str,
        reason: String,
    },

    /// The converted fields did not form a valid object.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Conversion into the document model.
pub trait ToDocument {
    fn to_document(&self) -> Result<Document, ConvertError>;
}

/// Convert any supported value.
pub fn to_document<T: ToDocument + ?Sized>(value: &T) -> Result<Document, ConvertError> {
    value.to_document()
}

/// Implement [`ToDocument`] for a type through one of the shape contracts.
///
/// ```rust,ignore
/// impl_to_document!(record Person);
/// impl_to_document!(symbolic Color);
/// ```
#[macro_export]
macro_rules! impl_to_document {
    (record $ty:ty) => {
        impl $crate::convert::ToDocument for $ty {
            fn to_document(
                &self,
            ) -> ::std::result::Result<$crate::document::Document, $crate::convert::ConvertError>
            {
                $crate::convert::record::record_to_document(self)
            }
        }
    };
    (symbolic $ty:ty) => {
        impl $crate::convert::ToDocument for $ty {
            fn to_document(
                &self,
            ) -> ::std::result::Result<$crate::document::Document, $crate::convert::ConvertError>
            {
                ::std::result::Result::Ok($crate::document::Document::String(
                    $crate::convert::Symbolic::symbol(self).to_string(),
                ))
            }
        }
    };
}
