//! Shape contracts for application types.
//!
//! A record lists its fields in declaration order; an enumerated value names
//! its variant. [`impl_to_document!`](crate::impl_to_document) turns either
//! contract into a [`ToDocument`] implementation.

use crate::convert::{ConvertError, ToDocument};
use crate::document::{Document, Field, Object};

/// A type with a fixed, ordered, named set of fields.
pub trait Record {
    /// Name used in error messages.
    fn type_name(&self) -> &'static str;

    /// Field names and current values, in declaration order.
    fn describe(&self) -> Vec<(&'static str, &dyn ToDocument)>;
}

/// An enumerated value rendered by its symbolic name.
pub trait Symbolic {
    fn symbol(&self) -> &'static str;
}

/// One object field per described field, values converted recursively.
pub fn record_to_document<R: Record + ?Sized>(record: &R) -> Result<Document, ConvertError> {
    let fields = record
        .describe()
        .into_iter()
        .map(|(name, value)| Ok(Field::new(name, value.to_document()?)))
        .collect::<Result<Vec<_>, ConvertError>>()?;

    let object = Object::new(fields).map_err(|e| {
        tracing::warn!(record = record.type_name(), error = %e, "Record described an invalid object");
        ConvertError::from(e)
    })?;
    Ok(Document::Object(object))
}

/// Pairs convert like a two-field record named `first` and `second`.
impl<A: ToDocument, B: ToDocument> Record for (A, B) {
    fn type_name(&self) -> &'static str {
        "Pair"
    }

    fn describe(&self) -> Vec<(&'static str, &dyn ToDocument)> {
        vec![("first", &self.0), ("second", &self.1)]
    }
}

impl<A: ToDocument, B: ToDocument> ToDocument for (A, B) {
    fn to_document(&self) -> Result<Document, ConvertError> {
        record_to_document(self)
    }
}
