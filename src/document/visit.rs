//! Tree traversal and tree-wide validators.
//!
//! Every check here is a single visitor passed to [`Document::accept`], so the
//! recursion lives in exactly one place.

use std::collections::HashSet;

use crate::document::value::{Document, DocumentKind};

impl Document {
    /// Pre-order, depth-first, left-to-right traversal.
    ///
    /// Visits the value itself, then each field value of an object or each
    /// element of an array.
    pub fn accept<F>(&self, mut visitor: F)
    where
        F: FnMut(&Document),
    {
        self.walk(&mut visitor);
    }

    fn walk<F>(&self, visitor: &mut F)
    where
        F: FnMut(&Document),
    {
        visitor(self);
        match self {
            Document::Object(object) => {
                for field in object.fields() {
                    field.value.walk(visitor);
                }
            }
            Document::Array(array) => {
                for element in array.elements() {
                    element.walk(visitor);
                }
            }
            _ => {}
        }
    }

    /// True iff no object in the tree has a blank or repeated field name.
    pub fn validate_keys(&self) -> bool {
        let mut valid = true;
        self.accept(|node| {
            if let Document::Object(object) = node {
                let mut seen = HashSet::with_capacity(object.len());
                for field in object.fields() {
                    if field.name.trim().is_empty() || !seen.insert(field.name.as_str()) {
                        valid = false;
                    }
                }
            }
        });
        valid
    }

    /// True iff every array in the tree holds a single non-null kind.
    ///
    /// Nulls are compatible with any kind; an all-null array is valid.
    pub fn validate_array_types(&self) -> bool {
        let mut valid = true;
        self.accept(|node| {
            if let Document::Array(array) = node {
                let mut kinds = array
                    .elements()
                    .iter()
                    .map(Document::kind)
                    .filter(|kind| *kind != DocumentKind::Null);
                if let Some(first) = kinds.next() {
                    if kinds.any(|kind| kind != first) {
                        valid = false;
                    }
                }
            }
        });
        valid
    }
}
