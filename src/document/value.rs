//! Document values and their construction invariants.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

/// Errors raised while building documents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Two fields of the same object share a name.
    #[error("duplicate key '{name}' in object")]
    DuplicateKey { name: String },

    /// Fractional numbers must be finite to have a JSON form.
    #[error("number {value} is not finite")]
    NonFiniteNumber { value: String },
}

/// A JSON number that remembers whether it was integral or fractional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Build a fractional number, rejecting NaN and infinities.
    pub fn float(value: f64) -> Result<Self, DocumentError> {
        if value.is_finite() {
            Ok(Number::Float(value))
        } else {
            Err(DocumentError::NonFiniteNumber {
                value: value.to_string(),
            })
        }
    }

    pub fn is_integral(&self) -> bool {
        matches!(self, Number::Int(_))
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(v) => {
                let text = v.to_string();
                // 1.0 must not print as 1, or it reads back as an integer
                if text.contains(['.', 'e', 'E']) || !v.is_finite() {
                    f.write_str(&text)
                } else {
                    write!(f, "{}.0", text)
                }
            }
        }
    }
}

/// The variant case of a document, ignoring its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentKind::Object => "object",
            DocumentKind::Array => "array",
            DocumentKind::String => "string",
            DocumentKind::Number => "number",
            DocumentKind::Boolean => "boolean",
            DocumentKind::Null => "null",
        };
        f.write_str(name)
    }
}

/// An immutable JSON-like value.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Object(Object),
    Array(Array),
    String(String),
    Number(Number),
    Boolean(bool),
    Null,
}

impl Document {
    /// Build an object document; fails on duplicate field names.
    pub fn object(fields: Vec<Field>) -> Result<Self, DocumentError> {
        Object::new(fields).map(Document::Object)
    }

    pub fn array(elements: Vec<Document>) -> Self {
        Document::Array(Array::new(elements))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Document::String(value.into())
    }

    pub fn int(value: i64) -> Self {
        Document::Number(Number::Int(value))
    }

    pub fn float(value: f64) -> Result<Self, DocumentError> {
        Number::float(value).map(Document::Number)
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Object(_) => DocumentKind::Object,
            Document::Array(_) => DocumentKind::Array,
            Document::String(_) => DocumentKind::String,
            Document::Number(_) => DocumentKind::Number,
            Document::Boolean(_) => DocumentKind::Boolean,
            Document::Null => DocumentKind::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Document::Null)
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Document::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Document::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Document::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Document {
    fn from(value: bool) -> Self {
        Document::Boolean(value)
    }
}

impl From<&str> for Document {
    fn from(value: &str) -> Self {
        Document::String(value.to_string())
    }
}

impl From<String> for Document {
    fn from(value: String) -> Self {
        Document::String(value)
    }
}

impl From<Object> for Document {
    fn from(value: Object) -> Self {
        Document::Object(value)
    }
}

impl From<Array> for Document {
    fn from(value: Array) -> Self {
        Document::Array(value)
    }
}

/// A named member of an object.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: Document,
}

impl Field {
    pub fn new(name: impl Into<String>, value: Document) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Ordered fields with unique names.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    fields: Vec<Field>,
}

impl Object {
    /// Build an object, rejecting the first repeated field name.
    pub fn new(fields: Vec<Field>) -> Result<Self, DocumentError> {
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(DocumentError::DuplicateKey {
                    name: field.name.clone(),
                });
            }
        }
        Ok(Self { fields })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Document> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// New object keeping only the fields accepted by `predicate`, in order.
    pub fn filter<P>(&self, mut predicate: P) -> Object
    where
        P: FnMut(&str, &Document) -> bool,
    {
        // A subset of unique names is still unique.
        Object {
            fields: self
                .fields
                .iter()
                .filter(|field| predicate(&field.name, &field.value))
                .cloned()
                .collect(),
        }
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }
}

/// Ordered sequence of documents.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array {
    elements: Vec<Document>,
}

impl Array {
    pub fn new(elements: Vec<Document>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[Document] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// New array keeping only the elements accepted by `predicate`, in order.
    pub fn filter<P>(&self, mut predicate: P) -> Array
    where
        P: FnMut(&Document) -> bool,
    {
        Array {
            elements: self
                .elements
                .iter()
                .filter(|element| predicate(*element))
                .cloned()
                .collect(),
        }
    }

    /// New array with every element replaced by `transform(element)`.
    pub fn map<T>(&self, transform: T) -> Array
    where
        T: FnMut(&Document) -> Document,
    {
        Array {
            elements: self.elements.iter().map(transform).collect(),
        }
    }

    pub fn into_elements(self) -> Vec<Document> {
        self.elements
    }
}

impl FromIterator<Document> for Array {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Array::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_object() -> Object {
        Object::new(vec![
            Field::new("name", Document::string("Json")),
            Field::new("active", Document::from(true)),
            Field::new("age", Document::int(24)),
            Field::new("extra", Document::Null),
        ])
        .unwrap()
    }

    #[test]
    fn test_unique_names_construct() {
        let object = sample_object();
        assert_eq!(object.len(), 4);
        assert_eq!(object.get("age"), Some(&Document::int(24)));
        assert_eq!(object.get("missing"), None);
    }

    #[test]
    fn test_duplicate_names_fail_construction() {
        let err = Object::new(vec![
            Field::new("a", Document::int(1)),
            Field::new("b", Document::int(2)),
            Field::new("a", Document::int(3)),
        ])
        .unwrap_err();
        assert_eq!(err, DocumentError::DuplicateKey { name: "a".into() });
        assert!(err.to_string().contains("'a'"));
    }

    #[test]
    fn test_number_remembers_representation() {
        assert_eq!(Number::Int(24).to_string(), "24");
        assert_eq!(Number::Float(0.2).to_string(), "0.2");
        assert_eq!(Number::Float(1522.11).to_string(), "1522.11");
        assert_eq!(Number::Float(1.0).to_string(), "1.0");
        assert!(Number::Int(1).is_integral());
        assert!(!Number::Float(1.0).is_integral());
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        assert!(Number::float(f64::NAN).is_err());
        assert!(Document::float(f64::INFINITY).is_err());
        assert!(Document::float(2.5).is_ok());
    }

    #[test]
    fn test_object_filter_preserves_order_and_source() {
        let object = sample_object();
        let filtered = object.filter(|name, value| name != "active" && !value.is_null());
        let names: Vec<&str> = filtered.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "age"]);
        assert_eq!(object.len(), 4);
    }

    #[test]
    fn test_array_filter_and_map() {
        let array = Array::new(vec![
            Document::int(1),
            Document::Null,
            Document::int(3),
        ]);

        let filtered = array.filter(|d| !d.is_null());
        assert_eq!(filtered.elements(), &[Document::int(1), Document::int(3)]);

        let mapped = array.map(|d| match d {
            Document::Number(n) => Document::int(n.as_f64() as i64 * 10),
            other => other.clone(),
        });
        assert_eq!(
            mapped.elements(),
            &[Document::int(10), Document::Null, Document::int(30)]
        );
        assert_eq!(array.len(), 3);
        assert_eq!(array.elements()[0], Document::int(1));
    }

    #[test]
    fn test_kind() {
        assert_eq!(Document::Null.kind(), DocumentKind::Null);
        assert_eq!(Document::array(vec![]).kind(), DocumentKind::Array);
        assert_eq!(Document::float(0.5).unwrap().kind(), DocumentKind::Number);
        assert_eq!(Document::int(5).kind(), DocumentKind::Number);
        assert_eq!(DocumentKind::Boolean.to_string(), "boolean");
    }
}
