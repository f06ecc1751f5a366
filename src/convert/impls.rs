//! `ToDocument` for standard library and `serde_json` types.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use crate::convert::{ConvertError, ToDocument};
use crate::document::{Array, Document, Field, Number, Object};

impl ToDocument for Document {
    fn to_document(&self) -> Result<Document, ConvertError> {
        Ok(self.clone())
    }
}

impl ToDocument for () {
    fn to_document(&self) -> Result<Document, ConvertError> {
        Ok(Document::Null)
    }
}

impl<T: ToDocument> ToDocument for Option<T> {
    fn to_document(&self) -> Result<Document, ConvertError> {
        match self {
            Some(value) => value.to_document(),
            None => Ok(Document::Null),
        }
    }
}

macro_rules! lossless_to_document {
    ($($ty:ty),*) => {
        $(
            impl ToDocument for $ty {
                fn to_document(&self) -> Result<Document, ConvertError> {
                    Ok(Document::Number(Number::Int(i64::from(*self))))
                }
            }
        )*
    };
}

lossless_to_document!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! wide_to_document {
    ($($ty:ty),*) => {
        $(
            impl ToDocument for $ty {
                fn to_document(&self) -> Result<Document, ConvertError> {
                    i64::try_from(*self)
                        .map(|v| Document::Number(Number::Int(v)))
                        .map_err(|_| ConvertError::UnsupportedType {
                            type_name: stringify!($ty),
                            reason: format!("{} does not fit in a 64-bit signed integer", self),
                        })
                }
            }
        )*
    };
}

wide_to_document!(u64, usize, isize, i128, u128);

impl ToDocument for f64 {
    fn to_document(&self) -> Result<Document, ConvertError> {
        Number::float(*self)
            .map(Document::Number)
            .map_err(|e| ConvertError::UnsupportedType {
                type_name: "f64",
                reason: e.to_string(),
            })
    }
}

impl ToDocument for f32 {
    fn to_document(&self) -> Result<Document, ConvertError> {
        Number::float(f64::from(*self))
            .map(Document::Number)
            .map_err(|e| ConvertError::UnsupportedType {
                type_name: "f32",
                reason: e.to_string(),
            })
    }
}

impl ToDocument for bool {
    fn to_document(&self) -> Result<Document, ConvertError> {
        Ok(Document::Boolean(*self))
    }
}

impl ToDocument for char {
    fn to_document(&self) -> Result<Document, ConvertError> {
        Ok(Document::String(self.to_string()))
    }
}

impl ToDocument for str {
    fn to_document(&self) -> Result<Document, ConvertError> {
        Ok(Document::String(self.to_string()))
    }
}

impl ToDocument for String {
    fn to_document(&self) -> Result<Document, ConvertError> {
        Ok(Document::String(self.clone()))
    }
}

impl ToDocument for Cow<'_, str> {
    fn to_document(&self) -> Result<Document, ConvertError> {
        Ok(Document::String(self.to_string()))
    }
}

impl<T: ToDocument + ?Sized> ToDocument for &T {
    fn to_document(&self) -> Result<Document, ConvertError> {
        (**self).to_document()
    }
}

impl<T: ToDocument + ?Sized> ToDocument for Box<T> {
    fn to_document(&self) -> Result<Document, ConvertError> {
        (**self).to_document()
    }
}

impl<T: ToDocument + ?Sized> ToDocument for Rc<T> {
    fn to_document(&self) -> Result<Document, ConvertError> {
        (**self).to_document()
    }
}

impl<T: ToDocument + ?Sized> ToDocument for Arc<T> {
    fn to_document(&self) -> Result<Document, ConvertError> {
        (**self).to_document()
    }
}

fn sequence<'a, T, I>(items: I) -> Result<Document, ConvertError>
where
    T: ToDocument + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .map(ToDocument::to_document)
        .collect::<Result<Array, ConvertError>>()
        .map(Document::Array)
}

impl<T: ToDocument> ToDocument for [T] {
    fn to_document(&self) -> Result<Document, ConvertError> {
        sequence(self)
    }
}

impl<T: ToDocument, const N: usize> ToDocument for [T; N] {
    fn to_document(&self) -> Result<Document, ConvertError> {
        sequence(self)
    }
}

impl<T: ToDocument> ToDocument for Vec<T> {
    fn to_document(&self) -> Result<Document, ConvertError> {
        sequence(self)
    }
}

impl<T: ToDocument> ToDocument for VecDeque<T> {
    fn to_document(&self) -> Result<Document, ConvertError> {
        sequence(self)
    }
}

/// Decides whether a map key can become a field name.
pub trait MapKey {
    fn field_name(&self) -> Result<String, ConvertError>;
}

impl MapKey for String {
    fn field_name(&self) -> Result<String, ConvertError> {
        Ok(self.clone())
    }
}

impl MapKey for &str {
    fn field_name(&self) -> Result<String, ConvertError> {
        Ok((*self).to_string())
    }
}

impl MapKey for Cow<'_, str> {
    fn field_name(&self) -> Result<String, ConvertError> {
        Ok(self.to_string())
    }
}

macro_rules! non_string_key {
    ($($ty:ty),*) => {
        $(
            impl MapKey for $ty {
                fn field_name(&self) -> Result<String, ConvertError> {
                    Err(ConvertError::NonStringKey {
                        key: format!("{:?}", self),
                    })
                }
            }
        )*
    };
}

non_string_key!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char);

fn mapping<'a, K, V, I>(entries: I) -> Result<Document, ConvertError>
where
    K: MapKey + 'a,
    V: ToDocument + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    let fields = entries
        .into_iter()
        .map(|(key, value)| Ok(Field::new(key.field_name()?, value.to_document()?)))
        .collect::<Result<Vec<_>, ConvertError>>()?;
    Ok(Document::Object(Object::new(fields)?))
}

impl<K: MapKey, V: ToDocument, S> ToDocument for HashMap<K, V, S> {
    fn to_document(&self) -> Result<Document, ConvertError> {
        mapping(self.iter())
    }
}

impl<K: MapKey, V: ToDocument> ToDocument for BTreeMap<K, V> {
    fn to_document(&self) -> Result<Document, ConvertError> {
        mapping(self.iter())
    }
}

impl ToDocument for serde_json::Value {
    fn to_document(&self) -> Result<Document, ConvertError> {
        use serde_json::Value;

        match self {
            Value::Null => Ok(Document::Null),
            Value::Bool(b) => Ok(Document::Boolean(*b)),
            Value::String(s) => Ok(Document::String(s.clone())),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Document::Number(Number::Int(i)))
                } else if n.is_u64() {
                    Err(ConvertError::UnsupportedType {
                        type_name: "serde_json::Number",
                        reason: format!("{} does not fit in a 64-bit signed integer", n),
                    })
                } else {
                    n.as_f64().unwrap_or(f64::NAN).to_document()
                }
            }
            Value::Array(items) => sequence(items),
            Value::Object(map) => {
                let fields = map
                    .iter()
                    .map(|(key, value)| Ok(Field::new(key.clone(), value.to_document()?)))
                    .collect::<Result<Vec<_>, ConvertError>>()?;
                Ok(Document::Object(Object::new(fields)?))
            }
        }
    }
}
