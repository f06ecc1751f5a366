//! JSON text output.
//!
//! # Format
//! - Empty containers render as `{}` / `[]` at any depth
//! - Non-empty containers put each child on its own line, two spaces per level
//! - No trailing commas, no trailing newline

use std::fmt::{self, Write};

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::document::value::{Array, Document, Number, Object};

const INDENT: &str = "  ";

impl Document {
    /// Pretty JSON text starting at nesting level zero.
    pub fn to_text(&self) -> String {
        self.to_text_at(0)
    }

    /// Pretty JSON text for a value nested `level` containers deep.
    ///
    /// The first line is not indented; closing brackets line up with `level`.
    pub fn to_text_at(&self, level: usize) -> String {
        let mut out = String::new();
        write_document(&mut out, self, level);
        out
    }
}

fn write_document(out: &mut String, document: &Document, level: usize) {
    match document {
        Document::Object(object) => write_object(out, object, level),
        Document::Array(array) => write_array(out, array, level),
        Document::String(s) => write_escaped(out, s),
        Document::Number(n) => {
            let _ = write!(out, "{}", n);
        }
        Document::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Document::Null => out.push_str("null"),
    }
}

fn write_object(out: &mut String, object: &Object, level: usize) {
    if object.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{\n");
    for (i, field) in object.fields().iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        push_indent(out, level + 1);
        write_escaped(out, &field.name);
        out.push_str(": ");
        write_document(out, &field.value, level + 1);
    }
    out.push('\n');
    push_indent(out, level);
    out.push('}');
}

fn write_array(out: &mut String, array: &Array, level: usize) {
    if array.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push_str("[\n");
    for (i, element) in array.elements().iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        push_indent(out, level + 1);
        write_document(out, element, level + 1);
    }
    out.push('\n');
    push_indent(out, level);
    out.push(']');
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

fn write_escaped(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Document::Object(object) => object.serialize(serializer),
            Document::Array(array) => array.serialize(serializer),
            Document::String(s) => serializer.serialize_str(s),
            Document::Number(Number::Int(i)) => serializer.serialize_i64(*i),
            Document::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Document::Boolean(b) => serializer.serialize_bool(*b),
            Document::Null => serializer.serialize_unit(),
        }
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for field in self.fields() {
            map.serialize_entry(&field.name, &field.value)?;
        }
        map.end()
    }
}

impl Serialize for Array {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self.elements() {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::value::Field;

    #[test]
    fn test_scalars() {
        assert_eq!(Document::string("teste").to_text(), "\"teste\"");
        assert_eq!(Document::from(false).to_text(), "false");
        assert_eq!(Document::from(true).to_text(), "true");
        assert_eq!(Document::int(1522).to_text(), "1522");
        assert_eq!(Document::float(1522.11).unwrap().to_text(), "1522.11");
        assert_eq!(Document::Null.to_text(), "null");
    }

    #[test]
    fn test_empty_containers_at_any_level() {
        for level in 0..4 {
            assert_eq!(Document::array(vec![]).to_text_at(level), "[]");
            assert_eq!(Document::object(vec![]).unwrap().to_text_at(level), "{}");
        }
    }

    #[test]
    fn test_array_text() {
        let array = Document::array(vec![
            Document::string("a"),
            Document::int(1522),
            Document::from(true),
        ]);
        assert_eq!(array.to_text(), "[\n  \"a\",\n  1522,\n  true\n]");
    }

    #[test]
    fn test_object_text() {
        let object = Document::object(vec![
            Field::new("name", Document::string("Json")),
            Field::new("active", Document::from(true)),
            Field::new("age", Document::int(24)),
            Field::new("extra", Document::Null),
        ])
        .unwrap();
        let expected = "{\n  \"name\": \"Json\",\n  \"active\": true,\n  \"age\": 24,\n  \"extra\": null\n}";
        assert_eq!(object.to_text(), expected);
        assert_eq!(object.to_string(), expected);
    }

    #[test]
    fn test_nested_text() {
        let item = |id: i64, valid: bool| {
            Document::object(vec![
                Field::new("id", Document::int(id)),
                Field::new("valid", Document::from(valid)),
            ])
            .unwrap()
        };
        let document = Document::object(vec![
            Field::new("data", Document::array(vec![item(1, false), item(2, true)])),
            Field::new("tags", Document::array(vec![])),
        ])
        .unwrap();

        let expected = r#"{
  "data": [
    {
      "id": 1,
      "valid": false
    },
    {
      "id": 2,
      "valid": true
    }
  ],
  "tags": []
}"#;
        assert_eq!(document.to_text(), expected);
    }

    #[test]
    fn test_strings_are_escaped() {
        let document = Document::string("say \"hi\"\\\n\u{1}");
        assert_eq!(document.to_text(), r#""say \"hi\"\\\n\u0001""#);
    }

    #[test]
    fn test_serialize_compact() {
        let document = Document::object(vec![
            Field::new("z", Document::int(1)),
            Field::new("a", Document::array(vec![Document::float(0.5).unwrap(), Document::Null])),
        ])
        .unwrap();
        let compact = serde_json::to_string(&document).unwrap();
        assert_eq!(compact, r#"{"z":1,"a":[0.5,null]}"#);
    }
}
