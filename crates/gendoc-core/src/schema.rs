//! Value-level shape descriptions
//!
//! A type documents itself by implementing [`Describe`], usually through
//! `#[derive(Describe)]`. The returned [`Shape`] mirrors the value it was
//! taken from: optionals record whether they hold a value, sequences keep the
//! shape of their first element only, and records list their fields in
//! declaration order together with the annotation tags the extraction policy
//! reads.
//!
//! Copyright (c) 2025 Gendoc Contributors
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Structural category of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Bool,
    Integer,
    Float,
    String,
    Unit,
    Sequence,
    Map,
    /// An optional wrapper holding nothing
    Optional,
    Record,
}

impl Kind {
    /// Lowercase display form
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Unit => "unit",
            Kind::Sequence => "sequence",
            Kind::Map => "map",
            Kind::Optional => "optional",
            Kind::Record => "record",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of a concrete value
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Scalar value; the kind is one of bool, integer, float, string or unit
    Primitive(Kind),
    /// Collection; only the first element is described
    Sequence(Option<Box<Shape>>),
    /// Keyed collection, never expanded
    Map,
    /// Optional wrapper; `None` is a nil value
    Optional(Option<Box<Shape>>),
    /// Record with named fields
    Record(Record),
}

impl Shape {
    pub fn primitive(kind: Kind) -> Self {
        Shape::Primitive(kind)
    }

    pub fn sequence(first: Option<Shape>) -> Self {
        Shape::Sequence(first.map(Box::new))
    }

    pub fn optional(inner: Option<Shape>) -> Self {
        Shape::Optional(inner.map(Box::new))
    }

    /// Strip `Some` wrappers. A nil optional is returned as is.
    pub fn unwrap_optional(&self) -> &Shape {
        let mut shape = self;
        while let Shape::Optional(Some(inner)) = shape {
            shape = inner;
        }
        shape
    }

    /// Structural kind after unwrapping optionals
    pub fn kind(&self) -> Kind {
        match self.unwrap_optional() {
            Shape::Primitive(kind) => *kind,
            Shape::Sequence(_) => Kind::Sequence,
            Shape::Map => Kind::Map,
            Shape::Optional(_) => Kind::Optional,
            Shape::Record(_) => Kind::Record,
        }
    }

    /// The record behind any number of `Some` wrappers
    pub fn as_record(&self) -> Option<&Record> {
        match self.unwrap_optional() {
            Shape::Record(record) => Some(record),
            _ => None,
        }
    }

    /// True for a nil optional
    pub fn is_nil(&self) -> bool {
        matches!(self.unwrap_optional(), Shape::Optional(None))
    }
}

/// A record: type name plus fields in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub type_name: String,
    pub fields: Vec<FieldMeta>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field
    pub fn field(mut self, field: FieldMeta) -> Self {
        self.fields.push(field);
        self
    }

    /// Finish as a shape
    pub fn into_shape(self) -> Shape {
        Shape::Record(self)
    }
}

/// Metadata for one declared field, the input of the extraction policy
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMeta {
    /// Identifier as declared in the source type
    pub ident: String,
    /// Display form of the declared type
    pub type_name: String,
    /// Annotation tags attached to the field
    pub tags: Tags,
    /// Fields of an embedded member are promoted into the parent
    pub embedded: bool,
    /// Shape of the field's current value
    pub value: Shape,
}

impl FieldMeta {
    pub fn new(ident: impl Into<String>, type_name: impl Into<String>, value: Shape) -> Self {
        Self {
            ident: ident.into(),
            type_name: type_name.into(),
            tags: Tags::default(),
            embedded: false,
            value,
        }
    }

    /// Attach an annotation tag
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key, value);
        self
    }

    /// Mark as embedded
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }
}

/// Ordered key/value annotation tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<(String, String)>);

impl Tags {
    /// Look up a tag. Returns `None` when absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or replace a tag
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Types that can describe the shape of their values
pub trait Describe {
    fn shape(&self) -> Shape;
}

/// A request or response sample: describable and serializable to JSON
///
/// Blanket-implemented for every `Describe + Serialize` type, so samples can
/// be stored type-erased as `Box<dyn Sample>`.
pub trait Sample: Describe {
    fn to_json(&self) -> serde_json::Result<serde_json::Value>;
}

impl<T: Describe + Serialize> Sample for T {
    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl Serialize for dyn Sample + '_ {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.to_json().map_err(serde::ser::Error::custom)?;
        value.serialize(serializer)
    }
}

macro_rules! describe_primitive {
    ($kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl Describe for $ty {
                fn shape(&self) -> Shape {
                    Shape::Primitive($kind)
                }
            }
        )+
    };
}

describe_primitive!(Kind::Bool => bool);
describe_primitive!(Kind::Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
describe_primitive!(Kind::Float => f32, f64);
describe_primitive!(Kind::String => String, str, char);
describe_primitive!(Kind::Unit => ());

impl<T: Describe + ?Sized> Describe for &T {
    fn shape(&self) -> Shape {
        (**self).shape()
    }
}

impl<T: Describe + ?Sized> Describe for &mut T {
    fn shape(&self) -> Shape {
        (**self).shape()
    }
}

impl<T: Describe + ?Sized> Describe for Box<T> {
    fn shape(&self) -> Shape {
        (**self).shape()
    }
}

impl<T: Describe + ?Sized> Describe for Rc<T> {
    fn shape(&self) -> Shape {
        (**self).shape()
    }
}

impl<T: Describe + ?Sized> Describe for Arc<T> {
    fn shape(&self) -> Shape {
        (**self).shape()
    }
}

impl<T: Describe> Describe for Option<T> {
    fn shape(&self) -> Shape {
        Shape::optional(self.as_ref().map(Describe::shape))
    }
}

impl<T: Describe> Describe for [T] {
    fn shape(&self) -> Shape {
        Shape::sequence(self.first().map(Describe::shape))
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn shape(&self) -> Shape {
        Shape::sequence(self.first().map(Describe::shape))
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn shape(&self) -> Shape {
        self.as_slice().shape()
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn shape(&self) -> Shape {
        Shape::sequence(self.front().map(Describe::shape))
    }
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn shape(&self) -> Shape {
        Shape::sequence(self.iter().next().map(Describe::shape))
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn shape(&self) -> Shape {
        Shape::sequence(self.iter().next().map(Describe::shape))
    }
}

impl<K, V, S> Describe for HashMap<K, V, S> {
    fn shape(&self) -> Shape {
        Shape::Map
    }
}

impl<K, V> Describe for BTreeMap<K, V> {
    fn shape(&self) -> Shape {
        Shape::Map
    }
}

/// JSON objects are described as records with fields in key order
impl Describe for serde_json::Value {
    fn shape(&self) -> Shape {
        use serde_json::Value;

        match self {
            Value::Null => Shape::Optional(None),
            Value::Bool(_) => Shape::Primitive(Kind::Bool),
            Value::Number(n) if n.is_f64() => Shape::Primitive(Kind::Float),
            Value::Number(_) => Shape::Primitive(Kind::Integer),
            Value::String(_) => Shape::Primitive(Kind::String),
            Value::Array(items) => items.as_slice().shape(),
            Value::Object(map) => {
                let mut record = Record::new("object");
                for (key, value) in map {
                    record = record.field(FieldMeta::new(key.as_str(), json_type_name(value), value.shape()));
                }
                record.into_shape()
            }
        }
    }
}

impl Describe for serde_json::Map<String, serde_json::Value> {
    fn shape(&self) -> Shape {
        serde_json::Value::Object(self.clone()).shape()
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_option_shapes() {
        let some: Option<i32> = Some(3);
        let none: Option<i32> = None;

        assert_eq!(some.shape().kind(), Kind::Integer);
        assert_eq!(none.shape().kind(), Kind::Optional);
        assert!(none.shape().is_nil());
        assert!(!some.shape().is_nil());
    }

    #[test]
    fn test_nested_option_unwraps_fully() {
        let value: Option<Option<String>> = Some(Some("x".to_string()));
        assert_eq!(value.shape().unwrap_optional(), &Shape::Primitive(Kind::String));

        let inner_none: Option<Option<String>> = Some(None);
        assert!(inner_none.shape().is_nil());
    }

    #[test]
    fn test_sequence_keeps_first_element() {
        let values = vec![json!({"a": 1}), json!({"b": 2, "c": 3})];
        match values.shape() {
            Shape::Sequence(Some(first)) => {
                let record = first.as_record().expect("record");
                assert_eq!(record.fields.len(), 1);
                assert_eq!(record.fields[0].ident, "a");
            }
            other => panic!("unexpected shape: {:?}", other),
        }

        let empty: Vec<String> = Vec::new();
        assert_eq!(empty.shape(), Shape::Sequence(None));
    }

    #[test]
    fn test_json_object_keeps_key_order() {
        let value = json!({"zeta": 1, "alpha": "a", "mid": {"x": 1.5}, "none": null});
        let record = value.shape();
        let record = record.as_record().expect("record");

        let idents: Vec<_> = record.fields.iter().map(|f| f.ident.as_str()).collect();
        assert_eq!(idents, vec!["zeta", "alpha", "mid", "none"]);
        assert_eq!(record.fields[0].type_name, "integer");
        assert_eq!(record.fields[2].value.kind(), Kind::Record);
        assert!(record.fields[3].value.is_nil());
    }

    #[test]
    fn test_tags_replace_existing_key() {
        let mut tags = Tags::default();
        tags.insert("rename", "a");
        tags.insert("comment", "c");
        tags.insert("rename", "b");

        assert_eq!(tags.get("rename"), Some("b"));
        assert_eq!(tags.iter().count(), 2);
        assert!(!tags.contains("validate"));
    }

    #[test]
    fn test_manual_record_builder() {
        let shape = Record::new("Login")
            .field(FieldMeta::new("user", "String", "bob".shape()).tag("validate", "required"))
            .field(FieldMeta::new("meta", "Meta", Record::new("Meta").into_shape()).embedded())
            .into_shape();

        let record = shape.as_record().unwrap();
        assert_eq!(record.type_name, "Login");
        assert_eq!(record.fields[0].tags.get("validate"), Some("required"));
        assert!(record.fields[1].embedded);
    }

    #[test]
    fn test_boxed_sample_serializes() {
        let sample: Box<dyn Sample> = Box::new(json!({"code": 0}));
        let text = serde_json::to_string(&sample).unwrap();
        assert_eq!(text, r#"{"code":0}"#);
        assert_eq!(sample.shape().kind(), Kind::Record);
    }
}
