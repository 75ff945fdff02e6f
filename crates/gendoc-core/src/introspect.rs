//! Schema introspection
//!
//! Turns a [`Shape`] into an ordered list of [`Field`] descriptors. Records are
//! walked in declaration order; fields of embedded members are spliced into
//! the parent at the member's position; nested records become `children`.
//!
//! The schema comes from shape, not content: a collection sample is
//! described by its first element only, and an empty collection yields no
//! fields. A nil optional stays unexpanded.
//!
//! Copyright (c) 2025 Gendoc Contributors
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::policy::{ExtractionPolicy, SKIP_NAME};
use crate::schema::{Describe, Kind, Record, Sample, Shape};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Default limit on record nesting
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// One entry of an extracted schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub kind: Kind,
    pub required: bool,
    pub description: String,
    /// Fields of a nested record; empty unless `kind` is `record`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Field>,
}

impl Field {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Walks shapes using an extraction policy
#[derive(Debug, Clone)]
pub struct Introspector<'p> {
    policy: &'p ExtractionPolicy,
    max_depth: usize,
}

impl<'p> Introspector<'p> {
    pub fn new(policy: &'p ExtractionPolicy) -> Self {
        Self {
            policy,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Extract the fields of a value
    pub fn extract_value<T: Describe + ?Sized>(&self, value: &T) -> Result<Vec<Field>> {
        self.extract(&value.shape())
    }

    /// Extract the fields of an optional sample; `None` yields no fields
    pub fn extract_sample(&self, sample: Option<&dyn Sample>) -> Result<Vec<Field>> {
        match sample {
            Some(sample) => self.extract(&sample.shape()),
            None => Ok(Vec::new()),
        }
    }

    /// Extract the fields of a shape
    ///
    /// Fails with a configuration error when a non-nil value is not a record
    /// after unwrapping optionals and taking the first collection element.
    pub fn extract(&self, shape: &Shape) -> Result<Vec<Field>> {
        match shape {
            Shape::Optional(None) | Shape::Sequence(None) => Ok(Vec::new()),
            Shape::Optional(Some(inner)) | Shape::Sequence(Some(inner)) => self.extract(inner),
            Shape::Record(record) => self.record_fields(record, 0),
            Shape::Primitive(_) | Shape::Map => Err(Error::configuration(format!(
                "cannot introspect a {} value: samples must be records, collections of records, or nil",
                shape.kind()
            ))),
        }
    }

    fn record_fields(&self, record: &Record, depth: usize) -> Result<Vec<Field>> {
        if depth > self.max_depth {
            return Err(Error::configuration(format!(
                "record '{}' is nested deeper than {} levels",
                record.type_name, self.max_depth
            )));
        }

        let mut fields = Vec::with_capacity(record.fields.len());
        for meta in &record.fields {
            let name = self.policy.name_of(meta);
            if name == SKIP_NAME {
                debug!(record = %record.type_name, field = %meta.ident, "Skipping hidden field");
                continue;
            }

            let value = meta.value.unwrap_optional();

            if meta.embedded {
                match value {
                    Shape::Record(inner) => {
                        debug!(
                            record = %record.type_name,
                            embedded = %inner.type_name,
                            "Splicing embedded record"
                        );
                        fields.extend(self.record_fields(inner, depth + 1)?);
                    }
                    Shape::Optional(None) => {}
                    // a flattened map has no fixed keys to splice
                    Shape::Map => {
                        debug!(
                            record = %record.type_name,
                            field = %meta.ident,
                            "Embedded map contributes no fields"
                        );
                    }
                    other => {
                        return Err(Error::configuration(format!(
                            "embedded field '{}' of '{}' holds a {} value, expected a record",
                            meta.ident,
                            record.type_name,
                            other.kind()
                        )));
                    }
                }
                continue;
            }

            let children = match value {
                Shape::Record(inner) => self.record_fields(inner, depth + 1)?,
                _ => Vec::new(),
            };

            trace!(field = %name, kind = %value.kind(), children = children.len(), "Extracted field");

            fields.push(Field {
                name,
                type_name: meta.type_name.clone(),
                kind: value.kind(),
                required: self.policy.is_required(meta),
                description: self.policy.description_of(meta),
                children,
            });
        }

        Ok(fields)
    }
}

/// Extract the fields of a value with the given policy
pub fn extract_fields<T: Describe + ?Sized>(value: &T, policy: &ExtractionPolicy) -> Result<Vec<Field>> {
    Introspector::new(policy).extract_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldMeta;
    use serde_json::json;

    fn string_field(ident: &str) -> FieldMeta {
        FieldMeta::new(ident, "String", Shape::Primitive(Kind::String))
    }

    fn common() -> Record {
        Record::new("Common")
            .field(FieldMeta::new("time", "i64", Shape::Primitive(Kind::Integer)).tag("rename", "-"))
            .field(string_field("source").tag("rename", "Source").tag("validate", "required"))
    }

    #[test]
    fn test_nil_and_empty_samples() {
        let policy = ExtractionPolicy::default();
        let introspector = Introspector::new(&policy);

        assert!(introspector.extract(&Shape::Optional(None)).unwrap().is_empty());
        assert!(introspector.extract(&Shape::Sequence(None)).unwrap().is_empty());
        assert!(introspector.extract_sample(None).unwrap().is_empty());
    }

    #[test]
    fn test_primitive_sample_is_configuration_error() {
        let policy = ExtractionPolicy::default();
        let err = extract_fields(&42_i32, &policy).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("integer"));

        let err = extract_fields(&vec![1, 2, 3], &policy).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_embedded_fields_are_spliced() {
        let shape = Record::new("CreateUser")
            .field(FieldMeta::new("common", "Common", common().into_shape()).embedded())
            .field(string_field("user_name").tag("rename", "UserName"))
            .into_shape();

        let policy = ExtractionPolicy::default();
        let fields = Introspector::new(&policy).extract(&shape).unwrap();

        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Source", "UserName"]);
        assert!(fields[0].required);
        assert!(!fields[1].required);
    }

    #[test]
    fn test_embedded_nil_contributes_nothing() {
        let shape = Record::new("Outer")
            .field(FieldMeta::new("common", "Option<Common>", Shape::Optional(None)).embedded())
            .field(string_field("id"))
            .into_shape();

        let policy = ExtractionPolicy::default();
        let fields = Introspector::new(&policy).extract(&shape).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "id");
    }

    #[test]
    fn test_embedded_map_contributes_nothing() {
        let shape = Record::new("Outer")
            .field(string_field("id"))
            .field(FieldMeta::new("extra", "HashMap<String, String>", Shape::Map).embedded())
            .into_shape();

        let policy = ExtractionPolicy::default();
        let fields = Introspector::new(&policy).extract(&shape).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "id");
    }

    #[test]
    fn test_embedded_non_record_is_rejected() {
        let shape = Record::new("Outer")
            .field(string_field("label").embedded())
            .into_shape();

        let policy = ExtractionPolicy::default();
        let err = Introspector::new(&policy).extract(&shape).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("label"));
    }

    #[test]
    fn test_nil_optional_field_is_unexpanded() {
        let shape = Record::new("Outer")
            .field(FieldMeta::new("inner", "Option<Common>", Shape::Optional(None)))
            .field(FieldMeta::new(
                "present",
                "Option<Common>",
                Shape::optional(Some(common().into_shape())),
            ))
            .into_shape();

        let policy = ExtractionPolicy::default();
        let fields = Introspector::new(&policy).extract(&shape).unwrap();

        assert_eq!(fields[0].kind, Kind::Optional);
        assert!(fields[0].children.is_empty());
        assert_eq!(fields[1].kind, Kind::Record);
        assert_eq!(fields[1].children.len(), 1);
        assert_eq!(fields[1].children[0].name, "Source");
    }

    #[test]
    fn test_sequence_fields_are_not_expanded() {
        let sample = json!({"tags": [{"name": "a"}], "owner": {"id": 1}});
        let policy = ExtractionPolicy::default();
        let fields = extract_fields(&sample, &policy).unwrap();

        assert_eq!(fields[0].kind, Kind::Sequence);
        assert!(fields[0].children.is_empty());
        assert_eq!(fields[1].kind, Kind::Record);
        assert_eq!(fields[1].children[0].name, "id");
    }

    #[test]
    fn test_collection_sample_uses_first_element() {
        let sample = json!([{"a": 1, "b": 2}, {"c": 3}]);
        let policy = ExtractionPolicy::default();
        let fields = extract_fields(&sample, &policy).unwrap();

        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_depth_guard() {
        let mut shape = Record::new("Leaf").field(string_field("v")).into_shape();
        for level in 0..5 {
            shape = Record::new(format!("Level{}", level))
                .field(FieldMeta::new("next", "Next", shape))
                .into_shape();
        }

        let policy = ExtractionPolicy::default();
        assert!(Introspector::new(&policy).extract(&shape).is_ok());

        let err = Introspector::new(&policy)
            .with_max_depth(3)
            .extract(&shape)
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("deeper than 3"));
    }

    #[test]
    fn test_field_serialization() {
        let field = Field {
            name: "UserName".to_string(),
            type_name: "String".to_string(),
            kind: Kind::String,
            required: true,
            description: "User name".to_string(),
            children: Vec::new(),
        };

        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["type"], "String");
        assert_eq!(value["kind"], "string");
        assert!(value.get("children").is_none());
    }
}
