//! Field extraction policy
//!
//! Three replaceable functions decide a field's public name, whether it is
//! required, and its description. The defaults read the annotation tags
//! written by `#[derive(Describe)]`:
//!
//! | function      | tag        | rule                                      |
//! |---------------|------------|-------------------------------------------|
//! | name          | `rename`   | tag value when non-empty, else the ident  |
//! | required      | `validate` | true iff the value contains `required`    |
//! | description   | `comment`  | tag value, else empty                     |
//!
//! A resolved name equal to [`SKIP_NAME`] hides the field.

use crate::schema::FieldMeta;
use std::fmt;
use std::sync::Arc;

/// Name that removes a field from the schema
pub const SKIP_NAME: &str = "-";

/// Tag holding the alternate public name
pub const RENAME_TAG: &str = "rename";

/// Tag holding validation rules
pub const VALIDATE_TAG: &str = "validate";

/// Tag holding the field description
pub const COMMENT_TAG: &str = "comment";

pub type NameFn = Arc<dyn Fn(&FieldMeta) -> String + Send + Sync>;
pub type RequiredFn = Arc<dyn Fn(&FieldMeta) -> bool + Send + Sync>;
pub type DescriptionFn = Arc<dyn Fn(&FieldMeta) -> String + Send + Sync>;

/// Per-field extraction rules, passed explicitly to the introspector
#[derive(Clone)]
pub struct ExtractionPolicy {
    name: NameFn,
    required: RequiredFn,
    description: DescriptionFn,
}

impl ExtractionPolicy {
    /// Replace the name function
    pub fn with_name<F>(mut self, f: F) -> Self
    where
        F: Fn(&FieldMeta) -> String + Send + Sync + 'static,
    {
        self.name = Arc::new(f);
        self
    }

    /// Replace the required function
    pub fn with_required<F>(mut self, f: F) -> Self
    where
        F: Fn(&FieldMeta) -> bool + Send + Sync + 'static,
    {
        self.required = Arc::new(f);
        self
    }

    /// Replace the description function
    pub fn with_description<F>(mut self, f: F) -> Self
    where
        F: Fn(&FieldMeta) -> String + Send + Sync + 'static,
    {
        self.description = Arc::new(f);
        self
    }

    pub fn name_of(&self, field: &FieldMeta) -> String {
        (self.name)(field)
    }

    pub fn is_required(&self, field: &FieldMeta) -> bool {
        (self.required)(field)
    }

    pub fn description_of(&self, field: &FieldMeta) -> String {
        (self.description)(field)
    }

    /// True when the field is hidden by the sentinel name
    pub fn is_skipped(&self, field: &FieldMeta) -> bool {
        self.name_of(field) == SKIP_NAME
    }
}

impl Default for ExtractionPolicy {
    fn default() -> Self {
        Self {
            name: Arc::new(default_name),
            required: Arc::new(default_required),
            description: Arc::new(default_description),
        }
    }
}

impl fmt::Debug for ExtractionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionPolicy").finish_non_exhaustive()
    }
}

/// `rename` tag, falling back to the declared identifier
pub fn default_name(field: &FieldMeta) -> String {
    match field.tags.get(RENAME_TAG) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => field.ident.clone(),
    }
}

/// True iff the `validate` tag contains `required`
pub fn default_required(field: &FieldMeta) -> bool {
    field
        .tags
        .get(VALIDATE_TAG)
        .map(|rules| rules.contains("required"))
        .unwrap_or(false)
}

/// `comment` tag or empty
pub fn default_description(field: &FieldMeta) -> String {
    field.tags.get(COMMENT_TAG).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Kind, Shape};

    fn meta(ident: &str) -> FieldMeta {
        FieldMeta::new(ident, "String", Shape::Primitive(Kind::String))
    }

    #[test]
    fn test_default_name() {
        assert_eq!(default_name(&meta("user_name")), "user_name");
        assert_eq!(default_name(&meta("user_name").tag("rename", "UserName")), "UserName");
        assert_eq!(default_name(&meta("user_name").tag("rename", "")), "user_name");
    }

    #[test]
    fn test_default_required() {
        assert!(!default_required(&meta("a")));
        assert!(default_required(&meta("a").tag("validate", "required")));
        assert!(default_required(&meta("a").tag("validate", "length:1,10|required")));
        assert!(!default_required(&meta("a").tag("validate", "length:1,10")));
    }

    #[test]
    fn test_default_description() {
        assert_eq!(default_description(&meta("a")), "");
        assert_eq!(default_description(&meta("a").tag("comment", "User name")), "User name");
    }

    #[test]
    fn test_skip_sentinel() {
        let policy = ExtractionPolicy::default();
        assert!(policy.is_skipped(&meta("time").tag("rename", "-")));
        assert!(!policy.is_skipped(&meta("time")));
    }

    #[test]
    fn test_custom_functions() {
        let policy = ExtractionPolicy::default()
            .with_name(|f| f.ident.to_uppercase())
            .with_required(|_| true)
            .with_description(|f| f.tags.get("desc").unwrap_or("n/a").to_string());

        let field = meta("id").tag("desc", "Identifier");
        assert_eq!(policy.name_of(&field), "ID");
        assert!(policy.is_required(&field));
        assert_eq!(policy.description_of(&field), "Identifier");
        assert_eq!(policy.description_of(&meta("x")), "n/a");
    }
}
