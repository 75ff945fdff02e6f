//! Document model
//!
//! A [`Document`] owns a flat list of endpoint items and a set of named
//! groups. It is populated with append-only calls, then
//! [`Document::generate_fields`] fills every item's request/response schema
//! from its samples using the document's [`ExtractionPolicy`].
//!
//! Groups: calling [`Document::new_group`] with a name that already exists
//! replaces that group with an empty one and discards its items. Use
//! [`Document::group_mut`] to append to an existing group.
//!
//! The model assumes a single builder; there is no internal locking.
//!
//! Copyright (c) 2025 Gendoc Contributors
//! Licensed under the Apache-2.0 license

use crate::error::Result;
use crate::introspect::{Field, Introspector};
use crate::policy::ExtractionPolicy;
use crate::schema::{FieldMeta, Sample};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument, warn};

/// HTTP method of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            other => Err(format!("unsupported HTTP method '{}'", other)),
        }
    }
}

/// Which item attribute names the page file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileNaming {
    /// `<path>.md`
    #[default]
    Path,
    /// `<title>.md`
    Title,
}

/// One documented endpoint
pub struct DocItem {
    pub title: String,
    pub path: String,
    pub method: Method,
    request: Option<Box<dyn Sample>>,
    response: Option<Box<dyn Sample>>,
    request_fields: Vec<Field>,
    response_fields: Vec<Field>,
}

impl DocItem {
    pub fn new(title: impl Into<String>, path: impl Into<String>, method: Method) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            method,
            request: None,
            response: None,
            request_fields: Vec::new(),
            response_fields: Vec::new(),
        }
    }

    /// Set the request sample
    pub fn with_request<T: Sample + 'static>(mut self, sample: T) -> Self {
        self.request = Some(Box::new(sample));
        self
    }

    /// Set the response sample
    pub fn with_response<T: Sample + 'static>(mut self, sample: T) -> Self {
        self.response = Some(Box::new(sample));
        self
    }

    pub fn request(&self) -> Option<&dyn Sample> {
        self.request.as_deref()
    }

    pub fn response(&self) -> Option<&dyn Sample> {
        self.response.as_deref()
    }

    /// Request schema; empty until fields are generated
    pub fn request_fields(&self) -> &[Field] {
        &self.request_fields
    }

    /// Response schema; empty until fields are generated
    pub fn response_fields(&self) -> &[Field] {
        &self.response_fields
    }

    fn generate(&mut self, introspector: &Introspector<'_>) -> Result<()> {
        let context = format!("{} request", self.title);
        self.request_fields = introspector
            .extract_sample(self.request.as_deref())
            .map_err(|e| e.with_context(context))?;

        let context = format!("{} response", self.title);
        self.response_fields = introspector
            .extract_sample(self.response.as_deref())
            .map_err(|e| e.with_context(context))?;

        debug!(
            title = %self.title,
            request_fields = self.request_fields.len(),
            response_fields = self.response_fields.len(),
            "Generated item fields"
        );
        Ok(())
    }
}

impl fmt::Debug for DocItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocItem")
            .field("title", &self.title)
            .field("path", &self.path)
            .field("method", &self.method)
            .field("has_request", &self.request.is_some())
            .field("has_response", &self.response.is_some())
            .field("request_fields", &self.request_fields)
            .field("response_fields", &self.response_fields)
            .finish()
    }
}

/// Named partition of items, in insertion order
#[derive(Debug)]
pub struct DocGroup {
    pub name: String,
    items: Vec<DocItem>,
}

impl DocGroup {
    fn new(name: String) -> Self {
        Self {
            name,
            items: Vec::new(),
        }
    }

    /// Append an item
    pub fn add_item(&mut self, item: DocItem) -> &mut Self {
        self.items.push(item);
        self
    }

    pub fn items(&self) -> &[DocItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Document header, loadable from configuration files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentInfo {
    pub title: String,
    pub version: String,
    pub base_url: String,
    pub author: String,
    pub file_naming: FileNaming,
}

/// The whole documentation tree
#[derive(Debug, Default)]
pub struct Document {
    pub title: String,
    pub version: String,
    pub base_url: String,
    pub author: String,
    pub file_naming: FileNaming,
    groups: BTreeMap<String, DocGroup>,
    items: Vec<DocItem>,
    policy: ExtractionPolicy,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Build from a configuration header
    pub fn from_info(info: DocumentInfo) -> Self {
        Self {
            title: info.title,
            version: info.version,
            base_url: info.base_url,
            author: info.author,
            file_naming: info.file_naming,
            ..Self::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_file_naming(mut self, naming: FileNaming) -> Self {
        self.file_naming = naming;
        self
    }

    pub fn with_policy(mut self, policy: ExtractionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Header of this document
    pub fn info(&self) -> DocumentInfo {
        DocumentInfo {
            title: self.title.clone(),
            version: self.version.clone(),
            base_url: self.base_url.clone(),
            author: self.author.clone(),
            file_naming: self.file_naming,
        }
    }

    pub fn policy(&self) -> &ExtractionPolicy {
        &self.policy
    }

    pub fn set_policy(&mut self, policy: ExtractionPolicy) {
        self.policy = policy;
    }

    /// Replace only the name function of the policy
    pub fn set_name_fn<F>(&mut self, f: F)
    where
        F: Fn(&FieldMeta) -> String + Send + Sync + 'static,
    {
        self.policy = std::mem::take(&mut self.policy).with_name(f);
    }

    /// Replace only the required function of the policy
    pub fn set_required_fn<F>(&mut self, f: F)
    where
        F: Fn(&FieldMeta) -> bool + Send + Sync + 'static,
    {
        self.policy = std::mem::take(&mut self.policy).with_required(f);
    }

    /// Replace only the description function of the policy
    pub fn set_description_fn<F>(&mut self, f: F)
    where
        F: Fn(&FieldMeta) -> String + Send + Sync + 'static,
    {
        self.policy = std::mem::take(&mut self.policy).with_description(f);
    }

    /// Append an item to the flat list
    pub fn add_item(&mut self, item: DocItem) -> &mut Self {
        self.items.push(item);
        self
    }

    /// Create a group, replacing any existing group of the same name
    pub fn new_group(&mut self, name: impl Into<String>) -> &mut DocGroup {
        let name = name.into();
        if let Some(previous) = self.groups.get(&name) {
            if !previous.is_empty() {
                warn!(
                    group = %name,
                    discarded_items = previous.len(),
                    "Group recreated, existing items discarded"
                );
            }
        }
        match self.groups.entry(name) {
            Entry::Occupied(mut entry) => {
                let name = entry.key().clone();
                entry.insert(DocGroup::new(name));
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                let name = entry.key().clone();
                entry.insert(DocGroup::new(name))
            }
        }
    }

    pub fn group(&self, name: &str) -> Option<&DocGroup> {
        self.groups.get(name)
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut DocGroup> {
        self.groups.get_mut(name)
    }

    /// Groups in name order
    pub fn groups(&self) -> impl Iterator<Item = &DocGroup> {
        self.groups.values()
    }

    pub fn items(&self) -> &[DocItem] {
        &self.items
    }

    /// Every item, flat list first, then groups in name order
    pub fn all_items(&self) -> impl Iterator<Item = &DocItem> {
        self.items
            .iter()
            .chain(self.groups.values().flat_map(|g| g.items.iter()))
    }

    /// Fill request/response fields of every item from its samples
    ///
    /// A pure function of the current samples and policy, so calling it again
    /// recomputes identical fields.
    #[instrument(skip(self), fields(title = %self.title))]
    pub fn generate_fields(&mut self) -> Result<()> {
        let introspector = Introspector::new(&self.policy);

        for item in &mut self.items {
            item.generate(&introspector)?;
        }

        for group in self.groups.values_mut() {
            for item in &mut group.items {
                item.generate(&introspector)?;
            }
        }

        debug!(
            items = self.items.len(),
            groups = self.groups.len(),
            "Generated document fields"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_parsing() {
        assert_eq!("post".parse::<Method>().unwrap(), Method::Post);
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert!("PATCH".parse::<Method>().is_err());

        let method: Method = serde_json::from_value(json!("PUT")).unwrap();
        assert_eq!(method, Method::Put);
    }

    #[test]
    fn test_items_keep_insertion_order_and_duplicates() {
        let mut doc = Document::new("API");
        doc.add_item(DocItem::new("A", "/a", Method::Get))
            .add_item(DocItem::new("A", "/a", Method::Get))
            .add_item(DocItem::new("B", "/b", Method::Post));

        let titles: Vec<_> = doc.items().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "A", "B"]);
    }

    #[test]
    fn test_new_group_twice_discards_items() {
        let mut doc = Document::new("API");
        doc.new_group("users")
            .add_item(DocItem::new("Create", "/users", Method::Post));
        assert_eq!(doc.group("users").unwrap().len(), 1);

        doc.new_group("users");
        assert!(doc.group("users").unwrap().is_empty());
        assert_eq!(doc.groups().count(), 1);
    }

    #[test]
    fn test_group_mut_appends() {
        let mut doc = Document::new("API");
        doc.new_group("users")
            .add_item(DocItem::new("Create", "/users", Method::Post));
        doc.group_mut("users")
            .unwrap()
            .add_item(DocItem::new("Delete", "/users", Method::Delete));

        assert_eq!(doc.group("users").unwrap().len(), 2);
    }

    #[test]
    fn test_fields_empty_until_generated() {
        let mut doc = Document::new("API");
        doc.add_item(DocItem::new("A", "/a", Method::Get).with_request(json!({"id": 1})));
        assert!(doc.items()[0].request_fields().is_empty());

        doc.generate_fields().unwrap();
        assert_eq!(doc.items()[0].request_fields().len(), 1);
        assert!(doc.items()[0].response_fields().is_empty());
    }

    #[test]
    fn test_generate_error_carries_item_context() {
        let mut doc = Document::new("API");
        doc.new_group("misc")
            .add_item(DocItem::new("Broken", "/broken", Method::Get).with_response(7_u32));

        let err = doc.generate_fields().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("Broken response"));
    }

    #[test]
    fn test_policy_setters() {
        let mut doc = Document::new("API");
        doc.set_required_fn(|_| true);
        doc.set_description_fn(|f| format!("about {}", f.ident));
        doc.add_item(DocItem::new("A", "/a", Method::Get).with_request(json!({"id": 1})));
        doc.generate_fields().unwrap();

        let field = &doc.items()[0].request_fields()[0];
        assert!(field.required);
        assert_eq!(field.description, "about id");
        assert_eq!(field.name, "id");
    }

    #[test]
    fn test_info_round_trip() {
        let info = DocumentInfo {
            title: "API".to_string(),
            version: "1.0.0".to_string(),
            base_url: "http://localhost".to_string(),
            author: "team".to_string(),
            file_naming: FileNaming::Title,
        };
        let doc = Document::from_info(info.clone());
        assert_eq!(doc.info(), info);
    }
}
