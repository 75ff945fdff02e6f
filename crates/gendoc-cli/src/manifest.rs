//! Manifest loading
//!
//! A manifest describes one document: header fields, render options, field
//! annotations and the endpoint list with JSON samples. The format follows the
//! file extension: `.yaml`/`.yml`, `.json` or `.toml`.
//!
//! ```yaml
//! title: User API
//! version: 1.0.0
//! render:
//!   locale: en
//! annotations:
//!   required: [user_name]
//!   comments: { user_name: Login name }
//!   hidden: [password]
//!   renames: { user_name: UserName }
//! endpoints:
//!   - title: Create user
//!     path: /users/create
//!     method: POST
//!     group: users
//!     request: { user_name: alice }
//! ```

use crate::error::{Error, ErrorContext, Result};
use gendoc_core::policy::{default_description, default_name, default_required};
use gendoc_core::{DocItem, Document, DocumentInfo, ExtractionPolicy, Method, RenderConfig, SKIP_NAME};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;

/// Whole manifest file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    #[serde(flatten)]
    pub info: DocumentInfo,
    pub render: RenderConfig,
    pub annotations: Annotations,
    pub endpoints: Vec<Endpoint>,
}

/// Field annotations keyed by the field name found in the samples
///
/// JSON samples carry no tags; these maps stand in for them. A key matches
/// that field name in every record of every sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub required: BTreeSet<String>,
    pub comments: BTreeMap<String, String>,
    pub hidden: BTreeSet<String>,
    pub renames: BTreeMap<String, String>,
}

/// One endpoint and its samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub title: String,
    pub path: String,
    pub method: Method,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub request: Option<Value>,
    #[serde(default)]
    pub response: Option<Value>,
}

impl Annotations {
    /// Extraction policy reading these annotations, falling back to tags
    ///
    /// Lookups use the declared field name, so renames and hiding refer to the
    /// key as it appears in the sample.
    pub fn policy(&self) -> ExtractionPolicy {
        let hidden = self.hidden.clone();
        let renames = self.renames.clone();
        let required = self.required.clone();
        let comments = self.comments.clone();

        ExtractionPolicy::default()
            .with_name(move |field| {
                if hidden.contains(&field.ident) {
                    SKIP_NAME.to_string()
                } else if let Some(name) = renames.get(&field.ident) {
                    name.clone()
                } else {
                    default_name(field)
                }
            })
            .with_required(move |field| required.contains(&field.ident) || default_required(field))
            .with_description(move |field| {
                comments
                    .get(&field.ident)
                    .cloned()
                    .unwrap_or_else(|| default_description(field))
            })
    }
}

impl Endpoint {
    pub fn to_item(&self) -> DocItem {
        let mut item = DocItem::new(&self.title, &self.path, self.method);
        if let Some(request) = &self.request {
            item = item.with_request(request.clone());
        }
        if let Some(response) = &self.response {
            item = item.with_response(response.clone());
        }
        item
    }
}

impl Manifest {
    /// Load a manifest, choosing the parser by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        debug!(path = %path.display(), bytes = content.len(), "Read manifest");

        let manifest: Manifest = match extension.as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => {
                return Err(Error::InvalidFormat {
                    path: path.to_path_buf(),
                    expected: "YAML, JSON or TOML".to_string(),
                })
            }
        };

        Ok(manifest)
    }

    /// Build the document; endpoints sharing a group name land in one group
    pub fn build_document(&self) -> Document {
        let mut doc = Document::from_info(self.info.clone()).with_policy(self.annotations.policy());

        for endpoint in &self.endpoints {
            let item = endpoint.to_item();
            match &endpoint.group {
                Some(name) => {
                    if let Some(group) = doc.group_mut(name) {
                        group.add_item(item);
                    } else {
                        doc.new_group(name.clone()).add_item(item);
                    }
                }
                None => {
                    doc.add_item(item);
                }
            }
        }

        debug!(endpoints = self.endpoints.len(), "Built document from manifest");
        doc
    }

    /// Render options with command-line overrides applied
    pub fn render_config(&self, locale: Option<gendoc_core::Locale>, index: bool) -> RenderConfig {
        RenderConfig {
            locale: locale.unwrap_or(self.render.locale),
            include_index: index || self.render.include_index,
        }
    }
}
