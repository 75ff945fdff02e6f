//! Per-page markdown rendering
//!
//! A page holds a primary parameter table for the request and one for the
//! response. Every field with children gets a link in its description cell
//! and a sub-table further down the page, introduced by an anchor
//! `{pageId}.{fieldName}`. Sub-tables are rendered breadth-first from a queue
//! local to each call, so nested records at any depth get their anchor.
//!
//! Copyright (c) 2025 Gendoc Contributors
//! Licensed under the Apache-2.0 license

use super::generator::page_path;
use super::templates::{
    escape_cell, escape_type, Labels, Template, REQUEST_ROW, RESPONSE_ROW, SUB_TABLE,
};
use super::RenderConfig;
use crate::document::{DocItem, Document};
use crate::error::Result;
use crate::introspect::Field;
use crate::schema::Sample;
use std::collections::VecDeque;
use std::path::Path;

/// Which parameter table is being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Columns {
    /// name, type, required, description
    Request,
    /// name, type, description
    Response,
}

/// A nested record waiting for its sub-table
struct SubTable<'f> {
    name: &'f str,
    fields: &'f [Field],
}

/// Anchor id of a field's sub-table
///
/// The field name is percent-encoded outside `[A-Za-z0-9._-]`, so the id is
/// safe both in `<a id="...">` and in a `(#...)` link target.
pub fn anchor_id(page_id: usize, field_name: &str) -> String {
    let mut id = format!("{}.", page_id);
    for byte in field_name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'.' | b'_' | b'-' => id.push(byte as char),
            _ => id.push_str(&format!("%{:02X}", byte)),
        }
    }
    id
}

/// Renders README and item pages; holds only immutable configuration
#[derive(Debug, Clone)]
pub struct PageRenderer {
    labels: &'static Labels,
    include_index: bool,
}

impl PageRenderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            labels: config.locale.labels(),
            include_index: config.include_index,
        }
    }

    /// Render the README page, with an optional index of every item
    pub fn render_readme(&self, doc: &Document) -> Result<String> {
        let mut out = Template::fill(
            self.labels.readme,
            &[
                ("title", &doc.title),
                ("version", &doc.version),
                ("author", &doc.author),
                ("baseUrl", &doc.base_url),
            ],
        );

        if self.include_index {
            out.push_str(&format!("\n## {}\n\n", self.labels.index_heading));
            for item in doc.items() {
                out.push_str(&self.index_line(Path::new(""), item, doc)?);
            }
            for group in doc.groups() {
                out.push_str(&format!("\n### {}\n\n", group.name));
                for item in group.items() {
                    out.push_str(&self.index_line(Path::new(&group.name), item, doc)?);
                }
            }
        }

        Ok(out)
    }

    fn index_line(&self, dir: &Path, item: &DocItem, doc: &Document) -> Result<String> {
        let file = dir.join(page_path(item, doc.file_naming)?);
        let link = file.to_string_lossy().replace('\\', "/");
        Ok(format!(
            "- [{}](<{}>) `{}` {}\n",
            item.title, link, item.method, item.path
        ))
    }

    /// Render one item page
    ///
    /// Expects the item's fields to be generated already; samples are
    /// serialized here.
    pub fn render_page(&self, page_id: usize, item: &DocItem) -> Result<String> {
        let request_table = self.render_fields(page_id, item.request_fields(), Columns::Request);
        let response_table = self.render_fields(page_id, item.response_fields(), Columns::Response);
        let request_sample = render_sample(item.request())?;
        let response_sample = render_sample(item.response())?;

        Ok(Template::fill(
            self.labels.body,
            &[
                ("name", &item.title),
                ("method", item.method.as_str()),
                ("url", &item.path),
                ("reqTable", &request_table),
                ("reqParam", &request_sample),
                ("respTable", &response_table),
                ("respParam", &response_sample),
            ],
        ))
    }

    /// Render a primary table followed by all of its sub-tables
    ///
    /// An empty field list renders as an empty section.
    pub fn render_fields(&self, page_id: usize, fields: &[Field], columns: Columns) -> String {
        if fields.is_empty() {
            return String::new();
        }

        let mut queue = VecDeque::new();
        let mut out = self.render_table(page_id, fields, columns, &mut queue);

        while let Some(sub) = queue.pop_front() {
            let table = self.render_table(page_id, sub.fields, columns, &mut queue);
            out.push_str(&Template::fill(
                SUB_TABLE,
                &[
                    ("anchor", &anchor_id(page_id, sub.name)),
                    ("name", sub.name),
                    ("table", &table),
                ],
            ));
        }

        out
    }

    fn render_table<'f>(
        &self,
        page_id: usize,
        fields: &'f [Field],
        columns: Columns,
        queue: &mut VecDeque<SubTable<'f>>,
    ) -> String {
        let rows: String = fields
            .iter()
            .map(|field| self.render_row(page_id, field, columns, queue))
            .collect();

        let header = match columns {
            Columns::Request => self.labels.request_table,
            Columns::Response => self.labels.response_table,
        };
        Template::fill(header, &[("params", &rows)])
    }

    fn render_row<'f>(
        &self,
        page_id: usize,
        field: &'f Field,
        columns: Columns,
        queue: &mut VecDeque<SubTable<'f>>,
    ) -> String {
        let mut description = escape_cell(&field.description);
        if field.has_children() {
            queue.push_back(SubTable {
                name: &field.name,
                fields: &field.children,
            });
            let link = format!("[{}](#{})", self.labels.link, anchor_id(page_id, &field.name));
            description = if description.is_empty() {
                link
            } else {
                format!("{} {}", description, link)
            };
        }

        let name = escape_cell(&field.name);
        let type_name = escape_type(&field.type_name);

        match columns {
            Columns::Request => {
                let required = if field.required {
                    self.labels.yes
                } else {
                    self.labels.no
                };
                Template::fill(
                    REQUEST_ROW,
                    &[
                        ("name", &name),
                        ("type", &type_name),
                        ("required", required),
                        ("description", &description),
                    ],
                )
            }
            Columns::Response => Template::fill(
                RESPONSE_ROW,
                &[
                    ("name", &name),
                    ("type", &type_name),
                    ("description", &description),
                ],
            ),
        }
    }
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

/// Pretty-printed JSON inside a fence, or empty for a nil sample
pub fn render_sample(sample: Option<&dyn Sample>) -> Result<String> {
    match sample {
        Some(sample) => {
            let json = serde_json::to_string_pretty(&sample.to_json()?)?;
            Ok(format!("```json\n{}\n```", json))
        }
        None => Ok(String::new()),
    }
}
