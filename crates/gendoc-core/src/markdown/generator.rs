//! Whole-document rendering
//!
//! Writes `README.md`, one page per flat item, then one directory per group
//! holding that group's pages. Page ids restart at zero in every list.
//!
//! Copyright (c) 2025 Gendoc Contributors
//! Licensed under the Apache-2.0 license

use super::page::PageRenderer;
use super::sink::OutputSink;
use super::RenderConfig;
use crate::document::{DocItem, Document, FileNaming};
use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Name of the index page
pub const README: &str = "README.md";

/// Counts of what a render produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderSummary {
    /// Distinct item pages left in the output, README excluded
    ///
    /// A page overwritten by a later item with the same file is counted once.
    pub pages: usize,
    pub groups: usize,
}

/// Renders a document into an output sink
#[derive(Debug)]
pub struct DocumentRenderer<'d> {
    doc: &'d Document,
    pages: PageRenderer,
}

impl<'d> DocumentRenderer<'d> {
    pub fn new(doc: &'d Document) -> Self {
        Self::with_config(doc, &RenderConfig::default())
    }

    pub fn with_config(doc: &'d Document, config: &RenderConfig) -> Self {
        Self {
            doc,
            pages: PageRenderer::new(config),
        }
    }

    /// Reset the sink and write every page
    ///
    /// Fields must already be generated. The first failure aborts the run.
    /// Items resolving to the same file, in the same list or across lists,
    /// overwrite each other with a warning.
    #[instrument(skip_all, fields(title = %self.doc.title))]
    pub fn render<S: OutputSink + ?Sized>(&self, sink: &mut S) -> Result<RenderSummary> {
        sink.reset()?;
        sink.write_page(Path::new(README), &self.pages.render_readme(self.doc)?)?;

        let mut written = HashSet::new();
        let mut summary = RenderSummary::default();
        self.render_list(sink, Path::new(""), self.doc.items(), &mut written)?;

        for group in self.doc.groups() {
            let dir = group_dir(&group.name)?;
            sink.ensure_dir(&dir)?;
            self.render_list(sink, &dir, group.items(), &mut written)?;
            summary.groups += 1;
            debug!(group = %group.name, items = group.len(), "Rendered group");
        }

        summary.pages = written.len();
        info!(pages = summary.pages, groups = summary.groups, "Rendered document");
        Ok(summary)
    }

    fn render_list<S: OutputSink + ?Sized>(
        &self,
        sink: &mut S,
        dir: &Path,
        items: &[DocItem],
        written: &mut HashSet<PathBuf>,
    ) -> Result<()> {
        for (page_id, item) in items.iter().enumerate() {
            let relative = dir.join(page_path(item, self.doc.file_naming)?);

            if let Some(parent) = relative.parent() {
                if parent != dir {
                    sink.ensure_dir(parent)?;
                }
            }
            if relative == Path::new(README) {
                warn!(title = %item.title, "Page name collides with the README, README overwritten");
            } else if !written.insert(relative.clone()) {
                warn!(
                    page = %relative.display(),
                    title = %item.title,
                    "Duplicate page name, earlier page overwritten"
                );
            }

            let page = self
                .pages
                .render_page(page_id, item)
                .map_err(|e| e.with_context(item.title.clone()))?;
            sink.write_page(&relative, &page)?;
            debug!(page = %relative.display(), page_id, "Wrote page");
        }

        Ok(())
    }
}

/// Relative file of an item's page
///
/// The identity is the item's path or title. Leading and trailing `/` are
/// dropped and inner `/` become sub-directories.
pub fn page_path(item: &DocItem, naming: FileNaming) -> Result<PathBuf> {
    let identity = match naming {
        FileNaming::Path => &item.path,
        FileNaming::Title => &item.title,
    };

    let segments: Vec<&str> = identity.split('/').filter(|s| !s.is_empty()).collect();
    let Some((last, parents)) = segments.split_last() else {
        return Err(Error::configuration(format!(
            "item '{}' has an empty page name",
            item.title
        )));
    };

    let mut path = PathBuf::new();
    for segment in parents {
        path.push(checked_segment(segment, identity)?);
    }
    path.push(format!("{}.md", checked_segment(last, identity)?));
    Ok(path)
}

fn group_dir(name: &str) -> Result<PathBuf> {
    if name.is_empty() || name.contains('/') {
        return Err(Error::configuration(format!(
            "group name '{}' cannot be used as a directory",
            name
        )));
    }
    checked_segment(name, name).map(PathBuf::from)
}

fn checked_segment<'s>(segment: &'s str, identity: &str) -> Result<&'s str> {
    if segment == "." || segment == ".." || segment.contains('\\') {
        return Err(Error::configuration(format!(
            "page name '{}' contains an invalid segment '{}'",
            identity, segment
        )));
    }
    Ok(segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Method;
    use crate::markdown::MemorySink;

    #[test]
    fn test_page_path() {
        let item = DocItem::new("Create user", "/api/users/create", Method::Post);
        assert_eq!(
            page_path(&item, FileNaming::Path).unwrap(),
            PathBuf::from("api/users/create.md")
        );
        assert_eq!(
            page_path(&item, FileNaming::Title).unwrap(),
            PathBuf::from("Create user.md")
        );

        let dotted = DocItem::new("v", "/v1.2", Method::Get);
        assert_eq!(page_path(&dotted, FileNaming::Path).unwrap(), PathBuf::from("v1.2.md"));
    }

    #[test]
    fn test_invalid_page_names() {
        let empty = DocItem::new("Root", "/", Method::Get);
        assert!(page_path(&empty, FileNaming::Path).unwrap_err().is_configuration());

        let escape = DocItem::new("Up", "/../secret", Method::Get);
        assert!(page_path(&escape, FileNaming::Path).unwrap_err().is_configuration());

        assert!(group_dir("").is_err());
        assert!(group_dir("a/b").is_err());
        assert!(group_dir("users").is_ok());
    }

    #[test]
    fn test_render_layout() {
        let mut doc = Document::new("API");
        doc.add_item(DocItem::new("Login", "/login", Method::Post))
            .add_item(DocItem::new("Nested", "/a/b", Method::Get));
        doc.new_group("users")
            .add_item(DocItem::new("Create", "/create", Method::Post));
        doc.generate_fields().unwrap();

        let mut sink = MemorySink::new();
        let summary = DocumentRenderer::new(&doc).render(&mut sink).unwrap();

        assert_eq!(summary, RenderSummary { pages: 3, groups: 1 });
        let paths: Vec<_> = sink.pages().map(|(p, _)| p.to_path_buf()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("README.md"),
                PathBuf::from("a/b.md"),
                PathBuf::from("login.md"),
                PathBuf::from("users/create.md"),
            ]
        );
    }

    #[test]
    fn test_duplicate_page_overwrites() {
        let mut doc = Document::new("API");
        doc.add_item(DocItem::new("First", "/same", Method::Get))
            .add_item(DocItem::new("Second", "/same", Method::Get));

        let mut sink = MemorySink::new();
        let summary = DocumentRenderer::new(&doc).render(&mut sink).unwrap();

        assert_eq!(summary.pages, 1);
        assert!(sink.page("same.md").unwrap().contains("# Second"));
    }

    #[test]
    fn test_flat_page_overwritten_by_group_page() {
        let mut doc = Document::new("API");
        doc.add_item(DocItem::new("Flat", "/users/create", Method::Post));
        doc.new_group("users")
            .add_item(DocItem::new("Grouped", "/create", Method::Post));

        let mut sink = MemorySink::new();
        let summary = DocumentRenderer::new(&doc).render(&mut sink).unwrap();

        assert_eq!(summary, RenderSummary { pages: 1, groups: 1 });
        assert_eq!(sink.len(), 2);
        assert!(sink.page("users/create.md").unwrap().contains("# Grouped"));
    }
}
