//! Shared utilities for command handlers

use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::manifest::Manifest;
use gendoc_core::{DocItem, Document};
use std::path::Path;
use tracing::debug;

/// Load a manifest and build its document with fields generated
pub fn load_document(path: &Path) -> Result<(Manifest, Document)> {
    let manifest = {
        let _timer = Timer::with_details("manifest_loading", &path.display().to_string());
        Manifest::from_file(path)?
    };

    let mut doc = manifest.build_document();
    {
        let _timer = Timer::new("field_extraction");
        doc.generate_fields()?;
    }
    debug!(
        items = doc.all_items().count(),
        groups = doc.groups().count(),
        "Document ready"
    );

    Ok((manifest, doc))
}

/// An item located in the document, with its page id and group
pub struct Located<'d> {
    pub page_id: usize,
    pub group: Option<&'d str>,
    pub item: &'d DocItem,
}

/// Find the first item whose title or path equals `query`
///
/// Flat items are searched before groups, in the order pages are written.
/// The page id is the item's position in its own list.
pub fn find_item<'d>(doc: &'d Document, query: &str) -> Result<Located<'d>> {
    let matches = |item: &DocItem| item.title == query || item.path == query;

    if let Some((page_id, item)) = doc.items().iter().enumerate().find(|(_, i)| matches(i)) {
        return Ok(Located {
            page_id,
            group: None,
            item,
        });
    }

    for group in doc.groups() {
        if let Some((page_id, item)) = group.items().iter().enumerate().find(|(_, i)| matches(i)) {
            return Ok(Located {
                page_id,
                group: Some(group.name.as_str()),
                item,
            });
        }
    }

    Err(Error::EndpointNotFound {
        query: query.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gendoc_core::Method;

    fn document() -> Document {
        let mut doc = Document::new("API");
        doc.add_item(DocItem::new("Login", "/auth/login", Method::Post));
        doc.new_group("users")
            .add_item(DocItem::new("Create user", "/users/create", Method::Post))
            .add_item(DocItem::new("Delete user", "/users/delete", Method::Delete));
        doc
    }

    #[test]
    fn test_find_by_title_and_path() {
        let doc = document();

        let login = find_item(&doc, "Login").unwrap();
        assert_eq!(login.page_id, 0);
        assert_eq!(login.group, None);

        let delete = find_item(&doc, "/users/delete").unwrap();
        assert_eq!(delete.page_id, 1);
        assert_eq!(delete.group, Some("users"));
        assert_eq!(delete.item.title, "Delete user");
    }

    #[test]
    fn test_find_missing() {
        let doc = document();
        let err = find_item(&doc, "/nope").err().unwrap();
        assert!(matches!(err, Error::EndpointNotFound { query } if query == "/nope"));
    }
}
