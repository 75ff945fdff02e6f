//! Gendoc Core - API documentation from request/response samples
//!
//! This crate turns sample request and response values into field tables and
//! renders them as linked markdown pages.
//!
//! # Main Components
//!
//! - **Shapes**: the [`Describe`] trait (usually derived) describes a value's
//!   structure, including annotation tags on every field
//! - **Extraction policy**: replaceable functions choosing a field's name,
//!   required flag and description
//! - **Introspection**: nested and embedded records become an ordered [`Field`] list
//! - **Document model**: flat items plus named groups of endpoints
//! - **Markdown rendering**: one page per endpoint with linked sub-tables
//!
//! # Example
//!
//! ```no_run
//! use gendoc_core::{Describe, DocItem, Document, DocumentRenderer, FsSink, Method, Result};
//! use serde::Serialize;
//!
//! #[derive(Serialize, Describe)]
//! struct CreateUser {
//!     #[gendoc(rename = "UserName", validate = "required", comment = "Login name")]
//!     user_name: String,
//! }
//!
//! fn example() -> Result<()> {
//!     let mut doc = Document::new("User API").with_version("1.0.0");
//!     doc.new_group("users").add_item(
//!         DocItem::new("Create user", "/users/create", Method::Post)
//!             .with_request(CreateUser { user_name: "alice".into() }),
//!     );
//!     doc.generate_fields()?;
//!     DocumentRenderer::new(&doc).render(&mut FsSink::new("docs"))?;
//!     Ok(())
//! }
//! ```

extern crate self as gendoc_core;

pub mod document;
pub mod error;
pub mod introspect;
pub mod markdown;
pub mod policy;
pub mod schema;

// Re-export main types for convenience
pub use document::{DocGroup, DocItem, Document, DocumentInfo, FileNaming, Method};
pub use error::{Error, Result};
pub use introspect::{extract_fields, Field, Introspector, DEFAULT_MAX_DEPTH};
pub use markdown::{
    DocumentRenderer, FsSink, Locale, MemorySink, OutputSink, PageRenderer, RenderConfig,
    RenderSummary,
};
pub use policy::{ExtractionPolicy, SKIP_NAME};
pub use schema::{Describe, FieldMeta, Kind, Record, Sample, Shape, Tags};

/// Derive macro for [`Describe`]
pub use gendoc_derive::Describe;

/// Version of the gendoc-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_derive_is_usable_inside_the_crate() {
        #[derive(serde::Serialize, Describe)]
        struct Probe {
            #[gendoc(validate = "required")]
            id: u32,
        }

        let fields = extract_fields(&Probe { id: 1 }, &ExtractionPolicy::default()).unwrap();
        assert_eq!(fields.len(), 1);
        assert!(fields[0].required);
    }
}
