//! Markdown rendering
//!
//! [`DocumentRenderer`] walks a [`Document`](crate::Document) and hands every
//! page to an [`OutputSink`]; [`PageRenderer`] turns one item into markdown.

pub mod generator;
pub mod page;
pub mod sink;
pub mod templates;

pub use generator::{page_path, DocumentRenderer, RenderSummary, README};
pub use page::{anchor_id, render_sample, Columns, PageRenderer};
pub use sink::{FsSink, MemorySink, OutputSink};
pub use templates::{Locale, Template};

use serde::{Deserialize, Serialize};

/// Rendering options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub locale: Locale,
    /// List every item on the README page
    pub include_index: bool,
}
