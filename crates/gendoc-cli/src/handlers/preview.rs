//! Preview command handler

use super::utils::{find_item, load_document};
use crate::cli::{OutputFormat, PreviewArgs};
use crate::error::Result;
use crate::output::OutputWriter;
use gendoc_core::PageRenderer;
use serde::Serialize;
use tracing::{debug, instrument};

#[derive(Debug, Serialize)]
struct PreviewReport<'a> {
    title: &'a str,
    page_id: usize,
    markdown: &'a str,
}

/// Handle the preview command
///
/// Renders one page to stdout exactly as `generate` would write it.
#[instrument(skip(output), fields(manifest = %args.manifest.display(), endpoint = %args.endpoint))]
pub fn handle_preview(args: PreviewArgs, output: &mut OutputWriter) -> Result<()> {
    let (manifest, doc) = load_document(&args.manifest)?;
    let located = find_item(&doc, &args.endpoint)?;
    debug!(page_id = located.page_id, group = ?located.group, "Endpoint located");

    let config = manifest.render_config(args.locale.map(Into::into), false);
    let page = PageRenderer::new(&config).render_page(located.page_id, located.item)?;

    match output.format() {
        OutputFormat::Human => output.write(&page),
        _ => output.data(&PreviewReport {
            title: &located.item.title,
            page_id: located.page_id,
            markdown: &page,
        }),
    }
}
