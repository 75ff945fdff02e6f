//! Generate command handler

use super::utils::load_document;
use crate::cli::GenerateArgs;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use gendoc_core::{DocumentRenderer, FsSink, Locale};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument};

/// What a generate run produced
#[derive(Debug, Serialize)]
struct GenerateReport {
    out_dir: PathBuf,
    locale: Locale,
    pages: usize,
    groups: usize,
}

/// Handle the generate command
#[instrument(skip(output), fields(
    manifest = %args.manifest.display(),
    out_dir = %args.out_dir.display()
))]
pub fn handle_generate(args: GenerateArgs, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details("generate_command", &args.out_dir.display().to_string());
    output.info(&format!("Loading manifest {}", args.manifest.display()))?;

    let (manifest, doc) = load_document(&args.manifest)?;
    let config = manifest.render_config(args.locale.map(Into::into), args.index);

    let summary = {
        let _render_timer = Timer::new("document_rendering");
        let mut sink = FsSink::new(&args.out_dir);
        DocumentRenderer::with_config(&doc, &config).render(&mut sink)?
    };
    info!(
        pages = summary.pages,
        groups = summary.groups,
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Documentation generated"
    );

    if summary.pages == 0 {
        output.warning("No endpoints in manifest; only README.md was written")?;
    }

    output.success(&format!(
        "✓ Wrote {} page(s) in {} group(s) to {}",
        summary.pages,
        summary.groups,
        args.out_dir.display()
    ))?;

    if output.format() != crate::cli::OutputFormat::Human {
        output.data(&GenerateReport {
            out_dir: args.out_dir,
            locale: config.locale,
            pages: summary.pages,
            groups: summary.groups,
        })?;
    }

    Ok(())
}
