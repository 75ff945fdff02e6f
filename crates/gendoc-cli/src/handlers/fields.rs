//! Fields command handler

use super::utils::{find_item, load_document, Located};
use crate::cli::{FieldsArgs, OutputFormat};
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use gendoc_core::markdown::page_path;
use gendoc_core::{Document, Field, Method};
use serde::Serialize;
use std::path::Path;
use tracing::instrument;

/// Extracted schema of one endpoint
#[derive(Debug, Serialize)]
struct EndpointFields<'d> {
    title: &'d str,
    path: &'d str,
    method: Method,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<&'d str>,
    page: String,
    request: &'d [Field],
    response: &'d [Field],
}

impl<'d> EndpointFields<'d> {
    fn new(doc: &Document, located: Located<'d>) -> Result<Self> {
        let dir = Path::new(located.group.unwrap_or_default());
        let page = dir.join(page_path(located.item, doc.file_naming)?);

        Ok(Self {
            title: &located.item.title,
            path: &located.item.path,
            method: located.item.method,
            group: located.group,
            page: page.to_string_lossy().replace('\\', "/"),
            request: located.item.request_fields(),
            response: located.item.response_fields(),
        })
    }
}

/// Every item of the document in page order
fn all_located(doc: &Document) -> Vec<Located<'_>> {
    let flat = doc.items().iter().enumerate().map(|(page_id, item)| Located {
        page_id,
        group: None,
        item,
    });
    let grouped = doc.groups().flat_map(|group| {
        group.items().iter().enumerate().map(move |(page_id, item)| Located {
            page_id,
            group: Some(group.name.as_str()),
            item,
        })
    });
    flat.chain(grouped).collect()
}

/// Handle the fields command
#[instrument(skip(output), fields(manifest = %args.manifest.display()))]
pub fn handle_fields(args: FieldsArgs, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("fields_command");
    let (_, doc) = load_document(&args.manifest)?;

    let located = match &args.endpoint {
        Some(query) => vec![find_item(&doc, query)?],
        None => all_located(&doc),
    };
    let reports = located
        .into_iter()
        .map(|l| EndpointFields::new(&doc, l))
        .collect::<Result<Vec<_>>>()?;

    if output.format() != OutputFormat::Human {
        return output.data(&reports);
    }

    if reports.len() > 1 {
        output.section("Endpoints")?;
        let rows = reports
            .iter()
            .map(|r| vec![r.method.to_string(), r.path.to_string(), r.page.clone()])
            .collect();
        output.table(&["Method", "Path", "Page"], rows)?;
    }

    for report in &reports {
        output.section(&format!("{} {} ({})", report.method, report.path, report.title))?;
        output.writeln(&format!("page: {}", report.page))?;
        output.writeln("request:")?;
        output.fields(report.request)?;
        output.writeln("response:")?;
        output.fields(report.response)?;
    }

    Ok(())
}
