use crate::discover::filters::OutputFormat;
use crate::discover::types::Opportunity;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const HEADER: [&str; 9] = [
    "title",
    "organization",
    "focusArea",
    "region",
    "budget",
    "deadline",
    "type",
    "link",
    "brief",
];

/// Serialize opportunities as CSV with a header row.
pub fn to_csv(opportunities: &[Opportunity]) -> String {
    let mut out = String::new();
    out.push_str(&HEADER.join(","));
    out.push('\n');

    for opp in opportunities {
        let kind = opp.kind.to_string();
        let fields = [
            opp.title.as_str(),
            opp.organization.as_str(),
            opp.focus_area.as_str(),
            opp.region.as_str(),
            opp.budget.as_str(),
            opp.deadline.as_str(),
            kind.as_str(),
            opp.link.as_str(),
            opp.brief.as_str(),
        ];
        let row: Vec<String> = fields.iter().map(|f| escape_csv_field(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Serialize opportunities as pretty-printed JSON.
pub fn to_json(opportunities: &[Opportunity]) -> Result<String> {
    serde_json::to_string_pretty(opportunities).context("Failed to serialize opportunities")
}

/// Write one export file into `dir`, named with the current timestamp.
///
/// Returns the written path. The xlsx format choice is advisory; no native
/// spreadsheet writer is carried, so it is honored as CSV content.
pub fn write_export(
    dir: &Path,
    format: OutputFormat,
    opportunities: &[Opportunity],
) -> Result<PathBuf> {
    let (extension, content) = match format {
        OutputFormat::Json => ("json", to_json(opportunities)?),
        OutputFormat::Csv => ("csv", to_csv(opportunities)),
        OutputFormat::Xlsx => {
            tracing::warn!("xlsx export is written as CSV content");
            ("csv", to_csv(opportunities))
        }
    };

    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let path = dir.join(format!("opportunities-{timestamp}.{extension}"));

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;

    tracing::info!(file = %path.display(), count = opportunities.len(), "export written");

    Ok(path)
}

/// RFC 4180 style quoting: quote when the field contains a comma, quote,
/// or line break, doubling embedded quotes.
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
