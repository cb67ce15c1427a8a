use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::table::RowSet;

/// Write the (unpadded) row set as JSON with 4-space indentation.
pub fn write_json_dump(rows: &RowSet, path: &Path) -> Result<()> {
    let json = to_pretty_json(rows)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write JSON dump: {:?}", path))?;

    info!(path = %path.display(), columns = rows.columns().len(), "Wrote JSON dump");
    Ok(())
}

pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize JSON")?;

    String::from_utf8(buffer).context("Serialized JSON was not UTF-8")
}

/// Write one column per header, padded so every column has the same rows.
/// No index column.
pub fn write_csv(rows: &RowSet, path: &Path) -> Result<()> {
    let aligned = rows.padded();

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {:?}", path))?;

    if !aligned.is_empty() {
        writer
            .write_record(aligned.headers())
            .context("Failed to write CSV header")?;

        for index in 0..aligned.row_count() {
            writer
                .write_record(aligned.row(index))
                .context("Failed to write CSV row")?;
        }
    }

    writer.flush().context("Failed to flush CSV file")?;

    info!(
        path = %path.display(),
        columns = aligned.columns().len(),
        rows = aligned.row_count(),
        "Wrote CSV"
    );
    Ok(())
}

/// Plain-text grid for the terminal: row numbers, then one column per header.
pub fn render_table(rows: &RowSet) -> String {
    let aligned = rows.padded();
    let headers: Vec<&str> = aligned.headers().collect();

    let index_width = aligned.row_count().saturating_sub(1).to_string().len();
    let widths: Vec<usize> = aligned
        .columns()
        .iter()
        .map(|(header, lines)| {
            lines
                .iter()
                .map(|l| l.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&" ".repeat(index_width));
    for (header, width) in headers.iter().zip(&widths) {
        out.push_str(&format!("  {:<width$}", header, width = *width));
    }
    out.push('\n');

    for index in 0..aligned.row_count() {
        out.push_str(&format!("{:>width$}", index, width = index_width));
        for (cell, width) in aligned.row(index).iter().zip(&widths) {
            out.push_str(&format!("  {:<width$}", cell, width = *width));
        }
        out.push('\n');
    }

    out
}
