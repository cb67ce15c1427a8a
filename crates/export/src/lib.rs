pub mod table;
pub mod writer;

pub use table::{RowSet, DEGRADED_COLUMN};
pub use writer::{render_table, to_pretty_json, write_csv, write_json_dump};

use anyhow::Result;
use std::path::Path;

/// Dump the row set as-is, then write the aligned CSV.
pub fn export(rows: &RowSet, csv_path: &Path, json_path: &Path) -> Result<RowSet> {
    write_json_dump(rows, json_path)?;
    write_csv(rows, csv_path)?;
    Ok(rows.padded())
}
