use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use report::{PolicyContent, PolicyReport};

/// Column name used when the model output could not be split by category.
pub const DEGRADED_COLUMN: &str = "report";

/// Column-oriented table: header -> lines, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowSet {
    columns: IndexMap<String, Vec<String>>,
}

impl RowSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_columns<I, K>(columns: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
        K: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn from_report(report: &PolicyReport) -> Self {
        let columns = report
            .iter()
            .map(|(category, content)| (category.clone(), split_content(content)))
            .collect();

        Self { columns }
    }

    /// Raw model text that never yielded a JSON object becomes one column.
    pub fn from_degraded(raw: &str) -> Self {
        Self::from_columns([(DEGRADED_COLUMN, split_lines(raw))])
    }

    pub fn columns(&self) -> &IndexMap<String, Vec<String>> {
        &self.columns
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Length of the longest column.
    pub fn row_count(&self) -> usize {
        self.columns.values().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_aligned(&self) -> bool {
        let rows = self.row_count();
        self.columns.values().all(|lines| lines.len() == rows)
    }

    /// Right-pad every column with empty strings up to the longest one.
    pub fn pad(&mut self) {
        let rows = self.row_count();
        for lines in self.columns.values_mut() {
            lines.resize(rows, String::new());
        }
    }

    pub fn padded(&self) -> Self {
        let mut aligned = self.clone();
        aligned.pad();
        aligned
    }

    /// Cells of row `index`, empty string where a column is short.
    pub fn row(&self, index: usize) -> Vec<&str> {
        self.columns
            .values()
            .map(|lines| lines.get(index).map(String::as_str).unwrap_or(""))
            .collect()
    }
}

fn split_content(content: &PolicyContent) -> Vec<String> {
    match content {
        PolicyContent::Narrative(text) => split_lines(text),
        PolicyContent::Bullets(lines) => lines.clone(),
    }
}

/// Blank-line pairs collapse to one newline before splitting.
fn split_lines(text: &str) -> Vec<String> {
    text.replace("\n\n", "\n")
        .split('\n')
        .map(str::to_string)
        .collect()
}
