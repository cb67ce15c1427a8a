use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyCategory {
    Environmental,
    Social,
    Governance,
}

impl PolicyCategory {
    pub const ALL: [PolicyCategory; 3] = [
        PolicyCategory::Environmental,
        PolicyCategory::Social,
        PolicyCategory::Governance,
    ];

    /// JSON key and CSV column header.
    pub fn key(&self) -> &'static str {
        match self {
            PolicyCategory::Environmental => "environmental",
            PolicyCategory::Social => "social",
            PolicyCategory::Governance => "governance",
        }
    }

    /// Wording used in search queries and prompts.
    pub fn label(&self) -> &'static str {
        match self {
            PolicyCategory::Environmental => "environmental",
            PolicyCategory::Social => "social",
            PolicyCategory::Governance => "ethical governance",
        }
    }
}

impl fmt::Display for PolicyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Content for one category: free text or a list of bullet points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicyContent {
    Narrative(String),
    Bullets(Vec<String>),
}

impl PolicyContent {
    /// Accepts whatever shape the model used for a category: strings stay
    /// as-is, arrays become bullets, `null` is empty and anything else is
    /// kept as its JSON text.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => PolicyContent::Bullets(items.into_iter().map(value_to_line).collect()),
            other => PolicyContent::Narrative(value_to_line(other)),
        }
    }
}

fn value_to_line(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Category key -> content, in the order categories were produced.
pub type PolicyReport = IndexMap<String, PolicyContent>;

/// Parse a model-produced JSON object into a report. Only malformed JSON (or
/// a non-object) is an error.
pub fn parse_report(json_text: &str) -> serde_json::Result<PolicyReport> {
    let object: IndexMap<String, Value> = serde_json::from_str(json_text)?;

    Ok(object
        .into_iter()
        .map(|(category, value)| (category, PolicyContent::from_value(value)))
        .collect())
}

/// Outcome of a structured (JSON) generation.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedReport {
    Parsed(PolicyReport),
    /// No JSON object found after all retries; the last raw model output.
    Degraded(String),
}

impl GeneratedReport {
    pub fn is_degraded(&self) -> bool {
        matches!(self, GeneratedReport::Degraded(_))
    }
}
