use serde::{Deserialize, Serialize};
use std::fmt;

/// One result as returned by the search provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub highlights: Option<Vec<String>>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub autoprompt_string: Option<String>,
    #[serde(default)]
    pub results: Vec<SearchRecord>,
}

impl fmt::Display for SearchRecord {
    /// Renders the record as `Field: value` lines, skipping absent fields.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(title) = &self.title {
            writeln!(f, "Title: {}", title)?;
        }
        if let Some(url) = &self.url {
            writeln!(f, "URL: {}", url)?;
        }
        if let Some(score) = self.score {
            writeln!(f, "Score: {}", score)?;
        }
        if let Some(date) = &self.published_date {
            writeln!(f, "Published Date: {}", date)?;
        }
        if let Some(author) = &self.author {
            writeln!(f, "Author: {}", author)?;
        }
        if let Some(highlights) = &self.highlights {
            writeln!(f, "Highlights: {}", highlights.join(" "))?;
        }
        if let Some(text) = &self.text {
            writeln!(f, "Text: {}", text)?;
        }
        if let Some(summary) = &self.summary {
            writeln!(f, "Summary: {}", summary)?;
        }
        Ok(())
    }
}

impl fmt::Display for SearchResponse {
    /// Records separated by a blank line, autoprompt (if any) first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(autoprompt) = &self.autoprompt_string {
            writeln!(f, "Autoprompt String: {}", autoprompt)?;
            writeln!(f)?;
        }
        for (i, record) in self.results.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", record)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_provider_payload() {
        let payload = r#"{
            "autopromptString": "ESG policies of Acme",
            "results": [
                {"title": "Acme ESG", "url": "https://acme.test/esg", "id": "1",
                 "score": 0.5, "publishedDate": "2024-01-01", "summary": "Acme cuts emissions."}
            ]
        }"#;

        let response: SearchResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].published_date.as_deref(), Some("2024-01-01"));
        assert!(response.results[0].text.is_none());
    }

    #[test]
    fn test_render_skips_missing_fields() {
        let record = SearchRecord {
            title: Some("Acme ESG".to_string()),
            summary: Some("Acme cuts emissions.".to_string()),
            ..Default::default()
        };

        assert_eq!(
            record.to_string(),
            "Title: Acme ESG\nSummary: Acme cuts emissions.\n"
        );
    }

    #[test]
    fn test_render_separates_records_with_blank_line() {
        let response = SearchResponse {
            autoprompt_string: Some("acme esg".to_string()),
            results: vec![
                SearchRecord { summary: Some("A".to_string()), ..Default::default() },
                SearchRecord { summary: Some("B".to_string()), ..Default::default() },
            ],
        };

        assert_eq!(
            response.to_string(),
            "Autoprompt String: acme esg\n\nSummary: A\n\nSummary: B\n"
        );
    }
}
