pub mod json;
pub mod llm;
pub mod prompt;
pub mod retry;
pub mod schema;

pub use json::find_json_object;
pub use llm::{OllamaClient, TextGenerator};
pub use retry::{Attempt, RetryOutcome, RetryPolicy};
pub use schema::{parse_report, GeneratedReport, PolicyCategory, PolicyContent, PolicyReport};

use anyhow::{Context, Result};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Include a worked input/output example in per-category prompts.
    pub with_examples: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { with_examples: true }
    }
}

/// Turns extracted search content into policy reports using a text model.
pub struct ReportGenerator<G> {
    llm: G,
    retry: RetryPolicy,
    options: ReportOptions,
}

impl<G: TextGenerator> ReportGenerator<G> {
    pub fn new(llm: G, retry: RetryPolicy, options: ReportOptions) -> Self {
        Self { llm, retry, options }
    }

    /// Free-text mode: one model call, raw completion returned as-is.
    pub async fn narrative(
        &self,
        company_name: &str,
        category: PolicyCategory,
        content: &str,
    ) -> Result<String> {
        let example = self.options.with_examples.then(|| prompt::worked_example(category));
        let prompt = prompt::build_category_prompt(company_name, category, content, example.as_ref());

        debug!(category = %category, prompt_len = prompt.len(), "Requesting narrative report");

        self.llm
            .generate(&prompt)
            .await
            .with_context(|| format!("Failed to generate {} report", category))
    }

    /// Structured mode: ask for a JSON object covering every category.
    ///
    /// The identical prompt is re-sent while the response contains no JSON
    /// object, up to the retry policy's limit; after that the last raw
    /// response comes back as [`GeneratedReport::Degraded`]. A JSON object
    /// that fails to parse is an error and is not retried; any valid object
    /// is accepted whatever its value shapes.
    pub async fn structured(&self, company_name: &str, summaries: &str) -> Result<GeneratedReport> {
        let prompt = prompt::build_structured_prompt(company_name, summaries);
        let llm = &self.llm;
        let prompt_ref = prompt.as_str();

        let outcome = self
            .retry
            .run("structured_report", move || async move {
                let raw = llm
                    .generate(prompt_ref)
                    .await
                    .context("Failed to generate structured report")?;

                Ok::<_, anyhow::Error>(match find_json_object(&raw) {
                    Some(object) => Attempt::Done(object.to_string()),
                    None => Attempt::Retry(raw),
                })
            })
            .await?;

        match outcome {
            RetryOutcome::Succeeded(json_text) => {
                let report = parse_report(&json_text)
                    .context("Failed to parse structured report JSON")?;
                info!(categories = report.len(), "Parsed structured report");
                Ok(GeneratedReport::Parsed(report))
            }
            RetryOutcome::Exhausted(raw) => Ok(GeneratedReport::Degraded(raw)),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    pub fn llm(&self) -> &G {
        &self.llm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned responses in order and records every prompt it sees.
    struct ScriptedGenerator {
        responses: Mutex<VecDeque<Result<String, String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(responses: &[&str]) -> Self {
            Self {
                responses: Mutex::new(responses.iter().map(|r| Ok(r.to_string())).collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(vec![Err(message.to_string())])),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.responses.lock().unwrap().pop_front() {
                Some(Ok(text)) => Ok(text),
                Some(Err(message)) => Err(anyhow::anyhow!(message)),
                None => Ok("still no json".to_string()),
            }
        }
    }

    fn generator(llm: ScriptedGenerator) -> ReportGenerator<ScriptedGenerator> {
        ReportGenerator::new(llm, RetryPolicy::new(3), ReportOptions::default())
    }

    #[tokio::test]
    async fn test_structured_ignores_surrounding_prose() {
        let reports = generator(ScriptedGenerator::new(&[
            r#"Intro text {"environmental":"E","social":"S","governance":"G"} trailing"#,
        ]));

        let result = reports.structured("Acme", "summaries").await.unwrap();

        let mut expected = PolicyReport::new();
        expected.insert("environmental".to_string(), PolicyContent::Narrative("E".to_string()));
        expected.insert("social".to_string(), PolicyContent::Narrative("S".to_string()));
        expected.insert("governance".to_string(), PolicyContent::Narrative("G".to_string()));
        assert_eq!(result, GeneratedReport::Parsed(expected));
        assert_eq!(reports.llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_structured_retries_until_json_found() {
        let reports = generator(ScriptedGenerator::new(&[
            "Sorry, here is a report without JSON",
            "Still prose",
            r#"{"environmental": ["- a", "- b"]}"#,
        ]));

        let result = reports.structured("Acme", "summaries").await.unwrap();

        assert!(!result.is_degraded());
        assert_eq!(reports.llm.calls(), 3);

        let prompts = reports.llm.prompts.lock().unwrap();
        assert!(prompts.iter().all(|p| p == &prompts[0]));
    }

    #[tokio::test]
    async fn test_structured_degrades_after_four_calls() {
        let reports = generator(ScriptedGenerator::new(&["one", "two", "three", "four", "five"]));

        let result = reports.structured("Acme", "summaries").await.unwrap();

        assert_eq!(result, GeneratedReport::Degraded("four".to_string()));
        assert_eq!(reports.llm.calls(), 4);
    }

    #[tokio::test]
    async fn test_structured_invalid_json_is_fatal() {
        let reports = generator(ScriptedGenerator::new(&["{environmental: E}", r#"{"a":"b"}"#]));

        let err = reports.structured("Acme", "summaries").await.unwrap_err();

        assert!(err.to_string().contains("Failed to parse structured report JSON"));
        assert_eq!(reports.llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_structured_accepts_non_string_values() {
        let reports = generator(ScriptedGenerator::new(&[
            r#"Report: {"environmental": "E", "social": null, "governance": {"board": "independent"}}"#,
        ]));

        let result = reports.structured("Acme", "summaries").await.unwrap();

        let GeneratedReport::Parsed(report) = result else {
            panic!("expected a parsed report");
        };
        assert_eq!(report["social"], PolicyContent::Narrative(String::new()));
        assert_eq!(
            report["governance"],
            PolicyContent::Narrative(r#"{"board":"independent"}"#.to_string())
        );
        assert_eq!(reports.llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let reports = generator(ScriptedGenerator::failing("connection refused"));

        let err = reports.structured("Acme", "summaries").await.unwrap_err();

        assert!(format!("{:#}", err).contains("connection refused"));
        assert_eq!(reports.llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_narrative_returns_raw_text() {
        let reports = generator(ScriptedGenerator::new(&["- Plants trees\n- Recycles"]));

        let text = reports
            .narrative("Acme", PolicyCategory::Environmental, "web data")
            .await
            .unwrap();

        assert_eq!(text, "- Plants trees\n- Recycles");
        let prompts = reports.llm.prompts.lock().unwrap();
        assert!(prompts[0].contains("ONLY the environmental policies of the Acme company"));
        assert!(prompts[0].contains("Sample Output"));
    }

    #[tokio::test]
    async fn test_narrative_without_examples() {
        let reports = ReportGenerator::new(
            ScriptedGenerator::new(&["text"]),
            RetryPolicy::default(),
            ReportOptions { with_examples: false },
        );

        reports
            .narrative("Acme", PolicyCategory::Social, "web data")
            .await
            .unwrap();

        let prompts = reports.llm.prompts.lock().unwrap();
        assert!(!prompts[0].contains("Sample Output"));
    }
}
