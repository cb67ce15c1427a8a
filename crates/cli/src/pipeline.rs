use anyhow::{Context, Result};
use tracing::{info, warn};

use export::RowSet;
use report::{GeneratedReport, PolicyCategory, PolicyContent, PolicyReport, ReportGenerator, TextGenerator};
use search::{SearchProvider, SearchRequest};

use crate::config::{AppConfig, OperationMode};

pub struct PipelineOutput {
    /// Per-category lines before padding (what the JSON dump holds).
    pub rows: RowSet,
    /// Same lines padded to equal length (what the CSV holds).
    pub aligned: RowSet,
    pub degraded: bool,
}

/// Search -> extract -> generate -> export for one company.
pub struct Pipeline<S, G> {
    search: S,
    reports: ReportGenerator<G>,
    config: AppConfig,
}

impl<S, G> Pipeline<S, G>
where
    S: SearchProvider,
    G: TextGenerator,
{
    pub fn new(search: S, reports: ReportGenerator<G>, config: AppConfig) -> Self {
        Self {
            search,
            reports,
            config,
        }
    }

    pub async fn run(&self, company_name: &str) -> Result<PipelineOutput> {
        let (rows, degraded) = match self.config.mode {
            OperationMode::Combined => self.run_combined(company_name).await?,
            OperationMode::PerCategory => (self.run_per_category(company_name).await?, false),
        };

        let aligned = export::export(
            &rows,
            &self.config.output.csv_path,
            &self.config.output.json_path,
        )?;

        Ok(PipelineOutput {
            rows,
            aligned,
            degraded,
        })
    }

    async fn run_combined(&self, company_name: &str) -> Result<(RowSet, bool)> {
        let query = search::build_combined_query(company_name);
        let summaries = self.search_content(query).await?;

        info!(company = company_name, "Generating structured ESG report");

        match self.reports.structured(company_name, &summaries).await? {
            GeneratedReport::Parsed(report) => Ok((RowSet::from_report(&report), false)),
            GeneratedReport::Degraded(raw) => {
                warn!(
                    attempts = self.reports.retry_policy().max_attempts(),
                    "No JSON object in model output, exporting raw text"
                );
                Ok((RowSet::from_degraded(&raw), true))
            }
        }
    }

    async fn run_per_category(&self, company_name: &str) -> Result<RowSet> {
        let mut report = PolicyReport::new();

        for category in PolicyCategory::ALL {
            let query = search::build_category_query(company_name, category.label());
            let content = self.search_content(query).await?;

            info!(company = company_name, category = %category, "Generating category report");

            let text = self.reports.narrative(company_name, category, &content).await?;
            report.insert(category.key().to_string(), PolicyContent::Narrative(text));
        }

        Ok(RowSet::from_report(&report))
    }

    async fn search_content(&self, query: String) -> Result<String> {
        let settings = &self.config.search;

        let mut request = SearchRequest::new(query, settings.num_results, settings.content_mode)
            .with_search_type(settings.search_type);
        request.use_autoprompt = settings.use_autoprompt;

        info!(query = %request.query, "Searching");

        search::search_and_extract(&self.search, &request)
            .await
            .with_context(|| format!("Search failed for query: {}", request.query))
    }
}
