mod config;
mod pipeline;

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use config::AppConfig;
use pipeline::Pipeline;
use report::{OllamaClient, ReportGenerator, ReportOptions, RetryPolicy};
use search::ExaClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the prompt and the results.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::from_env()?;
    let run_id = Uuid::new_v4();

    info!(%run_id, mode = ?config.mode, model = %config.llm.model, "Starting ESG report run");

    let search = ExaClient::new(config.search.base_url.clone(), config.search.api_key.clone())?;
    let llm = OllamaClient::new(config.llm.base_url.clone(), config.llm.model.clone());
    let reports = ReportGenerator::new(
        llm,
        RetryPolicy::new(config.retry.max_retries),
        ReportOptions {
            with_examples: config.prompt.with_examples,
        },
    );

    let stdin = io::stdin();
    let company_name = read_company_name(&mut stdin.lock(), &mut io::stdout())?;

    let csv_path = config.output.csv_path.clone();
    let pipeline = Pipeline::new(search, reports, config);
    let output = pipeline.run(&company_name).await?;

    println!("{}", export::to_pretty_json(&output.rows)?);
    println!("{}", export::render_table(&output.aligned));

    info!(
        %run_id,
        csv = %csv_path.display(),
        degraded = output.degraded,
        "Run complete"
    );

    Ok(())
}

/// Prompt for the company name and read one line; only the line ending is removed.
fn read_company_name<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    write!(output, "Enter the name of the company: ")?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read company name")?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
