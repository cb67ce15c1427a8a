use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use report::OllamaClient;
use search::{ContentMode, ExaClient, SearchType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub mode: OperationMode,
    pub search: SearchConfig,
    pub llm: LlmConfig,
    pub retry: RetryConfig,
    pub output: OutputConfig,
    pub prompt: PromptConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum OperationMode {
    Combined,     // One ESG query, summaries, JSON report
    PerCategory,  // One query per category, full text, narrative reports
}

impl std::str::FromStr for OperationMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "combined" => Ok(Self::Combined),
            "per-category" | "per_category" => Ok(Self::PerCategory),
            other => anyhow::bail!("unknown mode: {}", other),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub base_url: String,
    #[serde(skip_serializing, default)]
    pub api_key: String,
    pub num_results: usize,
    pub search_type: SearchType,
    pub content_mode: ContentMode,
    pub use_autoprompt: bool,
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("num_results", &self.num_results)
            .field("search_type", &self.search_type)
            .field("content_mode", &self.content_mode)
            .field("use_autoprompt", &self.use_autoprompt)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_retries: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub csv_path: PathBuf,
    pub json_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    pub with_examples: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::combined_mode()
    }
}

impl AppConfig {
    pub fn combined_mode() -> Self {
        Self {
            mode: OperationMode::Combined,
            search: SearchConfig {
                base_url: ExaClient::DEFAULT_BASE_URL.to_string(),
                api_key: String::new(),
                num_results: 10,
                search_type: SearchType::Auto,
                content_mode: ContentMode::Summary,
                use_autoprompt: true,
            },
            llm: LlmConfig {
                base_url: OllamaClient::DEFAULT_BASE_URL.to_string(),
                model: OllamaClient::DEFAULT_MODEL.to_string(),
            },
            retry: RetryConfig { max_retries: 3 },
            output: OutputConfig {
                csv_path: PathBuf::from("esg_policies.csv"),
                json_path: PathBuf::from("esg_policies.json"),
            },
            prompt: PromptConfig { with_examples: true },
        }
    }

    pub fn per_category_mode() -> Self {
        let combined = Self::combined_mode();
        Self {
            mode: OperationMode::PerCategory,
            search: SearchConfig {
                num_results: 3,
                content_mode: ContentMode::Text,
                ..combined.search
            },
            output: OutputConfig {
                csv_path: PathBuf::from("output.csv"),
                json_path: PathBuf::from("data.txt"),
            },
            ..combined
        }
    }

    /// Load `data.env` / `.env` if present, then read the process environment.
    /// A missing file is fine; an unreadable or malformed one is an error.
    pub fn from_env() -> Result<Self> {
        optional_env_file(dotenvy::from_filename("data.env"), "data.env")?;
        optional_env_file(dotenvy::dotenv(), ".env")?;

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key -> value source. Unset or blank values
    /// keep the mode preset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mode: OperationMode = match get("ESG_MODE") {
            Some(v) => v.parse().context("ESG_MODE must be combined or per-category")?,
            None => OperationMode::Combined,
        };

        let mut config = match mode {
            OperationMode::Combined => Self::combined_mode(),
            OperationMode::PerCategory => Self::per_category_mode(),
        };

        config.search.api_key = get("EXA_API_KEY").context("EXA_API_KEY must be set")?;

        if let Some(url) = get("EXA_BASE_URL") {
            config.search.base_url = url;
        }
        if let Some(n) = get("ESG_NUM_RESULTS") {
            config.search.num_results = n
                .trim()
                .parse()
                .context("ESG_NUM_RESULTS must be a positive number")?;
        }
        if let Some(t) = get("ESG_SEARCH_TYPE") {
            config.search.search_type = t
                .parse()
                .map_err(anyhow::Error::msg)
                .context("ESG_SEARCH_TYPE must be auto, keyword or title")?;
        }
        if let Some(url) = get("OLLAMA_BASE_URL") {
            config.llm.base_url = url;
        }
        if let Some(model) = get("OLLAMA_MODEL") {
            config.llm.model = model;
        }
        if let Some(n) = get("ESG_MAX_RETRIES") {
            config.retry.max_retries = n
                .trim()
                .parse()
                .context("ESG_MAX_RETRIES must be a number")?;
        }
        if let Some(path) = get("ESG_CSV_PATH") {
            config.output.csv_path = PathBuf::from(path);
        }
        if let Some(path) = get("ESG_JSON_PATH") {
            config.output.json_path = PathBuf::from(path);
        }
        if let Some(flag) = get("ESG_PROMPT_EXAMPLES") {
            config.prompt.with_examples = parse_bool(&flag)
                .context("ESG_PROMPT_EXAMPLES must be true or false")?;
        }

        if config.search.num_results == 0 {
            anyhow::bail!("ESG_NUM_RESULTS must be a positive number");
        }

        Ok(config)
    }
}

fn optional_env_file<T>(loaded: dotenvy::Result<T>, name: &str) -> Result<()> {
    match loaded {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to load {}", name)),
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => anyhow::bail!("not a boolean: {}", other),
    }
}
