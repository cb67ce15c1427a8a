use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SearchError;
use crate::record::SearchResponse;

/// How the provider matches the query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Auto,
    Keyword,
    Title,
}

impl std::str::FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "keyword" => Ok(Self::Keyword),
            "title" => Ok(Self::Title),
            other => Err(format!("unknown search type: {}", other)),
        }
    }
}

/// Which per-result content the provider should return.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
    /// Condensed per-result summary
    Summary,
    /// Full page text
    Text,
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub search_type: SearchType,
    pub num_results: usize,
    pub content_mode: ContentMode,
    pub use_autoprompt: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, num_results: usize, content_mode: ContentMode) -> Self {
        Self {
            query: query.into(),
            search_type: SearchType::Auto,
            num_results,
            content_mode,
            use_autoprompt: true,
        }
    }

    pub fn with_search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }
}

/// "Search and return contents" against some web-search backend.
///
/// The result is the provider's raw textual rendering of its records; see
/// [`crate::extractor`] for how content is pulled back out of it.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search_and_contents(&self, request: &SearchRequest) -> Result<String, SearchError>;
}

#[derive(Clone)]
pub struct ExaClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExaRequest<'a> {
    query: &'a str,
    #[serde(rename = "type")]
    search_type: SearchType,
    num_results: usize,
    use_autoprompt: bool,
    contents: ExaContents,
}

#[derive(Serialize)]
struct ExaContents {
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<bool>,
}

impl From<ContentMode> for ExaContents {
    fn from(mode: ContentMode) -> Self {
        match mode {
            ContentMode::Summary => Self { summary: Some(true), text: None },
            ContentMode::Text => Self { summary: None, text: Some(true) },
        }
    }
}

impl ExaClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.exa.ai";

    pub fn new(base_url: String, api_key: String) -> Result<Self, SearchError> {
        if api_key.trim().is_empty() {
            return Err(SearchError::MissingApiKey("EXA_API_KEY".to_string()));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::new(),
        })
    }

    /// Fetch and decode the provider response without rendering it.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let url = format!("{}/search", self.base_url);

        let body = ExaRequest {
            query: &request.query,
            search_type: request.search_type,
            num_results: request.num_results,
            use_autoprompt: request.use_autoprompt,
            contents: request.content_mode.into(),
        };

        let response = self.client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status { status, body });
        }

        let decoded: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;

        debug!(
            query = %request.query,
            results = decoded.results.len(),
            "Search provider responded"
        );

        Ok(decoded)
    }
}

#[async_trait]
impl SearchProvider for ExaClient {
    async fn search_and_contents(&self, request: &SearchRequest) -> Result<String, SearchError> {
        let response = self.search(request).await?;
        Ok(response.to_string())
    }
}
