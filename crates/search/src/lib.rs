pub mod client;
pub mod error;
pub mod extractor;
pub mod query;
pub mod record;

pub use client::{ContentMode, ExaClient, SearchProvider, SearchRequest, SearchType};
pub use error::SearchError;
pub use extractor::{extract_field, extract_summaries, extract_texts, SEGMENT_DELIMITER};
pub use query::{build_category_query, build_combined_query};
pub use record::{SearchRecord, SearchResponse};

use tracing::{debug, warn};

/// Run one search and keep only the content field the request asked for.
pub async fn search_and_extract<P>(provider: &P, request: &SearchRequest) -> Result<String, SearchError>
where
    P: SearchProvider + ?Sized,
{
    let raw = provider.search_and_contents(request).await?;
    let content = extract_field(&raw, request.content_mode);

    if content.is_empty() {
        warn!(query = %request.query, "No content extracted from search results");
    } else {
        debug!(
            query = %request.query,
            raw_bytes = raw.len(),
            extracted_bytes = content.len(),
            "Extracted search content"
        );
    }

    Ok(content)
}
