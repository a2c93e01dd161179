use futures::StreamExt;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use thiserror::Error;

use super::types::{Article, Category, NewsResponse};

/// Official API endpoint. Overridable for tests via [`NewsClient::with_base_url`].
pub const DEFAULT_BASE_URL: &str = "https://newsdata.io";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_RESPONSE_SIZE: usize = 2 * 1024 * 1024; // 2MB

/// Errors that can occur while fetching a category feed.
///
/// Transport failures, non-2xx statuses, a non-"success" API status, and
/// malformed payloads are all folded into this one type; the caller renders
/// whichever variant occurred as a single user-facing message. No variant
/// triggers a retry — recovery is an explicit user-driven refresh.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request exceeded the 30-second timeout
    #[error("Request timed out")]
    Timeout,
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// API-level failure: `status != "success"`, message taken from the
    /// response body when the server provides one
    #[error("{0}")]
    Api(String),
    /// Response body was not the expected JSON envelope
    #[error("Malformed response: {0}")]
    Malformed(String),
    /// Response body exceeded the 2MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
}

/// Client for the category-scoped news query.
///
/// Holds the API key as a [`SecretString`]; the type intentionally does not
/// derive `Debug` so the key cannot leak through logging.
#[derive(Clone)]
pub struct NewsClient {
    client: reqwest::Client,
    api_key: SecretString,
    country: String,
    base_url: String,
}

impl NewsClient {
    pub fn new(client: reqwest::Client, api_key: SecretString, country: impl Into<String>) -> Self {
        Self {
            client,
            api_key,
            country: country.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint (mock server in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the article list for one category.
    ///
    /// Issues a single GET with the API key, country, and category as query
    /// parameters. On success the result is the response's article list
    /// filtered to records with non-empty `title` and `link`; structurally
    /// malformed entries are dropped individually rather than failing the
    /// whole fetch.
    ///
    /// # Errors
    ///
    /// Any transport failure, non-2xx status, non-"success" API status, or
    /// unparsable body yields a [`FetchError`]. This function never panics
    /// on remote input.
    pub async fn fetch(&self, category: Category) -> Result<Vec<Article>, FetchError> {
        let url = format!("{}/api/1/news", self.base_url);
        let request = self.client.get(&url).query(&[
            ("apikey", self.api_key.expose_secret()),
            ("country", self.country.as_str()),
            ("category", category.as_str()),
        ]);

        let response = tokio::time::timeout(REQUEST_TIMEOUT, request.send())
            .await
            .map_err(|_| FetchError::Timeout)?
            .map_err(FetchError::Network)?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        let bytes = read_limited_bytes(response, MAX_RESPONSE_SIZE).await?;
        let envelope: NewsResponse =
            serde_json::from_slice(&bytes).map_err(|e| FetchError::Malformed(e.to_string()))?;

        if envelope.status != "success" {
            let message = envelope
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Article API reported failure".to_string());
            return Err(FetchError::Api(message));
        }

        let raw = envelope.results.unwrap_or_default();
        let total = raw.len();
        let articles: Vec<Article> = raw
            .into_iter()
            .filter_map(|value| serde_json::from_value::<Article>(value).ok())
            .filter(Article::has_required_fields)
            .collect();

        if articles.len() < total {
            tracing::debug!(
                category = %category,
                total = total,
                kept = articles.len(),
                "Dropped articles missing title or link"
            );
        }

        Ok(articles)
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
