//! Thin HTTP client for the string analyzer REST surface, used by `strings-cli`.

use crate::{
    api::{ListResponse, NaturalLanguageResponse, StringView},
    filters::FilterCriteria,
};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

/// Errors returned by [`StringsClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL failed to parse or cannot carry path segments.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
    /// HTTP layer failed before a response was received or decoded.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("Server responded {status}: {body}")]
    Status {
        /// HTTP status returned by the server.
        status: StatusCode,
        /// Response body, usually `{"error": "..."}`.
        body: String,
    },
}

/// Client bound to one string analyzer base URL.
#[derive(Debug, Clone)]
pub struct StringsClient {
    base_url: Url,
    http: reqwest::Client,
}

impl StringsClient {
    /// Create a client for the server at `base_url` (for example `http://127.0.0.1:4100`).
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|err| ClientError::InvalidBaseUrl(format!("{base_url}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Store `value` and return the created record.
    pub async fn create(&self, value: &str) -> Result<StringView, ClientError> {
        let response = self
            .http
            .post(self.endpoint(&["strings"])?)
            .json(&json!({ "value": value }))
            .send()
            .await?;
        decode(response).await
    }

    /// Fetch the record for `value`.
    pub async fn get(&self, value: &str) -> Result<StringView, ClientError> {
        let response = self.http.get(self.string_url(value)?).send().await?;
        decode(response).await
    }

    /// Delete the record for `value`.
    pub async fn delete(&self, value: &str) -> Result<(), ClientError> {
        let response = self.http.delete(self.string_url(value)?).send().await?;
        ensure_success(response).await.map(|_| ())
    }

    /// List records matching `criteria`.
    pub async fn list(&self, criteria: &FilterCriteria) -> Result<ListResponse, ClientError> {
        let response = self
            .http
            .get(self.endpoint(&["strings"])?)
            .query(criteria)
            .send()
            .await?;
        decode(response).await
    }

    /// List records matching a plain-English `query`.
    pub async fn query(&self, query: &str) -> Result<NaturalLanguageResponse, ClientError> {
        let response = self
            .http
            .get(self.endpoint(&["strings", "filter-by-natural-language"])?)
            .query(&[("query", query)])
            .send()
            .await?;
        decode(response).await
    }

    fn string_url(&self, value: &str) -> Result<Url, ClientError> {
        self.endpoint(&["strings", value])
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::debug!(%status, body = %body, "Request rejected by server");
    Err(ClientError::Status { status, body })
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    Ok(ensure_success(response).await?.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_urls_are_percent_encoded() {
        let client = StringsClient::new("http://localhost:4100/").expect("client");
        let url = client.string_url("hello world/?").expect("url");
        assert_eq!(
            url.as_str(),
            "http://localhost:4100/strings/hello%20world%2F%3F"
        );
    }

    #[test]
    fn base_path_prefix_is_preserved() {
        let client = StringsClient::new("http://localhost:4100/api").expect("client");
        let url = client
            .endpoint(&["strings", "filter-by-natural-language"])
            .expect("url");
        assert_eq!(
            url.as_str(),
            "http://localhost:4100/api/strings/filter-by-natural-language"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            StringsClient::new("not a url"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            StringsClient::new("mailto:someone@example.org"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }
}
