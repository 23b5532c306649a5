//! Search backend seam and the Meilisearch HTTP client.
//!
//! The orchestrator only sees the [`SearchBackend`] trait; harnesses swap
//! in scripted fakes, production wires up [`MeiliClient`]. The client
//! speaks `POST /indexes/{index}/search` and carries the compiled filter
//! expression and sort directive verbatim — ranking is entirely the
//! backend's business.

use async_trait::async_trait;
use biblio_core::types::SearchHit;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// One backend search call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchRequest {
    /// Free-text relevance query; empty in tag mode (the tag rides in
    /// `filter`).
    pub q: String,
    pub limit: u32,
    pub offset: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,
}

/// The page of hits plus the backend's total estimate.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<SearchHit>,
    #[serde(rename = "estimatedTotalHits", default)]
    pub estimated_total_hits: u64,
}

/// Failure talking to the search backend. All variants surface to the user
/// as one transient-failure message; the detail is for the logs.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Transport(String),

    #[error("search backend returned HTTP {status}")]
    Status { status: u16 },

    #[error("could not decode search response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The external search service, behind a trait so tests inject fakes.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError>;
}

// ---------------------------------------------------------------------------
// MeiliClient
// ---------------------------------------------------------------------------

/// Meilisearch client over the hyper legacy connection pool.
pub struct MeiliClient {
    http: Client<HttpConnector, Full<Bytes>>,
    endpoint: String,
    api_key: String,
}

impl MeiliClient {
    /// `host` is the base URL (e.g. `http://localhost:7700`); an empty
    /// `api_key` sends no authorization header.
    pub fn new(host: &str, api_key: &str, index: &str) -> Self {
        MeiliClient {
            http: Client::builder(TokioExecutor::new()).build_http(),
            endpoint: format!("{}/indexes/{}/search", host.trim_end_matches('/'), index),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl SearchBackend for MeiliClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let body = serde_json::to_vec(request)?;

        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(&self.endpoint)
            .header(hyper::header::CONTENT_TYPE, "application/json");
        if !self.api_key.is_empty() {
            builder = builder.header(
                hyper::header::AUTHORIZATION,
                format!("Bearer {}", self.api_key),
            );
        }
        let req = builder
            .body(Full::new(Bytes::from(body)))
            .map_err(|err| SearchError::Transport(err.to_string()))?;

        tracing::debug!(endpoint = %self.endpoint, q = %request.q, offset = request.offset, "search call");
        let response = self
            .http
            .request(req)
            .await
            .map_err(|err| SearchError::Transport(err.to_string()))?;

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|err| SearchError::Transport(err.to_string()))?
            .to_bytes();

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "search backend rejected the request");
            return Err(SearchError::Status { status: status.as_u16() });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn request_omits_absent_filter_and_sort() {
        let req = SearchRequest { q: "三体".to_string(), limit: 10, offset: 20, ..Default::default() };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"q": "三体", "limit": 10, "offset": 20}));
    }

    #[test]
    fn request_carries_filter_and_sort_verbatim() {
        let req = SearchRequest {
            q: String::new(),
            limit: 10,
            offset: 0,
            filter: Some("tags = \"科幻\" AND file_size >= 52428800".to_string()),
            sort: Some(vec!["downloads:desc".to_string()]),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["filter"], "tags = \"科幻\" AND file_size >= 52428800");
        assert_eq!(json["sort"][0], "downloads:desc");
    }

    #[test]
    fn response_decodes_meilisearch_shape() {
        let raw = r#"{
            "hits": [
                {"id": 7, "title": "三体", "file_name": "santi.epub", "file_size": 1024,
                 "ext": "EPUB", "downloads": 12, "word_count": 300000}
            ],
            "estimatedTotalHits": 23,
            "processingTimeMs": 4,
            "query": "三体"
        }"#;
        let resp: SearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.estimated_total_hits, 23);
        assert_eq!(resp.hits.len(), 1);
        assert_eq!(resp.hits[0].id, 7);
        assert_eq!(resp.hits[0].ext, "EPUB");
    }

    #[test]
    fn client_builds_index_endpoint() {
        let client = MeiliClient::new("http://localhost:7700/", "", "books");
        assert_eq!(client.endpoint, "http://localhost:7700/indexes/books/search");
    }
}
