//! Batch list retrieval from the API.

use async_trait::async_trait;
use serde::Deserialize;

use stockbatch_batches::{BatchSummary, QueryState};

use crate::config::{ClientConfig, ConfigError};

/// Path of the batch list endpoint.
pub const BATCHES_PATH: &str = "/batches";

/// Failure to obtain a batch page. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to load batches")]
    Status(u16),
    #[error("Network error: {0}")]
    Network(String),
}

/// Anything that can produce one page of batch summaries.
#[async_trait]
pub trait BatchSource: Send + Sync {
    async fn list_batches(&self, query: &QueryState) -> Result<Vec<BatchSummary>, FetchError>;
}

/// `GET {api_url}/batches?page=&limit=&sort=` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBatchSource {
    client: reqwest::Client,
    api_url: String,
}

impl HttpBatchSource {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let mut api_url = api_url.into();
        let trimmed = api_url.trim_end_matches('/').len();
        api_url.truncate(trimmed);
        Self { client, api_url }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.http_client()?, config.api_url.clone()))
    }
}

#[async_trait]
impl BatchSource for HttpBatchSource {
    async fn list_batches(&self, query: &QueryState) -> Result<Vec<BatchSummary>, FetchError> {
        let url = format!("{}{}", self.api_url, BATCHES_PATH);

        let resp = self
            .client
            .get(&url)
            .query(&query.to_pairs())
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            tracing::warn!(status = %resp.status(), %url, "batch list request failed");
            return Err(FetchError::Status(resp.status().as_u16()));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(decode_page(&body))
    }
}

#[derive(Deserialize)]
struct BatchPage {
    #[serde(default)]
    data: Option<Vec<serde_json::Value>>,
}

/// Decode a `{ "data": [...] }` body. An unreadable body is an empty page;
/// unreadable entries are dropped one by one.
pub fn decode_page(body: &[u8]) -> Vec<BatchSummary> {
    let entries = match serde_json::from_slice::<BatchPage>(body) {
        Ok(BatchPage { data: Some(entries) }) => entries,
        Ok(BatchPage { data: None }) => {
            tracing::warn!("batch list response has no data field; showing empty list");
            return Vec::new();
        }
        Err(err) => {
            tracing::warn!(error = %err, "malformed batch list response; showing empty list");
            return Vec::new();
        }
    };

    let total = entries.len();
    let batches: Vec<BatchSummary> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(batch) => Some(batch),
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping unreadable batch entry");
                None
            }
        })
        .collect();

    if batches.len() < total {
        tracing::warn!(kept = batches.len(), total, "batch list response had unreadable entries");
    }
    batches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_data_list() {
        let body = br#"{"data":[{"id":"a","type":"in","itemsCount":2,"createdAt":null}]}"#;
        let batches = decode_page(body);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].id.as_str(), "a");
    }

    #[test]
    fn missing_data_is_empty() {
        assert!(decode_page(br#"{"items":[]}"#).is_empty());
        assert!(decode_page(br#"{"data":null}"#).is_empty());
    }

    #[test]
    fn malformed_body_is_empty() {
        assert!(decode_page(b"<html>oops</html>").is_empty());
        assert!(decode_page(br#"{"data":"nope"}"#).is_empty());
    }

    #[test]
    fn bad_entries_are_dropped_individually() {
        let body = br#"{"data":[
            {"id":"a","type":"in","itemsCount":1,"createdAt":"2024-05-01T08:30:00Z"},
            {"id":1},
            {"id":"","type":"in","itemsCount":1},
            {"id":"b","type":"out","itemsCount":2,"createdAt":"2024-05-01T08:30:00"}
        ]}"#;
        let ids: Vec<_> = decode_page(body).into_iter().map(|b| b.id.to_string()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn mixed_timestamp_formats_keep_whole_page() {
        let body = br#"{"data":[
            {"id":"a","type":"in","itemsCount":1,"createdAt":"2024-05-01T08:30:00Z"},
            {"id":"b","type":"in","itemsCount":1,"createdAt":"2024-05-01T08:30:00"},
            {"id":"c","type":"in","itemsCount":1,"createdAt":"soon"}
        ]}"#;
        let batches = decode_page(body);
        assert_eq!(batches.len(), 3);
        assert!(batches[1].created_at.is_some());
        assert_eq!(batches[2].created_label(), "Unknown");
    }

    #[test]
    fn server_order_is_kept() {
        let body = br#"{"data":[
            {"id":"z","type":"out","itemsCount":1},
            {"id":"a","type":"in","itemsCount":1}
        ]}"#;
        let ids: Vec<_> = decode_page(body).into_iter().map(|b| b.id.to_string()).collect();
        assert_eq!(ids, vec!["z", "a"]);
    }

    #[test]
    fn status_error_message_is_human_readable() {
        assert_eq!(FetchError::Status(500).to_string(), "Failed to load batches");
    }
}
