use async_trait::async_trait;
use std::time::Duration;

use super::protocol::MEDIA_TYPE_JSON_LD;
use super::types::{Query, SourceFailure};
use crate::error::GraphError;

/// Largest response body read from a source.
pub const MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;

/// Wire seam for catalog and peer queries.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs the query and returns the body of a 2xx response.
    async fn post_json_ld(
        &self,
        url: &str,
        query: &Query,
        timeout: Duration,
    ) -> Result<String, SourceFailure>;
}

/// HTTP transport over a shared connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: reqwest::Client,
    max_body_bytes: usize,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
            max_body_bytes: MAX_RESPONSE_BYTES,
        }
    }

    /// Bodies longer than `limit` bytes are rejected as malformed.
    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn oversized(limit: usize) -> SourceFailure {
    SourceFailure::MalformedResponse(GraphError::malformed(format!(
        "response body exceeds {} bytes",
        limit
    )))
}

fn classify(err: reqwest::Error) -> SourceFailure {
    if err.is_timeout() {
        SourceFailure::Timeout
    } else {
        SourceFailure::Transport(err.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json_ld(
        &self,
        url: &str,
        query: &Query,
        timeout: Duration,
    ) -> Result<String, SourceFailure> {
        let mut response = self
            .http_client
            .post(url)
            .header(reqwest::header::ACCEPT, MEDIA_TYPE_JSON_LD)
            .json(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(classify)?;

        if !response.status().is_success() {
            return Err(SourceFailure::Status(response.status().as_u16()));
        }

        let limit = self.max_body_bytes;
        if response.content_length().is_some_and(|len| len > limit as u64) {
            return Err(oversized(limit));
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(classify)? {
            if body.len() + chunk.len() > limit {
                return Err(oversized(limit));
            }
            body.extend_from_slice(&chunk);
        }

        String::from_utf8(body)
            .map_err(|e| SourceFailure::MalformedResponse(GraphError::malformed(e.to_string())))
    }
}
