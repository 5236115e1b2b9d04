use std::sync::Arc;
use std::time::Duration;

use super::transport::{HttpTransport, Transport};
use super::types::{Contribution, Query, SourceFailure};
use crate::discovery::Endpoint;
use crate::graph::{Format, Graph};

/// Sends one query to one source and never fails: every error becomes a
/// degraded (empty) contribution.
#[derive(Clone)]
pub struct CatalogQueryClient {
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl CatalogQueryClient {
    pub fn new(timeout: Duration) -> Self {
        Self::with_transport(Arc::new(HttpTransport::new()), timeout)
    }

    pub fn with_transport(transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POSTs `query` to `endpoint` + `path` and parses the answer as JSON-LD.
    pub async fn query(&self, endpoint: &Endpoint, path: &str, query: &Query) -> Contribution {
        let url = endpoint.join(path);

        match self.fetch(&url, query).await {
            Ok(graph) => {
                tracing::info!("Received {} triple(s) from {}", graph.len(), url);
                Contribution::Answered(graph)
            }
            Err(failure) => {
                tracing::error!("Error querying {}: {}", url, failure);
                Contribution::Degraded(failure)
            }
        }
    }

    async fn fetch(&self, url: &str, query: &Query) -> Result<Graph, SourceFailure> {
        let body = tokio::time::timeout(
            self.timeout,
            self.transport.post_json_ld(url, query, self.timeout),
        )
        .await
        .map_err(|_| SourceFailure::Timeout)??;

        Ok(Graph::parse(&body, Format::JsonLd)?)
    }
}
