use futures::stream::{self, StreamExt};
use std::sync::Arc;

use crate::client::protocol::{ENDPOINT_LOCAL_SEARCH, ENDPOINT_PUBLIC_CATALOG};
use crate::client::{CatalogQueryClient, Contribution, Query};
use crate::discovery::{DiscoveryProvider, Endpoint};
use crate::graph::Graph;

/// Upper bound on concurrently outstanding source queries.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 32;

/// Runs searches against this node's catalog and, for distributed searches,
/// every discovered peer.
pub struct SearchAggregator {
    catalog: Endpoint,
    client: CatalogQueryClient,
    discovery: Arc<dyn DiscoveryProvider>,
    max_in_flight: usize,
}

impl SearchAggregator {
    pub fn new(
        catalog: Endpoint,
        client: CatalogQueryClient,
        discovery: Arc<dyn DiscoveryProvider>,
    ) -> Self {
        Self {
            catalog,
            client,
            discovery,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }

    /// Values below 1 are raised to 1.
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    pub fn catalog(&self) -> &Endpoint {
        &self.catalog
    }

    /// Queries the local catalog only. An unreachable catalog yields an empty graph.
    pub async fn local_search(&self, query: &Query) -> Graph {
        self.client
            .query(&self.catalog, ENDPOINT_PUBLIC_CATALOG, query)
            .await
            .into_graph()
    }

    /// Queries the local catalog and every discovered peer concurrently and
    /// returns one contribution per source, in completion order.
    ///
    /// Completes once every source has answered or timed out, so the total
    /// latency is bounded by roughly one request timeout.
    pub async fn scatter(&self, query: &Query) -> Vec<Contribution> {
        let peers = self.discovery.discover().await;
        tracing::info!("Distributed search across local catalog and {} peer(s)", peers.len());

        let targets: Vec<(Endpoint, &'static str)> =
            std::iter::once((self.catalog.clone(), ENDPOINT_PUBLIC_CATALOG))
                .chain(peers.into_iter().map(|peer| (peer, ENDPOINT_LOCAL_SEARCH)))
                .collect();

        let requests: Vec<_> = targets
            .into_iter()
            .map(|(endpoint, path)| {
                let client = self.client.clone();
                let query = query.clone();
                async move { client.query(&endpoint, path, &query).await }
            })
            .collect();

        stream::iter(requests)
            .buffer_unordered(self.max_in_flight)
            .collect()
            .await
    }

    /// The union of every source's answer. Failed sources contribute nothing.
    pub async fn distributed_search(&self, query: &Query) -> Graph {
        let contributions = self.scatter(query).await;

        let degraded = contributions.iter().filter(|c| c.is_degraded()).count();
        tracing::info!(
            "Distributed search joined: {} answered, {} degraded",
            contributions.len() - degraded,
            degraded
        );

        contributions.into_iter().map(Contribution::into_graph).collect()
    }
}
