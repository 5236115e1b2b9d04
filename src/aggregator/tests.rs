//! Aggregator Module Tests
//!
//! ## Test Scopes
//! - **Local search**: Only the catalog is asked.
//! - **Distributed search**: Union of all answers, partial and total failure.
//! - **Timing**: A hanging peer costs at most one timeout.
//! - **Fan-out**: The in-flight cap is respected.
//! - **Tasks**: A search can run on a spawned task.

#[cfg(test)]
mod tests {
    use crate::aggregator::SearchAggregator;
    use crate::client::{CatalogQueryClient, Query, SourceFailure, Transport};
    use crate::discovery::{DiscoveryProvider, Endpoint, StaticDiscoveryProvider};
    use crate::graph::{Format, Graph};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    const CATALOG: &str = "http://catalog:8000";
    const CATALOG_URL: &str = "http://catalog:8000/public-catalog/";
    const PEER_1: &str = "http://peer-1:8000";
    const PEER_1_URL: &str = "http://peer-1:8000/local-search/";
    const PEER_2: &str = "http://peer-2:8000";
    const PEER_2_URL: &str = "http://peer-2:8000/local-search/";

    #[derive(Clone)]
    enum Reply {
        Body(String),
        Fail,
        Hang,
    }

    /// Routes by URL. Unknown URLs behave like refused connections.
    #[derive(Default)]
    struct RoutedTransport {
        routes: HashMap<String, Reply>,
        delay: Duration,
        calls: Mutex<Vec<String>>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl RoutedTransport {
        fn route(mut self, url: &str, reply: Reply) -> Self {
            self.routes.insert(url.to_string(), reply);
            self
        }

        fn delayed(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait]
    impl Transport for RoutedTransport {
        async fn post_json_ld(
            &self,
            url: &str,
            _query: &Query,
            _timeout: Duration,
        ) -> Result<String, SourceFailure> {
            self.calls.lock().unwrap().push(url.to_string());
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            match self.routes.get(url).cloned() {
                Some(Reply::Body(body)) => Ok(body),
                Some(Reply::Hang) => std::future::pending().await,
                Some(Reply::Fail) | None => {
                    Err(SourceFailure::Transport("connection refused".into()))
                }
            }
        }
    }

    /// Counts how often it was consulted.
    struct CountingDiscovery {
        peers: Vec<Endpoint>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DiscoveryProvider for CountingDiscovery {
        async fn discover(&self) -> Vec<Endpoint> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.peers.clone()
        }
    }

    fn dataset(id: &str, title: &str) -> String {
        json!({
            "@context": {
                "dcat": "http://www.w3.org/ns/dcat#",
                "dcterms": "http://purl.org/dc/terms/"
            },
            "@id": format!("https://example.com/dataset/{}", id),
            "@type": "dcat:Dataset",
            "dcterms:title": title
        })
        .to_string()
    }

    fn graph(body: &str) -> Graph {
        Graph::parse(body, Format::JsonLd).unwrap()
    }

    fn peers(urls: &[&str]) -> Arc<StaticDiscoveryProvider> {
        Arc::new(StaticDiscoveryProvider::from_urls(urls).unwrap())
    }

    fn aggregator(
        transport: Arc<RoutedTransport>,
        discovery: Arc<dyn DiscoveryProvider>,
    ) -> SearchAggregator {
        let client = CatalogQueryClient::with_transport(transport, Duration::from_millis(300));
        SearchAggregator::new(Endpoint::parse(CATALOG).unwrap(), client, discovery)
    }

    // ============================================================
    // LOCAL SEARCH TESTS
    // ============================================================

    #[tokio::test]
    async fn test_local_search_asks_catalog_only() {
        let transport = Arc::new(
            RoutedTransport::default().route(CATALOG_URL, Reply::Body(dataset("1", "Local"))),
        );
        let discovery = Arc::new(CountingDiscovery {
            peers: vec![Endpoint::parse(PEER_1).unwrap()],
            calls: AtomicUsize::new(0),
        });
        let aggregator = aggregator(transport.clone(), discovery.clone());

        let result = aggregator.local_search(&Query::default()).await;

        assert_eq!(result, graph(&dataset("1", "Local")));
        assert_eq!(discovery.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            transport.calls.lock().unwrap().as_slice(),
            [CATALOG_URL]
        );
    }

    #[tokio::test]
    async fn test_local_search_unreachable_catalog_is_empty() {
        let transport = Arc::new(RoutedTransport::default());
        let aggregator = aggregator(transport, peers(&[]));

        let result = aggregator.local_search(&Query::default()).await;

        assert!(result.is_empty());
    }

    // ============================================================
    // DISTRIBUTED SEARCH TESTS
    // ============================================================

    #[tokio::test]
    async fn test_distributed_search_merges_all_sources() {
        let transport = Arc::new(
            RoutedTransport::default()
                .route(CATALOG_URL, Reply::Body(dataset("1", "Local")))
                .route(PEER_1_URL, Reply::Body(dataset("2", "Peer one")))
                .route(PEER_2_URL, Reply::Body(dataset("3", "Peer two"))),
        );
        let aggregator = aggregator(transport, peers(&[PEER_1, PEER_2]));

        let result = aggregator.distributed_search(&Query::default()).await;

        let expected = graph(&dataset("1", "Local"))
            .merge(&graph(&dataset("2", "Peer one")))
            .merge(&graph(&dataset("3", "Peer two")));
        assert_eq!(result, expected);
    }

    #[tokio::test]
    async fn test_distributed_search_queries_peers_on_local_search() {
        let transport = Arc::new(RoutedTransport::default());
        let aggregator = aggregator(transport.clone(), peers(&[PEER_1]));

        aggregator.distributed_search(&Query::default()).await;

        let mut calls = transport.calls.lock().unwrap().clone();
        calls.sort();
        assert_eq!(
            calls,
            vec![CATALOG_URL.to_string(), PEER_1_URL.to_string()]
        );
    }

    #[tokio::test]
    async fn test_distributed_search_partial_failure() {
        let transport = Arc::new(
            RoutedTransport::default()
                .route(CATALOG_URL, Reply::Body(dataset("1", "Local")))
                .route(PEER_1_URL, Reply::Fail)
                .route(PEER_2_URL, Reply::Body(dataset("2", "Peer two"))),
        );
        let aggregator = aggregator(transport, peers(&[PEER_1, PEER_2]));

        let result = aggregator.distributed_search(&Query::default()).await;

        let expected = graph(&dataset("1", "Local")).merge(&graph(&dataset("2", "Peer two")));
        assert_eq!(result, expected);
    }

    #[tokio::test]
    async fn test_distributed_search_total_failure_is_empty() {
        let transport = Arc::new(RoutedTransport::default());
        let aggregator = aggregator(transport, peers(&[PEER_1, PEER_2]));

        let result = aggregator.distributed_search(&Query::default()).await;

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_distributed_search_without_peers_equals_local() {
        let transport = Arc::new(
            RoutedTransport::default().route(CATALOG_URL, Reply::Body(dataset("1", "Local"))),
        );
        let aggregator = aggregator(transport, peers(&[]));

        let distributed = aggregator.distributed_search(&Query::default()).await;
        let local = aggregator.local_search(&Query::default()).await;

        assert_eq!(distributed, local);
    }

    #[tokio::test]
    async fn test_duplicate_answers_collapse() {
        let body = dataset("1", "Shared");
        let transport = Arc::new(
            RoutedTransport::default()
                .route(CATALOG_URL, Reply::Body(body.clone()))
                .route(PEER_1_URL, Reply::Body(body.clone())),
        );
        let aggregator = aggregator(transport, peers(&[PEER_1]));

        let result = aggregator.distributed_search(&Query::default()).await;

        assert_eq!(result.len(), graph(&body).len());
    }

    #[tokio::test]
    async fn test_scatter_reports_each_source() {
        let transport = Arc::new(
            RoutedTransport::default()
                .route(CATALOG_URL, Reply::Body(dataset("1", "Local"))),
        );
        let aggregator = aggregator(transport, peers(&[PEER_1, PEER_2]));

        let contributions = aggregator.scatter(&Query::default()).await;

        assert_eq!(contributions.len(), 3);
        assert_eq!(contributions.iter().filter(|c| c.is_degraded()).count(), 2);
    }

    // ============================================================
    // TIMING TESTS
    // ============================================================

    #[tokio::test]
    async fn test_hanging_peer_is_bounded_by_timeout() {
        let transport = Arc::new(
            RoutedTransport::default()
                .route(CATALOG_URL, Reply::Body(dataset("1", "Local")))
                .route(PEER_1_URL, Reply::Hang)
                .route(PEER_2_URL, Reply::Hang),
        );
        let aggregator = aggregator(transport, peers(&[PEER_1, PEER_2]));

        let started = Instant::now();
        let result = aggregator.distributed_search(&Query::default()).await;

        assert_eq!(result, graph(&dataset("1", "Local")));
        // Both peers hang concurrently, so the wait is one timeout, not two.
        assert!(started.elapsed() < Duration::from_millis(550));
    }

    // ============================================================
    // FAN-OUT TESTS
    // ============================================================

    #[tokio::test]
    async fn test_sources_are_queried_concurrently() {
        let transport = Arc::new(RoutedTransport::default().delayed(Duration::from_millis(50)));
        let aggregator = aggregator(
            transport.clone(),
            peers(&[PEER_1, PEER_2, "http://peer-3:8000"]),
        );

        aggregator.distributed_search(&Query::default()).await;

        assert_eq!(transport.peak.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_in_flight_cap() {
        let transport = Arc::new(RoutedTransport::default().delayed(Duration::from_millis(10)));
        let aggregator = aggregator(
            transport.clone(),
            peers(&[PEER_1, PEER_2, "http://peer-3:8000"]),
        )
        .with_max_in_flight(1);

        aggregator.distributed_search(&Query::default()).await;

        assert_eq!(transport.peak.load(Ordering::SeqCst), 1);
        assert_eq!(transport.calls.lock().unwrap().len(), 4);
    }

    // ============================================================
    // TASK TESTS
    // ============================================================

    #[tokio::test]
    async fn test_distributed_search_runs_on_spawned_task() {
        let transport = Arc::new(
            RoutedTransport::default()
                .route(CATALOG_URL, Reply::Body(dataset("1", "Local")))
                .route(PEER_1_URL, Reply::Body(dataset("2", "Peer one"))),
        );
        let aggregator = Arc::new(aggregator(transport, peers(&[PEER_1])));

        let handle = tokio::spawn({
            let aggregator = aggregator.clone();
            async move { aggregator.distributed_search(&Query::default()).await }
        });
        let result = handle.await.unwrap();

        let expected = graph(&dataset("1", "Local")).merge(&graph(&dataset("2", "Peer one")));
        assert_eq!(result, expected);
    }
}
