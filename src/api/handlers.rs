use axum::{Extension, Json};
use serde_json::{Value, json};
use std::sync::Arc;

use super::response::JsonLd;
use crate::aggregator::SearchAggregator;
use crate::client::Query;
use crate::response::ResponseFramer;

/// Searches this node's catalog only. Also serves peers asking on
/// `/local-search/`.
pub async fn handle_local_search(
    Extension(aggregator): Extension<Arc<SearchAggregator>>,
    Extension(framer): Extension<Arc<ResponseFramer>>,
    Json(query): Json<Query>,
) -> JsonLd {
    let graph = aggregator.local_search(&query).await;
    tracing::debug!("Local search returned {} triple(s)", graph.len());
    JsonLd(framer.frame(&graph))
}

/// Searches the local catalog and every discovered peer.
pub async fn handle_distributed_search(
    Extension(aggregator): Extension<Arc<SearchAggregator>>,
    Extension(framer): Extension<Arc<ResponseFramer>>,
    Json(query): Json<Query>,
) -> JsonLd {
    let graph = aggregator.distributed_search(&query).await;
    JsonLd(framer.frame(std::slice::from_ref(&graph)))
}

pub async fn handle_health_check() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}
