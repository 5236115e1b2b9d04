//! HTTP API Module
//!
//! Thin axum adapter over the aggregator.
//!
//! ## Routes
//! - `POST /search-catalog/`, `POST /local-search/`: local search, one framed catalog.
//! - `POST /search/`: distributed search, `@context` + `@graph` envelope.
//! - `GET /health-check`: liveness check.
//!
//! ## Submodules
//! - **`handlers`**: Request handlers.
//! - **`response`**: The `application/ld+json` response type.

pub mod handlers;
pub mod response;

use axum::Router;
use axum::extract::Extension;
use axum::routing::{get, post};
use std::sync::Arc;

use crate::aggregator::SearchAggregator;
use crate::client::protocol::{
    ENDPOINT_HEALTH_CHECK, ENDPOINT_LOCAL_SEARCH, ENDPOINT_SEARCH, ENDPOINT_SEARCH_CATALOG,
};
use crate::response::ResponseFramer;
use handlers::{handle_distributed_search, handle_health_check, handle_local_search};

pub use response::JsonLd;

pub fn router(aggregator: Arc<SearchAggregator>, framer: Arc<ResponseFramer>) -> Router {
    Router::new()
        .route(ENDPOINT_SEARCH_CATALOG, post(handle_local_search))
        .route(ENDPOINT_LOCAL_SEARCH, post(handle_local_search))
        .route(ENDPOINT_SEARCH, post(handle_distributed_search))
        .route(ENDPOINT_HEALTH_CHECK, get(handle_health_check))
        .layer(Extension(aggregator))
        .layer(Extension(framer))
}
