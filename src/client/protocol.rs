//! Search Network Protocol
//!
//! Paths and media types shared by the catalog service and the search nodes.
//! Every query endpoint takes a JSON query document in a `POST` body and
//! answers with a JSON-LD graph.

// --- API Endpoints ---

/// Catalog endpoint that answers a query against this node's own data.
pub const ENDPOINT_PUBLIC_CATALOG: &str = "/public-catalog/";
/// Search node endpoint that answers from the node's local catalog only.
/// Peers are always queried here, so a search never fans out twice.
pub const ENDPOINT_LOCAL_SEARCH: &str = "/local-search/";
/// Alias of the local search endpoint kept for catalog-facing clients.
pub const ENDPOINT_SEARCH_CATALOG: &str = "/search-catalog/";
/// Distributed search across the local catalog and every discovered peer.
pub const ENDPOINT_SEARCH: &str = "/search/";
pub const ENDPOINT_HEALTH_CHECK: &str = "/health-check";

// --- Media Types ---

pub const MEDIA_TYPE_JSON_LD: &str = "application/ld+json";
