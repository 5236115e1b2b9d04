//! Decentralized Catalog Search Library
//!
//! Each search node answers queries against its own catalog service and can
//! federate a query across every peer node it discovers, merging all answers
//! into a single RDF graph.
//!
//! ## Architecture Modules
//!
//! - **`graph`**: The RDF data model. Triples, union merge, isomorphism, and
//!   JSON-LD / N-Triples serialization with framing.
//! - **`discovery`**: Finds peer search nodes, from a static list or from
//!   cluster DNS, excluding the node itself.
//! - **`client`**: Queries one source over HTTP and degrades every failure to
//!   an empty answer.
//! - **`aggregator`**: Local search and the concurrent scatter-gather
//!   distributed search.
//! - **`response`**: Frames results into the JSON-LD response envelope.
//! - **`config`**: Settings from flags and `DS_SEARCH__` environment variables.
//! - **`api`**: The axum HTTP surface.
//! - **`error`**: Graph and configuration error types.

pub mod aggregator;
pub mod api;
pub mod client;
pub mod config;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod response;
