//! Search Aggregator Module
//!
//! The query-time core of a search node.
//!
//! ## Overview
//! A local search asks this node's catalog service. A distributed search asks
//! the local catalog and every peer found by discovery at the same time, waits
//! for all of them (each bounded by the client timeout), and merges whatever
//! came back. A peer is always asked through its local-search endpoint, so one
//! query reaches each node at most once.
//!
//! ## Submodules
//! - **`service`**: `SearchAggregator`.

pub mod service;

pub use service::{DEFAULT_MAX_IN_FLIGHT, SearchAggregator};

#[cfg(test)]
mod tests;
