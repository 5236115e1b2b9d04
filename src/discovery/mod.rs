//! Discovery Module
//!
//! Answers "which peer search nodes exist right now?" at query time.
//!
//! ## Responsibilities
//! - **Static**: A configured peer list, for development and tests.
//! - **Cluster**: Resolves the search service name in every configured namespace
//!   through cluster DNS and turns each address into an endpoint.
//! - **Self-exclusion**: The node's own addresses are never reported as peers.
//!
//! Discovery never fails as a whole. A namespace that cannot be resolved is
//! logged and contributes nothing.
//!
//! ## Submodules
//! - **`cluster`**: DNS-based provider and the `HostResolver` seam.
//! - **`static_list`**: Fixed list provider.
//! - **`types`**: The `Endpoint` address type.

pub mod cluster;
pub mod static_list;
pub mod types;

use async_trait::async_trait;

pub use cluster::{ClusterDiscoveryProvider, HostResolver, SystemResolver};
pub use static_list::StaticDiscoveryProvider;
pub use types::Endpoint;

/// Source of peer endpoints, consulted once per distributed search.
#[async_trait]
pub trait DiscoveryProvider: Send + Sync {
    /// Peers to query. May be empty; duplicates are already removed.
    async fn discover(&self) -> Vec<Endpoint>;
}
