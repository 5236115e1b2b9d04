//! Catalog Query Client Module
//!
//! Talks to a single source: the node's own catalog service or a peer search node.
//!
//! ## Responsibilities
//! - **Request**: POSTs the query document as JSON, asking for `application/ld+json`.
//! - **Decoding**: Parses the response body into a `Graph`.
//! - **Degradation**: Refused connections, timeouts, non-2xx statuses and
//!   unparseable bodies all turn into an empty contribution. A query never
//!   raises to its caller.
//!
//! ## Submodules
//! - **`protocol`**: Endpoint paths and media types.
//! - **`query`**: `CatalogQueryClient`.
//! - **`transport`**: The `Transport` trait and its reqwest implementation.
//! - **`types`**: `Query`, `Contribution` and `SourceFailure`.

pub mod protocol;
pub mod query;
pub mod transport;
pub mod types;

pub use query::CatalogQueryClient;
pub use transport::{HttpTransport, Transport};
pub use types::{Contribution, Query, SourceFailure};
