//! Error types shared across the crate.
//!
//! Per-source failures never surface through these types at query time: the
//! query client and the discovery providers swallow them and log. What is left
//! here is graph decoding (used by the client to classify bad responses and by
//! callers that build graphs themselves) and the fatal startup configuration
//! errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    /// The input could not be decoded under the declared format.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("unsupported graph format: {0}")]
    UnsupportedFormat(String),

    #[error("no node of type {0} in the graph")]
    NodeDoesNotExist(String),

    #[error("multiple nodes of type {0} in the graph")]
    MultipleNodesFound(String),
}

impl GraphError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        GraphError::MalformedDocument(msg.into())
    }
}

/// Raised while turning settings into a running aggregator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown discovery strategy '{0}' (expected one of: static, dummy, cluster, kube)")]
    UnknownDiscoveryStrategy(String),

    #[error("invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("request timeout must be a positive number of seconds, got {0}")]
    InvalidTimeout(f64),

    #[error("max in-flight queries must be at least 1")]
    InvalidConcurrency,
}
