use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::GraphError;
use crate::graph::Graph;

/// A search query document. Forwarded to every source exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(pub Map<String, Value>);

impl Query {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Query {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Why a source contributed nothing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SourceFailure {
    /// Connection refused, DNS failure, reset, invalid URL.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("no answer within the request timeout")]
    Timeout,

    #[error("malformed response: {0}")]
    MalformedResponse(#[from] GraphError),
}

/// What one source added to a search.
#[derive(Debug, Clone, PartialEq)]
pub enum Contribution {
    Answered(Graph),
    /// The source failed and counts as an empty graph.
    Degraded(SourceFailure),
}

impl Contribution {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Contribution::Degraded(_))
    }

    pub fn into_graph(self) -> Graph {
        match self {
            Contribution::Answered(graph) => graph,
            Contribution::Degraded(_) => Graph::new(),
        }
    }
}
