use std::str::FromStr;

pub use oxrdf::{
    BlankNode, BlankNodeRef, Literal, LiteralRef, NamedNode, NamedNodeRef, NamedOrBlankNode,
    NamedOrBlankNodeRef, Term, TermRef, Triple, TripleRef,
};

use crate::error::GraphError;

/// Serializations a graph can be parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    JsonLd,
    NTriples,
}

impl FromStr for Format {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json-ld" | "jsonld" | "application/ld+json" => Ok(Format::JsonLd),
            "nt" | "ntriples" | "n-triples" | "application/n-triples" => Ok(Format::NTriples),
            other => Err(GraphError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// The node a term points at, if it can stand as a subject.
pub(crate) fn as_subject(term: TermRef<'_>) -> Option<NamedOrBlankNodeRef<'_>> {
    match term {
        TermRef::NamedNode(node) => Some(node.into()),
        TermRef::BlankNode(node) => Some(node.into()),
        _ => None,
    }
}

/// `_:label` for blank nodes, the IRI otherwise.
pub(crate) fn subject_key(subject: NamedOrBlankNodeRef<'_>) -> String {
    match subject {
        NamedOrBlankNodeRef::NamedNode(node) => node.as_str().to_string(),
        NamedOrBlankNodeRef::BlankNode(node) => node.to_string(),
    }
}
