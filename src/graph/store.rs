use oxrdf::dataset::CanonicalizationAlgorithm;
use oxrdf::vocab::rdf;
use oxttl::NTriplesParser;
use serde_json::Value;
use std::collections::HashMap;

use super::context::Context;
use super::jsonld;
use super::types::{
    BlankNode, Format, NamedNode, NamedOrBlankNode, NamedOrBlankNodeRef, Term, TermRef, Triple,
    TripleRef,
};
use crate::error::GraphError;

/// A set of triples. Insertion order is irrelevant and duplicates collapse.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    inner: oxrdf::Graph,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a serialized graph. Either every statement is accepted or the
    /// whole document is rejected.
    ///
    /// Blank nodes get fresh labels, so graphs parsed from different
    /// documents never share one.
    pub fn parse(input: &str, format: Format) -> Result<Self, GraphError> {
        let triples = match format {
            Format::JsonLd => jsonld::parse(input)?,
            Format::NTriples => NTriplesParser::new()
                .for_reader(input.as_bytes())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| GraphError::malformed(e.to_string()))?,
        };
        Ok(relabel(triples))
    }

    pub fn from_json_ld(document: &Value) -> Result<Self, GraphError> {
        Self::parse(&document.to_string(), Format::JsonLd)
    }

    /// Returns `true` if the triple was not already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.inner.insert(&triple)
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.inner.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TripleRef<'_>> {
        self.inner.iter()
    }

    /// Set union. Neither input is modified.
    pub fn merge(&self, other: &Graph) -> Graph {
        let mut merged = self.clone();
        for triple in other.inner.iter() {
            merged.inner.insert(triple);
        }
        merged
    }

    /// Equality up to a consistent renaming of blank nodes.
    pub fn is_isomorphic(&self, other: &Graph) -> bool {
        self.len() == other.len() && self.canonical() == other.canonical()
    }

    fn canonical(&self) -> oxrdf::Graph {
        let mut graph = self.inner.clone();
        graph.canonicalize(CanonicalizationAlgorithm::Unstable);
        graph
    }

    /// Serializes with the catalog context, framed around `frame_type` when given.
    pub fn to_document(&self, frame_type: Option<&str>) -> Value {
        self.to_document_with(&Context::catalog(), frame_type)
    }

    pub fn to_document_with(&self, ctx: &Context, frame_type: Option<&str>) -> Value {
        match frame_type {
            Some(root_type) => jsonld::frame(self, ctx, root_type),
            None => jsonld::flatten(self, ctx),
        }
    }

    /// One N-Triples line per triple, in no particular order.
    pub fn to_ntriples(&self) -> String {
        self.inner
            .iter()
            .map(|triple| format!("{} .\n", triple))
            .collect()
    }

    /// Subjects typed with `rdf_type` (compact or absolute).
    pub fn find_nodes_by_type(&self, rdf_type: &str) -> Vec<NamedOrBlankNodeRef<'_>> {
        let rdf_type = Context::catalog().expand_iri(rdf_type, true);
        self.inner
            .iter()
            .filter(|t| {
                t.predicate == rdf::TYPE
                    && matches!(t.object, TermRef::NamedNode(node) if node.as_str() == rdf_type)
            })
            .map(|t| t.subject)
            .collect()
    }

    /// The only subject typed with `rdf_type`.
    pub fn get_node_by_type(&self, rdf_type: &str) -> Result<NamedOrBlankNodeRef<'_>, GraphError> {
        let nodes = self.find_nodes_by_type(rdf_type);
        match nodes.as_slice() {
            [] => Err(GraphError::NodeDoesNotExist(rdf_type.to_string())),
            [node] => Ok(*node),
            _ => Err(GraphError::MultipleNodesFound(rdf_type.to_string())),
        }
    }

    /// Values of `predicate` (compact or absolute) on `subject`.
    pub fn get_attribute(
        &self,
        subject: NamedOrBlankNodeRef<'_>,
        predicate: &str,
    ) -> Vec<TermRef<'_>> {
        let predicate = Context::catalog().expand_iri(predicate, true);
        self.inner
            .iter()
            .filter(|t| t.subject == subject && t.predicate.as_str() == predicate)
            .map(|t| t.object)
            .collect()
    }

    /// Replaces every value of `predicate` on `subject`.
    pub fn set_attribute(
        &mut self,
        subject: &NamedOrBlankNode,
        predicate: &str,
        values: impl IntoIterator<Item = Term>,
    ) -> Result<(), GraphError> {
        let predicate = NamedNode::new(Context::catalog().expand_iri(predicate, true))
            .map_err(|e| GraphError::malformed(e.to_string()))?;

        let stale: Vec<Triple> = self
            .inner
            .iter()
            .filter(|t| t.subject == subject.as_ref() && t.predicate == predicate.as_ref())
            .map(TripleRef::into_owned)
            .collect();
        for triple in &stale {
            self.inner.remove(triple);
        }
        for value in values {
            self.inner
                .insert(&Triple::new(subject.clone(), predicate.clone(), value));
        }
        Ok(())
    }
}

/// Gives every blank node of a freshly parsed document a new label.
fn relabel(triples: Vec<Triple>) -> Graph {
    let mut fresh: HashMap<BlankNode, BlankNode> = HashMap::new();
    let mut label = |node: BlankNode| fresh.entry(node).or_default().clone();

    let mut graph = Graph::new();
    for triple in triples {
        let subject = match triple.subject {
            NamedOrBlankNode::BlankNode(node) => NamedOrBlankNode::BlankNode(label(node)),
            other => other,
        };
        let object = match triple.object {
            Term::BlankNode(node) => Term::BlankNode(label(node)),
            other => other,
        };
        graph.insert(Triple::new(subject, triple.predicate, object));
    }
    graph
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.is_isomorphic(other)
    }
}

impl Eq for Graph {}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut graph = Graph::new();
        graph.extend(iter);
        graph
    }
}

impl FromIterator<Graph> for Graph {
    fn from_iter<I: IntoIterator<Item = Graph>>(iter: I) -> Self {
        let mut merged = Graph::new();
        merged.extend(iter);
        merged
    }
}

impl Extend<Graph> for Graph {
    fn extend<I: IntoIterator<Item = Graph>>(&mut self, iter: I) {
        for graph in iter {
            for triple in graph.inner.iter() {
                self.inner.insert(triple);
            }
        }
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.inner.insert(&triple);
        }
    }
}
