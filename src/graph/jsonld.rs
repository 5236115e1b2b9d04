//! JSON-LD Codec
//!
//! Reads JSON-LD documents into triples and writes triples back as
//! documents, either flattened or framed around a root type.
//!
//! ## Framing
//! Every node typed with the frame type becomes a root object. Nodes reachable
//! from a root are embedded the first time they are met and referenced by
//! `@id` afterwards, which also breaks cycles. Blank node identifiers are only
//! written where something else still needs to refer to them.
//!
//! Embedding stops at [`MAX_EMBED_DEPTH`] levels below a root. A node met
//! deeper than that is written as a reference and emitted as an extra
//! top-level object, so long chains neither lose triples nor nest without
//! bound.

use oxjsonld::JsonLdParser;
use oxrdf::vocab::xsd;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use super::context::Context;
use super::namespace::RDF_TYPE;
use super::store::Graph;
use super::types::{
    BlankNodeRef, LiteralRef, NamedOrBlankNodeRef, TermRef, Triple, as_subject, subject_key,
};
use crate::error::GraphError;

/// Deepest level at which a framed node is still embedded in its parent.
pub const MAX_EMBED_DEPTH: usize = 32;

/// Parses a JSON-LD document. Named graphs are folded into the default graph.
pub fn parse(input: &str) -> Result<Vec<Triple>, GraphError> {
    JsonLdParser::new()
        .for_reader(input.as_bytes())
        .map(|quad| {
            quad.map(|quad| Triple::new(quad.subject, quad.predicate, quad.object))
                .map_err(|e| GraphError::malformed(e.to_string()))
        })
        .collect()
}

/// Renders a graph as `{"@context": ..., "@graph": [...]}` with one node
/// object per subject.
pub fn flatten(graph: &Graph, ctx: &Context) -> Value {
    let writer = Writer::new(graph, ctx, false);
    let items: Vec<Value> = writer
        .order
        .iter()
        .filter_map(|&subject| {
            let props = writer.nodes.get(&subject)?;
            Some(Value::Object(writer.node_object(subject, props, 0, None)))
        })
        .collect();

    let mut doc = Map::new();
    doc.insert("@context".to_string(), ctx.to_value());
    doc.insert("@graph".to_string(), Value::Array(items));
    Value::Object(doc)
}

/// Frames a graph around `root_type` (compact or absolute).
pub fn frame(graph: &Graph, ctx: &Context, root_type: &str) -> Value {
    let mut writer = Writer::new(graph, ctx, true);
    let root_type = ctx.expand_iri(root_type, true);

    let roots: Vec<NamedOrBlankNodeRef<'_>> = writer
        .order
        .iter()
        .copied()
        .filter(|subject| {
            writer
                .nodes
                .get(subject)
                .and_then(|props| props.get(RDF_TYPE))
                .is_some_and(|types| {
                    types.iter().any(
                        |t| matches!(t, TermRef::NamedNode(node) if node.as_str() == root_type),
                    )
                })
        })
        .collect();
    writer.roots = roots.iter().copied().collect();

    let mut embedding = Embedding {
        embedded: writer.roots.clone(),
        ..Embedding::default()
    };
    let mut framed: Vec<Map<String, Value>> = Vec::with_capacity(roots.len());
    for &root in &roots {
        if let Some(props) = writer.nodes.get(&root) {
            framed.push(writer.node_object(root, props, 0, Some(&mut embedding)));
        }
    }
    while let Some(node) = embedding.pending.pop_front() {
        if let Some(props) = writer.nodes.get(&node) {
            framed.push(writer.node_object(node, props, 0, Some(&mut embedding)));
        }
    }

    let mut doc = Map::new();
    doc.insert("@context".to_string(), ctx.to_value());
    match framed.len() {
        0 => {}
        1 => {
            for (key, value) in framed.remove(0) {
                doc.insert(key, value);
            }
        }
        _ => {
            let items = framed.into_iter().map(Value::Object).collect();
            doc.insert("@graph".to_string(), Value::Array(items));
        }
    }
    Value::Object(doc)
}

type Props<'g> = BTreeMap<&'g str, Vec<TermRef<'g>>>;

/// State of one framing pass.
#[derive(Default)]
struct Embedding<'g> {
    embedded: HashSet<NamedOrBlankNodeRef<'g>>,
    /// Nodes cut off at the depth limit, in the order they were met.
    pending: VecDeque<NamedOrBlankNodeRef<'g>>,
    detached: HashSet<NamedOrBlankNodeRef<'g>>,
}

struct Writer<'g> {
    ctx: &'g Context,
    nodes: HashMap<NamedOrBlankNodeRef<'g>, Props<'g>>,
    /// Subjects sorted by IRI or label.
    order: Vec<NamedOrBlankNodeRef<'g>>,
    /// How many triples point at each blank node.
    in_degree: HashMap<BlankNodeRef<'g>, usize>,
    roots: HashSet<NamedOrBlankNodeRef<'g>>,
    framing: bool,
}

impl<'g> Writer<'g> {
    fn new(graph: &'g Graph, ctx: &'g Context, framing: bool) -> Self {
        let mut nodes: HashMap<NamedOrBlankNodeRef<'g>, Props<'g>> = HashMap::new();
        let mut in_degree: HashMap<BlankNodeRef<'g>, usize> = HashMap::new();

        for triple in graph.iter() {
            nodes
                .entry(triple.subject)
                .or_default()
                .entry(triple.predicate.as_str())
                .or_default()
                .push(triple.object);
            if let TermRef::BlankNode(node) = triple.object {
                *in_degree.entry(node).or_insert(0) += 1;
            }
        }
        for values in nodes.values_mut().flat_map(|props| props.values_mut()) {
            values.sort_by_cached_key(|term| term.to_string());
        }

        let mut order: Vec<NamedOrBlankNodeRef<'g>> = nodes.keys().copied().collect();
        order.sort_by_cached_key(|subject| subject_key(*subject));

        Self {
            ctx,
            nodes,
            order,
            in_degree,
            roots: HashSet::new(),
            framing,
        }
    }

    fn node_object(
        &self,
        subject: NamedOrBlankNodeRef<'g>,
        props: &Props<'g>,
        depth: usize,
        mut embedding: Option<&mut Embedding<'g>>,
    ) -> Map<String, Value> {
        let mut obj = Map::new();
        if self.needs_id(subject, embedding.as_deref()) {
            obj.insert("@id".to_string(), Value::String(self.subject_id(subject)));
        }

        for (predicate, objects) in props {
            let is_type = *predicate == RDF_TYPE;
            let mut types = Vec::new();
            let mut values = Vec::new();
            for &object in objects {
                match object {
                    TermRef::NamedNode(node) if is_type => {
                        types.push(Value::String(self.ctx.compact_iri(node.as_str(), true)))
                    }
                    TermRef::BlankNode(node) if is_type => {
                        types.push(Value::String(node.to_string()))
                    }
                    _ => values.push(self.value(object, depth, embedding.as_deref_mut())),
                }
            }
            if !types.is_empty() {
                obj.insert("@type".to_string(), collapse(types));
            }
            if !values.is_empty() {
                let key = self.ctx.compact_iri(predicate, true);
                obj.insert(key, collapse(values));
            }
        }
        obj
    }

    fn value(
        &self,
        term: TermRef<'g>,
        depth: usize,
        embedding: Option<&mut Embedding<'g>>,
    ) -> Value {
        if let TermRef::Literal(literal) = term {
            return self.literal(literal);
        }
        if let Some(embedding) = embedding
            && let Some(subject) = as_subject(term)
            && let Some(props) = self.nodes.get(&subject)
            && embedding.embedded.insert(subject)
        {
            if depth < MAX_EMBED_DEPTH {
                return Value::Object(self.node_object(subject, props, depth + 1, Some(embedding)));
            }
            embedding.detached.insert(subject);
            embedding.pending.push_back(subject);
        }

        let mut reference = Map::new();
        reference.insert("@id".to_string(), Value::String(self.term_id(term)));
        Value::Object(reference)
    }

    /// Embedded blank nodes keep their label only when something else
    /// refers to them too.
    fn needs_id(
        &self,
        subject: NamedOrBlankNodeRef<'g>,
        embedding: Option<&Embedding<'g>>,
    ) -> bool {
        let NamedOrBlankNodeRef::BlankNode(node) = subject else {
            return true;
        };
        if !self.framing || embedding.is_some_and(|e| e.detached.contains(&subject)) {
            return true;
        }
        let referenced = self.in_degree.get(&node).copied().unwrap_or(0);
        referenced > 1 || (referenced == 1 && self.roots.contains(&subject))
    }

    fn subject_id(&self, subject: NamedOrBlankNodeRef<'_>) -> String {
        match subject {
            NamedOrBlankNodeRef::NamedNode(node) => self.ctx.compact_iri(node.as_str(), false),
            NamedOrBlankNodeRef::BlankNode(node) => node.to_string(),
        }
    }

    fn term_id(&self, term: TermRef<'_>) -> String {
        match as_subject(term) {
            Some(subject) => self.subject_id(subject),
            None => term.to_string(),
        }
    }

    fn literal(&self, literal: LiteralRef<'_>) -> Value {
        let mut obj = Map::new();
        obj.insert("@value".to_string(), Value::String(literal.value().to_string()));
        if let Some(lang) = literal.language() {
            obj.insert("@language".to_string(), Value::String(lang.to_string()));
            return Value::Object(obj);
        }
        if literal.datatype() == xsd::STRING && self.ctx.language().is_none() {
            return Value::String(literal.value().to_string());
        }
        obj.insert(
            "@type".to_string(),
            Value::String(self.ctx.compact_iri(literal.datatype().as_str(), true)),
        );
        Value::Object(obj)
    }
}

fn collapse(mut values: Vec<Value>) -> Value {
    if values.len() == 1 {
        values.remove(0)
    } else {
        Value::Array(values)
    }
}
