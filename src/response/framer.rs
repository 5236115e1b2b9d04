use serde_json::{Map, Value};

use crate::graph::namespace::CATALOG_TYPE;
use crate::graph::{Context, Graph};

/// Input to [`ResponseFramer::frame`]: a single graph or a list of graphs.
#[derive(Debug, Clone, Copy)]
pub enum Frameable<'a> {
    One(&'a Graph),
    Many(&'a [Graph]),
}

impl<'a> From<&'a Graph> for Frameable<'a> {
    fn from(graph: &'a Graph) -> Self {
        Frameable::One(graph)
    }
}

impl<'a> From<&'a [Graph]> for Frameable<'a> {
    fn from(graphs: &'a [Graph]) -> Self {
        Frameable::Many(graphs)
    }
}

impl<'a> From<&'a Vec<Graph>> for Frameable<'a> {
    fn from(graphs: &'a Vec<Graph>) -> Self {
        Frameable::Many(graphs.as_slice())
    }
}

/// Turns search results into response documents framed around a root type.
#[derive(Debug, Clone)]
pub struct ResponseFramer {
    context: Context,
    root_type: String,
}

impl ResponseFramer {
    pub fn new(context: Context, root_type: impl Into<String>) -> Self {
        Self {
            context,
            root_type: root_type.into(),
        }
    }

    /// Catalog vocabulary, rooted at `dcat:Catalog`.
    pub fn catalog() -> Self {
        Self::new(Context::catalog(), CATALOG_TYPE)
    }

    pub fn root_type(&self) -> &str {
        &self.root_type
    }

    /// One graph: the framed document itself.
    /// Many graphs: `{"@context": ..., "@graph": [...]}` with one entry per
    /// framed root, in input order, each without its own `@context`. Nodes
    /// cut off at the embedding depth limit follow the roots of their graph.
    pub fn frame<'a>(&self, input: impl Into<Frameable<'a>>) -> Value {
        match input.into() {
            Frameable::One(graph) => self.framed(graph),
            Frameable::Many(graphs) => {
                let items: Vec<Value> = graphs
                    .iter()
                    .flat_map(|graph| self.roots(graph))
                    .collect();

                let mut document = Map::new();
                document.insert("@context".to_string(), self.context.to_value());
                document.insert("@graph".to_string(), Value::Array(items));
                Value::Object(document)
            }
        }
    }

    /// The framed root objects of one graph, stripped of `@context`.
    fn roots(&self, graph: &Graph) -> Vec<Value> {
        let Value::Object(mut framed) = self.framed(graph) else {
            return Vec::new();
        };
        framed.remove("@context");

        match framed.remove("@graph") {
            Some(Value::Array(roots)) => roots,
            Some(other) => vec![other],
            None if framed.is_empty() => Vec::new(),
            None => vec![Value::Object(framed)],
        }
    }
}

impl ResponseFramer {
    fn framed(&self, graph: &Graph) -> Value {
        graph.to_document_with(&self.context, Some(self.root_type.as_str()))
    }
}

impl Default for ResponseFramer {
    fn default() -> Self {
        Self::catalog()
    }
}
