//! Graph Module
//!
//! The RDF data model every search result travels in.
//!
//! ## Overview
//! A `Graph` is an unordered set of triples. Results from independent sources
//! are combined by set union, and two graphs are equal when they differ only in
//! the labels of their blank nodes.
//!
//! ## Responsibilities
//! - **Model**: `oxrdf` terms and triples behind a set-semantics `Graph`.
//! - **Parsing**: JSON-LD (`oxjsonld`) and N-Triples (`oxttl`) into graphs,
//!   all-or-nothing, with fresh blank node labels per document.
//! - **Serialization**: Flattened or framed JSON-LD under the catalog context.
//! - **Equality**: Isomorphism through `oxrdf` canonicalization.
//!
//! ## Submodules
//! - **`context`**: JSON-LD context processing (term expansion and compaction).
//! - **`jsonld`**: JSON-LD parsing, flattening and framing.
//! - **`namespace`**: Vocabulary IRIs and the default catalog context.
//! - **`store`**: The `Graph` container and its entity accessors.
//! - **`types`**: Term re-exports and serialization formats.

pub mod context;
pub mod jsonld;
pub mod namespace;
pub mod store;
pub mod types;

pub use context::Context;
pub use store::Graph;
pub use types::{
    BlankNode, Format, Literal, NamedNode, NamedOrBlankNode, NamedOrBlankNodeRef, Term, TermRef,
    Triple,
};
