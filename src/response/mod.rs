//! Response Framing Module
//!
//! Shapes search results into the JSON-LD documents returned to clients.
//! A single graph is framed as-is; a list of graphs is wrapped as a
//! `@context` + `@graph` envelope.

pub mod framer;

pub use framer::{Frameable, ResponseFramer};

#[cfg(test)]
mod tests;
