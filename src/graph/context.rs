//! JSON-LD Context Processing
//!
//! Maps the short names used in written documents (`dcat:Dataset`, `title`)
//! to absolute IRIs and back. Only inline contexts are supported.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::namespace::default_context;
use crate::error::GraphError;

/// How plain string values of a term are interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coercion {
    /// `"@type": "@id"`: strings are IRI references.
    Id,
    /// `"@type": "@vocab"`: strings are vocabulary-relative IRI references.
    Vocab,
    /// Strings are literals of this datatype.
    Datatype(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermDefinition {
    pub iri: String,
    pub coercion: Option<Coercion>,
}

/// An active JSON-LD context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    vocab: Option<String>,
    language: Option<String>,
    terms: BTreeMap<String, TermDefinition>,
    source: Map<String, Value>,
}

impl Context {
    /// Processes a `@context` value against an empty context.
    pub fn parse(value: &Value) -> Result<Self, GraphError> {
        Context::default().with_local(value)
    }

    /// The catalog vocabulary every response is serialized with.
    pub fn catalog() -> Self {
        Context::parse(&default_context()).unwrap_or_default()
    }

    /// Returns the context that results from applying `local` on top of this one.
    pub fn with_local(&self, local: &Value) -> Result<Self, GraphError> {
        let mut ctx = self.clone();
        match local {
            Value::Null => return Ok(Context::default()),
            Value::String(s) if s.is_empty() => {}
            Value::String(s) => {
                return Err(GraphError::malformed(format!(
                    "remote context '{}' cannot be loaded",
                    s
                )));
            }
            Value::Array(items) => {
                for item in items {
                    ctx = ctx.with_local(item)?;
                }
            }
            Value::Object(map) => ctx.apply(map)?,
            _ => return Err(GraphError::malformed("@context must be an object, array or null")),
        }
        Ok(ctx)
    }

    fn apply(&mut self, map: &Map<String, Value>) -> Result<(), GraphError> {
        match map.get("@vocab") {
            None => {}
            Some(Value::Null) => self.vocab = None,
            Some(Value::String(vocab)) => self.vocab = Some(self.expand_iri(vocab, true)),
            Some(_) => return Err(GraphError::malformed("@vocab must be a string or null")),
        }

        match map.get("@language") {
            None => {}
            Some(Value::Null) => self.language = None,
            Some(Value::String(lang)) => self.language = Some(lang.to_lowercase()),
            Some(_) => return Err(GraphError::malformed("@language must be a string or null")),
        }

        // Terms may be defined through prefixes declared in the same object,
        // and the object is not ordered by dependency. A second pass settles
        // one level of forward references.
        for _ in 0..2 {
            for (term, value) in map.iter().filter(|(k, _)| !k.starts_with('@')) {
                match self.definition(term, value)? {
                    Some(def) => {
                        self.terms.insert(term.clone(), def);
                    }
                    None => {
                        self.terms.remove(term);
                    }
                }
            }
        }

        for (key, value) in map {
            self.source.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    fn definition(&self, term: &str, value: &Value) -> Result<Option<TermDefinition>, GraphError> {
        match value {
            Value::Null => Ok(None),
            Value::String(id) => Ok(Some(TermDefinition {
                iri: self.expand_definition_iri(term, id),
                coercion: None,
            })),
            Value::Object(def) => {
                let iri = match def.get("@id") {
                    Some(Value::String(id)) => self.expand_definition_iri(term, id),
                    Some(Value::Null) => return Ok(None),
                    None => self.expand_iri(term, true),
                    Some(_) => {
                        return Err(GraphError::malformed(format!(
                            "@id of term '{}' must be a string",
                            term
                        )));
                    }
                };
                let coercion = match def.get("@type") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(t)) if t == "@id" => Some(Coercion::Id),
                    Some(Value::String(t)) if t == "@vocab" => Some(Coercion::Vocab),
                    Some(Value::String(t)) => Some(Coercion::Datatype(self.expand_iri(t, true))),
                    Some(_) => {
                        return Err(GraphError::malformed(format!(
                            "@type of term '{}' must be a string",
                            term
                        )));
                    }
                };
                Ok(Some(TermDefinition { iri, coercion }))
            }
            _ => Err(GraphError::malformed(format!(
                "invalid definition for term '{}'",
                term
            ))),
        }
    }

    // A term must not expand through its own (possibly stale) definition.
    fn expand_definition_iri(&self, term: &str, id: &str) -> String {
        if id == term {
            return id.to_string();
        }
        self.expand_iri(id, true)
    }

    pub fn term(&self, key: &str) -> Option<&TermDefinition> {
        self.terms.get(key)
    }

    pub fn vocab(&self) -> Option<&str> {
        self.vocab.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Expands a term, compact IRI or absolute IRI.
    ///
    /// `vocab` selects vocabulary-relative resolution (property names and
    /// `@type` values); otherwise the value is an `@id` reference and only
    /// prefixes apply.
    pub fn expand_iri(&self, value: &str, vocab: bool) -> String {
        if value.starts_with('@') {
            return value.to_string();
        }
        if vocab && let Some(def) = self.terms.get(value) {
            return def.iri.clone();
        }
        if let Some((prefix, suffix)) = value.split_once(':') {
            if prefix == "_" || suffix.starts_with("//") {
                return value.to_string();
            }
            if let Some(def) = self.terms.get(prefix) {
                return format!("{}{}", def.iri, suffix);
            }
            return value.to_string();
        }
        if vocab && let Some(base) = &self.vocab {
            return format!("{}{}", base, value);
        }
        value.to_string()
    }

    /// The shortest form of `iri` that expands back to it under this context.
    pub fn compact_iri(&self, iri: &str, vocab: bool) -> String {
        let mut candidates: Vec<String> = Vec::new();

        if vocab {
            for (term, def) in &self.terms {
                if def.iri == iri && def.coercion.is_none() {
                    candidates.push(term.clone());
                }
            }
            if let Some(base) = &self.vocab
                && let Some(rest) = iri.strip_prefix(base.as_str())
                && !rest.is_empty()
                && !rest.contains(':')
            {
                candidates.push(rest.to_string());
            }
        }

        for (term, def) in &self.terms {
            if term.contains(':') {
                continue;
            }
            if let Some(rest) = iri.strip_prefix(def.iri.as_str())
                && !rest.is_empty()
                && !rest.starts_with("//")
            {
                candidates.push(format!("{}:{}", term, rest));
            }
        }

        candidates.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        candidates
            .into_iter()
            .find(|candidate| {
                let uncoerced = !vocab
                    || self
                        .terms
                        .get(candidate)
                        .is_none_or(|def| def.coercion.is_none());
                uncoerced && self.expand_iri(candidate, vocab) == iri
            })
            .unwrap_or_else(|| iri.to_string())
    }

    /// The context as it appears in a document.
    pub fn to_value(&self) -> Value {
        Value::Object(self.source.clone())
    }
}
