//! Vocabulary used by the catalog documents.

use serde_json::{Value, json};

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

pub const DSPACE: &str = "http://data-space.org/";
pub const DCAT: &str = "http://www.w3.org/ns/dcat#";
pub const DCATAP: &str = "http://data.europa.eu/r5r/";
pub const DCTERMS: &str = "http://purl.org/dc/terms/";
pub const SPDX: &str = "http://spdx.org/rdf/terms#";
pub const FOAF: &str = "http://xmlns.com/foaf/0.1/";
pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";

/// Root type of every search response.
pub const CATALOG_TYPE: &str = "dcat:Catalog";
pub const DATASET_TYPE: &str = "dcat:Dataset";
/// Type tag of query documents.
pub const FILTERS_TYPE: &str = "Filters";

/// The context every node serializes with.
pub fn default_context() -> Value {
    json!({
        "@vocab": DSPACE,
        "xsd": XSD,
        "dcat": DCAT,
        "dcatap": DCATAP,
        "dcterms": DCTERMS,
        "spdx": SPDX,
        "foaf": FOAF,
        "skos": SKOS,
    })
}
