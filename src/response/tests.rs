//! Response Module Tests
//!
//! ## Test Scopes
//! - **Single graph**: Framed document with the root hoisted.
//! - **Graph lists**: Shared context, one item per root, input order, empty input.

#[cfg(test)]
mod tests {
    use crate::graph::jsonld::MAX_EMBED_DEPTH;
    use crate::graph::namespace::{RDF_TYPE, default_context};
    use crate::graph::{Format, Graph};
    use crate::response::ResponseFramer;
    use serde_json::json;

    fn catalog(id: &str, title: &str) -> Graph {
        let nt = format!(
            concat!(
                "<https://example.com/{id}> <{rdf_type}> <http://www.w3.org/ns/dcat#Catalog> .\n",
                "<https://example.com/{id}> <http://purl.org/dc/terms/title> \"{title}\" .\n"
            ),
            id = id,
            rdf_type = RDF_TYPE,
            title = title
        );
        Graph::parse(&nt, Format::NTriples).unwrap()
    }

    #[test]
    fn test_frame_single_graph() {
        let framer = ResponseFramer::catalog();

        let document = framer.frame(&catalog("local", "Local catalog"));

        assert_eq!(document["@context"], default_context());
        assert_eq!(document["@type"], "dcat:Catalog");
        assert_eq!(document["dcterms:title"], "Local catalog");
    }

    #[test]
    fn test_frame_empty_single_graph() {
        let framer = ResponseFramer::catalog();

        let document = framer.frame(&Graph::new());

        assert_eq!(document, json!({ "@context": default_context() }));
    }

    #[test]
    fn test_frame_empty_list() {
        let framer = ResponseFramer::catalog();
        let graphs: Vec<Graph> = Vec::new();

        let document = framer.frame(&graphs);

        assert_eq!(
            document,
            json!({ "@context": default_context(), "@graph": [] })
        );
    }

    #[test]
    fn test_frame_list_of_one() {
        let framer = ResponseFramer::catalog();
        let graphs = vec![catalog("local", "Local catalog")];

        let document = framer.frame(&graphs);

        let items = document["@graph"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].get("@context").is_none());
        assert_eq!(items[0]["@id"], "https://example.com/local");
    }

    #[test]
    fn test_frame_list_preserves_order_and_skips_empty() {
        let framer = ResponseFramer::catalog();
        let graphs = vec![
            catalog("b", "Second peer"),
            Graph::new(),
            catalog("a", "First peer"),
        ];

        let document = framer.frame(graphs.as_slice());

        let ids: Vec<&str> = document["@graph"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["@id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["https://example.com/b", "https://example.com/a"]);
    }

    #[test]
    fn test_frame_merged_graph_lists_every_root() {
        let framer = ResponseFramer::catalog();
        let merged = catalog("a", "One").merge(&catalog("b", "Two"));

        let document = framer.frame(std::slice::from_ref(&merged));

        assert_eq!(document["@graph"].as_array().unwrap().len(), 2);
    }

    /// A catalog linked to a chain of `len` datasets.
    fn long_chain(len: usize) -> Graph {
        let mut nt = String::new();
        let mut previous = "https://example.com/chain".to_string();
        for i in 0..len {
            let current = format!("https://example.com/dataset/{}", i);
            nt.push_str(&format!("<{}> <http://example.org/next> <{}> .\n", previous, current));
            previous = current;
        }
        catalog("chain", "Chain").merge(&Graph::parse(&nt, Format::NTriples).unwrap())
    }

    #[test]
    fn test_frame_long_chain_on_small_stack() {
        let graph = long_chain(20_000);

        let (single, many) = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || {
                let framer = ResponseFramer::catalog();
                let single = framer.frame(&graph).to_string();
                let many = framer.frame(std::slice::from_ref(&graph)).to_string();
                (single, many)
            })
            .unwrap()
            .join()
            .unwrap();

        let expected_items = 20_000usize.div_ceil(MAX_EMBED_DEPTH + 1);
        let single: serde_json::Value = serde_json::from_str(&single).unwrap();
        let many: serde_json::Value = serde_json::from_str(&many).unwrap();
        assert_eq!(single["@graph"].as_array().unwrap().len(), expected_items);
        assert_eq!(many["@graph"].as_array().unwrap().len(), expected_items);
        assert_eq!(many["@graph"][0]["@id"], "https://example.com/chain");
    }
}
