//! Request bodies for the catalog operations.
//!
//! Everything here is pure: bodies are built from their parameters (and an
//! injected random source for vectors) without touching the network.

use std::fmt::Write as _;
use std::ops::RangeInclusive;

use rand::Rng;
use serde_json::{Value, json};

use aossctl_core::{IndexName, KnnEngine};

/// Name of the vector field in every vector index and document.
pub const VECTOR_FIELD: &str = "target_field";

/// Range of each component of a random vector.
pub const VECTOR_COMPONENT_RANGE: RangeInclusive<i32> = -128..=127;

/// Query vector used by the k-NN search.
pub const KNN_QUERY_VECTOR: [i32; 2] = [10, 20];

/// Number of neighbours requested by the k-NN search.
pub const KNN_K: u32 = 10;

/// Page size for listing documents.
pub const DOCUMENT_PAGE_SIZE: usize = 100;

/// Columns projected by the index health listing.
pub const HEALTH_COLUMNS: &str = "health,status,pri,rep,docs.count,store.size";

/// Index body with `index.knn` enabled and one HNSW/L2 vector field.
#[must_use]
pub fn vector_index_mapping(dimension: usize, engine: KnnEngine) -> Value {
    json!({
        "settings": {
            "index": {
                "knn": true
            }
        },
        "mappings": {
            "properties": {
                VECTOR_FIELD: {
                    "type": "knn_vector",
                    "dimension": dimension,
                    "method": {
                        "name": "hnsw",
                        "space_type": "l2",
                        "engine": engine.as_str()
                    }
                }
            }
        }
    })
}

/// Index body for plain text documents.
#[must_use]
pub fn text_index_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "title": {"type": "text"},
                "description": {"type": "text"},
                "tags": {"type": "keyword"}
            }
        }
    })
}

/// A vector of `dimension` integers drawn from [`VECTOR_COMPONENT_RANGE`].
pub fn random_vector<R: Rng + ?Sized>(rng: &mut R, dimension: usize) -> Vec<i32> {
    (0..dimension)
        .map(|_| rng.random_range(VECTOR_COMPONENT_RANGE))
        .collect()
}

/// A document holding one random vector.
pub fn vector_document<R: Rng + ?Sized>(rng: &mut R, dimension: usize) -> Value {
    json!({ VECTOR_FIELD: random_vector(rng, dimension) })
}

/// Newline-delimited bulk body: an `index` action line followed by a vector
/// document line, `num_docs` times, each line newline-terminated.
pub fn bulk_vectors_payload<R: Rng + ?Sized>(
    rng: &mut R,
    index: &IndexName,
    num_docs: usize,
    dimension: usize,
) -> String {
    let action = json!({"index": {"_index": index.as_str()}}).to_string();
    let mut payload = String::new();
    for _ in 0..num_docs {
        let document = vector_document(rng, dimension);
        // Writing to a String cannot fail.
        let _ = writeln!(payload, "{action}");
        let _ = writeln!(payload, "{document}");
    }
    payload
}

/// k-NN query against [`VECTOR_FIELD`] with the fixed query vector.
#[must_use]
pub fn knn_vector_query() -> Value {
    json!({
        "query": {
            "knn": {
                VECTOR_FIELD: {
                    "vector": KNN_QUERY_VECTOR,
                    "k": KNN_K
                }
            }
        }
    })
}

/// Delete-by-query body; matches everything unless `query` is given.
#[must_use]
pub fn delete_query(query: Option<Value>) -> Value {
    json!({ "query": query.unwrap_or_else(|| json!({"match_all": {}})) })
}

/// First page of all documents in index order.
#[must_use]
pub fn match_all_page(size: usize) -> Value {
    json!({
        "size": size,
        "query": {"match_all": {}},
        "sort": ["_doc"]
    })
}

/// Fixed sample text document.
#[must_use]
pub fn text_document() -> Value {
    json!({
        "title": "OpenSearch Tutorial",
        "description": "This is a guide about OpenSearch and its features",
        "tags": ["search", "tutorial"]
    })
}

/// Match query for the sample text document.
#[must_use]
pub fn text_match_query() -> Value {
    json!({
        "query": {
            "match": {
                "description": "OpenSearch guide"
            }
        }
    })
}

/// Fixed document mixing a float vector with category, price and stock.
#[must_use]
pub fn specific_document() -> Value {
    json!({
        VECTOR_FIELD: [15.5, 25.7],
        "category": "electronics",
        "price": 299.99,
        "in_stock": true
    })
}

/// Boolean query matching [`specific_document`].
#[must_use]
pub fn specific_bool_query() -> Value {
    json!({
        "query": {
            "bool": {
                "must": [
                    {"term": {"category": "electronics"}},
                    {"range": {"price": {"gte": 290, "lte": 300}}},
                    {"term": {"in_stock": true}}
                ]
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_should_embed_dimension_in_vector_mapping() {
        let mapping = vector_index_mapping(768, KnnEngine::Faiss);
        let field = &mapping["mappings"]["properties"]["target_field"];
        assert_eq!(field["type"], "knn_vector");
        assert_eq!(field["dimension"], 768);
        assert_eq!(field["method"]["name"], "hnsw");
        assert_eq!(field["method"]["space_type"], "l2");
        assert_eq!(field["method"]["engine"], "faiss");
        assert_eq!(mapping["settings"]["index"]["knn"], true);
    }

    #[test]
    fn test_should_use_configured_engine() {
        let mapping = vector_index_mapping(2, KnnEngine::Lucene);
        assert_eq!(
            mapping["mappings"]["properties"]["target_field"]["method"]["engine"],
            "lucene"
        );
    }

    #[test]
    fn test_should_generate_vectors_within_range() {
        let mut rng = rng();
        for _ in 0..50 {
            let vector = random_vector(&mut rng, 16);
            assert_eq!(vector.len(), 16);
            assert!(vector.iter().all(|c| VECTOR_COMPONENT_RANGE.contains(c)));
        }
        assert!(random_vector(&mut rng, 0).is_empty());
    }

    #[test]
    fn test_should_build_alternating_bulk_lines() {
        let index = IndexName::new("vectors").unwrap();
        let payload = bulk_vectors_payload(&mut rng(), &index, 5, 3);
        assert!(payload.ends_with('\n'));

        let lines: Vec<Value> = payload
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 10);

        for pair in lines.chunks(2) {
            assert_eq!(pair[0], json!({"index": {"_index": "vectors"}}));
            let vector = pair[1]["target_field"].as_array().unwrap();
            assert_eq!(vector.len(), 3);
            for component in vector {
                let c = component.as_i64().unwrap();
                assert!((-128..=127).contains(&c));
            }
        }
    }

    #[test]
    fn test_should_build_empty_bulk_payload_for_zero_docs() {
        let index = IndexName::new("vectors").unwrap();
        assert_eq!(bulk_vectors_payload(&mut rng(), &index, 0, 3), "");
    }

    #[test]
    fn test_should_default_delete_to_match_all() {
        assert_eq!(delete_query(None), json!({"query": {"match_all": {}}}));
        let term = json!({"term": {"category": "books"}});
        assert_eq!(delete_query(Some(term.clone())), json!({"query": term}));
    }

    #[test]
    fn test_should_use_fixed_query_vector() {
        let query = knn_vector_query();
        assert_eq!(query["query"]["knn"]["target_field"]["vector"], json!([10, 20]));
        assert_eq!(query["query"]["knn"]["target_field"]["k"], 10);
    }

    #[test]
    fn test_should_page_documents_in_index_order() {
        let page = match_all_page(DOCUMENT_PAGE_SIZE);
        assert_eq!(page["size"], 100);
        assert_eq!(page["sort"], json!(["_doc"]));
    }

    #[test]
    fn test_should_match_specific_document_thresholds() {
        let query = specific_bool_query();
        let must = query["query"]["bool"]["must"].as_array().unwrap();
        assert_eq!(must.len(), 3);
        assert_eq!(must[1]["range"]["price"], json!({"gte": 290, "lte": 300}));
        assert_eq!(specific_document()["price"], 299.99);
    }
}
