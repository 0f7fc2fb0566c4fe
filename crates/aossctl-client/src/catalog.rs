//! Operation catalog.
//!
//! Each operation is planned as one fixed-shape request (two for
//! [`Operation::GetIndexSettings`]), sent through [`OpenSearchClient`], and
//! its result written to `out`. Response bodies are printed whatever their
//! status; only the index and document listings branch on success.

use std::io::Write;

use http::{Method, StatusCode};
use rand::Rng;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use aossctl_core::{IndexName, KnnEngine};

use crate::client::OpenSearchClient;
use crate::error::CatalogError;
use crate::operations::Operation;
use crate::payload;
use crate::request::OperationRequest;
use crate::transport::ApiResponse;

/// Arguments shared by every operation.
#[derive(Debug, Clone)]
pub struct OperationArgs {
    /// Target index; required by every operation except `list_indices`.
    pub index: Option<IndexName>,
    /// Vector dimension for vector index creation and ingestion.
    pub dimension: usize,
    /// Number of documents for bulk ingestion.
    pub num_docs: usize,
    /// Engine for vector index creation.
    pub engine: KnnEngine,
    /// Query for `delete_documents`; `None` deletes everything.
    pub delete_query: Option<Value>,
}

impl Default for OperationArgs {
    fn default() -> Self {
        Self {
            index: None,
            dimension: 2,
            num_docs: 5,
            engine: KnnEngine::default(),
            delete_query: None,
        }
    }
}

/// Check that `args` carry everything `operation` needs.
///
/// # Errors
///
/// Returns [`CatalogError::MissingIndex`] when an index is required but absent.
pub fn validate_args(operation: Operation, args: &OperationArgs) -> Result<(), CatalogError> {
    if operation.requires_index() && args.index.is_none() {
        return Err(CatalogError::MissingIndex(operation));
    }
    Ok(())
}

/// Plan the requests `operation` will issue, in order.
///
/// Vector payloads draw from the thread-local generator.
///
/// # Errors
///
/// Returns [`CatalogError::MissingIndex`] when an index is required but absent;
/// nothing is built in that case.
pub fn build_requests(
    operation: Operation,
    args: &OperationArgs,
) -> Result<Vec<OperationRequest>, CatalogError> {
    build_requests_with(&mut rand::rng(), operation, args)
}

/// [`build_requests`] with an explicit random source.
///
/// # Errors
///
/// As [`build_requests`].
pub fn build_requests_with<R: Rng + ?Sized>(
    rng: &mut R,
    operation: Operation,
    args: &OperationArgs,
) -> Result<Vec<OperationRequest>, CatalogError> {
    validate_args(operation, args)?;
    let Some(index) = args.index.as_ref() else {
        return Ok(vec![
            OperationRequest::new(Method::GET, "_cat/indices").query(&[("format", "json")]),
        ]);
    };

    let request = match operation {
        Operation::ListIndices => {
            OperationRequest::new(Method::GET, "_cat/indices").query(&[("format", "json")])
        }
        Operation::CreateVectorIndex => OperationRequest::new(Method::PUT, index.as_str())
            .json(payload::vector_index_mapping(args.dimension, args.engine)),
        Operation::CreateTextIndex => OperationRequest::new(Method::PUT, index.as_str())
            .json(payload::text_index_mapping()),
        Operation::IngestVectorDoc => OperationRequest::new(Method::POST, format!("{index}/_doc"))
            .json(payload::vector_document(rng, args.dimension)),
        Operation::BulkIngestVectors => OperationRequest::new(Method::POST, "_bulk").ndjson(
            payload::bulk_vectors_payload(rng, index, args.num_docs, args.dimension),
        ),
        Operation::SearchVectorDoc => {
            OperationRequest::new(Method::POST, format!("{index}/_search"))
                .json(payload::knn_vector_query())
        }
        Operation::GetIndexSettings => {
            return Ok(vec![
                OperationRequest::new(Method::GET, format!("{index}/_settings")),
                OperationRequest::new(Method::GET, format!("{index}/_mapping")),
            ]);
        }
        Operation::DeleteDocuments => {
            OperationRequest::new(Method::POST, format!("{index}/_delete_by_query"))
                .json(payload::delete_query(args.delete_query.clone()))
        }
        Operation::GetAllDocuments => {
            OperationRequest::new(Method::POST, format!("{index}/_search"))
                .json(payload::match_all_page(payload::DOCUMENT_PAGE_SIZE))
        }
        Operation::GetIndexHealth => {
            OperationRequest::new(Method::GET, format!("_cat/indices/{index}")).query(&[
                ("v", "true"),
                ("h", payload::HEALTH_COLUMNS),
                ("format", "json"),
            ])
        }
        Operation::GetShardInfo => OperationRequest::new(Method::GET, format!("_cat/shards/{index}"))
            .query(&[("v", "true"), ("format", "json")]),
        Operation::AddTextDoc => OperationRequest::new(Method::POST, format!("{index}/_doc"))
            .json(payload::text_document()),
        Operation::SearchTextDoc => {
            OperationRequest::new(Method::POST, format!("{index}/_search"))
                .json(payload::text_match_query())
        }
        Operation::AddSpecificDoc => OperationRequest::new(Method::POST, format!("{index}/_doc"))
            .json(payload::specific_document()),
        Operation::SearchSpecificDoc => {
            OperationRequest::new(Method::POST, format!("{index}/_search"))
                .json(payload::specific_bool_query())
        }
    };
    Ok(vec![request])
}

/// Run `operation` against `client`, writing its result to `out`.
///
/// Requests are issued one at a time, each awaited before the next.
///
/// # Errors
///
/// Returns [`CatalogError::MissingIndex`] before touching the network, or an
/// output/decoding error while rendering. Transport failures are not errors:
/// they are logged by the client and leave `out` untouched.
pub async fn run_operation<W: Write>(
    client: &OpenSearchClient,
    operation: Operation,
    args: &OperationArgs,
    out: &mut W,
) -> Result<(), CatalogError> {
    let requests = build_requests(operation, args)?;
    info!(
        %operation,
        index = args.index.as_ref().map_or("-", IndexName::as_str),
        requests = requests.len(),
        "running operation"
    );

    for (step, request) in requests.into_iter().enumerate() {
        let response = client.execute(request).await;
        render(operation, step, response, args, out)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render<W: Write>(
    operation: Operation,
    step: usize,
    response: Option<ApiResponse>,
    args: &OperationArgs,
    out: &mut W,
) -> Result<(), CatalogError> {
    match operation {
        Operation::ListIndices => match response {
            Some(response) if response.status == StatusCode::OK => {
                writeln!(out, "\nIndices:")?;
                write_body(out, &response)
            }
            _ => {
                writeln!(out, "Failed to list indices")?;
                Ok(())
            }
        },
        Operation::GetIndexSettings => {
            let Some(response) = response else {
                return Ok(());
            };
            let label = if step == 0 { "Settings" } else { "Mappings" };
            writeln!(out, "\n{label}:")?;
            write_body(out, &response)
        }
        Operation::GetAllDocuments => match response {
            Some(response) if response.status == StatusCode::OK => {
                let index = args.index.as_ref().map_or("", IndexName::as_str);
                write_documents(out, index, &response)
            }
            _ => Ok(()),
        },
        _ => match response {
            Some(response) => write_body(out, &response),
            None => Ok(()),
        },
    }
}

/// Pretty-print a response body, falling back to raw text for non-JSON.
fn write_body<W: Write>(out: &mut W, response: &ApiResponse) -> Result<(), CatalogError> {
    if !response.is_success() {
        warn!(status = %response.status, "service returned an error status");
    }
    match response.json() {
        Ok(value) => write_json(out, &value),
        Err(_) => {
            writeln!(out, "{}", response.text())?;
            Ok(())
        }
    }
}

fn write_json<W: Write>(out: &mut W, value: &Value) -> Result<(), CatalogError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: SearchHits,
}

#[derive(Debug, Deserialize)]
struct SearchHits {
    total: TotalHits,
    #[serde(default)]
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct TotalHits {
    value: u64,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source", default)]
    source: Value,
}

fn write_documents<W: Write>(
    out: &mut W,
    index: &str,
    response: &ApiResponse,
) -> Result<(), CatalogError> {
    let result: SearchResponse = serde_json::from_slice(&response.body)?;
    writeln!(
        out,
        "\nTotal documents in index '{index}': {}",
        result.hits.total.value
    )?;
    writeln!(out, "\nDocuments:")?;
    for hit in &result.hits.hits {
        writeln!(out, "\nDocument ID: {}", hit.id)?;
        write_json(out, &hit.source)?;
        writeln!(out, "---")?;
    }
    Ok(())
}
