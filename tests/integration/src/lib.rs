//! Integration tests against a live OpenSearch Serverless collection.
//!
//! These tests need a collection endpoint in `AOSS_ENDPOINT` and credentials
//! discoverable by the default AWS provider chain. They are marked `#[ignore]`
//! so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! AOSS_ENDPOINT=https://abc123.us-east-1.aoss.amazonaws.com \
//!     cargo test -p aossctl-integration -- --ignored
//! ```

use std::sync::{Arc, Once};

use http::Method;
use rand::Rng;

use aossctl_auth::{AmbientCredentialSource, CredentialSource, SigV4Signer};
use aossctl_client::{
    ClientConfig, OpenSearchClient, Operation, OperationArgs, ReqwestTransport, run_operation,
};
use aossctl_core::{AossConfig, IndexName};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Collection endpoint under test.
fn endpoint() -> String {
    std::env::var("AOSS_ENDPOINT").expect("AOSS_ENDPOINT must point at a collection")
}

/// Build a signed client for the collection under test.
pub async fn aoss_client() -> OpenSearchClient {
    init_tracing();

    let config = AossConfig::from_env().expect("valid configuration");
    let credentials = AmbientCredentialSource::new(config.default_region.clone())
        .resolve()
        .await
        .expect("credentials in the default provider chain");

    let signer = SigV4Signer::new(
        credentials,
        config.default_region.as_str(),
        &config.service_name,
    );
    let client_config = ClientConfig::new(endpoint(), config.default_region, &config.service_name);
    OpenSearchClient::new(
        client_config,
        Arc::new(ReqwestTransport::new()),
        Arc::new(signer),
    )
    .expect("valid endpoint")
}

/// Generate a unique index name with a given prefix.
#[must_use]
pub fn test_index_name(prefix: &str) -> IndexName {
    let id: u32 = rand::rng().random();
    IndexName::new(format!("test-{prefix}-{id:08x}")).expect("non-empty name")
}

/// Arguments targeting `index`.
#[must_use]
pub fn args_for(index: &IndexName) -> OperationArgs {
    OperationArgs {
        index: Some(index.clone()),
        ..OperationArgs::default()
    }
}

/// Run `operation` and return what it printed.
pub async fn run(client: &OpenSearchClient, operation: Operation, args: &OperationArgs) -> String {
    let mut out = Vec::new();
    run_operation(client, operation, args, &mut out)
        .await
        .unwrap_or_else(|e| panic!("{operation} failed: {e}"));
    String::from_utf8(out).expect("utf-8 output")
}

/// Delete a test index, ignoring failures.
pub async fn cleanup_index(client: &OpenSearchClient, index: &IndexName) {
    let _ = client.send(Method::DELETE, index.as_str(), None, &[]).await;
}

mod test_inspect;
mod test_text;
mod test_vector;
