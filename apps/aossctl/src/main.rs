//! aossctl - run a single operation against an OpenSearch Serverless
//! collection.
//!
//! Every invocation resolves AWS credentials, signs one or two requests with
//! SigV4 and prints the (pretty-printed) responses on stdout. Logs go to
//! stderr.
//!
//! # Usage
//!
//! ```text
//! aossctl --account 123456789012 \
//!     --endpoint https://abc123.us-east-1.aoss.amazonaws.com \
//!     --operation bulk_ingest_vectors --index vectors --dimension 8 --num_docs 100
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DEFAULT_REGION` | `us-east-1` | Region used when `--region` is absent |
//! | `AOSS_SERVICE_NAME` | `aoss` | Service name in the signature scope |
//! | `AOSS_KNN_ENGINE` | `faiss` | Engine used when `--engine` is absent |
//! | `AOSS_CREDENTIAL_TOOL` | `ada` | Program run by `--refresh-credentials` |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::PossibleValuesParser;
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use aossctl_auth::{
    AmbientCredentialSource, CredentialSource, RefreshError, SigV4Signer, refresh_credentials,
};
use aossctl_client::{
    ClientConfig, OpenSearchClient, Operation, OperationArgs, ReqwestTransport, Transport,
    run_operation, validate_args,
};
use aossctl_core::{AossConfig, AwsRegion, IndexName, KnnEngine};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "aossctl", version, about = "OpenSearch Serverless testing utility")]
struct Cli {
    /// AWS account, passed to the credential refresh tool.
    #[arg(long)]
    account: String,

    /// Collection endpoint, e.g. https://abc123.us-east-1.aoss.amazonaws.com.
    #[arg(long)]
    endpoint: String,

    /// Role passed to the credential refresh tool.
    #[arg(long, default_value = "Admin")]
    role: String,

    /// AWS region [default: us-east-1, or DEFAULT_REGION].
    #[arg(long)]
    region: Option<String>,

    /// Environment stage.
    #[arg(long, default_value = "beta")]
    stage: String,

    /// Index name for operations.
    #[arg(long)]
    index: Option<String>,

    /// Vector dimension.
    #[arg(long, default_value_t = 2)]
    dimension: usize,

    /// Number of documents to bulk ingest.
    #[arg(long = "num_docs", default_value_t = 5)]
    num_docs: usize,

    /// Operation to perform.
    #[arg(long, value_parser = PossibleValuesParser::new(Operation::names()))]
    operation: String,

    /// k-NN engine for create_vector_index [default: faiss, or AOSS_KNN_ENGINE].
    #[arg(long)]
    engine: Option<KnnEngine>,

    /// Query (JSON) for delete_documents; defaults to match_all.
    #[arg(long, value_parser = parse_json)]
    query: Option<Value>,

    /// Refresh credentials with the external tool before running.
    #[arg(long)]
    refresh_credentials: bool,
}

impl Cli {
    fn region(&self, config: &AossConfig) -> AwsRegion {
        self.region
            .as_deref()
            .map_or_else(|| config.default_region.clone(), AwsRegion::new)
    }

    /// Operation arguments; an empty `--index` counts as absent.
    fn operation_args(&self, config: &AossConfig) -> OperationArgs {
        OperationArgs {
            index: self
                .index
                .as_deref()
                .and_then(|name| IndexName::new(name).ok()),
            dimension: self.dimension,
            num_docs: self.num_docs,
            engine: self.engine.unwrap_or(config.knn_engine),
            delete_query: self.query.clone(),
        }
    }
}

fn parse_json(s: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(s)
}

/// Initialize the tracing subscriber on stderr.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    Ok(())
}

/// Validate, optionally refresh, resolve credentials, then run the operation.
///
/// Handled failures (missing index, refresh failure, no credentials) are
/// reported on `out` and return `Ok`.
async fn dispatch<W: Write>(
    cli: &Cli,
    config: &AossConfig,
    credentials: &dyn CredentialSource,
    transport: Arc<dyn Transport>,
    out: &mut W,
) -> Result<()> {
    let operation = match cli.operation.parse::<Operation>() {
        Ok(operation) => operation,
        Err(e) => {
            writeln!(out, "{e}")?;
            return Ok(());
        }
    };

    let args = cli.operation_args(config);
    if let Err(e) = validate_args(operation, &args) {
        writeln!(out, "{e}")?;
        return Ok(());
    }

    if cli.refresh_credentials && !refresh(cli, config, out).await? {
        return Ok(());
    }

    let credentials = match credentials.resolve().await {
        Ok(credentials) => credentials,
        Err(e) => {
            error!(error = %e, "credential resolution failed");
            writeln!(out, "No valid credentials found")?;
            return Ok(());
        }
    };

    let region = cli.region(config);
    let signer = SigV4Signer::new(credentials, region.as_str(), &config.service_name);
    let client_config = ClientConfig::new(&cli.endpoint, region, &config.service_name);
    let client = OpenSearchClient::new(client_config, transport, Arc::new(signer))
        .context("failed to build client")?;

    info!(
        %operation,
        endpoint = %cli.endpoint,
        account = %cli.account,
        stage = %cli.stage,
        "dispatching"
    );
    run_operation(&client, operation, &args, out)
        .await
        .with_context(|| format!("{operation} failed"))
}

/// Run the credential tool; returns whether the run should continue.
async fn refresh<W: Write>(cli: &Cli, config: &AossConfig, out: &mut W) -> Result<bool> {
    let tool = &config.credential_tool;
    match refresh_credentials(tool, &cli.account, &cli.role).await {
        Ok(()) => {
            writeln!(
                out,
                "Successfully updated {tool} credentials for account {} with role {}",
                cli.account, cli.role
            )?;
            Ok(true)
        }
        Err(e @ RefreshError::ToolNotFound(_)) => {
            writeln!(out, "{e}")?;
            Ok(false)
        }
        Err(e) => {
            writeln!(out, "Failed to update {tool} credentials: {e}")?;
            Ok(false)
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AossConfig::from_env().context("failed to load configuration")?;
    init_tracing(&config.log_level)?;

    let credentials = AmbientCredentialSource::new(cli.region(&config));
    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new());

    let mut stdout = io::stdout().lock();
    dispatch(&cli, &config, &credentials, transport, &mut stdout).await?;
    stdout.flush().context("failed to flush stdout")?;
    Ok(())
}
