//! Refresh short-lived credentials through an external command-line tool.
//!
//! The helper shells out to a credential-issuing tool (by default `ada`) that
//! writes fresh credentials for an account/role pair into the local profile,
//! where the ambient provider chain picks them up.

use std::io::ErrorKind;

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::RefreshError;

/// Build the argument list passed to the credential tool.
#[must_use]
pub fn refresh_args(account: &str, role: &str) -> Vec<String> {
    vec![
        "credentials".to_owned(),
        "update".to_owned(),
        format!("--account={account}"),
        format!("--role={role}"),
        "--once".to_owned(),
    ]
}

/// Run `tool credentials update --account=<account> --role=<role> --once`.
///
/// Waits for the tool to exit. The tool's own output goes straight to the
/// terminal.
///
/// # Errors
///
/// - [`RefreshError::ToolNotFound`] when `tool` is not on `PATH`.
/// - [`RefreshError::Failed`] when the tool exits non-zero.
/// - [`RefreshError::Spawn`] for any other spawn failure.
pub async fn refresh_credentials(
    tool: &str,
    account: &str,
    role: &str,
) -> Result<(), RefreshError> {
    let args = refresh_args(account, role);
    debug!(tool, ?args, "invoking credential refresh tool");

    let status = Command::new(tool)
        .args(&args)
        .status()
        .await
        .map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                RefreshError::ToolNotFound(tool.to_owned())
            } else {
                RefreshError::Spawn {
                    tool: tool.to_owned(),
                    source,
                }
            }
        })?;

    if !status.success() {
        return Err(RefreshError::Failed {
            tool: tool.to_owned(),
            status,
        });
    }

    info!(account, role, "refreshed credentials");
    Ok(())
}
