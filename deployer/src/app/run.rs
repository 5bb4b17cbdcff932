//! Top-level deployment run

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};

use crate::app::options::{ClientOptions, DeployOptions};
use crate::authn::credentials::Credentials;
use crate::deploy::orchestrator::Orchestrator;
use crate::deploy::outcome::RunResult;
use crate::errors::DeployerError;
use crate::platform::AnypointClient;

/// Every descriptor was deployed
pub const EXIT_SUCCESS: i32 = 0;

/// The run could not start: bad configuration or failed login
pub const EXIT_FATAL: i32 = 1;

/// At least one descriptor failed to deploy
pub const EXIT_UNIT_FAILED: i32 = 10;

/// Log in and deploy every descriptor in `files`.
///
/// Only configuration and authentication problems are returned as errors;
/// per-descriptor failures are part of the [`RunResult`].
pub async fn run(
    client_options: ClientOptions,
    credentials: Credentials,
    deploy_options: DeployOptions,
    files: &[PathBuf],
) -> Result<RunResult, DeployerError> {
    deploy_options.validate()?;

    let client = AnypointClient::new(
        &client_options.base_url,
        credentials,
        client_options.request_timeout,
    )?;
    info!("Connecting to {}", client.base_url());
    client.login().await?;

    let orchestrator = Orchestrator::new(Arc::new(client), deploy_options)?;
    Ok(orchestrator.run(files).await)
}

/// Map the result of [`run`] to a process exit code
pub fn exit_code(result: &Result<RunResult, DeployerError>) -> i32 {
    match result {
        Ok(result) if result.is_success() => EXIT_SUCCESS,
        Ok(_) => EXIT_UNIT_FAILED,
        Err(e) => {
            if !e.is_fatal() {
                error!("Unexpected error outside a deployment: {}", e);
            }
            EXIT_FATAL
        }
    }
}
