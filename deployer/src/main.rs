//! CloudHub deployer - Entry Point
//!
//! Deploys the application descriptors given on the command line and exits
//! with 0 on success, 1 on a configuration or login failure and 10 when any
//! descriptor failed.

use clap::error::ErrorKind;
use clap::Parser;
use tracing::{debug, error, info};

use chdeployer::app::run::{exit_code, run, EXIT_FATAL};
use chdeployer::cli::Cli;
use chdeployer::logs::init_logging;
use chdeployer::utils::version_info;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(EXIT_FATAL);
        }
    };

    if let Err(e) = init_logging(cli.log_options()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let version = version_info();
    info!(
        "chdeployer {} ({}, built {})",
        version.version, version.git_hash, version.build_time
    );
    debug!("Running with {:?}", cli);

    let result = match (cli.client_options(), cli.credentials(), cli.deploy_options()) {
        (Ok(client_options), Ok(credentials), Ok(deploy_options)) => {
            run(client_options, credentials, deploy_options, &cli.files).await
        }
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => Err(e),
    };

    match &result {
        Ok(run_result) => run_result.print_summary(),
        Err(e) => error!("Deployment aborted: {}", e),
    }

    std::process::exit(exit_code(&result));
}
