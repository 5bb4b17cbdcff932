//! Deployment orchestrator
//!
//! Spawns one task per descriptor file. Tasks pass through an admission gate
//! sized by the worker limit, so at most that many units talk to the platform
//! at once. Every task records exactly one outcome, and the run waits for all
//! of them before building the [`RunResult`]; a failing unit never stops its
//! siblings.

use std::path::PathBuf;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, error, info};

use crate::app::options::DeployOptions;
use crate::deploy::change::ChangeDetector;
use crate::deploy::outcome::{DeployStep, Deployed, RunResult, UnitFailure, UnitOutcome};
use crate::deploy::unit::{DeploymentUnit, UnitContext};
use crate::errors::DeployerError;
use crate::platform::PlatformClient;
use crate::resolve::scope::ScopeResolver;

/// Drives a batch of deployment units
pub struct Orchestrator {
    client: Arc<dyn PlatformClient>,
    options: DeployOptions,
}

impl Orchestrator {
    /// Create an orchestrator; fails if `options` are invalid
    pub fn new(
        client: Arc<dyn PlatformClient>,
        options: DeployOptions,
    ) -> Result<Self, DeployerError> {
        options.validate()?;
        Ok(Self { client, options })
    }

    /// Deploy every descriptor in `files` and collect the outcomes.
    ///
    /// Scope lookups are memoized for the duration of this call only.
    pub async fn run(&self, files: &[PathBuf]) -> RunResult {
        info!(
            "Deploying {} descriptor(s) to {}/{} with up to {} concurrent deployment(s)",
            files.len(),
            self.options.organization,
            self.options.environment,
            self.options.worker_limit
        );

        let ctx = Arc::new(UnitContext {
            client: self.client.clone(),
            resolver: Arc::new(ScopeResolver::new(self.client.clone())),
            detector: ChangeDetector::new(self.options.secret_mask),
            organization: self.options.organization.clone(),
            environment: self.options.environment.clone(),
        });
        let gate = Arc::new(Semaphore::new(self.options.worker_limit));
        let outcomes = Arc::new(Mutex::new(Vec::with_capacity(files.len())));

        let handles = files.iter().map(|file| {
            let ctx = ctx.clone();
            let gate = gate.clone();
            let outcomes = outcomes.clone();
            let file = file.clone();

            tokio::spawn(async move {
                let mut unit = DeploymentUnit::new(file.clone());
                let result = run_admitted(&gate, &mut unit, &ctx).await;
                match &result {
                    Ok(_) => debug!("{}: {:?}", unit.file().display(), unit.state()),
                    Err(failure) => error!("{}", failure),
                }
                outcomes.lock().await.push(UnitOutcome { file, result });
            })
        });

        // A task that did not finish has not recorded its outcome
        for (file, joined) in files.iter().zip(join_all(handles).await) {
            if let Err(e) = joined {
                let failure = UnitFailure::new(
                    file,
                    DeployStep::Join,
                    DeployerError::Internal(e.to_string()),
                );
                error!("{}", failure);
                outcomes.lock().await.push(UnitOutcome {
                    file: file.clone(),
                    result: Err(failure),
                });
            }
        }

        let outcomes = std::mem::take(&mut *outcomes.lock().await);
        let result = RunResult::new(outcomes);
        info!(
            "Run finished: {} succeeded, {} failed",
            result.succeeded().count(),
            result.failed().count()
        );
        result
    }
}

async fn run_admitted(
    gate: &Semaphore,
    unit: &mut DeploymentUnit,
    ctx: &UnitContext,
) -> Result<Deployed, UnitFailure> {
    let _permit = gate.acquire().await.map_err(|e| {
        UnitFailure::new(
            unit.file(),
            DeployStep::Load,
            DeployerError::Internal(e.to_string()),
        )
    })?;

    unit.admit()?;
    unit.run(ctx).await
}
