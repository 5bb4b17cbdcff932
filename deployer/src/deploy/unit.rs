//! A single deployment unit: one descriptor file taken from load to result

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::deploy::change::ChangeDetector;
use crate::deploy::fsm::{UnitEvent, UnitFsm, UnitState};
use crate::deploy::outcome::{DeployAction, DeployStep, Deployed, UnitFailure};
use crate::errors::DeployerError;
use crate::filesys::descriptor::load_descriptor;
use crate::platform::PlatformClient;
use crate::resolve::scope::ScopeResolver;

/// Everything a unit shares with its siblings
pub struct UnitContext {
    pub client: Arc<dyn PlatformClient>,
    pub resolver: Arc<ScopeResolver>,
    pub detector: ChangeDetector,
    pub organization: String,
    pub environment: String,
}

/// Deployment of one descriptor file
pub struct DeploymentUnit {
    file: PathBuf,
    fsm: UnitFsm,
}

impl DeploymentUnit {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            fsm: UnitFsm::new(),
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn state(&self) -> UnitState {
        self.fsm.state()
    }

    /// Mark the unit as holding an admission permit
    pub fn admit(&mut self) -> Result<(), UnitFailure> {
        self.transition(UnitEvent::Admit, DeployStep::Load)
    }

    /// Run every step of the unit. Steps run strictly in sequence and the
    /// first failure ends the unit; nothing is retried.
    pub async fn run(&mut self, ctx: &UnitContext) -> Result<Deployed, UnitFailure> {
        self.transition(UnitEvent::Load, DeployStep::Load)?;
        info!("Reading file: {}", self.file.display());
        let descriptor = load_descriptor(&self.file)
            .await
            .map_err(|e| self.fail(DeployStep::Load, e))?;
        let domain = descriptor.domain().to_string();

        self.transition(UnitEvent::Resolve, DeployStep::ResolveOrganization)?;
        let organization = ctx
            .resolver
            .resolve_organization(&ctx.organization)
            .await
            .map_err(|e| self.fail(DeployStep::ResolveOrganization, e))?;
        let scope = ctx
            .resolver
            .resolve_environment(&organization, &ctx.environment)
            .await
            .map_err(|e| self.fail(DeployStep::ResolveEnvironment, e))?;

        self.transition(UnitEvent::Fetch, DeployStep::FetchApplication)?;
        let live = ctx
            .client
            .get_application(&scope, &domain)
            .await
            .map_err(|e| self.fail(DeployStep::FetchApplication, e))?
            .filter(|record| !record.is_empty());

        let action = match live {
            None => {
                self.transition(UnitEvent::Create, DeployStep::CreateApplication)?;
                info!("Creating application {}", domain);
                ctx.client
                    .create_application(&scope, &descriptor)
                    .await
                    .map_err(|e| self.fail(DeployStep::CreateApplication, e))?;
                DeployAction::Created
            }
            Some(record) => {
                self.transition(UnitEvent::Compare, DeployStep::FetchApplication)?;
                debug!(
                    "Application {} is {} (last updated {:?})",
                    domain,
                    record.status.as_deref().unwrap_or("unknown"),
                    record.last_updated()
                );

                match ctx.detector.detect(&record, &descriptor) {
                    Some(difference) => {
                        self.transition(UnitEvent::Update, DeployStep::UpdateApplication)?;
                        info!("Updating application {}: {} changed", domain, difference);
                        ctx.client
                            .update_application(&scope, &descriptor)
                            .await
                            .map_err(|e| self.fail(DeployStep::UpdateApplication, e))?;
                        DeployAction::Updated
                    }
                    None => {
                        self.transition(UnitEvent::Skip, DeployStep::UpdateApplication)?;
                        info!("Application {} is up to date", domain);
                        DeployAction::Unchanged
                    }
                }
            }
        };

        self.transition(UnitEvent::Succeed, DeployStep::UpdateApplication)?;
        info!("Application: [{}] successfully deployed", domain);

        Ok(Deployed { domain, action })
    }

    fn transition(&mut self, event: UnitEvent, step: DeployStep) -> Result<(), UnitFailure> {
        let state = self
            .fsm
            .process(event)
            .map_err(|e| UnitFailure::new(&self.file, step, e))?;
        debug!("{}: {:?}", self.file.display(), state);
        Ok(())
    }

    fn fail(&mut self, step: DeployStep, cause: DeployerError) -> UnitFailure {
        // A unit in a terminal state keeps it
        let _ = self.fsm.process(UnitEvent::Fail(cause.to_string()));
        UnitFailure::new(&self.file, step, cause)
    }
}
