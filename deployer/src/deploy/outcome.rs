//! Per-unit outcomes and the aggregated run result

use std::fmt;
use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::errors::DeployerError;

/// Step of a deployment unit, used to give failures context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployStep {
    Load,
    ResolveOrganization,
    ResolveEnvironment,
    FetchApplication,
    CreateApplication,
    UpdateApplication,
    /// The unit task itself did not finish
    Join,
}

impl fmt::Display for DeployStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            DeployStep::Load => "load descriptor",
            DeployStep::ResolveOrganization => "resolve organization",
            DeployStep::ResolveEnvironment => "resolve environment",
            DeployStep::FetchApplication => "get application",
            DeployStep::CreateApplication => "create application",
            DeployStep::UpdateApplication => "update application",
            DeployStep::Join => "complete deployment task",
        };
        f.write_str(step)
    }
}

/// What a successful unit did to the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployAction {
    Created,
    Updated,
    Unchanged,
}

impl fmt::Display for DeployAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            DeployAction::Created => "created",
            DeployAction::Updated => "updated",
            DeployAction::Unchanged => "unchanged",
        };
        f.write_str(action)
    }
}

/// A successfully deployed descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployed {
    pub domain: String,
    pub action: DeployAction,
}

/// A failed deployment unit, with the file and step it failed at
#[derive(Debug)]
pub struct UnitFailure {
    pub file: PathBuf,
    pub step: DeployStep,
    pub cause: DeployerError,
}

impl UnitFailure {
    pub fn new(file: &Path, step: DeployStep, cause: DeployerError) -> Self {
        Self {
            file: file.to_path_buf(),
            step,
            cause,
        }
    }
}

impl fmt::Display for UnitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: failed to {}: {}",
            self.file.display(),
            self.step,
            self.cause
        )
    }
}

impl std::error::Error for UnitFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

/// Outcome of one deployment unit
#[derive(Debug)]
pub struct UnitOutcome {
    pub file: PathBuf,
    pub result: Result<Deployed, UnitFailure>,
}

impl UnitOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of every unit in a run, in completion order
#[derive(Debug, Default)]
pub struct RunResult {
    outcomes: Vec<UnitOutcome>,
}

impl RunResult {
    pub fn new(outcomes: Vec<UnitOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[UnitOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Successfully deployed descriptors
    pub fn succeeded(&self) -> impl Iterator<Item = &Deployed> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok())
    }

    /// Failed units
    pub fn failed(&self) -> impl Iterator<Item = &UnitFailure> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().err())
    }

    /// Whether every unit succeeded
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(UnitOutcome::is_success)
    }

    /// Print a colored summary of the run to stdout
    pub fn print_summary(&self) {
        for deployed in self.succeeded() {
            println!(
                "{}",
                format!("Application: [{}] {}", deployed.domain, deployed.action).green()
            );
        }
        for failure in self.failed() {
            println!("{}", failure.to_string().red());
        }

        let failed = self.failed().count();
        if failed == 0 {
            println!(
                "{}",
                format!("All {} applications deployed successfully!", self.len())
                    .green()
                    .bold()
            );
        } else {
            println!(
                "{}",
                format!("{} of {} deployments failed", failed, self.len())
                    .red()
                    .bold()
            );
        }
    }
}
