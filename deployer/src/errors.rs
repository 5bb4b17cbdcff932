//! Error types for chdeployer

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for chdeployer
#[derive(Error, Debug)]
pub enum DeployerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Failed to load {}: {reason}", path.display())]
    LoadError { path: PathBuf, reason: String },

    #[error("Organization not found: {0}")]
    OrganizationNotFound(String),

    #[error("Organization name is ambiguous: {0}")]
    AmbiguousOrganization(String),

    #[error("Environment {environment} not found in organization {organization}")]
    EnvironmentNotFound {
        organization: String,
        environment: String,
    },

    #[error("Call to Anypoint Platform returned {status}: {message}")]
    RemoteError { status: u16, message: String },

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DeployerError {
    /// Errors that must stop the whole run rather than a single unit
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ConfigError(_) | Self::AuthError(_))
    }
}
