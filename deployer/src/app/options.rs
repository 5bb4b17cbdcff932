//! Application configuration options

use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

use url::Url;

use crate::deploy::change::SecretMask;
use crate::errors::DeployerError;

/// Valid range of concurrent deployments
pub const WORKER_LIMIT_RANGE: RangeInclusive<usize> = 1..=5;

/// Anypoint control plane
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Region {
    #[default]
    Us,
    Eu,
}

impl Region {
    /// Base URL of the region's control plane
    pub fn base_url(&self) -> &'static str {
        match self {
            Region::Us => "https://anypoint.mulesoft.com",
            Region::Eu => "https://eu1.anypoint.mulesoft.com",
        }
    }
}

impl std::str::FromStr for Region {
    type Err = DeployerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "US" => Ok(Region::Us),
            "EU" => Ok(Region::Eu),
            _ => Err(DeployerError::ConfigError(format!(
                "{} is not a valid region",
                s
            ))),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Us => f.write_str("US"),
            Region::Eu => f.write_str("EU"),
        }
    }
}

/// Platform connection options
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Control plane base URL
    pub base_url: String,

    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: Region::default().base_url().to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientOptions {
    /// Use `base_url` when given, the region's control plane otherwise
    pub fn resolve(region: Region, base_url: Option<&str>) -> Result<Self, DeployerError> {
        let base_url = match base_url {
            Some(raw) => {
                let url = Url::parse(raw).map_err(|e| {
                    DeployerError::ConfigError(format!("invalid base url {}: {}", raw, e))
                })?;
                if !matches!(url.scheme(), "http" | "https") {
                    return Err(DeployerError::ConfigError(format!(
                        "base url {} must use http or https",
                        raw
                    )));
                }
                url.as_str().trim_end_matches('/').to_string()
            }
            None => region.base_url().to_string(),
        };

        Ok(Self {
            base_url,
            ..Default::default()
        })
    }
}

/// Options of a deployment run
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Organization name or `/`-separated path
    pub organization: String,

    /// Environment name within the organization
    pub environment: String,

    /// Maximum number of units deployed concurrently
    pub worker_limit: usize,

    /// Placeholder the platform uses for secure property values
    pub secret_mask: SecretMask,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            organization: String::new(),
            environment: String::new(),
            worker_limit: 1,
            secret_mask: SecretMask::default(),
        }
    }
}

impl DeployOptions {
    /// Check the options before any deployment starts
    pub fn validate(&self) -> Result<(), DeployerError> {
        if self.organization.trim().is_empty() {
            return Err(DeployerError::ConfigError(
                "organization must be supplied".to_string(),
            ));
        }
        if self.environment.trim().is_empty() {
            return Err(DeployerError::ConfigError(
                "environment must be supplied".to_string(),
            ));
        }
        if !WORKER_LIMIT_RANGE.contains(&self.worker_limit) {
            return Err(DeployerError::ConfigError(format!(
                "Value '{}' is invalid for concurrent deployments. Valid values come from the range {:?}",
                self.worker_limit, WORKER_LIMIT_RANGE
            )));
        }
        if self.secret_mask.min_len == 0 {
            return Err(DeployerError::ConfigError(
                "secret mask length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
