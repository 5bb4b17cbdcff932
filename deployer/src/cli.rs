//! Command line interface

use std::fmt;
use std::path::PathBuf;

use clap::Parser;
use secrecy::SecretString;

use crate::app::options::{ClientOptions, DeployOptions, Region};
use crate::authn::credentials::{AuthType, Credentials};
use crate::deploy::change::SecretMask;
use crate::errors::DeployerError;
use crate::logs::{LogLevel, LogOptions};

/// Deploy and update Mule applications in Anypoint CloudHub
#[derive(Parser)]
#[command(name = "chdeployer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Anypoint control plane (US or EU)
    #[arg(short, long, default_value = "US")]
    pub region: Region,

    /// Base URL of the platform, overrides the region
    #[arg(short = 'l', long)]
    pub base_url: Option<String>,

    /// Authentication method (bearer, user or connectedapp)
    #[arg(short, long = "authtype", default_value = "connectedapp")]
    pub auth_type: AuthType,

    /// Bearer token, used with the bearer method
    #[arg(short, long, env = "ANYPOINT_BEARER", hide_env_values = true)]
    pub bearer: Option<String>,

    /// Anypoint username, used with the user method
    #[arg(short, long)]
    pub user: Option<String>,

    /// Anypoint password, used with the user method
    #[arg(short, long, env = "ANYPOINT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Connected app client id
    #[arg(short = 'i', long)]
    pub client_id: Option<String>,

    /// Connected app client secret
    #[arg(short = 's', long, env = "ANYPOINT_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Organization name, or a path of names separated by '/'
    #[arg(short, long)]
    pub organization: String,

    /// Environment name
    #[arg(short, long)]
    pub environment: String,

    /// Number of concurrent deployments (1-5)
    #[arg(short = 'c', long, default_value_t = 1)]
    pub concurrent_deployments: usize,

    /// Character the platform uses to mask secure properties
    #[arg(long, default_value_t = '*')]
    pub secret_mask: char,

    /// Minimum length of a masked value
    #[arg(long, default_value_t = 1)]
    pub secret_mask_min_len: usize,

    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,

    /// Write logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Application descriptor files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

impl Cli {
    /// Build the credentials for the selected authentication method
    pub fn credentials(&self) -> Result<Credentials, DeployerError> {
        match self.auth_type {
            AuthType::Bearer => {
                let token = require(&self.bearer, "--bearer", self.auth_type)?;
                Ok(Credentials::Bearer(SecretString::from(token)))
            }
            AuthType::User => {
                let username = require(&self.user, "--user", self.auth_type)?;
                let password = require(&self.password, "--password", self.auth_type)?;
                Ok(Credentials::User {
                    username,
                    password: SecretString::from(password),
                })
            }
            AuthType::ConnectedApp => {
                let client_id = require(&self.client_id, "--client-id", self.auth_type)?;
                let client_secret =
                    require(&self.client_secret, "--client-secret", self.auth_type)?;
                Ok(Credentials::ConnectedApp {
                    client_id,
                    client_secret: SecretString::from(client_secret),
                })
            }
        }
    }

    pub fn client_options(&self) -> Result<ClientOptions, DeployerError> {
        ClientOptions::resolve(self.region, self.base_url.as_deref())
    }

    pub fn deploy_options(&self) -> Result<DeployOptions, DeployerError> {
        let options = DeployOptions {
            organization: self.organization.clone(),
            environment: self.environment.clone(),
            worker_limit: self.concurrent_deployments,
            secret_mask: SecretMask {
                mask: self.secret_mask,
                min_len: self.secret_mask_min_len,
            },
        };
        options.validate()?;
        Ok(options)
    }

    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            log_level: self.log_level.clone(),
            json_format: self.log_json,
        }
    }
}

// Secrets stay out of debug output
impl fmt::Debug for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cli")
            .field("region", &self.region)
            .field("base_url", &self.base_url)
            .field("auth_type", &self.auth_type)
            .field("user", &self.user)
            .field("client_id", &self.client_id)
            .field("organization", &self.organization)
            .field("environment", &self.environment)
            .field("concurrent_deployments", &self.concurrent_deployments)
            .field("log_level", &self.log_level)
            .field("files", &self.files)
            .finish_non_exhaustive()
    }
}

fn require(
    value: &Option<String>,
    flag: &str,
    auth_type: AuthType,
) -> Result<String, DeployerError> {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(DeployerError::ConfigError(format!(
            "{} is required when authtype is {}",
            flag, auth_type
        ))),
    }
}
