//! Token manager for platform authentication

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::authn::credentials::Credentials;
use crate::errors::DeployerError;
use crate::http::client::HttpClient;

/// Acquires a bearer token once and hands it out to API calls
pub struct TokenManager {
    credentials: Credentials,
    http_client: Arc<HttpClient>,
    cached_token: RwLock<Option<SecretString>>,
}

impl TokenManager {
    /// Create a new token manager
    pub fn new(credentials: Credentials, http_client: Arc<HttpClient>) -> Self {
        Self {
            credentials,
            http_client,
            cached_token: RwLock::new(None),
        }
    }

    /// Establish the session.
    ///
    /// Bearer credentials are used as given; the other methods call the
    /// platform's token endpoints.
    pub async fn login(&self) -> Result<(), DeployerError> {
        info!("Authenticating with {} credentials...", self.credentials.auth_type());

        let token = match &self.credentials {
            Credentials::Bearer(token) => token.expose_secret().to_string(),
            Credentials::User { username, password } => {
                self.http_client
                    .login_user(username, password.expose_secret())
                    .await
                    .map_err(auth_error)?
                    .access_token
            }
            Credentials::ConnectedApp {
                client_id,
                client_secret,
            } => {
                self.http_client
                    .login_connected_app(client_id, client_secret.expose_secret())
                    .await
                    .map_err(auth_error)?
                    .access_token
            }
        };

        if token.is_empty() {
            return Err(DeployerError::AuthError(
                "platform returned an empty access token".to_string(),
            ));
        }

        let mut cached = self.cached_token.write().await;
        *cached = Some(SecretString::from(token));
        debug!("Bearer token acquired");

        Ok(())
    }

    /// Get the current token
    pub async fn get_token(&self) -> Result<String, DeployerError> {
        let cached = self.cached_token.read().await;
        cached
            .as_ref()
            .map(|token| token.expose_secret().to_string())
            .ok_or_else(|| DeployerError::AuthError("not logged in".to_string()))
    }
}

fn auth_error(err: DeployerError) -> DeployerError {
    match err {
        DeployerError::RemoteError { status, message } => {
            DeployerError::AuthError(format!("login rejected ({}): {}", status, message))
        }
        other => DeployerError::AuthError(other.to_string()),
    }
}
