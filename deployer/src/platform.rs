//! The platform operations the deployer depends on

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cloudhub_models::{ApplicationDescriptor, ApplicationRecord, Environment, Organization};

use crate::authn::credentials::Credentials;
use crate::authn::token_mngr::TokenManager;
use crate::errors::DeployerError;
use crate::http::client::HttpClient;

/// Remote operations used by the scope resolver and the orchestrator.
///
/// Implementations must be authenticated before any call is made.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Organizations the caller is a member of
    async fn get_my_organizations(&self) -> Result<Vec<Organization>, DeployerError>;

    /// Direct sub-organizations of `org_id`
    async fn get_sub_organizations(&self, org_id: &str)
        -> Result<Vec<Organization>, DeployerError>;

    /// Environments of `org_id`
    async fn get_environments(&self, org_id: &str) -> Result<Vec<Environment>, DeployerError>;

    /// The live application for `domain`, `None` if there is none
    async fn get_application(
        &self,
        scope: &Environment,
        domain: &str,
    ) -> Result<Option<ApplicationRecord>, DeployerError>;

    async fn create_application(
        &self,
        scope: &Environment,
        descriptor: &ApplicationDescriptor,
    ) -> Result<(), DeployerError>;

    async fn update_application(
        &self,
        scope: &Environment,
        descriptor: &ApplicationDescriptor,
    ) -> Result<(), DeployerError>;
}

/// [`PlatformClient`] backed by the Anypoint Platform HTTP API
pub struct AnypointClient {
    http_client: Arc<HttpClient>,
    token_mngr: TokenManager,
}

impl AnypointClient {
    /// Create a new client; call [`AnypointClient::login`] before use
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        request_timeout: Duration,
    ) -> Result<Self, DeployerError> {
        let http_client = Arc::new(HttpClient::new(base_url, request_timeout)?);
        let token_mngr = TokenManager::new(credentials, http_client.clone());

        Ok(Self {
            http_client,
            token_mngr,
        })
    }

    /// Authenticate against the platform
    pub async fn login(&self) -> Result<(), DeployerError> {
        self.token_mngr.login().await
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.http_client.base_url()
    }
}

#[async_trait]
impl PlatformClient for AnypointClient {
    async fn get_my_organizations(&self) -> Result<Vec<Organization>, DeployerError> {
        let token = self.token_mngr.get_token().await?;
        self.http_client.get_member_organizations(&token).await
    }

    async fn get_sub_organizations(
        &self,
        org_id: &str,
    ) -> Result<Vec<Organization>, DeployerError> {
        let token = self.token_mngr.get_token().await?;
        self.http_client.get_sub_organizations(org_id, &token).await
    }

    async fn get_environments(&self, org_id: &str) -> Result<Vec<Environment>, DeployerError> {
        let token = self.token_mngr.get_token().await?;
        self.http_client.get_environments(org_id, &token).await
    }

    async fn get_application(
        &self,
        scope: &Environment,
        domain: &str,
    ) -> Result<Option<ApplicationRecord>, DeployerError> {
        let token = self.token_mngr.get_token().await?;
        self.http_client.get_application(scope, domain, &token).await
    }

    async fn create_application(
        &self,
        scope: &Environment,
        descriptor: &ApplicationDescriptor,
    ) -> Result<(), DeployerError> {
        let token = self.token_mngr.get_token().await?;
        self.http_client
            .create_application(scope, descriptor, &token)
            .await
    }

    async fn update_application(
        &self,
        scope: &Environment,
        descriptor: &ApplicationDescriptor,
    ) -> Result<(), DeployerError> {
        let token = self.token_mngr.get_token().await?;
        self.http_client
            .update_application(scope, descriptor, &token)
            .await
    }
}
