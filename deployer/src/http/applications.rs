//! CloudHub applications API client

use cloudhub_models::{ApplicationDescriptor, ApplicationRecord, Environment};

use crate::errors::DeployerError;
use crate::http::client::HttpClient;

const APPLICATIONS_PATH: &str = "/cloudhub/api/v2/applications";

impl HttpClient {
    /// Get an application by domain, `None` if it does not exist
    pub async fn get_application(
        &self,
        scope: &Environment,
        domain: &str,
        token: &str,
    ) -> Result<Option<ApplicationRecord>, DeployerError> {
        let path = format!("{}/{}", APPLICATIONS_PATH, domain);
        let record: Option<ApplicationRecord> = self.get_optional(&path, token, Some(scope)).await?;
        Ok(record.filter(|record| !record.is_empty()))
    }

    /// Create a new application
    pub async fn create_application(
        &self,
        scope: &Environment,
        descriptor: &ApplicationDescriptor,
        token: &str,
    ) -> Result<(), DeployerError> {
        let _: serde_json::Value = self
            .post(APPLICATIONS_PATH, token, Some(scope), descriptor)
            .await?;
        Ok(())
    }

    /// Replace the configuration of an existing application
    pub async fn update_application(
        &self,
        scope: &Environment,
        descriptor: &ApplicationDescriptor,
        token: &str,
    ) -> Result<(), DeployerError> {
        let path = format!("{}/{}", APPLICATIONS_PATH, descriptor.domain());
        let _: serde_json::Value = self.put(&path, token, Some(scope), descriptor).await?;
        Ok(())
    }
}
