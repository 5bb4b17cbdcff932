//! Access management API client

use cloudhub_models::{
    Environment, EnvironmentList, LoginResponse, MeResponse, Organization, OrganizationHierarchy,
};

use crate::errors::DeployerError;
use crate::http::client::HttpClient;

const USER_LOGIN_PATH: &str = "/accounts/login";
const CONNECTED_APP_LOGIN_PATH: &str = "/accounts/api/v2/oauth2/token";

impl HttpClient {
    /// Exchange a username and password for a bearer token
    pub async fn login_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, DeployerError> {
        self.post_form(
            USER_LOGIN_PATH,
            &[("username", username), ("password", password)],
        )
        .await
    }

    /// Exchange connected app client credentials for a bearer token
    pub async fn login_connected_app(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<LoginResponse, DeployerError> {
        self.post_form(
            CONNECTED_APP_LOGIN_PATH,
            &[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("grant_type", "client_credentials"),
            ],
        )
        .await
    }

    /// Get the organizations the caller is a member of
    pub async fn get_member_organizations(
        &self,
        token: &str,
    ) -> Result<Vec<Organization>, DeployerError> {
        let response: MeResponse = self.get("/accounts/api/me", token, None).await?;
        Ok(response.user.member_of_organizations)
    }

    /// Get the direct sub-organizations of an organization
    pub async fn get_sub_organizations(
        &self,
        org_id: &str,
        token: &str,
    ) -> Result<Vec<Organization>, DeployerError> {
        let path = format!("/accounts/api/organizations/{}/hierarchy", org_id);
        let hierarchy: OrganizationHierarchy = self.get(&path, token, None).await?;
        Ok(hierarchy.children())
    }

    /// Get the environments of an organization
    pub async fn get_environments(
        &self,
        org_id: &str,
        token: &str,
    ) -> Result<Vec<Environment>, DeployerError> {
        let path = format!("/accounts/api/organizations/{}/environments", org_id);
        let response: EnvironmentList = self.get(&path, token, None).await?;
        Ok(response.data)
    }
}
