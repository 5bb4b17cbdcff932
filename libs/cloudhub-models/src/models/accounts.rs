//! Access management response envelopes

use serde::{Deserialize, Serialize};

use crate::models::null_as_default;
use crate::models::scope::{Environment, Organization};

/// Token returned by both the user login and the connected app endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,

    #[serde(default)]
    pub token_type: Option<String>,

    #[serde(default, rename = "redirectUrl")]
    pub redirect_url: Option<String>,
}

/// `GET /accounts/api/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: MeUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeUser {
    #[serde(default)]
    pub username: Option<String>,

    /// Every business group the caller belongs to
    #[serde(default, deserialize_with = "null_as_default")]
    pub member_of_organizations: Vec<Organization>,
}

/// `GET /accounts/api/organizations/{id}/hierarchy`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationHierarchy {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub parent_id: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub sub_organizations: Vec<OrganizationHierarchy>,
}

impl OrganizationHierarchy {
    /// Direct children of this node
    pub fn children(&self) -> Vec<Organization> {
        self.sub_organizations
            .iter()
            .map(|child| Organization {
                id: child.id.clone(),
                name: child.name.clone(),
                parent_id: Some(self.id.clone()),
                sub_organization_ids: child
                    .sub_organizations
                    .iter()
                    .map(|grandchild| grandchild.id.clone())
                    .collect(),
            })
            .collect()
    }
}

/// `GET /accounts/api/organizations/{id}/environments`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Environment>,

    #[serde(default)]
    pub total: u32,
}
