//! Organization and environment models

use serde::{Deserialize, Serialize};

use crate::models::null_as_default;

/// An Anypoint business group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,

    pub name: String,

    /// Absent for a root (master) organization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub sub_organization_ids: Vec<String>,
}

/// An environment inside an organization.
///
/// Also serves as the scope of application calls, since it carries both the
/// organization id and the environment id the platform expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub id: String,

    pub name: String,

    pub organization_id: String,

    #[serde(default)]
    pub is_production: bool,

    /// e.g. `sandbox` or `production`
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub environment_type: Option<String>,
}
