//! CloudHub application models
//!
//! [`ApplicationDescriptor`] is the desired state read from a descriptor file
//! and sent as the body of create and update calls. [`ApplicationRecord`] is
//! the live state the platform reports for a domain.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{is_false, null_as_default};

/// Property injected into every descriptor to track the deployed artifact
pub const GAV_PROPERTY: &str = "chdeployer.application.gav";

/// Desired state of a CloudHub application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDescriptor {
    /// Application settings
    pub application_info: ApplicationInfo,

    /// Exchange coordinates of the deployable artifact
    #[serde(default)]
    pub application_source: ApplicationSource,

    /// Start the application once deployed
    #[serde(default, skip_serializing_if = "is_false")]
    pub auto_start: bool,
}

impl ApplicationDescriptor {
    /// Get the application domain
    pub fn domain(&self) -> &str {
        &self.application_info.domain
    }

    /// `groupId:artifactId:version` of the application source
    pub fn gav(&self) -> String {
        let source = &self.application_source;
        format!("{}:{}:{}", source.group_id, source.artifact_id, source.version)
    }

    /// Record the source coordinates as the [`GAV_PROPERTY`] property.
    ///
    /// Must run before the descriptor is compared against a live record,
    /// since the platform reports the property back on every later fetch.
    pub fn inject_gav(&mut self) {
        let gav = self.gav();
        self.application_info
            .properties
            .insert(GAV_PROPERTY.to_string(), gav);
    }
}

/// The `applicationInfo` block of a descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInfo {
    /// Unique application name, also the CloudHub subdomain
    #[serde(default)]
    pub domain: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mule_version: Option<MuleVersion>,

    /// Application properties
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub properties: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub log_levels: Vec<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_settings: Option<TrackingSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_group: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub monitoring_enabled: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub monitoring_auto_restart: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub persistent_queues: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub persistent_queues_encrypted: bool,

    /// Worker sizing
    #[serde(default)]
    pub workers: Workers,

    #[serde(default, skip_serializing_if = "is_false")]
    pub object_store_v1: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub logging_ng_enabled: bool,

    #[serde(
        default,
        rename = "loggingCustomLog4JEnabled",
        skip_serializing_if = "is_false"
    )]
    pub logging_custom_log4j_enabled: bool,

    #[serde(default, rename = "staticIPsEnabled", skip_serializing_if = "is_false")]
    pub static_ips_enabled: bool,
}

/// Exchange coordinates of the application artifact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSource {
    /// Artifact repository, e.g. `EXCHANGE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default)]
    pub group_id: String,

    #[serde(default)]
    pub artifact_id: String,

    #[serde(default)]
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

/// Worker sizing, shared by descriptors and records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workers {
    /// Number of workers
    #[serde(default)]
    pub amount: u32,

    /// Worker size
    #[serde(default, rename = "type")]
    pub worker_type: WorkerType,

    /// Reported by the platform only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_org_workers: Option<f64>,

    /// Reported by the platform only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_org_workers: Option<f64>,
}

/// Worker size, e.g. `Micro` or `Small`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerType {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuleVersion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_update_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_of_support_date: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_level: Option<String>,
}

/// Live state of a CloudHub application as reported by the platform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,

    /// Empty when the platform has no application for the requested domain
    #[serde(default)]
    pub domain: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_domain: Option<String>,

    /// Application properties; secure values come back masked
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub properties: BTreeMap<String, String>,

    /// Deployment status, e.g. `STARTED`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default)]
    pub workers: Workers,

    /// Milliseconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_time: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mule_version: Option<MuleVersion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default)]
    pub persistent_queues: bool,

    #[serde(default)]
    pub persistent_queues_encryption_enabled: bool,

    #[serde(default)]
    pub persistent_queues_encrypted: bool,

    #[serde(default)]
    pub monitoring_enabled: bool,

    #[serde(default)]
    pub monitoring_auto_restart: bool,

    #[serde(default, rename = "staticIPsEnabled")]
    pub static_ips_enabled: bool,

    #[serde(default)]
    pub has_file: bool,

    #[serde(default)]
    pub secure_data_gateway_enabled: bool,

    #[serde(default)]
    pub logging_ng_enabled: bool,

    #[serde(default, rename = "loggingCustomLog4JEnabled")]
    pub logging_custom_log4j_enabled: bool,

    #[serde(default)]
    pub is_deployment_waiting: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_settings: Option<TrackingSettings>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub log_levels: Vec<serde_json::Value>,

    #[serde(default, rename = "ipAddresses", deserialize_with = "null_as_default")]
    pub ip_addresses: Vec<serde_json::Value>,
}

impl ApplicationRecord {
    /// The platform reported no application
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// Last update time, if reported
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_update_time
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    /// The record the platform reports once `descriptor` has been applied
    pub fn from_descriptor(descriptor: &ApplicationDescriptor) -> Self {
        let info = &descriptor.application_info;
        Self {
            domain: info.domain.clone(),
            properties: info.properties.clone(),
            workers: info.workers.clone(),
            file_name: info.file_name.clone(),
            mule_version: info.mule_version.clone(),
            persistent_queues: info.persistent_queues,
            persistent_queues_encrypted: info.persistent_queues_encrypted,
            monitoring_enabled: info.monitoring_enabled,
            monitoring_auto_restart: info.monitoring_auto_restart,
            static_ips_enabled: info.static_ips_enabled,
            logging_ng_enabled: info.logging_ng_enabled,
            logging_custom_log4j_enabled: info.logging_custom_log4j_enabled,
            tracking_settings: info.tracking_settings.clone(),
            log_levels: info.log_levels.clone(),
            ..Default::default()
        }
    }
}
