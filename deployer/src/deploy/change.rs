//! Change detection between a live application and its descriptor
//!
//! An update is only issued when the live record and the desired descriptor
//! differ in a field the deployer manages. Scalar settings are compared
//! first; properties are then compared in both directions so that added and
//! removed keys are both caught. The platform never returns secure property
//! values, only a run of mask characters, so a masked live value never
//! counts as a difference.

use std::collections::BTreeMap;
use std::fmt;

use cloudhub_models::{ApplicationDescriptor, ApplicationRecord};

/// Matcher for the placeholder the platform returns in place of secrets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretMask {
    /// Character the platform repeats in place of the secret
    pub mask: char,

    /// Shortest run of `mask` treated as a secret
    pub min_len: usize,
}

impl Default for SecretMask {
    fn default() -> Self {
        Self {
            mask: '*',
            min_len: 1,
        }
    }
}

impl SecretMask {
    /// Whether `value` consists only of the mask character
    pub fn is_masked(&self, value: &str) -> bool {
        value.chars().count() >= self.min_len.max(1) && value.chars().all(|c| c == self.mask)
    }
}

/// First difference found between a live record and a descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difference {
    /// A scalar setting differs
    Field(&'static str),

    /// A property differs, or exists on one side only
    Property(String),
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difference::Field(name) => write!(f, "field {}", name),
            Difference::Property(key) => write!(f, "property {}", key),
        }
    }
}

/// Decides whether a live application needs an update
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeDetector {
    mask: SecretMask,
}

impl ChangeDetector {
    /// Create a detector using `mask` to recognize secure properties
    pub fn new(mask: SecretMask) -> Self {
        Self { mask }
    }

    /// Whether `desired` differs from `live`
    pub fn has_changed(&self, live: &ApplicationRecord, desired: &ApplicationDescriptor) -> bool {
        self.detect(live, desired).is_some()
    }

    /// Find the first difference between `live` and `desired`, if any
    pub fn detect(
        &self,
        live: &ApplicationRecord,
        desired: &ApplicationDescriptor,
    ) -> Option<Difference> {
        scalar_difference(live, desired).or_else(|| {
            self.property_difference(&live.properties, &desired.application_info.properties)
        })
    }

    fn property_difference(
        &self,
        live: &BTreeMap<String, String>,
        desired: &BTreeMap<String, String>,
    ) -> Option<Difference> {
        let removed_or_changed = live.iter().find(|(key, value)| {
            !self.mask.is_masked(value) && desired.get(*key) != Some(*value)
        });
        if let Some((key, _)) = removed_or_changed {
            return Some(Difference::Property(key.clone()));
        }

        desired
            .iter()
            .find(|(key, value)| match live.get(*key) {
                Some(live_value) => !self.mask.is_masked(live_value) && live_value != *value,
                None => true,
            })
            .map(|(key, _)| Difference::Property(key.clone()))
    }
}

fn scalar_difference(live: &ApplicationRecord, desired: &ApplicationDescriptor) -> Option<Difference> {
    let info = &desired.application_info;
    let fields = [
        ("domain", live.domain == info.domain),
        (
            "loggingCustomLog4JEnabled",
            live.logging_custom_log4j_enabled == info.logging_custom_log4j_enabled,
        ),
        ("loggingNgEnabled", live.logging_ng_enabled == info.logging_ng_enabled),
        (
            "monitoringAutoRestart",
            live.monitoring_auto_restart == info.monitoring_auto_restart,
        ),
        ("monitoringEnabled", live.monitoring_enabled == info.monitoring_enabled),
        ("persistentQueues", live.persistent_queues == info.persistent_queues),
        (
            "persistentQueuesEncrypted",
            live.persistent_queues_encrypted == info.persistent_queues_encrypted,
        ),
        ("staticIPsEnabled", live.static_ips_enabled == info.static_ips_enabled),
        ("workers.amount", live.workers.amount == info.workers.amount),
        (
            "workers.type.name",
            live.workers.worker_type.name == info.workers.worker_type.name,
        ),
    ];

    fields
        .iter()
        .find(|(_, equal)| !equal)
        .map(|(name, _)| Difference::Field(*name))
}
