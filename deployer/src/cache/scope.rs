//! Organization and environment cache

use std::collections::HashMap;
use std::sync::RwLock;

use cloudhub_models::{Environment, Organization};

/// In-memory cache of resolved scopes.
///
/// Entries live as long as the cache; there is no eviction or expiry. Keys are
/// written at most once in practice: a concurrent miss on the same key stores
/// an equal value.
#[derive(Default)]
pub struct ScopeCache {
    organizations: RwLock<HashMap<String, Organization>>,
    environments: RwLock<HashMap<(String, String), Environment>>,
}

impl ScopeCache {
    /// Create a new, empty scope cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an organization by its normalized path
    pub fn get_organization(&self, path: &str) -> Option<Organization> {
        let entries = self.organizations.read().unwrap_or_else(|e| e.into_inner());
        entries.get(path).cloned()
    }

    /// Insert an organization under its normalized path
    pub fn insert_organization(&self, path: String, organization: Organization) {
        let mut entries = self.organizations.write().unwrap_or_else(|e| e.into_inner());
        entries.entry(path).or_insert(organization);
    }

    /// Get an environment by organization id and environment name
    pub fn get_environment(&self, org_id: &str, name: &str) -> Option<Environment> {
        let entries = self.environments.read().unwrap_or_else(|e| e.into_inner());
        entries
            .get(&(org_id.to_string(), name.to_string()))
            .cloned()
    }

    /// Insert an environment keyed by organization id and environment name
    pub fn insert_environment(&self, org_id: String, name: String, environment: Environment) {
        let mut entries = self.environments.write().unwrap_or_else(|e| e.into_inner());
        entries.entry((org_id, name)).or_insert(environment);
    }

    /// Number of cached organization paths
    pub fn organization_count(&self) -> usize {
        let entries = self.organizations.read().unwrap_or_else(|e| e.into_inner());
        entries.len()
    }

    /// Number of cached environments
    pub fn environment_count(&self) -> usize {
        let entries = self.environments.read().unwrap_or_else(|e| e.into_inner());
        entries.len()
    }
}
