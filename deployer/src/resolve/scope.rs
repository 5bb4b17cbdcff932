//! Scope resolver
//!
//! Turns the organization path and environment name given on the command line
//! into platform ids. Organization paths such as `"Parent/Child/Leaf"` are
//! walked one segment at a time: the root is looked up in the caller's
//! membership list, every later segment among the direct sub-organizations of
//! the previous one.
//!
//! Every resolved path prefix and every (organization id, environment name)
//! pair is cached for the life of the resolver, and the membership list is
//! fetched at most once, so a batch of descriptors targeting the same scope
//! costs one set of lookups.

use std::sync::Arc;

use cloudhub_models::{Environment, Organization};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::cache::scope::ScopeCache;
use crate::errors::DeployerError;
use crate::platform::PlatformClient;

/// Separator between the segments of an organization path
pub const PATH_SEPARATOR: &str = "/";

/// Resolves organizations and environments by name, with memoization
pub struct ScopeResolver {
    client: Arc<dyn PlatformClient>,
    my_organizations: OnceCell<Vec<Organization>>,
    cache: ScopeCache,
}

impl ScopeResolver {
    /// Create a resolver with empty caches
    pub fn new(client: Arc<dyn PlatformClient>) -> Self {
        Self {
            client,
            my_organizations: OnceCell::new(),
            cache: ScopeCache::new(),
        }
    }

    /// Get the underlying cache
    pub fn cache(&self) -> &ScopeCache {
        &self.cache
    }

    /// Resolve an organization by name or `/`-separated path
    pub async fn resolve_organization(&self, name: &str) -> Result<Organization, DeployerError> {
        let segments = path_segments(name);
        if segments.is_empty() {
            return Err(DeployerError::OrganizationNotFound(name.to_string()));
        }

        let path = path_key(&segments);
        if let Some(organization) = self.cache.get_organization(&path) {
            debug!("Organization cache hit: {}", path);
            return Ok(organization);
        }

        // Continue from the longest prefix resolved earlier in this run
        let cached_prefix = (1..segments.len()).rev().find_map(|depth| {
            self.cache
                .get_organization(&path_key(&segments[..depth]))
                .map(|organization| (depth, organization))
        });

        let (mut depth, mut current) = match cached_prefix {
            Some(prefix) => prefix,
            None => {
                let root = self.resolve_root(segments[0]).await?;
                self.cache
                    .insert_organization(segments[0].to_string(), root.clone());
                (1, root)
            }
        };

        while depth < segments.len() {
            let prefix = path_key(&segments[..=depth]);
            let children = self.client.get_sub_organizations(&current.id).await?;
            current = select_by_name(children, segments[depth], &prefix)?;
            self.cache.insert_organization(prefix, current.clone());
            depth += 1;
        }

        info!("Resolved organization {} to {}", path, current.id);
        Ok(current)
    }

    /// Resolve an environment by name within an organization
    pub async fn resolve_environment(
        &self,
        organization: &Organization,
        name: &str,
    ) -> Result<Environment, DeployerError> {
        if let Some(environment) = self.cache.get_environment(&organization.id, name) {
            debug!("Environment cache hit: {}/{}", organization.id, name);
            return Ok(environment);
        }

        let environment = self
            .client
            .get_environments(&organization.id)
            .await?
            .into_iter()
            .find(|environment| environment.name == name)
            .ok_or_else(|| DeployerError::EnvironmentNotFound {
                organization: organization.name.clone(),
                environment: name.to_string(),
            })?;

        info!(
            "Resolved environment {} in {} to {}",
            name, organization.name, environment.id
        );
        self.cache.insert_environment(
            organization.id.clone(),
            name.to_string(),
            environment.clone(),
        );
        Ok(environment)
    }

    /// Resolve an organization path and an environment name in one go
    pub async fn resolve_scope(
        &self,
        organization: &str,
        environment: &str,
    ) -> Result<Environment, DeployerError> {
        let organization = self.resolve_organization(organization).await?;
        self.resolve_environment(&organization, environment).await
    }

    async fn resolve_root(&self, name: &str) -> Result<Organization, DeployerError> {
        let organizations = self
            .my_organizations
            .get_or_try_init(|| async {
                debug!("Fetching organization memberships...");
                self.client.get_my_organizations().await
            })
            .await?;

        select_by_name(organizations.iter().cloned(), name, name)
    }
}

/// Split an organization path into trimmed, non-empty segments
pub fn path_segments(name: &str) -> Vec<&str> {
    name.split(PATH_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Cache key of a normalized organization path
pub fn path_key(segments: &[&str]) -> String {
    segments.join(PATH_SEPARATOR)
}

fn select_by_name(
    candidates: impl IntoIterator<Item = Organization>,
    name: &str,
    path: &str,
) -> Result<Organization, DeployerError> {
    let mut matches = candidates
        .into_iter()
        .filter(|organization| organization.name == name);

    match (matches.next(), matches.next()) {
        (Some(organization), None) => Ok(organization),
        (Some(_), Some(_)) => Err(DeployerError::AmbiguousOrganization(path.to_string())),
        (None, _) => Err(DeployerError::OrganizationNotFound(path.to_string())),
    }
}
