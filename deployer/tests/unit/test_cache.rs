//! Scope cache tests

use chdeployer::cache::scope::ScopeCache;

use crate::support::{environment, organization};

#[test]
fn test_organization_insert_and_get() {
    let cache = ScopeCache::new();

    cache.insert_organization("Example Inc/Lab".to_string(), organization("org-lab", "Lab"));

    let entry = cache.get_organization("Example Inc/Lab");
    assert!(entry.is_some());
    assert_eq!(entry.unwrap().id, "org-lab");
    assert!(cache.get_organization("Lab").is_none());
}

#[test]
fn test_first_insert_wins() {
    let cache = ScopeCache::new();

    cache.insert_organization("Lab".to_string(), organization("org-1", "Lab"));
    cache.insert_organization("Lab".to_string(), organization("org-2", "Lab"));

    assert_eq!(cache.organization_count(), 1);
    assert_eq!(cache.get_organization("Lab").unwrap().id, "org-1");
}

#[test]
fn test_environments_keyed_by_organization() {
    let cache = ScopeCache::new();

    cache.insert_environment(
        "org-1".to_string(),
        "Sandbox".to_string(),
        environment("env-1", "Sandbox", "org-1"),
    );
    cache.insert_environment(
        "org-2".to_string(),
        "Sandbox".to_string(),
        environment("env-2", "Sandbox", "org-2"),
    );

    assert_eq!(cache.environment_count(), 2);
    assert_eq!(cache.get_environment("org-2", "Sandbox").unwrap().id, "env-2");
    assert!(cache.get_environment("org-1", "Production").is_none());
}
