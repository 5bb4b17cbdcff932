//! Application descriptor loading

use std::path::Path;

use cloudhub_models::ApplicationDescriptor;
use tracing::debug;

use crate::errors::DeployerError;
use crate::filesys::file::File;

/// Read and validate a descriptor file.
///
/// The returned descriptor already carries the synthetic gav property, so it
/// can be compared against live records and submitted as is.
pub async fn load_descriptor(path: &Path) -> Result<ApplicationDescriptor, DeployerError> {
    let file = File::new(path);
    let load_error = |reason: String| DeployerError::LoadError {
        path: path.to_path_buf(),
        reason,
    };

    let mut descriptor: ApplicationDescriptor = file
        .read_json()
        .await
        .map_err(|e| load_error(e.to_string()))?;

    if descriptor.domain().trim().is_empty() {
        return Err(load_error("applicationInfo.domain is required".to_string()));
    }
    // The domain becomes a URL path segment of the application calls
    if !is_valid_domain(descriptor.domain()) {
        return Err(load_error(format!(
            "applicationInfo.domain {:?} may only contain letters, digits and '-'",
            descriptor.domain()
        )));
    }

    descriptor.inject_gav();
    debug!(
        "Loaded descriptor {} for domain {} ({})",
        path.display(),
        descriptor.domain(),
        descriptor.gav()
    );

    Ok(descriptor)
}

/// CloudHub domains are letters, digits and hyphens
fn is_valid_domain(domain: &str) -> bool {
    domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
}
