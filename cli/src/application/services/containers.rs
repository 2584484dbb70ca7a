//! Application service — container listing and image search.

use crate::application::ports::ContainerEngine;
use crate::domain::{ContainerLookup, ContainerSummary, DockerError, filter_by_image};

/// List the running containers.
///
/// # Errors
///
/// Returns `DockerError::Connection` when the daemon is unreachable.
pub async fn list(engine: &impl ContainerEngine) -> Result<Vec<ContainerSummary>, DockerError> {
    let containers = engine.list_containers().await.inspect_err(|e| {
        tracing::error!(error = %e, "failed to list containers");
    })?;
    tracing::debug!(count = containers.len(), "listed containers");
    Ok(containers)
}

/// Containers whose image contains `needle`, keyed by image.
///
/// An empty result is not an error; the lookup carries a `warning` instead.
///
/// # Errors
///
/// Same as [`list`].
pub async fn find_by_image(
    engine: &impl ContainerEngine,
    needle: &str,
) -> Result<ContainerLookup, DockerError> {
    let lookup = filter_by_image(list(engine).await?, needle);
    tracing::debug!(needle, matches = lookup.matches.len(), "filtered containers by image");
    Ok(lookup)
}
