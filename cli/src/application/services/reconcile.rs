//! Application service — manifest apply and delete use-cases.
//!
//! Documents are processed in file order. A failure stops processing and
//! leaves earlier documents applied or deleted; nothing is rolled back.

use std::path::Path;

use serde::Serialize;

use crate::application::ports::{ClusterApi, ProgressReporter};
use crate::domain::error::{ClusterError, ManifestError};
use crate::domain::manifest::{ManifestDocument, decode_documents, validate_path};

/// Counts reported after a successful apply.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApplySummary {
    pub created: usize,
    pub updated: usize,
}

/// Counts reported after a successful delete.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteSummary {
    pub deleted: usize,
    /// Documents whose resource was already gone.
    pub missing: usize,
}

/// What happened to a single applied document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Created,
    Updated,
}

/// Create or update every resource in the manifest at `path`.
///
/// # Errors
///
/// - `InvalidExtension` for paths not ending in `.yml`/`.yaml` (checked first)
/// - `Read` if the file cannot be read
/// - `Decode` on malformed content, including bytes that are not UTF-8
/// - `Apply` for the first document the cluster rejects
pub async fn apply(
    cluster: &impl ClusterApi,
    reporter: &impl ProgressReporter,
    path: &Path,
    default_namespace: &str,
) -> Result<ApplySummary, ManifestError> {
    let content = read_manifest(path).await?;
    let mut summary = ApplySummary::default();

    for doc in decode_documents(&content) {
        let doc = doc?;
        let namespace = doc.namespace_or(default_namespace);
        reporter.step(&format!("applying {}/{} in {namespace}...", doc.kind, doc.name));
        match apply_document(cluster, &doc, namespace).await? {
            ApplyOutcome::Created => {
                summary.created += 1;
                reporter.success(&format!("{}/{} created", doc.kind, doc.name));
            }
            ApplyOutcome::Updated => {
                summary.updated += 1;
                reporter.success(&format!("{}/{} configured", doc.kind, doc.name));
            }
        }
    }

    tracing::info!(
        path = %path.display(),
        created = summary.created,
        updated = summary.updated,
        "manifest applied"
    );
    Ok(summary)
}

/// Create the document's resource; on conflict, update it in place.
///
/// The update carries the live object's resource version. Another writer
/// changing the object between the fetch and the update makes the update
/// fail with a conflict.
///
/// # Errors
///
/// `ManifestError::Apply` for any cluster error other than the handled
/// `AlreadyExists`.
pub async fn apply_document(
    cluster: &impl ClusterApi,
    doc: &ManifestDocument,
    namespace: &str,
) -> Result<ApplyOutcome, ManifestError> {
    let locator = doc.locator();
    let apply_err = |source: ClusterError| ManifestError::Apply {
        kind: doc.kind.clone(),
        name: doc.name.clone(),
        source,
    };

    match cluster.create(&locator, namespace, &doc.body).await {
        Ok(()) => {
            tracing::debug!(kind = %doc.kind, name = %doc.name, namespace, "created");
            Ok(ApplyOutcome::Created)
        }
        Err(ClusterError::AlreadyExists) => {
            let resource_version = cluster
                .resource_version(&locator, namespace, &doc.name)
                .await
                .map_err(apply_err)?;
            let body = doc.body_with_resource_version(&resource_version);
            cluster
                .replace(&locator, namespace, &doc.name, &body)
                .await
                .map_err(apply_err)?;
            tracing::debug!(kind = %doc.kind, name = %doc.name, namespace, %resource_version, "updated");
            Ok(ApplyOutcome::Updated)
        }
        Err(e) => Err(apply_err(e)),
    }
}

/// Delete every resource in the manifest at `path`, then the file itself.
///
/// Resources already absent from the cluster are skipped. The file is only
/// removed once every document has been handled.
///
/// # Errors
///
/// - `InvalidExtension`, `Read`, `Decode` as for [`apply`]
/// - `Delete` for the first document the cluster refuses to delete
/// - `Remove` if the manifest file cannot be removed afterwards
pub async fn delete(
    cluster: &impl ClusterApi,
    reporter: &impl ProgressReporter,
    path: &Path,
    default_namespace: &str,
) -> Result<DeleteSummary, ManifestError> {
    let content = read_manifest(path).await?;
    let mut summary = DeleteSummary::default();

    for doc in decode_documents(&content) {
        let doc = doc?;
        let namespace = doc.namespace_or(default_namespace);
        let locator = doc.locator();
        reporter.step(&format!("deleting {}/{} in {namespace}...", doc.kind, doc.name));
        match cluster.delete(&locator, namespace, &doc.name).await {
            Ok(()) => {
                summary.deleted += 1;
                reporter.success(&format!("{}/{} deleted", doc.kind, doc.name));
            }
            Err(ClusterError::NotFound) => {
                tracing::info!(kind = %doc.kind, name = %doc.name, namespace, "resource not found, skipping");
                summary.missing += 1;
                reporter.warn(&format!("{}/{} not found, skipping", doc.kind, doc.name));
            }
            Err(source) => {
                return Err(ManifestError::Delete {
                    kind: doc.kind.clone(),
                    name: doc.name.clone(),
                    source,
                });
            }
        }
    }

    tokio::fs::remove_file(path)
        .await
        .map_err(|source| ManifestError::Remove {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(
        path = %path.display(),
        deleted = summary.deleted,
        missing = summary.missing,
        "manifest resources deleted and file removed"
    );
    Ok(summary)
}

async fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    validate_path(path)?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    String::from_utf8(bytes).map_err(|e| ManifestError::Decode {
        index: 0,
        message: format!("manifest is not valid UTF-8: {e}"),
    })
}
