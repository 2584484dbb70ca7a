//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator. Underlying causes are exposed through `source()`,
//! not repeated in the message; print with `{:#}` to see the chain.

use std::path::PathBuf;

use thiserror::Error;

// ── Environment errors ────────────────────────────────────────────────────────

/// The environment probe found Docker unusable.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ProbeFailed(pub String);

// ── Docker errors ─────────────────────────────────────────────────────────────

/// Errors from the Docker Engine facade.
#[derive(Debug, Error)]
pub enum DockerError {
    #[error("Cannot connect to the Docker daemon: {0}")]
    Connection(String),
}

// ── Cluster errors ────────────────────────────────────────────────────────────

/// Classification of a failed Kubernetes API call.
///
/// `AlreadyExists` and `NotFound` are separated out because the reconciler
/// treats them as recoverable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClusterError {
    #[error("resource already exists")]
    AlreadyExists,

    #[error("resource not found")]
    NotFound,

    #[error("cluster unreachable: {0}")]
    Unreachable(String),

    #[error("{reason} ({code}): {message}")]
    Rejected {
        code: u16,
        reason: String,
        message: String,
    },
}

// ── Manifest errors ───────────────────────────────────────────────────────────

/// Errors from applying or deleting a manifest file.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("file {} is not a valid YAML file (expected .yml or .yaml)", .0.display())]
    InvalidExtension(PathBuf),

    #[error("failed to open file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode YAML document {index}: {message}")]
    Decode { index: usize, message: String },

    #[error("apply failed for {kind} '{name}'")]
    Apply {
        kind: String,
        name: String,
        #[source]
        source: ClusterError,
    },

    #[error("delete failed for {kind} '{name}'")]
    Delete {
        kind: String,
        name: String,
        #[source]
        source: ClusterError,
    },

    #[error("failed to remove {}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    /// Short machine-readable code used in JSON error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidExtension(_) => "validation_error",
            Self::Read { .. } | Self::Remove { .. } => "io_error",
            Self::Decode { .. } => "decode_error",
            Self::Apply { .. } => "apply_error",
            Self::Delete { .. } => "delete_error",
        }
    }
}
