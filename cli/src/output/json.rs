//! JSON output helpers.
//!
//! Every `--json` code path prints either its result object or the error
//! object produced by [`format_error`].

use anyhow::{Context, Result};
use serde::Serialize;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Pretty-print `value` to stdout.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print(value: &impl Serialize) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("JSON serialization failed")?
    );
    Ok(())
}

/// Machine-readable code for a command error.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    use crate::domain::{ClusterError, DockerError, ManifestError, ProbeFailed};

    if let Some(e) = err.downcast_ref::<ManifestError>() {
        e.code()
    } else if err.is::<ProbeFailed>() {
        "probe_failed"
    } else if err.is::<DockerError>() {
        "connection_error"
    } else if err.is::<ClusterError>() {
        "cluster_error"
    } else {
        "error"
    }
}
