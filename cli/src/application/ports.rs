//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::future::Future;
use std::process::Output;

use anyhow::Result;
use serde_json::Value;

use kubedash_common::DashboardConfig;

use crate::domain::{ClusterError, ContainerSummary, DockerError, ResourceLocator};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;
}

// ── Docker Engine Port ────────────────────────────────────────────────────────

/// Read access to the Docker Engine.
///
/// The returned future is `Send` so the web layer can call it from request
/// handlers.
pub trait ContainerEngine: Send + Sync {
    /// List running containers.
    fn list_containers(
        &self,
    ) -> impl Future<Output = Result<Vec<ContainerSummary>, DockerError>> + Send;
}

// ── Kubernetes Port ───────────────────────────────────────────────────────────

/// Namespaced, schema-less access to the Kubernetes API.
///
/// Errors are classified so callers can treat `AlreadyExists` and
/// `NotFound` as recoverable.
#[allow(async_fn_in_trait)]
pub trait ClusterApi {
    /// Create the object described by `body`.
    async fn create(
        &self,
        locator: &ResourceLocator,
        namespace: &str,
        body: &Value,
    ) -> Result<(), ClusterError>;

    /// Fetch the live object's `metadata.resourceVersion`.
    async fn resource_version(
        &self,
        locator: &ResourceLocator,
        namespace: &str,
        name: &str,
    ) -> Result<String, ClusterError>;

    /// Replace the named object with `body`.
    async fn replace(
        &self,
        locator: &ResourceLocator,
        namespace: &str,
        name: &str,
        body: &Value,
    ) -> Result<(), ClusterError>;

    /// Delete the named object.
    async fn delete(
        &self,
        locator: &ResourceLocator,
        namespace: &str,
        name: &str,
    ) -> Result<(), ClusterError>;

    /// API server git version, e.g. `v1.31.2`.
    async fn server_version(&self) -> Result<String, ClusterError>;
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts loading the dashboard configuration.
pub trait ConfigStore {
    /// Load the configuration, returning defaults when no file exists.
    fn load(&self) -> Result<DashboardConfig>;
    /// Location of the configuration file.
    fn path(&self) -> Result<std::path::PathBuf>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
