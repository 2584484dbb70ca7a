//! Application context — unified state passed to every command handler.
//!
//! `AppContext` is the composition root: it loads configuration once and
//! constructs the service adapters commands need. Nothing in the crate keeps
//! process-wide mutable state.

use std::path::PathBuf;

use anyhow::Result;
use kubedash_common::DashboardConfig;

use crate::application::ports::ConfigStore;
use crate::domain::{ClusterError, DockerError};
use crate::infra::cluster::KubeCluster;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::docker::BollardEngine;
use crate::output::{OutputContext, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Explicit config file path (`--config` / `KUBEDASH_CONFIG`).
    pub config_path: Option<PathBuf>,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Effective configuration.
    pub config: DashboardConfig,
    /// Process runner used by the environment probe.
    pub runner: TokioCommandRunner,
    /// Skip confirmation prompts (JSON mode, CI, or no terminal).
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// In JSON mode the terminal context is forced quiet so progress lines
    /// never mix with the JSON document on stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or parsed.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        let config = YamlConfigStore::new(flags.config_path.clone()).load()?;
        let non_interactive = flags.output.json
            || std::env::var_os("CI").is_some()
            || !console::Term::stderr().is_term();

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet || flags.output.json),
            mode,
            config,
            runner: TokioCommandRunner::default(),
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is set, returns `default` without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails.
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }

    /// Progress reporter bound to this context's output.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// Docker Engine client from the standard Docker environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be configured.
    pub fn docker(&self) -> Result<BollardEngine, DockerError> {
        BollardEngine::connect()
    }

    /// Kubernetes client from the ambient kubeconfig or in-cluster config.
    ///
    /// # Errors
    ///
    /// Returns an error if no usable configuration is found.
    pub async fn cluster(&self) -> Result<KubeCluster, ClusterError> {
        KubeCluster::connect().await
    }
}
