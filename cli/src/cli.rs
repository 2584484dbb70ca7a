//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags};
use crate::commands;

/// Docker environment checks, container search and Kubernetes manifests
#[derive(Parser)]
#[command(
    name = "kubedash",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Configuration file (default: ~/.kubedash/config.yaml)
    #[arg(long, global = true, env = "KUBEDASH_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check that Docker and Docker Compose are installed and running
    Check(commands::check::CheckArgs),

    /// List containers, optionally filtered by image
    #[command(visible_alias = "ps")]
    Containers(commands::containers::ContainersArgs),

    /// Create or update the resources in a manifest
    Apply(commands::apply::ApplyArgs),

    /// Delete the resources in a manifest, then the manifest file
    Delete(commands::delete::DeleteArgs),

    /// Start the web dashboard
    Serve(commands::serve::ServeArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Default log filter when `RUST_LOG` is unset.
    ///
    /// The server logs requests at `info`; one-shot commands stay quiet so
    /// their output is not interleaved with log lines.
    #[must_use]
    pub fn default_log_filter(&self) -> &'static str {
        match self.command {
            Command::Serve(_) => "info",
            _ => "warn",
        }
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            config,
            command,
        } = self;

        if let Command::Version = command {
            commands::version::run(json);
            return Ok(());
        }

        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            config_path: config,
        })?;

        match command {
            Command::Check(args) => commands::check::run(&app, &args).await,
            Command::Containers(args) => commands::containers::run(&app, &args).await,
            Command::Apply(args) => commands::apply::run(&app, &args).await,
            Command::Delete(args) => commands::delete::run(&app, &args).await,
            Command::Serve(args) => commands::serve::run(&app, &args).await,
            Command::Version => Ok(()),
        }
    }
}
