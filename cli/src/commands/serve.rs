//! `kubedash serve` — probe the environment, then run the web dashboard.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use kubedash_common::ComposeFlavor;

use crate::app::AppContext;
use crate::application::ports::ClusterApi;
use crate::application::services::env_probe;
use crate::commands::check::{ensure_ok, print_report};
use crate::infra::docker::BollardEngine;
use crate::web::{self, WebServer, WebState};

/// Upper bound on the startup cluster version lookup.
const KUBE_VERSION_TIMEOUT: Duration = Duration::from_secs(5);

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides the config file)
    #[arg(long, env = "KUBEDASH_LISTEN_ADDR", value_name = "ADDR")]
    pub listen: Option<SocketAddr>,

    /// Compose front end to query (overrides the config file)
    #[arg(long, value_enum)]
    pub compose: Option<ComposeFlavor>,
}

/// Run `kubedash serve`.
///
/// # Errors
///
/// Returns an error if the environment probe fails, the Docker client cannot
/// be created, or the listener cannot be bound.
pub async fn run(app: &AppContext, args: &ServeArgs) -> Result<()> {
    let flavor = args.compose.unwrap_or(app.config.compose);
    let report = env_probe::probe(&app.runner, &app.reporter(), flavor).await;
    print_report(&app.output, &report);
    let mut env = report.info.clone();
    ensure_ok(report)?;
    env.kube_version = kube_version(app).await;

    let engine = BollardEngine::connect()?;
    let state = Arc::new(WebState::new(env, engine));
    let addr = args.listen.unwrap_or(app.config.listen_addr);

    app.output.info(&format!("dashboard on http://{addr}"));
    WebServer::new()
        .start(addr, web::router(state), web::shutdown_signal())
        .await
}

/// Cluster version for the status page; `None` when no cluster answers.
async fn kube_version(app: &AppContext) -> Option<String> {
    let lookup = async {
        let cluster = app.cluster().await?;
        cluster.server_version().await
    };
    match tokio::time::timeout(KUBE_VERSION_TIMEOUT, lookup).await {
        Ok(Ok(version)) => Some(version),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "kubernetes version unavailable");
            None
        }
        Err(_) => {
            tracing::warn!("kubernetes version lookup timed out");
            None
        }
    }
}
