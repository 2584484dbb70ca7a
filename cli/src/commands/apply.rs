//! `kubedash apply <file>` — create or update the resources in a manifest.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::reconcile;
use crate::domain::manifest::validate_path;
use crate::output::json;

/// Arguments for the apply command.
#[derive(Args)]
pub struct ApplyArgs {
    /// Manifest file (.yml or .yaml), may hold several documents
    pub file: PathBuf,
}

/// Run `kubedash apply <file>`.
///
/// # Errors
///
/// Returns an error if the file is not a YAML manifest, the cluster cannot
/// be reached, or a document is rejected. Documents applied before the
/// failure stay applied.
pub async fn run(app: &AppContext, args: &ApplyArgs) -> Result<()> {
    // Reject bad paths before loading any cluster credentials.
    validate_path(&args.file)?;
    let cluster = app.cluster().await?;

    let summary = reconcile::apply(
        &cluster,
        &app.reporter(),
        &args.file,
        &app.config.default_namespace,
    )
    .await?;

    if app.is_json() {
        json::print(&summary)?;
    } else {
        app.output.info(&format!(
            "{} created, {} updated",
            summary.created, summary.updated
        ));
    }
    Ok(())
}
