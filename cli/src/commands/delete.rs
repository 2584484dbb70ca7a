//! `kubedash delete <file> [--yes]` — delete a manifest's resources, then the file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::reconcile;
use crate::domain::manifest::validate_path;
use crate::output::json;

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Manifest file (.yml or .yaml); removed once its resources are gone
    pub file: PathBuf,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Run `kubedash delete <file>`.
///
/// # Errors
///
/// Returns an error if the file is not a YAML manifest, the cluster cannot
/// be reached, a deletion is refused, or the file cannot be removed.
pub async fn run(app: &AppContext, args: &DeleteArgs) -> Result<()> {
    validate_path(&args.file)?;

    let prompt = format!(
        "Delete every resource in {} and remove the file?",
        args.file.display()
    );
    if !args.yes && !app.confirm(&prompt, true)? {
        app.output.info("Cancelled.");
        return Ok(());
    }

    let cluster = app.cluster().await?;
    let summary = reconcile::delete(
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
            "{} deleted, {} already absent, {} removed",
            summary.deleted,
            summary.missing,
            args.file.display()
        ));
    }
    Ok(())
}
