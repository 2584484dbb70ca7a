//! `kubedash containers [--image <substr>]` — list or search containers.

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize as _;

use crate::app::AppContext;
use crate::application::services::containers;
use crate::domain::ContainerSummary;
use crate::output::{OutputContext, json};

/// Arguments for the containers command.
#[derive(Args)]
pub struct ContainersArgs {
    /// Only containers whose image contains this text (case-sensitive)
    #[arg(long, short = 'i', value_name = "TEXT")]
    pub image: Option<String>,
}

/// Run `kubedash containers`.
///
/// # Errors
///
/// Returns an error if the Docker daemon cannot be reached.
pub async fn run(app: &AppContext, args: &ContainersArgs) -> Result<()> {
    let engine = app.docker()?;

    match &args.image {
        Some(needle) => {
            let lookup = containers::find_by_image(&engine, needle).await?;
            if app.is_json() {
                return json::print(&lookup);
            }
            if let Some(warning) = &lookup.warning {
                app.output.warn(warning);
                return Ok(());
            }
            let rows: Vec<_> = lookup.matches.values().collect();
            print_table(&app.output, &rows);
        }
        None => {
            let all = containers::list(&engine).await?;
            if app.is_json() {
                return json::print(&all);
            }
            let rows: Vec<_> = all.iter().collect();
            print_table(&app.output, &rows);
        }
    }
    Ok(())
}

fn print_table(ctx: &OutputContext, rows: &[&ContainerSummary]) {
    if ctx.quiet {
        return;
    }
    if rows.is_empty() {
        ctx.info("No containers.");
        return;
    }

    let name_w = column_width(rows, "NAME", ContainerSummary::display_name);
    let image_w = column_width(rows, "IMAGE", |c| c.image.as_str());
    let state_w = column_width(rows, "STATE", |c| c.state.as_str());

    let header = format!(
        "{:<12}  {:<name_w$}  {:<image_w$}  {:<state_w$}  STATUS",
        "ID", "NAME", "IMAGE", "STATE"
    );
    println!("  {}", header.style(ctx.styles.dim));
    for c in rows {
        println!(
            "  {:<12}  {:<name_w$}  {:<image_w$}  {:<state_w$}  {}",
            c.short_id(),
            c.display_name(),
            c.image,
            c.state,
            c.status
        );
    }
}

fn column_width(
    rows: &[&ContainerSummary],
    header: &str,
    field: impl Fn(&ContainerSummary) -> &str,
) -> usize {
    rows.iter()
        .map(|c| field(c).chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}
