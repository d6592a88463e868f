use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamelist_import::export_catalog;

use super::Context;
use crate::CliError;

/// Export one system's records to a gamelist file.
pub(crate) fn run_export(ctx: &Context, system: String, output: PathBuf) -> Result<(), CliError> {
    let conn = ctx.open_db()?;
    let stats = export_catalog(&conn, &ctx.scope(&system), &output)
        .map_err(|e| CliError::export(e.to_string()))?;

    log::info!(
        "  {} Exported {} games for {} to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stats.count,
        system.if_supports_color(Stdout, |t| t.bold()),
        output.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
