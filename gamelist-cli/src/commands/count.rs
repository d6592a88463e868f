use std::io::Write;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamelist_db::list_systems;
use gamelist_import::total_count;

use super::Context;
use crate::CliError;

/// Count games in a file, or list record counts per system.
pub(crate) fn run_count(ctx: &Context, file: Option<PathBuf>) -> Result<(), CliError> {
    if let Some(file) = file {
        // Bypasses the logger so the number survives `--quiet`.
        write_file_count(&mut std::io::stdout().lock(), &file)?;
        return Ok(());
    }

    let conn = ctx.open_db()?;
    let systems = list_systems(&conn).map_err(|e| CliError::database(e.to_string()))?;
    if systems.is_empty() {
        log::info!(
            "{}",
            "No records in the catalog.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    log::info!(
        "{}",
        format!("{:<20} {:<16} {:>8}", "System", "Owner", "Games")
            .if_supports_color(Stdout, |t| t.bold()),
    );
    let mut total = 0;
    for entry in &systems {
        log::info!(
            "{:<20} {:<16} {:>8}",
            entry.system,
            entry.owner.as_deref().unwrap_or("-"),
            entry.count,
        );
        total += entry.count;
    }
    crate::log_blank();
    log::info!("  {} records in {} system(s)", total, systems.len());
    Ok(())
}

/// Write the number of games in `file` as a bare line.
fn write_file_count(out: &mut impl Write, file: &Path) -> Result<usize, CliError> {
    let count = total_count(file)
        .map_err(|e| CliError::import(format!("{}: {}", file.display(), e)))?;
    writeln!(out, "{}", count)?;
    Ok(count)
}
