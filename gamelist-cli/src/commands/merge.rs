use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamelist_import::{CloneMode, MergeRequest, merge_catalog};

use super::Context;
use crate::CliError;
use crate::cli_types::RowArgs;

/// Merge a complete gamelist into existing records, filling gaps only.
pub(crate) fn run_merge(
    ctx: &Context,
    system: String,
    file: PathBuf,
    clone_mode: CloneMode,
    rows: RowArgs,
) -> Result<(), CliError> {
    let conn = ctx.open_db()?;

    let request = MergeRequest {
        ignore: rows.ignore.clone(),
        clone_mode,
        range: rows.range(),
        owner: ctx.owner.clone(),
        suppressed_systems: ctx.settings.suppressed_systems(),
        batch_size: rows
            .batch_size
            .unwrap_or_else(|| ctx.settings.merge_batch_size()),
        ..MergeRequest::new(&system, file)
    };

    let progress = ctx.progress(&system);
    let stats = merge_catalog(&conn, &request, Some(progress.as_ref()))
        .map_err(|e| CliError::import(format!("{}: {}", request.file.display(), e)))?;

    log::info!(
        "  {} {} ({}): {} rows merged, {} skipped, {} without a match of {} rows",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        system.if_supports_color(Stdout, |t| t.bold()),
        ctx.owner_label(),
        stats.rows_updated,
        stats.rows_skipped,
        stats.no_match,
        stats.total,
    );
    log::info!(
        "    Matched records updated: {}, skipped: {}",
        stats.updated, stats.skipped,
    );
    if stats.bios > 0 {
        log::info!("    BIOS entries skipped: {}", stats.bios);
    }

    Ok(())
}
