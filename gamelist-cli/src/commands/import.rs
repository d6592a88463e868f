use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamelist_import::{ImportRequest, import_catalog};

use super::Context;
use crate::CliError;
use crate::cli_types::RowArgs;

/// Import an initial gamelist into the catalog.
pub(crate) fn run_import(
    ctx: &Context,
    system: String,
    file: PathBuf,
    rows: RowArgs,
) -> Result<(), CliError> {
    let conn = ctx.open_db()?;

    let request = ImportRequest {
        ignore: rows.ignore.clone(),
        range: rows.range(),
        owner: ctx.owner.clone(),
        suppressed_systems: ctx.settings.suppressed_systems(),
        batch_size: rows
            .batch_size
            .unwrap_or_else(|| ctx.settings.import_batch_size()),
        ..ImportRequest::new(&system, file)
    };

    let progress = ctx.progress(&system);
    let stats = import_catalog(&conn, &request, Some(progress.as_ref()))
        .map_err(|e| CliError::import(format!("{}: {}", request.file.display(), e)))?;

    log::info!(
        "  {} {} ({}): {} written, {} skipped of {} rows",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        system.if_supports_color(Stdout, |t| t.bold()),
        ctx.owner_label(),
        stats.written,
        stats.skipped,
        stats.total,
    );
    if stats.skipped > 0 {
        log::info!(
            "    {}",
            "Skipped rows lack a path or name; run with -v for details"
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("  Database: {}", ctx.db_path.display());

    Ok(())
}
