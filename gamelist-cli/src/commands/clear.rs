//! Bulk deletes and ownership changes.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamelist_db::{claim_unowned, delete_all, delete_scope};

use super::Context;
use crate::CliError;

/// Delete every record of one system for the current owner.
pub(crate) fn run_clear_system(ctx: &Context, system: String) -> Result<(), CliError> {
    let conn = ctx.open_db()?;
    let deleted = delete_scope(&conn, &ctx.scope(&system))
        .map_err(|e| CliError::database(e.to_string()))?;

    log::info!(
        "  {} Deleted {} records for {} ({})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        deleted,
        system.if_supports_color(Stdout, |t| t.bold()),
        ctx.owner_label(),
    );
    Ok(())
}

/// Delete every record in the database.
pub(crate) fn run_clear_db(ctx: &Context, confirm: bool) -> Result<(), CliError> {
    if !confirm {
        log::warn!(
            "This will permanently delete every record in:\n  {}",
            ctx.db_path.display(),
        );
        log::info!("Re-run with --confirm to proceed:");
        log::info!("  gamelist clear-db --confirm");
        return Ok(());
    }

    let conn = ctx.open_db()?;
    let deleted = delete_all(&conn).map_err(|e| CliError::database(e.to_string()))?;
    log::info!(
        "{}",
        "Catalog cleared.".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Records deleted: {}", deleted);
    log::info!("  Path: {}", ctx.db_path.display());
    Ok(())
}

/// Move all unowned records to `owner`.
pub(crate) fn run_claim(ctx: &Context, owner: String) -> Result<(), CliError> {
    if owner.trim().is_empty() {
        return Err(CliError::invalid("owner must not be empty"));
    }
    let conn = ctx.open_db()?;
    let claimed = claim_unowned(&conn, &owner).map_err(|e| CliError::database(e.to_string()))?;

    log::info!(
        "  {} {} records now belong to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        claimed,
        owner.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}
