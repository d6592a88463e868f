use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamelist_db::search_records;

use super::Context;
use crate::CliError;

/// Show one page of a system's records.
pub(crate) fn run_list(
    ctx: &Context,
    system: String,
    search: Option<String>,
    page: usize,
    limit: usize,
) -> Result<(), CliError> {
    let conn = ctx.open_db()?;
    let limit = limit.max(1);
    let page = page.max(1);
    let (records, total) =
        search_records(&conn, &ctx.scope(&system), search.as_deref(), page, limit)
            .map_err(|e| CliError::database(e.to_string()))?;

    if total == 0 {
        log::info!(
            "{}",
            format!("No records for {} ({}).", system, ctx.owner_label())
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    log::info!(
        "{}",
        format!("{:>8}  {:<40} {}", "Id", "Name", "Path").if_supports_color(Stdout, |t| t.bold()),
    );
    for record in &records {
        log::info!("{:>8}  {:<40} {}", record.id, record.name, record.path);
    }
    crate::log_blank();
    log::info!(
        "  Page {} of {} ({} matching records)",
        page,
        total.div_ceil(limit),
        total,
    );
    Ok(())
}
