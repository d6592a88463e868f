use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamelist_core::{FieldMapBuilder, FieldOutcome, GameField, parse_field_value};
use gamelist_db::update_record;

use super::Context;
use crate::CliError;

/// Provenance label for hand edits.
const EDIT_SOURCE: &str = "manual edit";

/// Overwrite fields on one record.
pub(crate) fn run_edit(
    ctx: &Context,
    id: i64,
    assignments: Vec<(GameField, String)>,
) -> Result<(), CliError> {
    let mut builder = FieldMapBuilder::new();
    for (field, text) in &assignments {
        let value = parse_field_value(*field, text).map_err(|e| CliError::invalid(e.to_string()))?;
        builder.offer(*field, FieldOutcome::Write(value));
    }
    let fields = builder.build();

    let conn = ctx.open_db()?;
    let written = update_record(&conn, id, &fields, EDIT_SOURCE)
        .map_err(|e| CliError::database(e.to_string()))?;

    log::info!(
        "  {} Record {}: updated {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        id,
        written
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
            .if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}
