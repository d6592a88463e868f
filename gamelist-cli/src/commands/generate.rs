use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamelist_import::generate_complete;

use crate::CliError;

/// Generate a complete gamelist from an initial one plus scraped images.
pub(crate) fn run_generate_complete(
    initial: PathBuf,
    images: PathBuf,
    output: PathBuf,
) -> Result<(), CliError> {
    let stats = generate_complete(&initial, &images, &output)
        .map_err(|e| CliError::import(e.to_string()))?;

    log::info!(
        "  {} Generated {} with {} games ({} with images)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        output.display().if_supports_color(Stdout, |t| t.cyan()),
        stats.games,
        stats.images_matched,
    );
    Ok(())
}
