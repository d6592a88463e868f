use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamelist_core::Settings;
use gamelist_core::settings::{
    DEFAULT_IMPORT_BATCH_SIZE, DEFAULT_MERGE_BATCH_SIZE, default_database_path, settings_path,
};

use super::Context;
use crate::CliError;

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

/// Show effective settings and where each value comes from.
pub(crate) fn run_config_show(ctx: &Context) {
    let path = settings_path();
    log::info!(
        "{}",
        "Gamelist Settings".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let source = |set: bool| {
        if set { "settings" } else { "default" }
    };
    let s = &ctx.settings;

    log::info!(
        "  Database:           {} ({})",
        ctx.db_path.display(),
        source(s.database.is_some()),
    );
    log::info!("  Owner:              {}", ctx.owner_label());
    log::info!(
        "  Suppressed systems: {} ({})",
        s.suppressed_systems().join(", "),
        source(s.suppressed_systems.is_some()),
    );
    log::info!(
        "  Import batch size:  {} ({})",
        s.import_batch_size(),
        source(s.import_batch_size.is_some()),
    );
    log::info!(
        "  Merge batch size:   {} ({})",
        s.merge_batch_size(),
        source(s.merge_batch_size.is_some()),
    );
}

/// Write a settings file holding the defaults.
pub(crate) fn run_config_init(force: bool) -> Result<(), CliError> {
    let path = settings_path();
    if path.exists() && !force {
        log::warn!("Settings file already exists at {}", path.display());
        log::info!("Re-run with --force to overwrite it.");
        return Ok(());
    }

    let settings = Settings {
        database: Some(default_database_path()),
        owner: None,
        suppressed_systems: Some(Settings::default().suppressed_systems()),
        import_batch_size: Some(DEFAULT_IMPORT_BATCH_SIZE),
        merge_batch_size: Some(DEFAULT_MERGE_BATCH_SIZE),
    };
    settings
        .save_to(&path)
        .map_err(|e| CliError::config(format!("{}: {}", path.display(), e)))?;

    log::info!(
        "  {} Wrote {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
