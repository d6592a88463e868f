//! gamelist CLI
//!
//! Command-line interface for importing, merging and exporting
//! EmulationStation gamelists.

mod cli_types;
mod commands;
mod error;
mod progress;

use std::io::Write;

use clap::Parser;
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamelist_core::Settings;

use cli_types::{Cli, Commands, ConfigAction};
use commands::Context;
pub(crate) use error::CliError;

/// Log an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}

fn init_logger(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(move |buf, record| {
            if verbose {
                writeln!(
                    buf,
                    "[{} {:<5}] {}",
                    buf.timestamp_seconds(),
                    record.level(),
                    record.args()
                )
            } else {
                writeln!(buf, "{}", record.args())
            }
        })
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    // Commands that never touch the database or settings values.
    match &cli.command {
        Commands::Config {
            action: ConfigAction::Path,
        } => {
            commands::config::run_config_path();
            return Ok(());
        }
        Commands::Config {
            action: ConfigAction::Init { force },
        } => return commands::config::run_config_init(*force),
        _ => {}
    }

    let settings = Settings::load().map_err(|e| CliError::config(e.to_string()))?;
    let ctx = Context::new(settings, cli.db, cli.owner, cli.quiet);

    match cli.command {
        Commands::Import { system, file, rows } => {
            commands::import::run_import(&ctx, system, file, rows)
        }
        Commands::Merge {
            system,
            file,
            clone_mode,
            rows,
        } => commands::merge::run_merge(&ctx, system, file, clone_mode, rows),
        Commands::Export { system, output } => commands::export::run_export(&ctx, system, output),
        Commands::List {
            system,
            search,
            page,
            limit,
        } => commands::list::run_list(&ctx, system, search, page, limit),
        Commands::Edit { id, set } => commands::edit::run_edit(&ctx, id, set),
        Commands::Count { file } => commands::count::run_count(&ctx, file),
        Commands::GenerateComplete {
            initial,
            images,
            output,
        } => commands::generate::run_generate_complete(initial, images, output),
        Commands::ClearSystem { system } => commands::clear::run_clear_system(&ctx, system),
        Commands::ClearDb { confirm } => commands::clear::run_clear_db(&ctx, confirm),
        Commands::Claim { new_owner } => commands::clear::run_claim(&ctx, new_owner),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(&ctx);
                Ok(())
            }
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::Init { force } => commands::config::run_config_init(force),
        },
    }
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}
