//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use gamelist_core::GameField;
use gamelist_import::CloneMode;

#[derive(Parser)]
#[command(name = "gamelist")]
#[command(about = "Reconcile EmulationStation gamelists into one catalog", long_about = None)]
pub(crate) struct Cli {
    /// Path to the catalog database (default: from settings, else the data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Owner whose records are read and written (default: from settings, else unowned)
    #[arg(long, global = true)]
    pub owner: Option<String>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (per-row merge decisions)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Row slice and field filters shared by import and merge.
#[derive(Args, Clone)]
pub(crate) struct RowArgs {
    /// Fields never written (e.g., ratio,region,desc)
    #[arg(long, value_delimiter = ',')]
    pub ignore: Vec<GameField>,

    /// First row to process (0-based)
    #[arg(long, default_value_t = 0)]
    pub start: usize,

    /// Row to stop before (default: end of file)
    #[arg(long)]
    pub end: Option<usize>,

    /// Rows per committed batch (default: from settings)
    #[arg(long)]
    pub batch_size: Option<usize>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Import an initial gamelist, overwriting the fields it carries
    Import {
        /// System the gamelist belongs to (e.g., snes, megadrive)
        system: String,

        /// Gamelist XML file
        file: PathBuf,

        #[command(flatten)]
        rows: RowArgs,
    },

    /// Merge a complete gamelist, filling only fields records lack
    Merge {
        /// System the gamelist belongs to
        system: String,

        /// Complete gamelist XML file
        file: PathBuf,

        /// Which fuzzy matches to update: "all" variants or only the "best"
        #[arg(long, default_value_t = CloneMode::AllVariants)]
        clone_mode: CloneMode,

        #[command(flatten)]
        rows: RowArgs,
    },

    /// Export a system's records to a gamelist file
    Export {
        /// System to export
        system: String,

        /// Output gamelist XML file
        output: PathBuf,
    },

    /// Browse a system's records, optionally filtered by name
    List {
        /// System to list
        system: String,

        /// Only records whose name contains this text (case-insensitive)
        #[arg(long)]
        search: Option<String>,

        /// Page to show (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Records per page
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },

    /// Overwrite fields on one record
    Edit {
        /// Record id, as shown by `list`
        id: i64,

        /// Field assignment (e.g., --set genre=Shooter --set rating=0.8)
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment, required = true)]
        set: Vec<(GameField, String)>,
    },

    /// Count games in a gamelist file, or records per system
    Count {
        /// Gamelist file to count (default: list systems in the database)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Build a complete gamelist from an initial one and a folder of images
    GenerateComplete {
        /// Initial gamelist XML file
        initial: PathBuf,

        /// Directory of png/jpg images named after the games
        images: PathBuf,

        /// Output gamelist XML file
        output: PathBuf,
    },

    /// Delete every record of one system
    ClearSystem {
        /// System to clear
        system: String,
    },

    /// Delete every record of every system and owner
    ClearDb {
        /// Confirm deletion (required)
        #[arg(long)]
        confirm: bool,
    },

    /// Assign all unowned records to the given owner
    Claim {
        /// Owner that takes the records
        #[arg(value_name = "OWNER")]
        new_owner: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show effective settings and their sources
    Show,

    /// Print the settings file path
    Path,

    /// Write a settings file holding the default values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

/// Parse a `field=value` assignment.
fn parse_assignment(s: &str) -> Result<(GameField, String), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
    let field = field.parse::<GameField>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_merge_arguments() {
        let cli = Cli::try_parse_from([
            "gamelist", "--owner", "u1", "merge", "snes", "complete.xml", "--clone-mode", "best",
            "--ignore", "ratio,desc", "--start", "50", "--end", "100",
        ])
        .unwrap();

        assert_eq!(cli.owner.as_deref(), Some("u1"));
        match cli.command {
            Commands::Merge {
                system,
                clone_mode,
                rows,
                ..
            } => {
                assert_eq!(system, "snes");
                assert_eq!(clone_mode, CloneMode::BestMatch);
                assert_eq!(rows.ignore, vec![GameField::Ratio, GameField::Desc]);
                assert_eq!(rows.start, 50);
                assert_eq!(rows.end, Some(100));
            }
            _ => panic!("expected merge"),
        }
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = Cli::try_parse_from(["gamelist", "import", "snes", "a.xml", "--ignore", "thumbnail"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_list_and_edit() {
        let cli = Cli::try_parse_from(["gamelist", "list", "snes", "--search", "mario", "--page", "2"])
            .unwrap();
        match cli.command {
            Commands::List { system, search, page, limit } => {
                assert_eq!(system, "snes");
                assert_eq!(search.as_deref(), Some("mario"));
                assert_eq!(page, 2);
                assert_eq!(limit, 50);
            }
            _ => panic!("expected list"),
        }

        let cli = Cli::try_parse_from([
            "gamelist", "edit", "7", "--set", "genre=Run and Gun", "--set", "desc=a=b",
        ])
        .unwrap();
        match cli.command {
            Commands::Edit { id, set } => {
                assert_eq!(id, 7);
                assert_eq!(
                    set,
                    vec![
                        (GameField::Genre, "Run and Gun".to_string()),
                        (GameField::Desc, "a=b".to_string()),
                    ]
                );
            }
            _ => panic!("expected edit"),
        }
    }

    #[test]
    fn edit_requires_valid_assignments() {
        assert!(Cli::try_parse_from(["gamelist", "edit", "7"]).is_err());
        assert!(Cli::try_parse_from(["gamelist", "edit", "7", "--set", "genre"]).is_err());
        assert!(Cli::try_parse_from(["gamelist", "edit", "7", "--set", "box=x"]).is_err());
    }
}
