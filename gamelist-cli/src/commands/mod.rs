pub(crate) mod clear;
pub(crate) mod config;
pub(crate) mod count;
pub(crate) mod edit;
pub(crate) mod export;
pub(crate) mod generate;
pub(crate) mod import;
pub(crate) mod list;
pub(crate) mod merge;

use std::io::IsTerminal;
use std::path::PathBuf;

use gamelist_core::Settings;
use gamelist_db::{Connection, RecordScope, open_database};
use gamelist_import::{ImportProgress, LogProgress, RowRange, SilentProgress};

use crate::CliError;
use crate::cli_types::RowArgs;
use crate::progress::BarProgress;

/// Settings and global flags resolved once per invocation.
pub(crate) struct Context {
    pub settings: Settings,
    pub db_path: PathBuf,
    pub owner: Option<String>,
    pub quiet: bool,
}

impl Context {
    pub(crate) fn new(
        settings: Settings,
        db: Option<PathBuf>,
        owner: Option<String>,
        quiet: bool,
    ) -> Self {
        Self {
            db_path: settings.database_path(db),
            owner: settings.owner(owner),
            settings,
            quiet,
        }
    }

    /// Open the catalog database, creating its directory if needed.
    pub(crate) fn open_db(&self) -> Result<Connection, CliError> {
        if let Some(parent) = self.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        open_database(&self.db_path).map_err(|e| {
            CliError::database(format!(
                "failed to open {}: {}",
                self.db_path.display(),
                e
            ))
        })
    }

    pub(crate) fn scope(&self, system: &str) -> RecordScope {
        RecordScope::new(system, self.owner.as_deref())
    }

    /// Progress reporter for a batch run: nothing when quiet, log lines when
    /// stdout is not a terminal, otherwise a progress bar.
    pub(crate) fn progress(&self, label: &str) -> Box<dyn ImportProgress> {
        if self.quiet {
            Box::new(SilentProgress)
        } else if !std::io::stdout().is_terminal() {
            Box::new(LogProgress)
        } else {
            Box::new(BarProgress::new(label))
        }
    }

    /// Owner label for messages.
    pub(crate) fn owner_label(&self) -> &str {
        self.owner.as_deref().unwrap_or("unowned")
    }
}

impl RowArgs {
    pub(crate) fn range(&self) -> RowRange {
        RowRange::new(self.start, self.end)
    }
}
