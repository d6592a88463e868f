//! Bulk import of an initial catalog.
//!
//! Every valid `<game>` node becomes a keyed upsert: fields present in the
//! node overwrite the stored values, absent fields are left alone. Batches
//! commit independently, so an aborted call keeps the batches already done
//! and re-running the same slice is safe.

use std::path::{Path, PathBuf};

use gamelist_core::settings::DEFAULT_IMPORT_BATCH_SIZE;
use gamelist_core::{DEFAULT_SUPPRESSED_SYSTEMS, FieldRules, GameField, map_record};
use gamelist_db::{RecordScope, UpsertOp, upsert_records};
use gamelist_xml::parse_gamelist_file;
use rusqlite::Connection;

use crate::error::ImportError;
use crate::progress::ImportProgress;
use crate::range::RowRange;

/// One import call.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub system: String,
    pub file: PathBuf,
    /// Fields never written by this call.
    pub ignore: Vec<GameField>,
    pub range: RowRange,
    pub owner: Option<String>,
    /// Systems for which `ratio` and `region` are always ignored.
    pub suppressed_systems: Vec<String>,
    pub batch_size: usize,
}

impl ImportRequest {
    pub fn new(system: &str, file: impl Into<PathBuf>) -> Self {
        Self {
            system: system.to_string(),
            file: file.into(),
            ignore: Vec::new(),
            range: RowRange::all(),
            owner: None,
            suppressed_systems: DEFAULT_SUPPRESSED_SYSTEMS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            batch_size: DEFAULT_IMPORT_BATCH_SIZE,
        }
    }
}

/// Statistics from a single import call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    /// Rows in the processed slice.
    pub total: usize,
    /// Records created or overwritten.
    pub written: usize,
    /// Rows without a usable `path` and `name`.
    pub skipped: usize,
}

/// Import the requested slice of a gamelist file.
///
/// Parse and store failures abort the call; batches committed before the
/// failure stay committed. Nodes failing validation are logged and counted
/// in [`ImportStats::skipped`].
pub fn import_catalog(
    conn: &Connection,
    req: &ImportRequest,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportStats, ImportError> {
    let nodes = parse_gamelist_file(&req.file)?;
    let rows = req.range.slice(&nodes);
    let scope = RecordScope::new(&req.system, req.owner.as_deref());
    let rules = FieldRules::with_suppressed(&req.system, &req.ignore, &req.suppressed_systems);
    let file = source_label(&req.file);

    let mut stats = ImportStats {
        total: rows.len(),
        ..Default::default()
    };

    if let Some(p) = progress {
        p.on_phase(&format!(
            "Importing {} games for {} from {}",
            rows.len(),
            req.system,
            file
        ));
    }

    let mut processed = 0;
    for batch in rows.chunks(req.batch_size.max(1)) {
        let mut ops = Vec::with_capacity(batch.len());
        for node in batch {
            match map_record(node, &rules) {
                Ok(mapped) => ops.push(UpsertOp {
                    path: mapped.path,
                    fields: mapped.fields,
                }),
                Err(e) => {
                    log::warn!("Skipping game in {}: {}", file, e);
                    stats.skipped += 1;
                }
            }
        }

        let tx = conn.unchecked_transaction()?;
        stats.written += upsert_records(&tx, &scope, &ops, &file)?;
        tx.commit()?;

        processed += batch.len();
        if let Some(p) = progress {
            p.on_batch(processed, rows.len());
        }
    }

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Imported {} games from {} for {} ({} skipped)",
            stats.written, file, req.system, stats.skipped
        ));
    }

    Ok(stats)
}

/// Number of `<game>` entries in a gamelist file, for planning slices.
pub fn total_count(file: &Path) -> Result<usize, ImportError> {
    Ok(parse_gamelist_file(file)?.len())
}

/// The file name recorded in provenance entries.
pub(crate) fn source_label(file: &Path) -> String {
    file.to_string_lossy().into_owned()
}
