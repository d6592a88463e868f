//! Fill-only merge of a supplementary catalog into existing records.
//!
//! Existing records are matched by fuzzy normalized name rather than by
//! path, because complete catalogs and initial catalogs name their files
//! differently. A match only ever fills fields the record lacks.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use gamelist_core::settings::DEFAULT_MERGE_BATCH_SIZE;
use gamelist_core::{
    DEFAULT_SUPPRESSED_SYSTEMS, FieldRules, GameField, GameNode, GameRecord, find_variants,
    is_bios_placeholder, map_fields, normalize_name,
};
use gamelist_db::{RecordScope, fill_record, records_without_sources};
use gamelist_xml::parse_gamelist_file;
use rusqlite::Connection;

use crate::error::ImportError;
use crate::import::source_label;
use crate::progress::ImportProgress;
use crate::range::RowRange;

/// Which matched variants receive an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CloneMode {
    /// Every record at or above the match threshold.
    #[default]
    AllVariants,
    /// Only the records sharing the highest score.
    BestMatch,
}

impl CloneMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloneMode::AllVariants => "all",
            CloneMode::BestMatch => "best",
        }
    }
}

impl fmt::Display for CloneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CloneMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" | "all-variants" => Ok(CloneMode::AllVariants),
            "best" | "best-match" => Ok(CloneMode::BestMatch),
            other => Err(format!("unknown clone mode '{other}' (expected 'all' or 'best')")),
        }
    }
}

/// One merge call.
#[derive(Debug, Clone)]
pub struct MergeRequest {
    pub system: String,
    pub file: PathBuf,
    pub ignore: Vec<GameField>,
    pub clone_mode: CloneMode,
    pub range: RowRange,
    pub owner: Option<String>,
    pub suppressed_systems: Vec<String>,
    pub batch_size: usize,
}

impl MergeRequest {
    pub fn new(system: &str, file: impl Into<PathBuf>) -> Self {
        Self {
            system: system.to_string(),
            file: file.into(),
            ignore: Vec::new(),
            clone_mode: CloneMode::default(),
            range: RowRange::all(),
            owner: None,
            suppressed_systems: DEFAULT_SUPPRESSED_SYSTEMS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            batch_size: DEFAULT_MERGE_BATCH_SIZE,
        }
    }
}

/// Statistics from a single merge call.
///
/// `updated` and `skipped` count matched records, so one row that matches
/// several variants contributes to them once per variant. The `rows_*`
/// counters count rows: `rows_updated + rows_skipped + no_match == total`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeStats {
    /// Rows in the processed slice.
    pub total: usize,
    /// Matched records that received at least one field.
    pub updated: usize,
    /// Unnamed rows, BIOS rows, and matched records with nothing to add.
    pub skipped: usize,
    /// Rows that matched no existing record.
    pub no_match: usize,
    /// BIOS or placeholder rows; also counted in `skipped`.
    pub bios: usize,
    /// Rows that filled at least one field on at least one record.
    pub rows_updated: usize,
    /// Rows that were unnamed, BIOS, or added nothing to any match.
    pub rows_skipped: usize,
}

/// An existing record with its normalized name, held for the whole call.
struct Candidate {
    record: GameRecord,
    normalized: String,
}

/// Merge the requested slice of a complete catalog into the records of
/// `req.system`.
///
/// The existing records are read once. Fields written during the call are
/// applied to that snapshot as well, so a later row never overwrites what
/// an earlier row filled.
pub fn merge_catalog(
    conn: &Connection,
    req: &MergeRequest,
    progress: Option<&dyn ImportProgress>,
) -> Result<MergeStats, ImportError> {
    let nodes = parse_gamelist_file(&req.file)?;
    let scope = RecordScope::new(&req.system, req.owner.as_deref());
    let mut pool: Vec<Candidate> = records_without_sources(conn, &scope)?
        .into_iter()
        .map(|record| Candidate {
            normalized: normalize_name(Some(&record.name)),
            record,
        })
        .collect();

    let rows = req.range.slice(&nodes);
    let rules = FieldRules::with_suppressed(&req.system, &req.ignore, &req.suppressed_systems);
    let file = source_label(&req.file);

    let mut stats = MergeStats {
        total: rows.len(),
        ..Default::default()
    };

    if let Some(p) = progress {
        p.on_phase(&format!(
            "Merging {} games from {} into {} existing {} records",
            rows.len(),
            file,
            pool.len(),
            req.system
        ));
    }

    let mut processed = 0;
    for batch in rows.chunks(req.batch_size.max(1)) {
        let tx = conn.unchecked_transaction()?;
        for node in batch {
            merge_node(&tx, node, &rules, req.clone_mode, &file, &mut pool, &mut stats)?;
        }
        tx.commit()?;

        processed += batch.len();
        if let Some(p) = progress {
            p.on_batch(processed, rows.len());
        }
    }

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Merged {} rows into {} records, skipped {}, no match for {} for {}",
            stats.rows_updated, stats.updated, stats.rows_skipped, stats.no_match, req.system
        ));
    }

    Ok(stats)
}

fn merge_node(
    conn: &Connection,
    node: &GameNode,
    rules: &FieldRules,
    clone_mode: CloneMode,
    file: &str,
    pool: &mut [Candidate],
    stats: &mut MergeStats,
) -> Result<(), ImportError> {
    let Some(name) = node.value("name").map(str::trim).filter(|n| !n.is_empty()) else {
        log::debug!("Skipping game without a name in {}", file);
        stats.skipped += 1;
        stats.rows_skipped += 1;
        return Ok(());
    };

    if is_bios_placeholder(node) {
        log::debug!("Skipping BIOS: {}", name);
        stats.skipped += 1;
        stats.rows_skipped += 1;
        stats.bios += 1;
        return Ok(());
    }

    let fields = match node.value("image").and_then(|i| i.strip_prefix("./")) {
        Some(stripped) => {
            let mut node = node.clone();
            node.set_field("image", stripped.to_string());
            map_fields(&node, rules)
        }
        None => map_fields(node, rules),
    };

    let target = normalize_name(Some(name));
    let mut matched = find_variants(
        &target,
        pool.iter()
            .enumerate()
            .map(|(i, c)| (i, c.normalized.as_str())),
    );
    if clone_mode == CloneMode::BestMatch {
        matched.retain_best();
    }
    log::debug!("Best score for {}: {:.3}", name, matched.best_score);

    if matched.is_empty() {
        log::debug!("No match for {} in {}", name, file);
        stats.no_match += 1;
        return Ok(());
    }

    let mut row_updated = false;
    for (index, score) in matched.candidates {
        let candidate = &mut pool[index];
        let mut missing = fields.clone();
        missing.retain(|field, _| !candidate.record.is_populated(field));

        let written = if missing.is_empty() {
            Vec::new()
        } else {
            fill_record(conn, candidate.record.id, &missing, file)?
        };

        if written.is_empty() {
            log::debug!(
                "Skipped {} ({}): no new fields to add",
                name,
                candidate.record.path
            );
            stats.skipped += 1;
            continue;
        }

        for field in &written {
            if let Some(value) = missing.get(*field) {
                candidate.record.apply(*field, value);
            }
        }
        log::debug!(
            "Merged {} into {} (score {:.3}): added fields {}",
            name,
            candidate.record.path,
            score,
            written
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        stats.updated += 1;
        row_updated = true;
    }

    if row_updated {
        stats.rows_updated += 1;
    } else {
        stats.rows_skipped += 1;
    }
    Ok(())
}
