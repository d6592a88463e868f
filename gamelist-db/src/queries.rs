//! Read queries for canonical records.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use gamelist_core::{GameRecord, Provenance};
use rusqlite::{Connection, Row, params};

use crate::error::StoreError;
use crate::operations::RecordScope;

const RECORD_COLUMNS: &str = "id, system, path, user_id, name, image, rating, releasedate,
    developer, publisher, genre, players, ratio, region, playcount, lastplayed,
    timeplayed, romtype, description, source, source_timestamp";

/// Record count for one system and owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemCount {
    pub system: String,
    pub owner: Option<String>,
    pub count: usize,
}

/// All records in `scope`, in insertion order, with provenance loaded.
pub fn records_for_scope(
    conn: &Connection,
    scope: &RecordScope,
) -> Result<Vec<GameRecord>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {RECORD_COLUMNS} FROM games WHERE system = ?1 AND user_id = ?2 ORDER BY id"
    ))?;
    let rows = stmt.query_map(params![scope.system, scope.owner_key()], row_to_record)?;
    let mut records = rows.collect::<Result<Vec<_>, _>>()?;

    let mut sources = sources_for_scope(conn, scope)?;
    for record in &mut records {
        if let Some(list) = sources.remove(&record.id) {
            record.sources = list;
        }
    }
    Ok(records)
}

/// All records in `scope`, in insertion order, without provenance.
///
/// For callers that only read field values; the provenance log grows with
/// every write and is not loaded.
pub fn records_without_sources(
    conn: &Connection,
    scope: &RecordScope,
) -> Result<Vec<GameRecord>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {RECORD_COLUMNS} FROM games WHERE system = ?1 AND user_id = ?2 ORDER BY id"
    ))?;
    let rows = stmt.query_map(params![scope.system, scope.owner_key()], row_to_record)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// One page of records in `scope` whose name contains `query`
/// (ASCII case-insensitive), in insertion order.
///
/// `page` is 1-based; page 0 is treated as page 1. Returns the page and the
/// number of matching records across all pages.
pub fn search_records(
    conn: &Connection,
    scope: &RecordScope,
    query: Option<&str>,
    page: usize,
    limit: usize,
) -> Result<(Vec<GameRecord>, usize), StoreError> {
    let pattern = format!("%{}%", escape_like(query.map(str::trim).unwrap_or("")));
    let filter = "system = ?1 AND user_id = ?2 AND name LIKE ?3 ESCAPE '\\'";

    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM games WHERE {filter}"),
        params![scope.system, scope.owner_key(), pattern],
        |row| row.get(0),
    )?;

    let limit = limit.max(1);
    let offset = (page.max(1) - 1).saturating_mul(limit);
    let mut stmt = conn.prepare(&format!(
        "SELECT {RECORD_COLUMNS} FROM games WHERE {filter} ORDER BY id LIMIT ?4 OFFSET ?5"
    ))?;
    let rows = stmt.query_map(
        params![
            scope.system,
            scope.owner_key(),
            pattern,
            limit as i64,
            offset as i64
        ],
        row_to_record,
    )?;
    let mut records = rows.collect::<Result<Vec<_>, _>>()?;
    for record in &mut records {
        record.sources = sources_for_record(conn, record.id)?;
    }
    Ok((records, total as usize))
}

/// Find the record at `path` in `scope`.
pub fn find_record(
    conn: &Connection,
    scope: &RecordScope,
    path: &str,
) -> Result<Option<GameRecord>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {RECORD_COLUMNS} FROM games WHERE system = ?1 AND user_id = ?2 AND path = ?3"
    ))?;
    let result = stmt.query_row(params![scope.system, scope.owner_key(), path], row_to_record);
    let mut record = match result {
        Ok(r) => r,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    record.sources = sources_for_record(conn, record.id)?;
    Ok(Some(record))
}

/// Number of records in `scope`.
pub fn count_for_scope(conn: &Connection, scope: &RecordScope) -> Result<usize, StoreError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM games WHERE system = ?1 AND user_id = ?2",
        params![scope.system, scope.owner_key()],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

/// Every system/owner pair with its record count.
pub fn list_systems(conn: &Connection) -> Result<Vec<SystemCount>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT system, user_id, COUNT(*) FROM games
         GROUP BY system, user_id ORDER BY system, user_id",
    )?;
    let rows = stmt.query_map([], |row| {
        let owner: String = row.get(1)?;
        Ok(SystemCount {
            system: row.get(0)?,
            owner: (!owner.is_empty()).then_some(owner),
            count: row.get::<_, i64>(2)? as usize,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn sources_for_record(conn: &Connection, game_id: i64) -> Result<Vec<Provenance>, StoreError> {
    let mut stmt = conn.prepare_cached(
        "SELECT file, imported_fields FROM game_sources WHERE game_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![game_id], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;
    let mut sources = Vec::new();
    for row in rows {
        let (file, fields) = row?;
        sources.push(decode_provenance(file, &fields)?);
    }
    Ok(sources)
}

fn sources_for_scope(
    conn: &Connection,
    scope: &RecordScope,
) -> Result<HashMap<i64, Vec<Provenance>>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT s.game_id, s.file, s.imported_fields FROM game_sources s
         JOIN games g ON g.id = s.game_id
         WHERE g.system = ?1 AND g.user_id = ?2
         ORDER BY s.id",
    )?;
    let rows = stmt.query_map(params![scope.system, scope.owner_key()], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut map: HashMap<i64, Vec<Provenance>> = HashMap::new();
    for row in rows {
        let (game_id, file, fields) = row?;
        map.entry(game_id)
            .or_default()
            .push(decode_provenance(file, &fields)?);
    }
    Ok(map)
}

fn decode_provenance(file: String, fields: &str) -> Result<Provenance, StoreError> {
    Ok(Provenance {
        file,
        imported_fields: serde_json::from_str(fields)?,
    })
}

/// Escape `%`, `_` and backslash for a `LIKE` pattern with a backslash escape.
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn instant(secs: Option<i64>) -> Option<DateTime<Utc>> {
    secs.and_then(|s| DateTime::<Utc>::from_timestamp(s, 0))
}

fn row_to_record(row: &Row) -> rusqlite::Result<GameRecord> {
    let owner: String = row.get(3)?;
    Ok(GameRecord {
        id: row.get(0)?,
        system: row.get(1)?,
        path: row.get(2)?,
        owner: (!owner.is_empty()).then_some(owner),
        name: row.get(4)?,
        image: row.get(5)?,
        rating: row.get(6)?,
        releasedate: instant(row.get(7)?),
        developer: row.get(8)?,
        publisher: row.get(9)?,
        genre: row.get(10)?,
        players: row.get(11)?,
        ratio: row.get(12)?,
        region: row.get(13)?,
        playcount: row.get(14)?,
        lastplayed: instant(row.get(15)?),
        timeplayed: row.get(16)?,
        romtype: row.get(17)?,
        desc: row.get(18)?,
        source: row.get(19)?,
        timestamp: row.get(20)?,
        sources: Vec::new(),
    })
}
