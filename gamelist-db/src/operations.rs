//! Write operations: keyed upserts, fill-only updates, clears.

use gamelist_core::{FieldMap, FieldValue, GameField};
use rusqlite::types::{Value, ValueRef};
use rusqlite::{Connection, params, params_from_iter};

use crate::error::StoreError;

/// The set of records one call works on: a system, optionally scoped to an owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordScope {
    pub system: String,
    /// `None` selects records not scoped to any user.
    pub owner: Option<String>,
}

impl RecordScope {
    pub fn new(system: &str, owner: Option<&str>) -> Self {
        Self {
            system: system.to_string(),
            owner: owner.filter(|o| !o.is_empty()).map(str::to_string),
        }
    }

    /// Value stored in the `user_id` column.
    pub(crate) fn owner_key(&self) -> &str {
        self.owner.as_deref().unwrap_or("")
    }
}

/// One keyed upsert: overwrite every field in `fields` on the record at `path`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertOp {
    pub path: String,
    /// Must contain [`GameField::Name`] so a new record can be created.
    pub fields: FieldMap,
}

/// Column holding a field.
pub(crate) fn column(field: GameField) -> &'static str {
    match field {
        GameField::Desc => "description",
        GameField::Timestamp => "source_timestamp",
        other => other.as_str(),
    }
}

fn to_sql_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Text(s) => Value::Text(s.clone()),
        FieldValue::Float(f) => Value::Real(*f),
        FieldValue::Int(i) => Value::Integer(*i),
        FieldValue::Instant(dt) => Value::Integer(dt.timestamp()),
    }
}

// ── Upserts ─────────────────────────────────────────────────────────────────

/// Upsert records keyed by `(system, path, owner)`.
///
/// Every field present in an op replaces the stored value; fields absent
/// from the op are left untouched. Each op appends one provenance entry
/// naming `file` and the fields it wrote. Returns the number of ops applied.
///
/// Callers own the transaction boundary.
pub fn upsert_records(
    conn: &Connection,
    scope: &RecordScope,
    ops: &[UpsertOp],
    file: &str,
) -> Result<usize, StoreError> {
    for op in ops {
        if !op.fields.contains(GameField::Name) {
            return Err(StoreError::MissingName {
                path: op.path.clone(),
            });
        }

        let columns: Vec<&str> = op.fields.fields().map(column).collect();
        let placeholders: Vec<String> = (0..columns.len()).map(|i| format!("?{}", i + 4)).collect();
        let updates: Vec<String> = columns
            .iter()
            .map(|c| format!("{c} = excluded.{c}"))
            .collect();
        let sql = format!(
            "INSERT INTO games (system, path, user_id, {})
             VALUES (?1, ?2, ?3, {})
             ON CONFLICT(system, path, user_id) DO UPDATE SET
                 {},
                 updated_at = datetime('now')
             RETURNING id",
            columns.join(", "),
            placeholders.join(", "),
            updates.join(", "),
        );

        let mut values = vec![
            Value::Text(scope.system.clone()),
            Value::Text(op.path.clone()),
            Value::Text(scope.owner_key().to_string()),
        ];
        values.extend(op.fields.iter().map(|(_, v)| to_sql_value(v)));

        let mut stmt = conn.prepare_cached(&sql)?;
        let id: i64 = stmt.query_row(params_from_iter(values), |row| row.get(0))?;
        append_provenance(conn, id, file, &op.fields.names())?;
    }

    Ok(ops.len())
}

// ── Fill-only updates ───────────────────────────────────────────────────────

/// Write each field of `fields` onto record `id` only where the stored value
/// is NULL or empty text.
///
/// Returns the fields actually written, in field order. When any field is
/// written, one provenance entry naming exactly those fields is appended.
pub fn fill_record(
    conn: &Connection,
    id: i64,
    fields: &FieldMap,
    file: &str,
) -> Result<Vec<GameField>, StoreError> {
    if fields.is_empty() {
        return Ok(Vec::new());
    }

    let wanted: Vec<GameField> = fields.fields().collect();
    let select = format!(
        "SELECT {} FROM games WHERE id = ?1",
        wanted.iter().map(|f| column(*f)).collect::<Vec<_>>().join(", ")
    );
    let empty: Vec<bool> = match conn.query_row(&select, params![id], |row| {
        (0..wanted.len())
            .map(|i| {
                row.get_ref(i).map(|v| match v {
                    ValueRef::Null => true,
                    ValueRef::Text(t) => t.is_empty(),
                    _ => false,
                })
            })
            .collect::<Result<Vec<_>, _>>()
    }) {
        Ok(flags) => flags,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(StoreError::NotFound { id }),
        Err(e) => return Err(e.into()),
    };

    let written: Vec<(GameField, &FieldValue)> = fields
        .iter()
        .zip(empty)
        .filter_map(|(entry, is_empty)| is_empty.then_some(entry))
        .collect();
    if written.is_empty() {
        return Ok(Vec::new());
    }

    let sets: Vec<String> = written
        .iter()
        .enumerate()
        .map(|(i, (f, _))| format!("{} = ?{}", column(*f), i + 2))
        .collect();
    let sql = format!(
        "UPDATE games SET {}, updated_at = datetime('now') WHERE id = ?1",
        sets.join(", ")
    );
    let mut values = vec![Value::Integer(id)];
    values.extend(written.iter().map(|(_, v)| to_sql_value(v)));
    conn.execute(&sql, params_from_iter(values))?;

    let names: Vec<String> = written.iter().map(|(f, _)| f.as_str().to_string()).collect();
    append_provenance(conn, id, file, &names)?;

    Ok(written.into_iter().map(|(f, _)| f).collect())
}

// ── Edits ───────────────────────────────────────────────────────────────────

/// Overwrite the fields in `fields` on record `id`, whatever they hold.
///
/// Appends one provenance entry naming `file` and the written fields.
/// A blank name is rejected; fields absent from the map are untouched.
/// Returns the fields written, in field order.
pub fn update_record(
    conn: &Connection,
    id: i64,
    fields: &FieldMap,
    file: &str,
) -> Result<Vec<GameField>, StoreError> {
    let path: String = match conn.query_row(
        "SELECT path FROM games WHERE id = ?1",
        params![id],
        |row| row.get(0),
    ) {
        Ok(path) => path,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(StoreError::NotFound { id }),
        Err(e) => return Err(e.into()),
    };

    if fields
        .get(GameField::Name)
        .is_some_and(|v| v.as_text().is_some_and(|n| n.trim().is_empty()))
    {
        return Err(StoreError::MissingName { path });
    }
    if fields.is_empty() {
        return Ok(Vec::new());
    }

    let sets: Vec<String> = fields
        .fields()
        .enumerate()
        .map(|(i, f)| format!("{} = ?{}", column(f), i + 2))
        .collect();
    let sql = format!(
        "UPDATE games SET {}, updated_at = datetime('now') WHERE id = ?1",
        sets.join(", ")
    );
    let mut values = vec![Value::Integer(id)];
    values.extend(fields.iter().map(|(_, v)| to_sql_value(v)));
    conn.execute(&sql, params_from_iter(values))?;
    append_provenance(conn, id, file, &fields.names())?;

    Ok(fields.fields().collect())
}

fn append_provenance(
    conn: &Connection,
    game_id: i64,
    file: &str,
    fields: &[String],
) -> Result<(), StoreError> {
    let encoded = serde_json::to_string(fields)?;
    conn.prepare_cached(
        "INSERT INTO game_sources (game_id, file, imported_fields) VALUES (?1, ?2, ?3)",
    )?
    .execute(params![game_id, file, encoded])?;
    Ok(())
}

// ── Clears and ownership ────────────────────────────────────────────────────

/// Delete every record in `scope`. Returns the number of records deleted.
pub fn delete_scope(conn: &Connection, scope: &RecordScope) -> Result<usize, StoreError> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "DELETE FROM game_sources WHERE game_id IN
             (SELECT id FROM games WHERE system = ?1 AND user_id = ?2)",
        params![scope.system, scope.owner_key()],
    )?;
    let deleted = tx.execute(
        "DELETE FROM games WHERE system = ?1 AND user_id = ?2",
        params![scope.system, scope.owner_key()],
    )?;
    tx.commit()?;
    Ok(deleted)
}

/// Delete every record of every system and owner.
pub fn delete_all(conn: &Connection) -> Result<usize, StoreError> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM game_sources", [])?;
    let deleted = tx.execute("DELETE FROM games", [])?;
    tx.commit()?;
    Ok(deleted)
}

/// Assign every unowned record to `owner`.
///
/// Records whose `(system, path)` the owner already holds are left unowned.
/// Returns the number of records claimed.
pub fn claim_unowned(conn: &Connection, owner: &str) -> Result<usize, StoreError> {
    let claimed = conn.execute(
        "UPDATE OR IGNORE games SET user_id = ?1, updated_at = datetime('now')
         WHERE user_id = ''",
        params![owner],
    )?;
    Ok(claimed)
}
