use gamelist_db::schema::get_schema_version;
use gamelist_db::*;

const TABLES: &[&str] = &["schema_version", "games", "game_sources"];

#[test]
fn memory_database_has_all_tables() {
    let conn = open_memory().unwrap();
    for table in TABLES {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "table '{}' should exist", table);
    }
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn open_database_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");
    drop(open_database(&path).unwrap());
    let conn = open_database(&path).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn migrates_version_one_to_per_user_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE schema_version (
                 version INTEGER NOT NULL,
                 applied_at TEXT NOT NULL DEFAULT (datetime('now'))
             );
             INSERT INTO schema_version (version) VALUES (1);
             CREATE TABLE games (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 system TEXT NOT NULL,
                 path TEXT NOT NULL,
                 name TEXT NOT NULL,
                 image TEXT, rating REAL, releasedate INTEGER, developer TEXT,
                 publisher TEXT, genre TEXT, players TEXT, ratio TEXT, region TEXT,
                 playcount INTEGER, lastplayed INTEGER, timeplayed INTEGER,
                 romtype TEXT, description TEXT, source TEXT, source_timestamp INTEGER,
                 created_at TEXT NOT NULL DEFAULT (datetime('now')),
                 updated_at TEXT NOT NULL DEFAULT (datetime('now'))
             );
             CREATE UNIQUE INDEX idx_games_key ON games(system, path);
             CREATE INDEX idx_games_name ON games(system, name);
             CREATE TABLE game_sources (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 game_id INTEGER NOT NULL REFERENCES games(id) ON DELETE CASCADE,
                 file TEXT NOT NULL,
                 imported_fields TEXT NOT NULL,
                 created_at TEXT NOT NULL DEFAULT (datetime('now'))
             );
             INSERT INTO games (system, path, name) VALUES ('mame', './pacman.zip', 'Pac-Man');",
        )
        .unwrap();
    }

    let conn = open_database(&path).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), 2);

    // Legacy rows become unowned records.
    let global = RecordScope::new("mame", None);
    assert_eq!(count_for_scope(&conn, &global).unwrap(), 1);

    // The same path may now exist once per owner.
    conn.execute(
        "INSERT INTO games (system, path, name, user_id) VALUES ('mame', './pacman.zip', 'Pac-Man', 'u1')",
        [],
    )
    .unwrap();
    assert_eq!(count_for_scope(&conn, &RecordScope::new("mame", Some("u1"))).unwrap(), 1);
}

#[test]
fn newer_database_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE schema_version (version INTEGER NOT NULL, applied_at TEXT);
             INSERT INTO schema_version (version) VALUES (99);",
        )
        .unwrap();
    }
    assert!(matches!(
        open_database(&path),
        Err(StoreError::VersionMismatch { expected: 2, found: 99 })
    ));
}
