use thiserror::Error;

/// Errors from the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Provenance encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Migration error: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },

    #[error("Record not found: id {id}")]
    NotFound { id: i64 },

    #[error("Record for '{path}' has no name")]
    MissingName { path: String },
}
