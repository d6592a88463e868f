use gamelist_db::StoreError;
use gamelist_xml::XmlError;
use thiserror::Error;

/// Errors that abort an import, merge or generate call.
///
/// Per-node problems are never errors here; they are skipped and counted.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Gamelist error: {0}")]
    Xml(#[from] XmlError),
    #[error("Database error: {0}")]
    Store(#[from] StoreError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No games found for system \"{system}\"")]
    NotFound { system: String },
    #[error("Database error: {0}")]
    Store(#[from] StoreError),
    #[error("Gamelist error: {0}")]
    Xml(#[from] XmlError),
}
