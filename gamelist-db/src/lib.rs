//! SQLite persistence for canonical game records.
//!
//! Provides schema creation and migration, keyed upserts, fill-only
//! updates, single-record edits, scoped reads and search, and bulk clears
//! backed by SQLite (via rusqlite with the bundled feature).

pub mod error;
pub mod operations;
pub mod queries;
pub mod schema;

pub use error::StoreError;
pub use operations::{
    RecordScope, UpsertOp, claim_unowned, delete_all, delete_scope, fill_record, update_record,
    upsert_records,
};
pub use queries::{
    SystemCount, count_for_scope, find_record, list_systems, records_for_scope,
    records_without_sources, search_records,
};
pub use rusqlite::Connection;
pub use schema::{CURRENT_VERSION, open_database, open_memory};
