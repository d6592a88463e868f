//! Import, merge and export gamelists against the record store.
//!
//! This crate owns the reconciliation engines: bulk import of an initial
//! catalog, fill-only merge of supplementary catalogs by fuzzy name, export
//! back to gamelist XML, and generation of a complete catalog from an
//! initial one plus a directory of images.

pub mod error;
pub mod export;
pub mod generate;
pub mod import;
pub mod merge;
pub mod progress;
pub mod range;

pub use error::{ExportError, ImportError};
pub use export::{ExportStats, export_catalog, record_to_node};
pub use generate::{GenerateStats, generate_complete};
pub use import::{ImportRequest, ImportStats, import_catalog, total_count};
pub use merge::{CloneMode, MergeRequest, MergeStats, merge_catalog};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
pub use range::RowRange;
