//! Gamelist data model, name matching, and field mapping.
//!
//! This crate holds the pure pieces of the reconciliation pipeline: the
//! canonical record types, the EmulationStation date codec, name
//! normalization, fuzzy similarity, and the mapping from a parsed `<game>`
//! node to the sparse set of fields that should be written. It performs no
//! database or XML I/O; see `gamelist-xml`, `gamelist-db` and
//! `gamelist-import` for those.

pub mod error;
pub mod es_date;
pub mod mapper;
pub mod normalize;
pub mod settings;
pub mod similarity;
pub mod types;

pub use error::{SettingsError, ValidationError};
pub use es_date::{format_es_date, parse_es_date};
pub use mapper::{
    DEFAULT_SUPPRESSED_SYSTEMS, FieldRules, MappedRecord, is_bios_placeholder, map_fields,
    map_record, parse_field_value,
};
pub use normalize::normalize_name;
pub use settings::Settings;
pub use similarity::{MATCH_THRESHOLD, VariantMatch, find_variants, score};
pub use types::*;
