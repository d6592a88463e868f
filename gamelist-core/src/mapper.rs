//! Mapping from a parsed `<game>` node to the fields that should be written.
//!
//! The result is sparse: a field is present only when the source carries a
//! usable value and the field is not ignored for the target system.

use std::collections::BTreeSet;

use crate::error::ValidationError;
use crate::es_date::parse_es_date;
use crate::types::{FieldMap, FieldMapBuilder, FieldOutcome, FieldValue, GameField, GameNode};

/// Systems whose gamelists never meaningfully carry `ratio` or `region`.
pub const DEFAULT_SUPPRESSED_SYSTEMS: &[&str] = &["gamegear", "snes"];

/// Fields that are always dropped while mapping, for one system.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRules {
    ignored: BTreeSet<GameField>,
}

impl FieldRules {
    /// Rules for `system` using [`DEFAULT_SUPPRESSED_SYSTEMS`].
    pub fn new(system: &str, ignore: &[GameField]) -> Self {
        Self::with_suppressed(system, ignore, DEFAULT_SUPPRESSED_SYSTEMS)
    }

    /// Rules for `system`, forcing `ratio` and `region` onto the ignore list
    /// when the system appears in `suppressed` (case-insensitive).
    pub fn with_suppressed<S: AsRef<str>>(
        system: &str,
        ignore: &[GameField],
        suppressed: &[S],
    ) -> Self {
        let mut ignored: BTreeSet<GameField> = ignore.iter().copied().collect();
        if suppressed
            .iter()
            .any(|s| s.as_ref().eq_ignore_ascii_case(system))
        {
            ignored.insert(GameField::Ratio);
            ignored.insert(GameField::Region);
        }
        Self { ignored }
    }

    pub fn is_ignored(&self, field: GameField) -> bool {
        self.ignored.contains(&field)
    }
}

/// A node that passed identity validation.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRecord {
    pub path: String,
    /// Always contains [`GameField::Name`].
    pub fields: FieldMap,
}

/// Map descriptive and provenance fields. Identity (`path`, `name`) is not
/// included; see [`map_record`].
pub fn map_fields(node: &GameNode, rules: &FieldRules) -> FieldMap {
    build_fields(node, rules).build()
}

/// Map a node that must become a canonical record.
///
/// Fails when `path` or `name` is missing or blank.
pub fn map_record(node: &GameNode, rules: &FieldRules) -> Result<MappedRecord, ValidationError> {
    let path = node
        .value("path")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or(ValidationError::MissingPath)?;
    let name = node
        .value("name")
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ValidationError::MissingName {
            path: path.to_string(),
        })?;

    let mut builder = build_fields(node, rules);
    builder.offer(
        GameField::Name,
        FieldOutcome::Write(FieldValue::Text(name.to_string())),
    );

    Ok(MappedRecord {
        path: path.to_string(),
        fields: builder.build(),
    })
}

/// Whether a node is a BIOS image or a thin placeholder for one.
///
/// True for `romtype == "bios"`, or for nodes with at most three child tags
/// that still carry `name`, `path` and `ratio`.
pub fn is_bios_placeholder(node: &GameNode) -> bool {
    if node.value("romtype") == Some("bios") {
        return true;
    }
    node.field_count() <= 3
        && node.value("name").is_some()
        && node.value("path").is_some()
        && node.value("ratio").is_some()
}

/// Coerce one hand-entered value to the type stored for `field`.
///
/// Uses the same rules as mapping a node: text must be non-empty, ratings
/// finite floats, counts integers and dates `YYYYMMDDTHHMMSS`.
pub fn parse_field_value(field: GameField, text: &str) -> Result<FieldValue, ValidationError> {
    let text = text.trim();
    let outcome = match field {
        GameField::Rating => float_outcome(Some(text)),
        GameField::ReleaseDate | GameField::LastPlayed => date_outcome(Some(text)),
        GameField::PlayCount | GameField::TimePlayed | GameField::Timestamp => {
            int_outcome(Some(text))
        }
        _ => text_outcome(Some(text)),
    };
    match outcome {
        FieldOutcome::Write(value) => Ok(value),
        FieldOutcome::Absent | FieldOutcome::Ignored => Err(ValidationError::InvalidValue {
            field,
            value: text.to_string(),
        }),
    }
}

fn build_fields(node: &GameNode, rules: &FieldRules) -> FieldMapBuilder {
    let mut builder = FieldMapBuilder::new();

    for field in GameField::ALL {
        let outcome = match field {
            // Identity is handled by `map_record`.
            GameField::Name => continue,
            GameField::Source => text_outcome(node.attribute("source")),
            GameField::Timestamp => int_outcome(node.attribute("timestamp")),
            _ if rules.is_ignored(field) => FieldOutcome::Ignored,
            GameField::Rating => float_outcome(node.value(field.as_str())),
            GameField::ReleaseDate | GameField::LastPlayed => {
                date_outcome(node.value(field.as_str()))
            }
            GameField::PlayCount | GameField::TimePlayed => {
                int_outcome(node.value(field.as_str()))
            }
            _ => text_outcome(node.value(field.as_str())),
        };
        builder.offer(field, outcome);
    }

    let ignored: Vec<_> = builder.ignored().map(|f| f.as_str()).collect();
    if !ignored.is_empty() {
        log::trace!(
            "{}: ignored fields {}",
            node.value("name").unwrap_or("<unnamed>"),
            ignored.join(", ")
        );
    }

    builder
}

fn text_outcome(value: Option<&str>) -> FieldOutcome {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => FieldOutcome::Write(FieldValue::Text(v.to_string())),
        None => FieldOutcome::Absent,
    }
}

fn float_outcome(value: Option<&str>) -> FieldOutcome {
    match value.and_then(|v| v.trim().parse::<f64>().ok()) {
        Some(f) if f.is_finite() => FieldOutcome::Write(FieldValue::Float(f)),
        _ => FieldOutcome::Absent,
    }
}

fn int_outcome(value: Option<&str>) -> FieldOutcome {
    match value.and_then(|v| v.trim().parse::<i64>().ok()) {
        Some(i) => FieldOutcome::Write(FieldValue::Int(i)),
        None => FieldOutcome::Absent,
    }
}

fn date_outcome(value: Option<&str>) -> FieldOutcome {
    match value.and_then(parse_es_date) {
        Some(dt) => FieldOutcome::Write(FieldValue::Instant(dt)),
        None => FieldOutcome::Absent,
    }
}

#[cfg(test)]
#[path = "tests/mapper_tests.rs"]
mod tests;
