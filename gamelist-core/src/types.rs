//! Data model types for gamelist reconciliation.
//!
//! A [`GameNode`] is one `<game>` element exactly as it appeared in a source
//! file. A [`FieldMap`] is the sparse, typed subset of it that should be
//! written. A [`GameRecord`] is the canonical record as stored.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::es_date::format_es_date;

// ── Fields ──────────────────────────────────────────────────────────────────

/// A writable field of a canonical record.
///
/// Identity (`system`, `path`, owner) is not a `GameField`; it is never
/// subject to ignore lists or fill-only rules. Declaration order is the
/// order fields are written to the store and to exported XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GameField {
    Name,
    Image,
    Rating,
    ReleaseDate,
    Developer,
    Publisher,
    Genre,
    Players,
    Ratio,
    Region,
    PlayCount,
    LastPlayed,
    TimePlayed,
    RomType,
    Desc,
    Source,
    Timestamp,
}

impl GameField {
    pub const ALL: [GameField; 17] = [
        GameField::Name,
        GameField::Image,
        GameField::Rating,
        GameField::ReleaseDate,
        GameField::Developer,
        GameField::Publisher,
        GameField::Genre,
        GameField::Players,
        GameField::Ratio,
        GameField::Region,
        GameField::PlayCount,
        GameField::LastPlayed,
        GameField::TimePlayed,
        GameField::RomType,
        GameField::Desc,
        GameField::Source,
        GameField::Timestamp,
    ];

    /// Tag name in gamelist XML, also used as the stored column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameField::Name => "name",
            GameField::Image => "image",
            GameField::Rating => "rating",
            GameField::ReleaseDate => "releasedate",
            GameField::Developer => "developer",
            GameField::Publisher => "publisher",
            GameField::Genre => "genre",
            GameField::Players => "players",
            GameField::Ratio => "ratio",
            GameField::Region => "region",
            GameField::PlayCount => "playcount",
            GameField::LastPlayed => "lastplayed",
            GameField::TimePlayed => "timeplayed",
            GameField::RomType => "romtype",
            GameField::Desc => "desc",
            GameField::Source => "source",
            GameField::Timestamp => "timestamp",
        }
    }

    /// Fields carried as XML attributes (`<game source=".." timestamp="..">`).
    pub fn is_attribute(&self) -> bool {
        matches!(self, GameField::Source | GameField::Timestamp)
    }
}

impl fmt::Display for GameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown field name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown game field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for GameField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        GameField::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == lower)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A typed field value after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Float(f64),
    Int(i64),
    Instant(DateTime<Utc>),
}

impl FieldValue {
    /// Render the value the way it appears inside a gamelist tag.
    pub fn to_gamelist_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Int(i) => i.to_string(),
            FieldValue::Instant(dt) => format_es_date(dt),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

// ── Field map construction ──────────────────────────────────────────────────

/// What the mapper decided for one field of one node.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome {
    /// Write this value.
    Write(FieldValue),
    /// The source has no usable value. Never means "clear the field".
    Absent,
    /// The field is on the ignore list or suppressed for the system.
    Ignored,
}

/// Accumulates per-field outcomes in order and produces a [`FieldMap`].
#[derive(Debug, Default)]
pub struct FieldMapBuilder {
    outcomes: Vec<(GameField, FieldOutcome)>,
}

impl FieldMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for `field`. A later offer for the same field
    /// replaces the earlier one.
    pub fn offer(&mut self, field: GameField, outcome: FieldOutcome) -> &mut Self {
        match self.outcomes.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = outcome,
            None => self.outcomes.push((field, outcome)),
        }
        self
    }

    /// Fields whose outcome was [`FieldOutcome::Ignored`].
    pub fn ignored(&self) -> impl Iterator<Item = GameField> + '_ {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, FieldOutcome::Ignored))
            .map(|(f, _)| *f)
    }

    pub fn build(self) -> FieldMap {
        let mut entries: Vec<(GameField, FieldValue)> = self
            .outcomes
            .into_iter()
            .filter_map(|(f, o)| match o {
                FieldOutcome::Write(v) => Some((f, v)),
                FieldOutcome::Absent | FieldOutcome::Ignored => None,
            })
            .collect();
        entries.sort_by_key(|(f, _)| *f);
        FieldMap { entries }
    }
}

/// A sparse, ordered set of fields to write.
///
/// Keys not present are left untouched by every writer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: Vec<(GameField, FieldValue)>,
}

impl FieldMap {
    pub fn get(&self, field: GameField) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, field: GameField) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GameField, &FieldValue)> {
        self.entries.iter().map(|(f, v)| (*f, v))
    }

    pub fn fields(&self) -> impl Iterator<Item = GameField> + '_ {
        self.entries.iter().map(|(f, _)| *f)
    }

    /// Field names in write order, as recorded in provenance entries.
    pub fn names(&self) -> Vec<String> {
        self.fields().map(|f| f.as_str().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(GameField, &FieldValue) -> bool) {
        self.entries.retain(|(f, v)| keep(*f, v));
    }
}

// ── Parsed source node ──────────────────────────────────────────────────────

/// One `<game>` element from a gamelist file.
///
/// Every child tag is kept, including empty and unrecognized ones, so the
/// child count reflects the source faithfully. A repeated tag keeps its
/// first value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameNode {
    fields: Vec<(String, String)>,
    attributes: Vec<(String, String)>,
}

impl GameNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, tag: &str, value: &str) -> Self {
        self.push_field(tag, value);
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.push_attribute(name, value);
        self
    }

    pub fn push_field(&mut self, tag: &str, value: &str) {
        if !self.has_field(tag) {
            self.fields.push((tag.to_string(), value.to_string()));
        }
    }

    /// Replace the value of an existing tag, or add it.
    pub fn set_field(&mut self, tag: &str, value: String) {
        match self.fields.iter_mut().find(|(t, _)| t == tag) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((tag.to_string(), value)),
        }
    }

    pub fn push_attribute(&mut self, name: &str, value: &str) {
        if self.attribute(name).is_none() {
            self.attributes.push((name.to_string(), value.to_string()));
        }
    }

    pub fn has_field(&self, tag: &str) -> bool {
        self.fields.iter().any(|(t, _)| t == tag)
    }

    /// Raw text of a child tag, empty string included.
    pub fn raw(&self, tag: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, v)| v.as_str())
    }

    /// Text of a child tag if it carries a value (non-empty).
    pub fn value(&self, tag: &str) -> Option<&str> {
        self.raw(tag).filter(|v| !v.is_empty())
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of child tags, attributes excluded.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

// ── Canonical record ────────────────────────────────────────────────────────

/// One provenance entry: which file wrote which fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub file: String,
    pub imported_fields: Vec<String>,
}

/// A canonical game record as stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameRecord {
    pub id: i64,
    pub system: String,
    pub path: String,
    /// `None` for records not scoped to a user.
    pub owner: Option<String>,
    pub name: String,
    pub image: Option<String>,
    pub rating: Option<f64>,
    pub releasedate: Option<DateTime<Utc>>,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    pub genre: Option<String>,
    pub players: Option<String>,
    pub ratio: Option<String>,
    pub region: Option<String>,
    pub playcount: Option<i64>,
    pub lastplayed: Option<DateTime<Utc>>,
    pub timeplayed: Option<i64>,
    pub romtype: Option<String>,
    pub desc: Option<String>,
    pub source: Option<String>,
    pub timestamp: Option<i64>,
    pub sources: Vec<Provenance>,
}

impl GameRecord {
    pub fn field(&self, field: GameField) -> Option<FieldValue> {
        let text = |s: &Option<String>| s.clone().map(FieldValue::Text);
        match field {
            GameField::Name => Some(FieldValue::Text(self.name.clone())),
            GameField::Image => text(&self.image),
            GameField::Rating => self.rating.map(FieldValue::Float),
            GameField::ReleaseDate => self.releasedate.map(FieldValue::Instant),
            GameField::Developer => text(&self.developer),
            GameField::Publisher => text(&self.publisher),
            GameField::Genre => text(&self.genre),
            GameField::Players => text(&self.players),
            GameField::Ratio => text(&self.ratio),
            GameField::Region => text(&self.region),
            GameField::PlayCount => self.playcount.map(FieldValue::Int),
            GameField::LastPlayed => self.lastplayed.map(FieldValue::Instant),
            GameField::TimePlayed => self.timeplayed.map(FieldValue::Int),
            GameField::RomType => text(&self.romtype),
            GameField::Desc => text(&self.desc),
            GameField::Source => text(&self.source),
            GameField::Timestamp => self.timestamp.map(FieldValue::Int),
        }
    }

    /// Whether the field holds a value. Empty text counts as unpopulated.
    pub fn is_populated(&self, field: GameField) -> bool {
        match self.field(field) {
            None => false,
            Some(FieldValue::Text(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    /// Set a field in memory. Values of the wrong type for the field are ignored.
    pub fn apply(&mut self, field: GameField, value: &FieldValue) {
        let text = value.as_text().map(str::to_string);
        match (field, value) {
            (GameField::Name, FieldValue::Text(s)) => self.name = s.clone(),
            (GameField::Image, _) if text.is_some() => self.image = text,
            (GameField::Rating, FieldValue::Float(f)) => self.rating = Some(*f),
            (GameField::ReleaseDate, FieldValue::Instant(dt)) => self.releasedate = Some(*dt),
            (GameField::Developer, _) if text.is_some() => self.developer = text,
            (GameField::Publisher, _) if text.is_some() => self.publisher = text,
            (GameField::Genre, _) if text.is_some() => self.genre = text,
            (GameField::Players, _) if text.is_some() => self.players = text,
            (GameField::Ratio, _) if text.is_some() => self.ratio = text,
            (GameField::Region, _) if text.is_some() => self.region = text,
            (GameField::PlayCount, FieldValue::Int(i)) => self.playcount = Some(*i),
            (GameField::LastPlayed, FieldValue::Instant(dt)) => self.lastplayed = Some(*dt),
            (GameField::TimePlayed, FieldValue::Int(i)) => self.timeplayed = Some(*i),
            (GameField::RomType, _) if text.is_some() => self.romtype = text,
            (GameField::Desc, _) if text.is_some() => self.desc = text,
            (GameField::Source, _) if text.is_some() => self.source = text,
            (GameField::Timestamp, FieldValue::Int(i)) => self.timestamp = Some(*i),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip() {
        for field in GameField::ALL {
            assert_eq!(field.as_str().parse::<GameField>().unwrap(), field);
        }
        assert_eq!("RELEASEDATE".parse::<GameField>().unwrap(), GameField::ReleaseDate);
        assert!("thumbnail".parse::<GameField>().is_err());
    }

    #[test]
    fn builder_keeps_only_writes_in_field_order() {
        let mut b = FieldMapBuilder::new();
        b.offer(GameField::Genre, FieldOutcome::Write(FieldValue::Text("Puzzle".into())))
            .offer(GameField::Ratio, FieldOutcome::Ignored)
            .offer(GameField::Image, FieldOutcome::Write(FieldValue::Text("a.png".into())))
            .offer(GameField::Rating, FieldOutcome::Absent);
        assert_eq!(b.ignored().collect::<Vec<_>>(), vec![GameField::Ratio]);

        let map = b.build();
        assert_eq!(map.names(), vec!["image", "genre"]);
        assert!(!map.contains(GameField::Rating));
    }

    #[test]
    fn node_counts_children_not_attributes() {
        let node = GameNode::new()
            .with_attribute("source", "Recalbox")
            .with_field("name", "BIOS")
            .with_field("path", "./bios.bin")
            .with_field("image", "");
        assert_eq!(node.field_count(), 3);
        assert_eq!(node.raw("image"), Some(""));
        assert_eq!(node.value("image"), None);
    }

    #[test]
    fn empty_text_is_unpopulated() {
        let record = GameRecord {
            developer: Some(String::new()),
            publisher: Some("Sega".into()),
            ..Default::default()
        };
        assert!(!record.is_populated(GameField::Developer));
        assert!(record.is_populated(GameField::Publisher));
        assert!(!record.is_populated(GameField::Rating));
    }
}
