//! Export canonical records back to gamelist XML.

use std::path::Path;

use gamelist_core::{GameField, GameNode, GameRecord};
use gamelist_db::{RecordScope, records_without_sources};
use gamelist_xml::write_gamelist_file;
use rusqlite::Connection;

use crate::error::ExportError;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportStats {
    pub count: usize,
}

/// Write every record in `scope` to `output`, in insertion order.
///
/// Fails with [`ExportError::NotFound`] when the scope holds no records.
pub fn export_catalog(
    conn: &Connection,
    scope: &RecordScope,
    output: &Path,
) -> Result<ExportStats, ExportError> {
    let records = records_without_sources(conn, scope)?;
    if records.is_empty() {
        return Err(ExportError::NotFound {
            system: scope.system.clone(),
        });
    }

    let nodes: Vec<GameNode> = records.iter().map(record_to_node).collect();
    write_gamelist_file(output, &nodes)?;
    log::debug!(
        "Exported {} games to {}",
        nodes.len(),
        output.display()
    );

    Ok(ExportStats { count: nodes.len() })
}

/// The `<game>` element for one record. Absent fields produce no tag and
/// dates are re-encoded as `YYYYMMDDTHHMMSS`.
pub fn record_to_node(record: &GameRecord) -> GameNode {
    let mut node = GameNode::new();
    for field in [GameField::Source, GameField::Timestamp] {
        if let Some(value) = record.field(field) {
            node.push_attribute(field.as_str(), &value.to_gamelist_text());
        }
    }

    let path = if record.path.is_empty() { "./" } else { &record.path };
    node.push_field("path", path);
    node.push_field("name", &record.name);

    for field in GameField::ALL {
        if field == GameField::Name || field.is_attribute() {
            continue;
        }
        if let Some(value) = record.field(field) {
            let text = value.to_gamelist_text();
            if !text.is_empty() {
                node.push_field(field.as_str(), &text);
            }
        }
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamelist_core::parse_es_date;

    #[test]
    fn record_becomes_node_in_field_order() {
        let record = GameRecord {
            system: "nes".into(),
            path: "./zelda.nes".into(),
            name: "The Legend of Zelda".into(),
            genre: Some("Adventure".into()),
            developer: Some(String::new()),
            releasedate: parse_es_date("19860221T000000"),
            playcount: Some(0),
            source: Some("ScreenScraper".into()),
            timestamp: Some(1700000000),
            ..Default::default()
        };
        let node = record_to_node(&record);

        let tags: Vec<&str> = node.fields().map(|(t, _)| t).collect();
        assert_eq!(tags, vec!["path", "name", "releasedate", "genre", "playcount"]);
        assert_eq!(node.value("releasedate"), Some("19860221T000000"));
        assert_eq!(node.value("playcount"), Some("0"));
        assert_eq!(node.attribute("source"), Some("ScreenScraper"));
        assert_eq!(node.attribute("timestamp"), Some("1700000000"));
    }

    #[test]
    fn empty_path_falls_back_to_root() {
        let record = GameRecord {
            name: "Orphan".into(),
            ..Default::default()
        };
        let node = record_to_node(&record);
        assert_eq!(node.value("path"), Some("./"));
        assert_eq!(node.attributes().count(), 0);
    }
}
