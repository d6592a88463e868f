use std::fs;
use std::io::Write;
use std::path::Path;

use gamelist_core::GameNode;

use crate::error::XmlError;

/// Write `games` as a gamelist document.
///
/// Attributes and child tags with empty values are omitted, so the output
/// never contains empty tags.
pub fn write_gamelist<W: Write>(mut out: W, games: &[GameNode]) -> Result<(), XmlError> {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\"?>\n");
    xml.push_str("<gameList>\n");

    for game in games {
        xml.push_str("  <game");
        for (name, value) in game.attributes() {
            if value.is_empty() {
                continue;
            }
            xml.push(' ');
            xml.push_str(name);
            xml.push_str("=\"");
            xml.push_str(&escape_xml(value));
            xml.push('"');
        }
        xml.push_str(">\n");

        for (tag, value) in game.fields() {
            if !value.is_empty() {
                write_tag(&mut xml, tag, value);
            }
        }

        xml.push_str("  </game>\n");
    }

    xml.push_str("</gameList>\n");
    out.write_all(xml.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Write a gamelist file, creating its parent directory if needed.
pub fn write_gamelist_file(path: &Path, games: &[GameNode]) -> Result<(), XmlError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    write_gamelist(std::io::BufWriter::new(file), games)
}

fn write_tag(xml: &mut String, tag: &str, value: &str) {
    xml.push_str("    <");
    xml.push_str(tag);
    xml.push('>');
    xml.push_str(&escape_xml(value));
    xml.push_str("</");
    xml.push_str(tag);
    xml.push_str(">\n");
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
