use std::io::BufRead;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use gamelist_core::GameNode;

use crate::error::XmlError;

/// Parse a gamelist document into its `<game>` entries.
///
/// The root element must be `<gameList>`. A root with no games yields an
/// empty list. Child text is unescaped and trimmed; CDATA is kept verbatim.
pub fn parse_gamelist<R: BufRead>(reader: R) -> Result<Vec<GameNode>, XmlError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut games = Vec::new();
    let mut depth = 0usize;
    let mut saw_root = false;
    let mut current: Option<GameNode> = None;
    // Child tag being read inside the current <game>, with its text so far.
    let mut field: Option<(String, String)> = None;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                depth += 1;
                let tag = tag_name(e);
                match depth {
                    1 => {
                        check_root(&tag)?;
                        saw_root = true;
                    }
                    2 if tag == "game" => current = Some(node_from_start(e)?),
                    3 if current.is_some() => field = Some((tag, String::new())),
                    _ => {}
                }
            }
            Event::Empty(ref e) => {
                let tag = tag_name(e);
                match depth + 1 {
                    1 => {
                        check_root(&tag)?;
                        saw_root = true;
                    }
                    2 if tag == "game" => games.push(node_from_start(e)?),
                    3 => {
                        if let Some(ref mut node) = current {
                            node.push_field(&tag, "");
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(ref e) => {
                if let Some((_, ref mut text)) = field {
                    text.push_str(&e.unescape()?);
                }
            }
            Event::CData(ref e) => {
                if let Some((_, ref mut text)) = field {
                    text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Event::End(_) => {
                match depth {
                    3 => {
                        if let (Some(node), Some((tag, text))) = (current.as_mut(), field.take()) {
                            node.push_field(&tag, text.trim());
                        }
                    }
                    2 => {
                        if let Some(node) = current.take() {
                            games.push(node);
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(XmlError::invalid_gamelist("no <gameList> root element"));
    }

    Ok(games)
}

/// Parse a gamelist from a file path.
pub fn parse_gamelist_file(path: &Path) -> Result<Vec<GameNode>, XmlError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    parse_gamelist(reader)
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

fn check_root(tag: &str) -> Result<(), XmlError> {
    if tag == "gameList" {
        Ok(())
    } else {
        Err(XmlError::invalid_gamelist(format!(
            "expected <gameList> root, found <{tag}>"
        )))
    }
}

fn node_from_start(e: &BytesStart<'_>) -> Result<GameNode, XmlError> {
    let mut node = GameNode::new();
    for attr in e.attributes() {
        let attr = attr?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr.unescape_value()?;
        node.push_attribute(&name, &value);
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<gameList>
    <game source="ScreenScraper.fr" timestamp="1712345678">
        <path>./Sonic the Hedgehog (USA, Europe).md</path>
        <name>Sonic the Hedgehog</name>
        <desc>Tom &amp; Jerry race through &lt;Green Hill&gt;.</desc>
        <releasedate>19910623T000000</releasedate>
        <thumbnail/>
    </game>
    <game>
        <path>./Columns (World).md</path>
        <name><![CDATA[Columns & Co]]></name>
    </game>
</gameList>"#;

    #[test]
    fn parses_games_with_attributes() {
        let games = parse_gamelist(SAMPLE.as_bytes()).unwrap();
        assert_eq!(games.len(), 2);

        let sonic = &games[0];
        assert_eq!(sonic.attribute("source"), Some("ScreenScraper.fr"));
        assert_eq!(sonic.attribute("timestamp"), Some("1712345678"));
        assert_eq!(sonic.value("name"), Some("Sonic the Hedgehog"));
        assert_eq!(sonic.value("desc"), Some("Tom & Jerry race through <Green Hill>."));
        assert_eq!(sonic.field_count(), 5);
        assert_eq!(sonic.raw("thumbnail"), Some(""));
    }

    #[test]
    fn cdata_is_kept() {
        let games = parse_gamelist(SAMPLE.as_bytes()).unwrap();
        assert_eq!(games[1].value("name"), Some("Columns & Co"));
    }

    #[test]
    fn empty_gamelist_is_empty() {
        let games = parse_gamelist(r#"<?xml version="1.0"?><gameList></gameList>"#.as_bytes()).unwrap();
        assert!(games.is_empty());
        let games = parse_gamelist("<gameList/>".as_bytes()).unwrap();
        assert!(games.is_empty());
    }

    #[test]
    fn single_game_is_a_list_of_one() {
        let xml = "<gameList><game><path>./a.bin</path><name>A</name></game></gameList>";
        assert_eq!(parse_gamelist(xml.as_bytes()).unwrap().len(), 1);
    }

    #[test]
    fn wrong_root_is_invalid() {
        let xml = r#"<?xml version="1.0"?><datafile><game name="x"/></datafile>"#;
        assert!(matches!(
            parse_gamelist(xml.as_bytes()),
            Err(XmlError::InvalidGamelist(_))
        ));
    }

    #[test]
    fn empty_document_is_invalid() {
        assert!(matches!(
            parse_gamelist("".as_bytes()),
            Err(XmlError::InvalidGamelist(_))
        ));
    }

    #[test]
    fn mismatched_tags_are_parse_errors() {
        let xml = "<gameList><game><name>A</path></game></gameList>";
        assert!(matches!(
            parse_gamelist(xml.as_bytes()),
            Err(XmlError::XmlParse(_))
        ));
    }
}
