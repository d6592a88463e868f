use std::path::{Path, PathBuf};

use gamelist_db::{RecordScope, open_memory};
use gamelist_import::*;
use gamelist_xml::parse_gamelist_file;

fn write_xml(dir: &Path, name: &str, games: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(
        &path,
        format!("<?xml version=\"1.0\"?>\n<gameList>\n{games}</gameList>\n"),
    )
    .unwrap();
    path
}

const SOURCE: &str = r#"
  <game source="ScreenScraper.fr" timestamp="1712345678">
    <path>./Phantasy Star IV (USA).md</path>
    <name>Phantasy Star IV: The End of the Millennium</name>
    <image>./media/ps4.png</image>
    <rating>0.95</rating>
    <releasedate>20230101T000000</releasedate>
    <developer>Sega</developer>
    <publisher>Sega &amp; Friends</publisher>
    <genre>RPG</genre>
    <players>1</players>
    <playcount>12</playcount>
    <lastplayed>20240315T213045</lastplayed>
    <timeplayed>3600</timeplayed>
    <desc>Alys &lt;and&gt; Chaz.</desc>
  </game>
  <game>
    <path>./Columns (World).md</path>
    <name>Columns</name>
    <developer></developer>
  </game>
"#;

#[test]
fn export_round_trips_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_xml(dir.path(), "gamelist.xml", SOURCE);
    let conn = open_memory().unwrap();
    import_catalog(&conn, &ImportRequest::new("megadrive", &input), None).unwrap();

    let output = dir.path().join("out").join("gamelist.xml");
    let stats = export_catalog(&conn, &RecordScope::new("megadrive", None), &output).unwrap();
    assert_eq!(stats.count, 2);

    let original = parse_gamelist_file(&input).unwrap();
    let exported = parse_gamelist_file(&output).unwrap();
    assert_eq!(exported.len(), original.len());

    for (before, after) in original.iter().zip(&exported) {
        for (tag, value) in before.fields() {
            if !value.is_empty() {
                assert_eq!(after.value(tag), Some(value), "tag <{tag}>");
            }
        }
        for (name, value) in before.attributes() {
            assert_eq!(after.attribute(name), Some(value), "attribute {name}");
        }
    }

    // No empty tags are written.
    assert!(!exported[1].has_field("developer"));
    assert_eq!(exported[0].value("releasedate"), Some("20230101T000000"));
}

#[test]
fn export_of_empty_scope_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_memory().unwrap();
    let output = dir.path().join("gamelist.xml");

    let result = export_catalog(&conn, &RecordScope::new("vectrex", None), &output);
    assert!(matches!(result, Err(ExportError::NotFound { system }) if system == "vectrex"));
    assert!(!output.exists());
}

#[test]
fn export_after_merge_includes_filled_fields() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_xml(
        dir.path(),
        "initial.xml",
        "<game><path>./rtype.pce</path><name>R-Type (Japan)</name></game>",
    );
    let complete = write_xml(
        dir.path(),
        "complete.xml",
        "<game><path>./r.pce</path><name>R-Type</name><developer>Irem</developer>\
         <releasedate>19880325T000000</releasedate></game>",
    );
    let conn = open_memory().unwrap();
    import_catalog(&conn, &ImportRequest::new("pcengine", &input), None).unwrap();
    merge_catalog(&conn, &MergeRequest::new("pcengine", &complete), None).unwrap();

    let output = dir.path().join("export.xml");
    export_catalog(&conn, &RecordScope::new("pcengine", None), &output).unwrap();
    let exported = parse_gamelist_file(&output).unwrap();

    assert_eq!(exported[0].value("path"), Some("./rtype.pce"));
    assert_eq!(exported[0].value("name"), Some("R-Type (Japan)"));
    assert_eq!(exported[0].value("developer"), Some("Irem"));
    assert_eq!(exported[0].value("releasedate"), Some("19880325T000000"));
}
