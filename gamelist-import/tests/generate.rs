use gamelist_import::*;
use gamelist_xml::parse_gamelist_file;

#[test]
fn generate_matches_images_and_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let initial = dir.path().join("initial.xml");
    std::fs::write(
        &initial,
        r#"<?xml version="1.0"?>
<gameList>
  <game>
    <path>./Pitfall! (USA).a26</path>
    <name>Pitfall! (USA)</name>
    <developer>Activision</developer>
  </game>
  <game>
    <path>./Adventure (USA).a26</path>
  </game>
  <game>
    <name>Yars' Revenge</name>
  </game>
</gameList>
"#,
    )
    .unwrap();

    let images = dir.path().join("downloaded_images");
    std::fs::create_dir(&images).unwrap();
    for file in ["Pitfall.PNG", "Adventure (1980).jpg", "notes.txt", "River Raid.png"] {
        std::fs::write(images.join(file), b"").unwrap();
    }

    let output = dir.path().join("complete.xml");
    let stats = generate_complete(&initial, &images, &output).unwrap();
    assert_eq!(stats, GenerateStats { games: 3, images_matched: 2 });

    let games = parse_gamelist_file(&output).unwrap();
    assert_eq!(games[0].value("name"), Some("Pitfall! (USA)"));
    assert_eq!(games[0].value("image"), Some("./downloaded_images/Pitfall.PNG"));
    assert_eq!(games[0].value("developer"), Some("Activision"));
    assert_eq!(games[0].value("publisher"), Some("Unknown"));
    assert_eq!(games[0].value("releasedate"), Some("19700101T000000"));

    assert_eq!(games[1].value("name"), Some("Adventure (USA)"));
    assert_eq!(
        games[1].value("image"),
        Some("./downloaded_images/Adventure (1980).jpg")
    );

    assert_eq!(games[2].value("path"), Some("./roms/Yars' Revenge.bin"));
    assert_eq!(games[2].value("image"), None);
    assert_eq!(games[2].value("genre"), Some("Unknown"));
}

#[test]
fn missing_image_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let initial = dir.path().join("initial.xml");
    std::fs::write(&initial, "<gameList></gameList>").unwrap();

    let result = generate_complete(&initial, &dir.path().join("nope"), &dir.path().join("o.xml"));
    assert!(matches!(result, Err(ImportError::Io(_))));
}
