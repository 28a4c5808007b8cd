use std::fs;
use reverie_core::document::{ImageRef, PortraitAnimation, PortraitSlot, MAX_TYPING_INTERVAL};
use reverie_core::loader::{load_document, parse_document, DocumentLibrary};

const PROLOGUE: &str = r#"{
  "title": "Prologue",
  "allow_skip": false,
  "scenes": [
    {
      "name": "Gate",
      "lines": [
        {
          "speaker_name": "Guard",
          "text": "Halt!",
          "portrait": "guard_angry",
          "portrait_slot": "Right",
          "portrait_animation": "Shake",
          "typing_interval": 3.5,
          "auto_advance": true,
          "auto_advance_delay": -1.0
        },
        { "speaker_name": "Hero", "text": "..." }
      ]
    }
  ]
}"#;

#[test]
fn parses_with_defaults_and_clamping() {
    let doc = parse_document(PROLOGUE).unwrap();
    assert_eq!(doc.title, "Prologue");
    assert!(!doc.allow_skip);
    assert!(doc.allow_fast_forward);
    assert_eq!(doc.total_line_count(), 2);

    let guard = &doc.scenes[0].lines[0];
    assert_eq!(guard.portrait, Some(ImageRef::new("guard_angry")));
    assert_eq!(guard.portrait_slot, PortraitSlot::Right);
    assert_eq!(guard.portrait_animation, PortraitAnimation::Shake);
    assert_eq!(guard.typing_interval, MAX_TYPING_INTERVAL);
    assert_eq!(guard.auto_advance_delay, 0.0);

    let hero = &doc.scenes[0].lines[1];
    assert_eq!(hero.typing_interval, 0.05);
    assert_eq!(hero.portrait, None);
    assert_eq!(hero.portrait_slot, PortraitSlot::Left);
}

#[test]
fn malformed_document_is_an_error() {
    assert!(parse_document("{ \"scenes\": 4 }").is_err());
    assert!(parse_document("not json").is_err());
}

#[test]
fn loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prologue.json");
    fs::write(&path, PROLOGUE).unwrap();

    let doc = load_document(&path).unwrap();
    assert_eq!(doc.scenes[0].name, "Gate");

    let err = load_document(dir.path().join("missing.json")).unwrap_err();
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn library_indexes_directory_by_title() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("prologue.json"), PROLOGUE).unwrap();
    fs::create_dir(dir.path().join("chapter1")).unwrap();
    fs::write(
        dir.path().join("chapter1").join("market.json"),
        r#"{ "title": "Market", "scenes": [ { "lines": [ { "text": "Fresh fish!" } ] } ] }"#,
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let library = DocumentLibrary::load_dir(dir.path()).unwrap();
    assert_eq!(library.len(), 2);
    assert_eq!(library.titles(), vec!["Market", "Prologue"]);
    assert_eq!(library.get("Market").map(|d| d.total_line_count()), Some(1));
    assert!(library.source("Prologue").is_some_and(|p| p.ends_with("prologue.json")));
    assert!(library.get("Epilogue").is_none());
}

#[test]
fn library_rejects_duplicate_titles() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.json"), PROLOGUE).unwrap();
    fs::write(dir.path().join("b.json"), PROLOGUE).unwrap();

    let err = DocumentLibrary::load_dir(dir.path()).unwrap_err();
    assert!(err.to_string().contains("collision"));
}

#[test]
fn document_typing_speed_only_seeds_new_lines() {
    let doc = parse_document(
        r#"{ "title": "Slow", "default_typing_speed": 0.15, "scenes": [ { "lines": [ { "text": "abc" } ] } ] }"#,
    )
    .unwrap();
    assert_eq!(doc.default_typing_speed, 0.15);
    assert_eq!(doc.scenes[0].lines[0].typing_interval, 0.05);
    assert_eq!(doc.new_line("A", "added").typing_interval, 0.15);
}

#[test]
fn library_skips_untitled_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("prologue.json"), PROLOGUE).unwrap();
    fs::write(dir.path().join("characters.json"), r#"{ "characters": [ { "name": "Guard" } ] }"#).unwrap();

    let library = DocumentLibrary::load_dir(dir.path()).unwrap();
    assert_eq!(library.titles(), vec!["Prologue"]);
}
