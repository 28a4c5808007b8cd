use std::fs;
use reverie_core::character::DEFAULT_NAME_COLOR;
use reverie_core::document::{AudioRef, ImageRef};
use reverie_core::loader::{load_roster, parse_roster};
use reverie_core::{CharacterProfile, CharacterRoster, DialogueDocument, Expression, Line, Scene};

const ROSTER: &str = r##"{
  "characters": [
    {
      "name": "Mira",
      "description": "Lighthouse keeper's niece.",
      "name_color": "#FFCC00",
      "default_portrait": "mira_calm",
      "expressions": [
        { "name": "worried", "image": "mira_worried" },
        { "name": "blank" }
      ],
      "default_voice": "mira_voice",
      "default_typing_sound": "keys_soft"
    },
    { "name": "Tomas" }
  ]
}"##;

fn mira() -> CharacterProfile {
    CharacterProfile::new("Mira")
        .with_default_portrait(ImageRef::new("mira_calm"))
        .with_expression(Expression::new("worried", ImageRef::new("mira_worried")))
}

#[test]
fn expression_lookup_falls_back_to_default_portrait() {
    let mira = mira();
    assert_eq!(mira.expression("worried"), Some(&ImageRef::new("mira_worried")));
    assert_eq!(mira.expression(""), Some(&ImageRef::new("mira_calm")));
    assert_eq!(mira.expression("laughing"), Some(&ImageRef::new("mira_calm")));

    let faceless = CharacterProfile::new("Voice");
    assert_eq!(faceless.expression("worried"), None);
}

#[test]
fn parses_roster_with_defaults() {
    let roster = parse_roster(ROSTER).unwrap();
    assert_eq!(roster.len(), 2);

    let mira = roster.get("Mira").unwrap();
    assert_eq!(mira.name_rgb(), Some((0xFF, 0xCC, 0x00)));
    assert_eq!(mira.default_voice, Some(AudioRef::new("mira_voice")));
    // an expression stored without an image uses the default portrait
    assert_eq!(mira.expression("blank"), Some(&ImageRef::new("mira_calm")));

    let tomas = roster.get("Tomas").unwrap();
    assert_eq!(tomas.name_color, DEFAULT_NAME_COLOR);
    assert_eq!(tomas.name_rgb(), Some((0xFF, 0xFF, 0xFF)));
    assert!(tomas.expressions.is_empty());
    assert!(roster.get("Keeper").is_none());
}

#[test]
fn malformed_name_color_has_no_rgb() {
    for color in ["white", "#FFF", "#GG0000", "FFCC00", "#ÿÿÿ"] {
        assert_eq!(CharacterProfile::new("X").with_name_color(color).name_rgb(), None, "{color}");
    }
}

#[test]
fn duplicate_character_names_are_rejected() {
    let err = parse_roster(r#"{ "characters": [ { "name": "Mira" }, { "name": "Mira" } ] }"#).unwrap_err();
    assert!(err.to_string().contains("Mira"));
}

#[test]
fn loads_roster_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("characters.json");
    fs::write(&path, ROSTER).unwrap();
    assert_eq!(load_roster(&path).unwrap().len(), 2);

    let err = load_roster(dir.path().join("nobody.json")).unwrap_err();
    assert!(err.to_string().contains("nobody.json"));
}

#[test]
fn roster_fills_missing_typing_sounds() {
    let roster = CharacterRoster::new()
        .with_character(mira().with_typing_sound(AudioRef::new("keys_soft")))
        .with_character(CharacterProfile::new("Tomas"));
    let mut doc = DialogueDocument::new("walk").with_scene(
        Scene::new("shore")
            .with_line(Line::new("Mira", "one"))
            .with_line(Line::new("Mira", "two").with_typing_sound(AudioRef::new("keys_loud")))
            .with_line(Line::new("Tomas", "three"))
            .with_line(Line::new("Stranger", "four")),
    );

    assert_eq!(roster.apply_defaults(&mut doc), 1);
    let sounds: Vec<_> = doc.scenes[0].lines.iter().map(|l| l.typing_sound.clone()).collect();
    assert_eq!(
        sounds,
        vec![
            Some(AudioRef::new("keys_soft")),
            Some(AudioRef::new("keys_loud")),
            None,
            None,
        ]
    );
}
