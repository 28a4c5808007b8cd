use reverie_shared::config::{self, ConfigStore};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
struct Window {
    width: u32,
    height: u32,
    title: String,
}

impl Default for Window {
    fn default() -> Self {
        Self { width: 1280, height: 720, title: "reverie".into() }
    }
}

#[test]
fn reads_section() {
    let store = ConfigStore::parse(
        r#"
[window]
width = 1920
height = 1080
"#,
    );
    let w: Window = store.get("window");
    assert_eq!(w.width, 1920);
    assert_eq!(w.height, 1080);
    assert_eq!(w.title, "reverie");
}

#[test]
fn missing_section_uses_default() {
    let store = ConfigStore::parse("");
    let w: Window = store.get("window");
    assert_eq!(w, Window::default());
    assert!(!store.contains("window"));
}

#[test]
fn mismatched_section_uses_default() {
    let store = ConfigStore::parse("window = 3\n");
    let w: Window = store.get("window");
    assert_eq!(w, Window::default());
}

#[test]
fn syntax_error_yields_empty_store() {
    let store = ConfigStore::parse("[window\nwidth = ");
    assert!(!store.contains("window"));
}

#[test]
fn set_overrides_section() {
    let store = ConfigStore::parse("[window]\nwidth = 640\n");
    let mut table = toml::Table::new();
    table.insert("width".into(), toml::Value::Integer(800));
    store.set("window", toml::Value::Table(table));
    let w: Window = store.get("window");
    assert_eq!(w.width, 800);
}

#[test]
fn global_store_installs_once() {
    assert!(config::install(ConfigStore::parse("[window]\ntitle = \"demo\"\n")).is_ok());
    assert!(config::is_initialized());
    let w: Window = config::get("window");
    assert_eq!(w.title, "demo");
    assert!(config::install(ConfigStore::default()).is_err());
}
