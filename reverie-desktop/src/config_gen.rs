use std::fs;
use std::path::Path;
use serde::Serialize;
use reverie_core::config::{PlaybackConfig, SystemConfig};
use reverie_core::input::InputBindings;

#[derive(Serialize)]
struct FullConfig {
    system: SystemConfig,
    playback: PlaybackConfig,
    input: InputBindings,
}

pub fn ensure_config_exists(path: &str) {
    if Path::new(path).exists() {
        return;
    }

    println!("Creating default configuration at '{}'...", path);

    let default_config = FullConfig {
        system: SystemConfig::default(),
        playback: PlaybackConfig::default(),
        input: InputBindings::default(),
    };

    let toml_str = match toml::to_string_pretty(&default_config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to serialize default config: {}", e);
            return;
        }
    };

    if let Err(e) = fs::write(path, toml_str) {
        eprintln!("Failed to write config file: {}", e);
    } else {
        println!("Config file created successfully.");
    }
}
