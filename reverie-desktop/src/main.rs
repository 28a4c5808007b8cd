mod setup;
mod config_gen;
mod host;
mod terminal;

use std::env;
use std::path::Path;
use std::sync::Arc;
use reverie_core::config::{PlaybackConfig, SystemConfig};
use reverie_core::input::InputBindings;
use reverie_core::loader::{self, DocumentLibrary};
use reverie_core::{CharacterRoster, DialogueDocument};

fn main() {
    let args: Vec<String> = env::args().collect();

    setup::init();
    log::info!(">>> Reverie Desktop Launcher Started <<<");

    let sys_cfg = SystemConfig::from_global();
    let document_path = args.get(1).cloned().unwrap_or_else(|| sys_cfg.document_path.clone());
    let title = args.get(2).map(String::as_str);

    log::info!("Loading dialogue from: {}", document_path);
    let mut document = match open_document(&document_path, title) {
        Ok(doc) => doc,
        Err(e) => {
            log::error!("{:#}", e);
            std::process::exit(1);
        }
    };

    let roster = open_roster(&sys_cfg.roster_path);
    roster.apply_defaults(&mut document);

    let playback = PlaybackConfig::from_global();
    if let Err(e) = host::run(Arc::new(document), roster, playback, InputBindings::from_global()) {
        log::error!("Playback failed: {:#}", e);
        std::process::exit(1);
    }
}

/// A missing roster is fine; a broken one is reported and ignored.
fn open_roster(path: &str) -> CharacterRoster {
    if !Path::new(path).exists() {
        log::debug!("No character roster at {}", path);
        return CharacterRoster::default();
    }
    match loader::load_roster(path) {
        Ok(roster) => roster,
        Err(e) => {
            log::warn!("{:#}", e);
            CharacterRoster::default()
        }
    }
}

/// A file is loaded directly; a directory is scanned and `title` (or the
/// first title alphabetically) picked from it.
fn open_document(path: &str, title: Option<&str>) -> anyhow::Result<DialogueDocument> {
    if !Path::new(path).is_dir() {
        return loader::load_document(path);
    }

    let library = DocumentLibrary::load_dir(path)?;
    let chosen = match title {
        Some(t) => t.to_string(),
        None => library
            .titles()
            .first()
            .map(|t| t.to_string())
            .ok_or_else(|| anyhow::anyhow!("No dialogue documents under {}", path))?,
    };
    let document = library
        .get(&chosen)
        .ok_or_else(|| anyhow::anyhow!("No document titled '{}' under {}", chosen, path))?;
    if let Some(source) = library.source(&chosen) {
        log::info!("Playing '{}' from {:?}", chosen, source);
    }
    Ok(Arc::unwrap_or_clone(document))
}
