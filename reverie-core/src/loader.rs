use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use anyhow::{Context, Result};
use log::info;
use rustc_hash::FxHashMap;
use walkdir::WalkDir;

use crate::character::CharacterRoster;
use crate::document::DialogueDocument;

pub const DOCUMENT_EXTENSION: &str = "json";

pub fn parse_document(source: &str) -> Result<DialogueDocument> {
    let document: DialogueDocument = serde_json::from_str(source)
        .context("Malformed dialogue document")?;
    Ok(document)
}

pub fn load_document(path: impl AsRef<Path>) -> Result<DialogueDocument> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open dialogue document: {:?}", path))?;
    let document: DialogueDocument = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Malformed dialogue document: {:?}", path))?;

    log::debug!(
        "Loaded '{}' from {:?}: {} scenes, {} lines",
        document.title,
        path,
        document.scenes.len(),
        document.total_line_count()
    );
    Ok(document)
}

pub fn parse_roster(source: &str) -> Result<CharacterRoster> {
    let roster: CharacterRoster = serde_json::from_str(source)
        .context("Malformed character roster")?;
    check_roster(&roster)?;
    Ok(roster)
}

pub fn load_roster(path: impl AsRef<Path>) -> Result<CharacterRoster> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open character roster: {:?}", path))?;
    let roster: CharacterRoster = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Malformed character roster: {:?}", path))?;
    check_roster(&roster).with_context(|| format!("Invalid character roster: {:?}", path))?;

    log::debug!("Loaded {} characters from {:?}", roster.len(), path);
    Ok(roster)
}

// speakers are matched by name, so a name may appear only once
fn check_roster(roster: &CharacterRoster) -> Result<()> {
    for (i, character) in roster.characters.iter().enumerate() {
        if roster.characters[..i].iter().any(|c| c.name == character.name) {
            anyhow::bail!("Character '{}' is defined more than once", character.name);
        }
    }
    Ok(())
}

/// Every document under a directory, keyed by title.
#[derive(Debug, Default)]
pub struct DocumentLibrary {
    documents: FxHashMap<String, Arc<DialogueDocument>>,
    sources: FxHashMap<String, PathBuf>,
}

impl DocumentLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks `root` for `*.json` documents. Two files sharing a title are
    /// an error, since titles are how hosts pick a document. Untitled files
    /// (a roster kept next to the documents, say) are skipped.
    pub fn load_dir(root_dir: impl AsRef<Path>) -> Result<Self> {
        let root = root_dir.as_ref();
        info!("Scanning dialogue documents at: {:?}", root);

        let mut library = Self::new();
        for entry in WalkDir::new(root).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|e| e == DOCUMENT_EXTENSION) {
                let document = load_document(path)?;
                if document.title.is_empty() {
                    log::warn!("Skipping {:?}: document has no title", path);
                    continue;
                }
                library.insert(document, path.to_path_buf())?;
            }
        }

        info!("Library loaded. Documents: {}", library.len());
        Ok(library)
    }

    pub fn insert(&mut self, document: DialogueDocument, source: PathBuf) -> Result<()> {
        if let Some(existing) = self.sources.get(&document.title) {
            anyhow::bail!(
                "Document title collision detected!\n  '{}' is defined in:\n    1. {:?}\n    2. {:?}",
                document.title, existing, source
            );
        }
        self.sources.insert(document.title.clone(), source);
        self.documents.insert(document.title.clone(), Arc::new(document));
        Ok(())
    }

    pub fn get(&self, title: &str) -> Option<Arc<DialogueDocument>> {
        self.documents.get(title).cloned()
    }

    /// File the document titled `title` was read from.
    pub fn source(&self, title: &str) -> Option<&Path> {
        self.sources.get(title).map(PathBuf::as_path)
    }

    pub fn titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = self.documents.keys().map(String::as_str).collect();
        titles.sort_unstable();
        titles
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
