use std::sync::RwLock;
use std::path::Path;
use std::fs;
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use toml::Table;

static GLOBAL_CONFIG: OnceCell<ConfigStore> = OnceCell::new();

/// Section-addressable view over a parsed `config.toml`.
#[derive(Debug, Default)]
pub struct ConfigStore {
    table: RwLock<Table>,
}

impl ConfigStore {
    pub fn from_table(table: Table) -> Self {
        Self { table: RwLock::new(table) }
    }

    /// Parses TOML text. Syntax errors are logged and yield an empty store,
    /// so every section falls back to its defaults.
    pub fn parse(content: &str) -> Self {
        let table: Table = toml::from_str(content).unwrap_or_else(|e| {
            log::error!("Config syntax error: {}, using empty config.", e);
            Table::new()
        });
        Self::from_table(table)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();

        let content = if path.exists() {
            log::info!("Loading config from {:?}", path);
            fs::read_to_string(path)?
        } else {
            log::warn!("Config file not found at {:?}, using defaults.", path);
            String::new()
        };

        Ok(Self::parse(&content))
    }

    pub fn get<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let read_guard = match self.table.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(value) = read_guard.get(key) {
            value.clone().try_into().unwrap_or_else(|e| {
                log::warn!("Config section '[{}]' mismatch: {}. Using default.", key, e);
                T::default()
            })
        } else {
            T::default()
        }
    }

    /// Overwrites one section, e.g. from a command line override.
    pub fn set(&self, key: &str, value: toml::Value) {
        let mut write_guard = match self.table.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        write_guard.insert(key.to_string(), value);
    }

    pub fn contains(&self, key: &str) -> bool {
        match self.table.read() {
            Ok(guard) => guard.contains_key(key),
            Err(poisoned) => poisoned.into_inner().contains_key(key),
        }
    }
}

pub fn init<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    let store = ConfigStore::load(path)?;
    install(store)
}

pub fn install(store: ConfigStore) -> anyhow::Result<()> {
    GLOBAL_CONFIG.set(store)
        .map_err(|_| anyhow::anyhow!("Config already initialized"))?;
    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL_CONFIG.get().is_some()
}

/// Reads a section from the global store. Before `init` every section
/// resolves to its default.
pub fn get<T: DeserializeOwned + Default>(key: &str) -> T {
    match GLOBAL_CONFIG.get() {
        Some(store) => store.get(key),
        None => {
            log::warn!("reverie-shared config not initialized, section '[{}]' uses defaults.", key);
            T::default()
        }
    }
}
