//! Persistence of the user's [`ThemeConfig`] as a single JSON blob under a fixed key.
//!
//! Loading merges whatever was stored over the defaults field by field, so older
//! blobs with missing fields keep working. Missing or corrupt data falls back to
//! the defaults without failing.

use log::{debug, warn};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::errors::Result;
use crate::models::ThemeConfig;

/// The key the configuration blob is stored under.
pub const CONFIG_KEY: &str = "loggen.config";

/// A string key-value store, like a browser's local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Keeps values in memory. Used by tests and by hosts without persistent storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Loads and saves the configuration through a [`KeyValueStore`].
pub struct ConfigStore<S> {
    store: S,
}

impl<S: KeyValueStore> ConfigStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The stored configuration merged over the defaults.
    pub fn load(&self) -> ThemeConfig {
        let raw = match self.store.get(CONFIG_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored configuration; using defaults");
                return ThemeConfig::default();
            }
            Err(e) => {
                warn!("Could not read stored configuration: {}", e);
                return ThemeConfig::default();
            }
        };
        merge_over_defaults(&raw).unwrap_or_else(|e| {
            warn!("Stored configuration is unusable ({}); using defaults", e);
            ThemeConfig::default()
        })
    }

    pub fn save(&mut self, config: &ThemeConfig) -> Result<()> {
        let raw = serde_json::to_string(config)?;
        self.store.set(CONFIG_KEY, &raw)
    }

    /// Forgets the stored configuration.
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(CONFIG_KEY)
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

/// Overlays the top-level fields of the stored object onto the serialized defaults.
fn merge_over_defaults(raw: &str) -> Result<ThemeConfig> {
    let stored: Value = serde_json::from_str(raw)?;
    let mut merged = serde_json::to_value(ThemeConfig::default())?;
    if let (Value::Object(target), Value::Object(source)) = (&mut merged, stored) {
        for (key, value) in source {
            if !value.is_null() {
                target.insert(key, value);
            }
        }
    }
    Ok(serde_json::from_value(merged)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_gives_defaults() {
        let store = ConfigStore::new(MemoryStore::new());
        assert_eq!(store.load(), ThemeConfig::default());
    }

    #[test]
    fn saved_config_round_trips() {
        let mut store = ConfigStore::new(MemoryStore::new());
        let config = ThemeConfig {
            content: "\"Hi.\"".into(),
            font_size: 20,
            ..Default::default()
        };
        store.save(&config).unwrap();
        assert_eq!(store.load(), config);
    }

    #[test]
    fn partial_blob_is_merged_over_defaults() {
        let mut mem = MemoryStore::new();
        mem.set(CONFIG_KEY, r##"{"textColor":"#000000","unknownField":1,"fontSize":null}"##)
            .unwrap();
        let config = ConfigStore::new(mem).load();
        assert_eq!(config.text_color, "#000000");
        assert_eq!(config.font_size, ThemeConfig::default().font_size);
    }

    #[test]
    fn corrupt_blob_falls_back_silently() {
        let mut mem = MemoryStore::new();
        mem.set(CONFIG_KEY, "{not json").unwrap();
        assert_eq!(ConfigStore::new(mem.clone()).load(), ThemeConfig::default());

        mem.set(CONFIG_KEY, r#"{"fontSize":"huge"}"#).unwrap();
        assert_eq!(ConfigStore::new(mem).load(), ThemeConfig::default());
    }

    #[test]
    fn clear_removes_the_blob() {
        let mut store = ConfigStore::new(MemoryStore::new());
        store.save(&ThemeConfig::with_content("x")).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), ThemeConfig::default());
    }

    #[test]
    fn file_store_persists_between_instances() {
        let dir = std::env::temp_dir().join(format!("loggen-store-{}", std::process::id()));
        let mut store = ConfigStore::new(FileStore::new(&dir));
        store.save(&ThemeConfig::with_content("kept")).unwrap();

        let reopened = ConfigStore::new(FileStore::new(&dir));
        assert_eq!(reopened.load().content, "kept");

        let _ = fs::remove_dir_all(&dir);
    }
}
