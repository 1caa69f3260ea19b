//! JSON file storage for the last notified prices.
//!
//! The file holds a flat object mapping pair key to price string, e.g.
//! `{"PAIR_1": "1.2345", "PAIR_2": "0.5025"}`. It is rewritten as a whole
//! on every save.

use ratio_core::Price;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Price file I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to encode prices: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Raw contents of the price file.
pub type PriceMap = BTreeMap<String, String>;

/// Price persistence backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct PriceStore {
    path: PathBuf,
}

impl PriceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with an empty object if it does not exist yet.
    pub fn initialize(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        self.write(&PriceMap::new())?;
        debug!(path = %self.path.display(), "Created empty price file");
        Ok(())
    }

    /// Load every stored entry. A missing or unreadable file yields an empty map.
    pub fn load(&self) -> PriceMap {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Price file not readable");
                return PriceMap::new();
            }
        };

        match serde_json::from_str::<PriceMap>(&contents) {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Price file is malformed, ignoring");
                PriceMap::new()
            }
        }
    }

    /// Last stored price for `key`, or zero if none is stored.
    pub fn last_price(&self, key: &str) -> Price {
        Self::price_from(&self.load(), key)
    }

    /// Look up `key` in an already loaded map.
    pub fn price_from(map: &PriceMap, key: &str) -> Price {
        match map.get(key) {
            None => Price::ZERO,
            Some(raw) => Price::parse(raw).unwrap_or_else(|e| {
                warn!(key = key, value = %raw, error = %e, "Stored price is invalid, using zero");
                Price::ZERO
            }),
        }
    }

    /// Store prices for the given keys, keeping any other entries.
    pub fn save_prices(&self, entries: &[(&str, Price)]) -> Result<(), StoreError> {
        let mut map = self.load();
        for (key, price) in entries {
            map.insert((*key).to_string(), price.to_string());
        }
        self.write(&map)
    }

    fn write(&self, map: &PriceMap) -> Result<(), StoreError> {
        let json = serde_json::to_string(map)?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> PriceStore {
        PriceStore::new(dir.path().join("data.json"))
    }

    fn p(s: &str) -> Price {
        Price::parse(s).unwrap()
    }

    #[test]
    fn test_initialize_creates_empty_object() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.initialize().unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{}");
    }

    #[test]
    fn test_initialize_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"PAIR_1":"2"}"#).unwrap();
        store.initialize().unwrap();
        assert_eq!(store.last_price("PAIR_1"), p("2"));
    }

    #[test]
    fn test_initialize_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = PriceStore::new(dir.path().join("state/nested/data.json"));
        store.initialize().unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_missing_key_defaults_to_zero() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.last_price("PAIR_1"), Price::ZERO);
        store.initialize().unwrap();
        assert_eq!(store.last_price("PAIR_1"), Price::ZERO);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .save_prices(&[("PAIR_1", p("1.2345")), ("PAIR_2", p("0.5025"))])
            .unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.last_price("PAIR_1"), p("1.2345"));
        assert_eq!(reopened.last_price("PAIR_2"), p("0.5025"));

        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, r#"{"PAIR_1":"1.2345","PAIR_2":"0.5025"}"#);
    }

    #[test]
    fn test_save_preserves_other_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"OTHER":"7","PAIR_1":"1"}"#).unwrap();

        store.save_prices(&[("PAIR_1", p("2"))]).unwrap();

        let map = store.load();
        assert_eq!(map.get("OTHER").map(String::as_str), Some("7"));
        assert_eq!(map.get("PAIR_1").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_malformed_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "not json").unwrap();
        assert!(store.load().is_empty());
        assert_eq!(store.last_price("PAIR_1"), Price::ZERO);

        // Saving over a malformed file replaces it.
        store.save_prices(&[("PAIR_1", p("3"))]).unwrap();
        assert_eq!(store.last_price("PAIR_1"), p("3"));
    }

    #[test]
    fn test_invalid_stored_value_is_zero() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"PAIR_1":"abc","PAIR_2":"-4"}"#).unwrap();
        assert_eq!(store.last_price("PAIR_1"), Price::ZERO);
        assert_eq!(store.last_price("PAIR_2"), Price::ZERO);
    }
}
