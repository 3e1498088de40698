//! Key-value persistence for settings.
//!
//! Editing logic never reaches for a storage global. Whatever needs to
//! persist settings takes a [`KeyValueStore`], picked by the host:
//! - [`MemoryKeyValueStore`]: tests and throwaway sessions
//! - [`FileKeyValueStore`]: one file per key in the platform config dir (native)
//! - [`LocalStorageStore`]: browser `localStorage` (WASM)

use std::collections::HashMap;

use crate::config::ConfigError;

/// String key-value storage.
pub trait KeyValueStore {
    /// Read a value. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), ConfigError>;
}

/// Keeps values in a map.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    values: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), ConfigError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileKeyValueStore {
    /// Directory name under the platform config dir.
    pub const APP_DIR: &'static str = "hotmap";

    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the platform config directory, falling back to
    /// `~/.config`. None if neither can be determined.
    pub fn in_config_dir() -> Option<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(Self::new(config_dir.join(Self::APP_DIR)))
        } else {
            dirs::home_dir().map(|home| Self::new(home.join(".config").join(Self::APP_DIR)))
        }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> std::path::PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let path = self.path_for(key);
        if !path.exists() {
            log::debug!("No stored value at {:?}", path);
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        std::fs::write(&path, value)?;
        log::debug!("Wrote {:?}", path);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), ConfigError> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// Browser `localStorage`, keys prefixed with `hotmap-`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const PREFIX: &'static str = "hotmap-";

    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, ConfigError> {
        let window = web_sys::window()
            .ok_or_else(|| ConfigError::StorageError("No window object available".to_string()))?;
        window
            .local_storage()
            .map_err(|e| ConfigError::StorageError(format!("localStorage access error: {:?}", e)))?
            .ok_or_else(|| ConfigError::StorageError("localStorage not available".to_string()))
    }

    fn full_key(key: &str) -> String {
        format!("{}{}", Self::PREFIX, key)
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Self::storage()?
            .get_item(&Self::full_key(key))
            .map_err(|e| ConfigError::StorageError(format!("Failed to read localStorage: {:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        Self::storage()?
            .set_item(&Self::full_key(key), value)
            .map_err(|e| ConfigError::StorageError(format!("Failed to save to localStorage: {:?}", e)))
    }

    fn remove(&mut self, key: &str) -> Result<(), ConfigError> {
        Self::storage()?
            .remove_item(&Self::full_key(key))
            .map_err(|e| ConfigError::StorageError(format!("Failed to remove from localStorage: {:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryKeyValueStore::new();
        assert_eq!(store.get("theme").unwrap(), None);
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        store.remove("theme").unwrap();
        store.remove("theme").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileKeyValueStore::new(dir.path().join("nested"));
        assert_eq!(store.get("config").unwrap(), None);

        store.set("config", "{\"a\":1}").unwrap();
        assert!(dir.path().join("nested").join("config.json").exists());
        assert_eq!(store.get("config").unwrap().as_deref(), Some("{\"a\":1}"));

        store.remove("config").unwrap();
        assert_eq!(store.get("config").unwrap(), None);
    }
}
