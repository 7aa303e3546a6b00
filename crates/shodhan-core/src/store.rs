//! Persisted key/value state.
//!
//! Stands in for browser storage: a flat map of string keys to string values.
//! Every write replaces a whole value, so concurrent writers never interleave
//! partial updates of the same key.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Error, Result};

/// Base64 `username:password` of the signed-in admin.
pub const ADMIN_AUTH_KEY: &str = "adminAuth";
/// JSON `{username, role}` of the signed-in admin, for display only.
pub const ADMIN_USER_KEY: &str = "adminUser";
/// Calendar-day string of the last time the promo dialog was dismissed.
pub const PROMO_LAST_SHOWN_KEY: &str = "promoModalLastShown";

pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| Error::Store("memory store lock poisoned".into()))
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Store persisted as a single JSON object on disk.
///
/// The file is re-read on every access so that separate invocations of the
/// CLI observe each other's writes.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Default location: `~/.shodhan/state.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".shodhan").join("state.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                Error::Store(format!(
                    "Failed to parse state file {}: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn update(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::Store("state file lock poisoned".into()))?;
        let mut entries = self.read_all()?;
        apply(&mut entries);
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl StateStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get(ADMIN_AUTH_KEY).unwrap(), None);
        store.set(ADMIN_AUTH_KEY, "abc").unwrap();
        assert_eq!(store.get(ADMIN_AUTH_KEY).unwrap().as_deref(), Some("abc"));
        store.set(ADMIN_AUTH_KEY, "def").unwrap();
        assert_eq!(store.get(ADMIN_AUTH_KEY).unwrap().as_deref(), Some("def"));
        store.remove(ADMIN_AUTH_KEY).unwrap();
        assert_eq!(store.get(ADMIN_AUTH_KEY).unwrap(), None);
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));
        assert_eq!(store.get(PROMO_LAST_SHOWN_KEY).unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let store = JsonFileStore::new(&path);
        store.set(PROMO_LAST_SHOWN_KEY, "Sat Oct 17 2026").unwrap();
        store.set(ADMIN_USER_KEY, r#"{"username":"admin","role":"admin"}"#).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(
            reopened.get(PROMO_LAST_SHOWN_KEY).unwrap().as_deref(),
            Some("Sat Oct 17 2026")
        );
        reopened.remove(ADMIN_USER_KEY).unwrap();
        assert_eq!(store.get(ADMIN_USER_KEY).unwrap(), None);
    }

    #[test]
    fn file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.get(ADMIN_AUTH_KEY), Err(Error::Store(_))));
    }
}
