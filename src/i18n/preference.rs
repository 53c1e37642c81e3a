//! Persisted language preference.
//!
//! The page remembers one value across visits: the selected language code,
//! stored under `pdv-lang`. Storage is behind a trait so the resolver can be
//! driven by browser-local storage, a JSON file, or memory in tests.

use crate::error::PreferenceError;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Storage key for the selected language.
pub const LANGUAGE_KEY: &str = "pdv-lang";

/// Key-value storage for user preferences.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn save(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Session-only storage.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept in a flat JSON object on disk, e.g. `{"pdv-lang":"en"}`.
///
/// A missing file reads as "no preference". Writes rewrite the whole object
/// so other keys survive.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        debug!("Saved preference {}={} to {}", key, value, self.path.display());
        Ok(())
    }
}

/// Storage that is never available (private browsing, disabled storage).
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailablePreferenceStore;

impl PreferenceStore for UnavailablePreferenceStore {
    fn load(&self, _key: &str) -> Result<Option<String>, PreferenceError> {
        Err(PreferenceError::Unavailable)
    }

    fn save(&self, _key: &str, _value: &str) -> Result<(), PreferenceError> {
        Err(PreferenceError::Unavailable)
    }
}
