//! Key/value persistence for view settings.
//!
//! The view only stores two values: the raw filter text and the
//! highlight-all-perks toggle. [`JsonFileSettings`] keeps them in a flat JSON
//! object so they survive restarts; [`MemorySettings`] is the in-process
//! equivalent used by tests and embedders that persist elsewhere.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::GearError;

/// Default key for the persisted filter text
pub const FILTER_TEXT_KEY: &str = "gear-filter";

/// Key for the highlight-all-perks toggle
pub const HIGHLIGHT_ALL_PERKS_KEY: &str = "highlightAllPerks";

/// String-valued settings storage.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error if the value could not be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<(), GearError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the change could not be persisted.
    fn remove(&mut self, key: &str) -> Result<(), GearError>;
}

/// Settings held in memory only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySettings {
    values: BTreeMap<String, String>,
}

impl MemorySettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GearError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), GearError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Settings stored as a JSON object of strings, rewritten on every change.
#[derive(Debug, Clone)]
pub struct JsonFileSettings {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileSettings {
    /// Load settings from `path`; a missing file yields empty settings.
    ///
    /// # Errors
    ///
    /// Returns [`GearError::Io`] if the file exists but cannot be read and
    /// [`GearError::Serialization`] if it is not a JSON object of strings.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GearError> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            BTreeMap::new()
        };
        tracing::debug!(path = %path.display(), entries = values.len(), "Loaded settings");
        Ok(Self { path, values })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `values` to disk and adopt them only once the write succeeded.
    fn commit(&mut self, values: BTreeMap<String, String>) -> Result<(), GearError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&values)?;
        std::fs::write(&self.path, content)?;
        self.values = values;
        Ok(())
    }
}

impl SettingsStore for JsonFileSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GearError> {
        let mut values = self.values.clone();
        values.insert(key.to_string(), value.to_string());
        self.commit(values)
    }

    fn remove(&mut self, key: &str) -> Result<(), GearError> {
        if !self.values.contains_key(key) {
            return Ok(());
        }
        let mut values = self.values.clone();
        values.remove(key);
        self.commit(values)
    }
}

/// Store the raw filter text under `key`, removing the entry when the text is blank.
///
/// # Errors
///
/// Propagates store failures.
pub fn persist_filter_text<S: SettingsStore + ?Sized>(
    store: &mut S,
    key: &str,
    raw: &str,
) -> Result<(), GearError> {
    if raw.trim().is_empty() {
        store.remove(key)
    } else {
        store.set(key, raw)
    }
}

/// Highlight-all-perks is on unless explicitly stored as `"false"`.
#[must_use]
pub fn highlight_all_perks<S: SettingsStore + ?Sized>(store: &S) -> bool {
    store.get(HIGHLIGHT_ALL_PERKS_KEY).as_deref() != Some("false")
}

/// Persist the highlight-all-perks toggle. Only the disabled state is stored.
///
/// # Errors
///
/// Propagates store failures.
pub fn persist_highlight_all_perks<S: SettingsStore + ?Sized>(
    store: &mut S,
    enabled: bool,
) -> Result<(), GearError> {
    if enabled {
        store.remove(HIGHLIGHT_ALL_PERKS_KEY)
    } else {
        store.set(HIGHLIGHT_ALL_PERKS_KEY, "false")
    }
}
