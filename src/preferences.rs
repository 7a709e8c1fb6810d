//! Dashboard preferences
//!
//! Theme and sidebar state are read once at startup from a
//! [`PreferenceStore`] and written back on every change. Stored values that
//! cannot be parsed fall back to the defaults with a warning.
//!
//! # Examples
//!
//! ```rust
//! use zemon_content::preferences::{MemoryStore, Preferences, Theme};
//!
//! let mut store = MemoryStore::default();
//! let mut prefs = Preferences::load(&store);
//! assert_eq!(prefs.theme(), Theme::System);
//!
//! prefs.set_theme(&mut store, Theme::Dark).unwrap();
//! assert_eq!(Preferences::load(&store).theme(), Theme::Dark);
//! ```

use crate::error::ContentError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Storage key of the theme
pub const THEME_KEY: &str = "zemon.theme";
/// Storage key of the sidebar state
pub const SIDEBAR_EXPANDED_KEY: &str = "zemon.sidebarExpanded";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    /// Follow the operating system setting
    #[default]
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Key-value storage for preferences
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), ContentError>;
}

/// In-memory store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ContentError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object file, rewritten on every change
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`
    ///
    /// A missing file is an empty store. A file that is not a JSON object of
    /// strings is treated as empty and logged; it is replaced on the next
    /// write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<BTreeMap<String, String>>(&text) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt preference file");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), ContentError> {
        let json = serde_json::to_string_pretty(values)
            .map_err(|e| ContentError::StorageError(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// The in-memory copy only changes once the file is written
    fn set(&mut self, key: &str, value: &str) -> Result<(), ContentError> {
        let mut values = self.values.clone();
        values.insert(key.to_string(), value.to_string());
        self.persist(&values)?;
        self.values = values;
        Ok(())
    }
}

/// Theme and sidebar state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    theme: Theme,
    sidebar_expanded: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            sidebar_expanded: true,
        }
    }
}

impl Preferences {
    /// Read preferences from `store`
    pub fn load(store: &impl PreferenceStore) -> Self {
        let mut prefs = Self::default();

        if let Some(raw) = store.get(THEME_KEY) {
            match raw.parse::<Theme>() {
                Ok(theme) => prefs.theme = theme,
                Err(e) => tracing::warn!(key = THEME_KEY, value = %raw, error = %e, "Using default theme"),
            }
        }
        if let Some(raw) = store.get(SIDEBAR_EXPANDED_KEY) {
            match raw.trim().parse::<bool>() {
                Ok(expanded) => prefs.sidebar_expanded = expanded,
                Err(e) => tracing::warn!(
                    key = SIDEBAR_EXPANDED_KEY,
                    value = %raw,
                    error = %e,
                    "Using default sidebar state"
                ),
            }
        }

        prefs
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn sidebar_expanded(&self) -> bool {
        self.sidebar_expanded
    }

    /// Change the theme and write it through
    pub fn set_theme(&mut self, store: &mut impl PreferenceStore, theme: Theme) -> Result<(), ContentError> {
        store.set(THEME_KEY, theme.as_str())?;
        self.theme = theme;
        Ok(())
    }

    /// Change the sidebar state and write it through
    pub fn set_sidebar_expanded(
        &mut self,
        store: &mut impl PreferenceStore,
        expanded: bool,
    ) -> Result<(), ContentError> {
        store.set(SIDEBAR_EXPANDED_KEY, if expanded { "true" } else { "false" })?;
        self.sidebar_expanded = expanded;
        Ok(())
    }

    /// Flip the sidebar state and write it through
    pub fn toggle_sidebar(&mut self, store: &mut impl PreferenceStore) -> Result<bool, ContentError> {
        let expanded = !self.sidebar_expanded;
        self.set_sidebar_expanded(store, expanded)?;
        Ok(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_on_empty_store() {
        let prefs = Preferences::load(&MemoryStore::default());
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.theme(), Theme::System);
        assert!(prefs.sidebar_expanded());
    }

    #[test]
    fn test_corrupt_values_fall_back() {
        let mut store = MemoryStore::default();
        store.set(THEME_KEY, "neon").unwrap();
        store.set(SIDEBAR_EXPANDED_KEY, "maybe").unwrap();
        assert_eq!(Preferences::load(&store), Preferences::default());
    }

    #[test]
    fn test_values_parsed_leniently() {
        let mut store = MemoryStore::default();
        store.set(THEME_KEY, " Dark ").unwrap();
        store.set(SIDEBAR_EXPANDED_KEY, "false").unwrap();
        let prefs = Preferences::load(&store);
        assert_eq!(prefs.theme(), Theme::Dark);
        assert!(!prefs.sidebar_expanded());
    }

    #[test]
    fn test_setters_write_through() {
        let mut store = MemoryStore::default();
        let mut prefs = Preferences::load(&store);
        prefs.set_theme(&mut store, Theme::Light).unwrap();
        assert!(!prefs.toggle_sidebar(&mut store).unwrap());
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(store.get(SIDEBAR_EXPANDED_KEY).as_deref(), Some("false"));
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("prefs.json")).unwrap();
        assert_eq!(store.get(THEME_KEY), None);
    }

    #[test]
    fn test_file_store_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "[1, 2").unwrap();
        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(THEME_KEY), None);

        store.set(THEME_KEY, "dark").unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"zemon.theme\": \"dark\""));
    }

    #[test]
    fn test_theme_serde_names() {
        assert_eq!(serde_json::to_string(&Theme::System).unwrap(), "\"system\"");
        assert_eq!("LIGHT".parse::<Theme>(), Ok(Theme::Light));
    }
}
