use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::artifact_io::{read_text_file, write_text_file_atomic};
use crate::error::AppResult;
use crate::theme::{ThemeName, ThemeSwitcher};

const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

/// `<state_dir>/preferences.json`. A missing file reads as empty preferences.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(PREFERENCES_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> AppResult<Preferences> {
        let text = match read_text_file(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Preferences::default());
            }
            Err(err) => return Err(err.into()),
        };
        if text.trim().is_empty() {
            return Ok(Preferences::default());
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, preferences: &Preferences) -> AppResult<()> {
        let mut text = serde_json::to_string_pretty(preferences)?;
        text.push('\n');
        write_text_file_atomic(&self.path, &text)?;
        Ok(())
    }

    /// Stored theme, if any. Unreadable files and unknown names are logged and
    /// treated as "no preference".
    pub fn stored_theme(&self) -> Option<ThemeName> {
        let preferences = match self.load() {
            Ok(preferences) => preferences,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to read preferences");
                return None;
            }
        };
        let raw = preferences.theme?;
        let parsed = ThemeName::parse(&raw);
        if parsed.is_none() {
            tracing::warn!(theme = %raw, "ignoring unknown stored theme");
        }
        parsed
    }

    pub fn save_theme(&self, name: ThemeName) -> AppResult<()> {
        let mut preferences = self.load().unwrap_or_default();
        preferences.theme = Some(name.as_str().to_string());
        self.save(&preferences)
    }
}

/// Persists every theme switch. After the first write failure it stops
/// touching the disk and the rest of the session keeps themes in memory.
#[derive(Debug)]
pub struct PersistentThemeSwitcher {
    store: Option<PreferenceStore>,
}

impl PersistentThemeSwitcher {
    pub fn new(store: PreferenceStore) -> Self {
        Self { store: Some(store) }
    }

    #[cfg(test)]
    pub fn is_persisting(&self) -> bool {
        self.store.is_some()
    }
}

impl ThemeSwitcher for PersistentThemeSwitcher {
    fn switch_theme(&mut self, name: ThemeName) {
        let Some(store) = &self.store else {
            return;
        };
        match store.save_theme(name) {
            Ok(()) => tracing::debug!(theme = %name, path = %store.path().display(), "saved theme preference"),
            Err(err) => {
                tracing::warn!(
                    theme = %name,
                    path = %store.path().display(),
                    error = %err,
                    "failed to persist theme, keeping it in memory"
                );
                self.store = None;
            }
        }
    }
}
