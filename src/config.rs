use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::artifact_io;
use crate::error::{AppError, AppResult};
use crate::theme::ThemeName;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub prompt: PromptConfig,
    pub theme: ThemeConfig,
    pub content: ContentConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PromptConfig {
    pub user: String,
    pub host: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            user: "subodh".to_string(),
            host: "portfolio".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeConfig {
    pub default: String,
    pub palette_file: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default: ThemeName::Dark.as_str().to_string(),
            palette_file: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContentConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    pub state_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_dir: "~/.portfolio-terminal".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// An explicit `--config` file must load. A broken per-user file falls
    /// back to defaults and its error is handed back for logging once the
    /// subscriber is up.
    pub fn load(explicit: Option<&Path>) -> AppResult<(Self, Option<AppError>)> {
        match explicit {
            Some(path) => {
                let text = artifact_io::load_merged_config_text(Some(path))?;
                Ok((Self::from_toml_str(&text, path)?, None))
            }
            None => match Self::load_user_config() {
                Ok(config) => Ok((config, None)),
                Err(err) => Ok((Self::default(), Some(err))),
            },
        }
    }

    fn load_user_config() -> AppResult<Self> {
        let path = artifact_io::config_file_path()?;
        let text = artifact_io::load_merged_config_text(None)?;
        Self::from_toml_str(&text, &path)
    }

    pub fn from_toml_str(text: &str, path: &Path) -> AppResult<Self> {
        toml::from_str(text).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Configured default theme; an unknown name is reported and ignored.
    pub fn default_theme(&self) -> Option<ThemeName> {
        let raw = self.theme.default.trim();
        if raw.is_empty() {
            return None;
        }
        let parsed = ThemeName::parse(raw);
        if parsed.is_none() {
            tracing::warn!(theme = raw, "unknown default theme in config");
        }
        parsed
    }

    pub fn state_dir(&self) -> AppResult<PathBuf> {
        Ok(artifact_io::expand_home(self.storage.state_dir.trim())?)
    }

    pub fn palette_file(&self) -> AppResult<Option<PathBuf>> {
        optional_path(&self.theme.palette_file)
    }

    pub fn content_path(&self) -> AppResult<Option<PathBuf>> {
        optional_path(&self.content.path)
    }
}

fn optional_path(raw: &str) -> AppResult<Option<PathBuf>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(artifact_io::expand_home(trimmed)?))
}
