use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse content dataset '{origin}': {source}")]
    ContentParse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid content dataset: {message}")]
    InvalidContent { message: String },

    #[error("Preferences error: {0}")]
    Preferences(#[from] serde_json::Error),

    #[error("Unknown theme '{name}'. Available themes: {available}")]
    UnknownTheme { name: String, available: String },
}

pub type AppResult<T> = Result<T, AppError>;
