use thiserror::Error;

/// Malformed configuration or a missing required key. Fatal; the run
/// aborts before any file is parsed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("configuration is missing required key '{0}'")]
    MissingKey(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
