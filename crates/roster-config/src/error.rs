use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration value: {0}")]
    MissingValue(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("SECRET_KEY must be at least {min} bytes long, got {len}")]
    WeakSecret { len: usize, min: usize },

    #[error("Failed to read properties file {}: {source}", path.display())]
    Properties {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}
