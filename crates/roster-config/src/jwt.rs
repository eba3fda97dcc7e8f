//! Token configuration.
//!
//! Resolution order:
//!
//! 1. When `DEPLOYED` is set, `ISSUER`, `SECRET_KEY` and `TOKEN_EXPIRE_TIME`
//!    are read from the process environment and are all required.
//! 2. Otherwise the same keys are read from the properties file named by
//!    `CONFIG_PROPERTIES` (default `config.properties`).
//! 3. When that file is absent, development defaults are used and a warning
//!    is logged.
//!
//! `TOKEN_EXPIRE_TIME` is given in milliseconds.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::properties::read_properties;

/// Minimum accepted length of the HS256 signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

const DEFAULT_PROPERTIES_FILE: &str = "config.properties";
const DEV_ISSUER: &str = "roster-dev";
const DEV_SECRET: &str = "roster-development-secret-do-not-deploy";
const DEV_EXPIRE_MILLIS: i64 = 1_800_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JwtConfig {
    pub issuer: String,
    pub secret: String,
    /// Token lifetime in seconds.
    pub token_expiry: i64,
}

impl JwtConfig {
    /// Resolves the configuration for the running process.
    pub fn resolve() -> Result<Self, ConfigError> {
        if env::var_os("DEPLOYED").is_some() {
            return Self::from_env();
        }

        let path = env::var("CONFIG_PROPERTIES")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_PROPERTIES_FILE));

        Self::from_properties_file(&path)
    }

    /// Reads all three keys from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads all three keys from a properties file, falling back to
    /// development defaults when the file does not exist.
    pub fn from_properties_file(path: &Path) -> Result<Self, ConfigError> {
        match read_properties(path)? {
            Some(values) => Self::from_lookup(|key| values.get(key).cloned()),
            None => {
                tracing::warn!(
                    path = %path.display(),
                    "Properties file not found, using development token settings"
                );
                Ok(Self::development())
            }
        }
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::MissingValue(key.to_string()))
        };

        let issuer = required("ISSUER")?;
        let secret = required("SECRET_KEY")?;
        let expire_raw = required("TOKEN_EXPIRE_TIME")?;

        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::WeakSecret {
                len: secret.len(),
                min: MIN_SECRET_LEN,
            });
        }

        let expire_millis: i64 = expire_raw
            .parse()
            .ok()
            .filter(|ms| *ms >= 1000)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "TOKEN_EXPIRE_TIME".to_string(),
                value: expire_raw.clone(),
            })?;

        Ok(Self {
            issuer,
            secret,
            token_expiry: expire_millis / 1000,
        })
    }

    pub fn development() -> Self {
        Self {
            issuer: DEV_ISSUER.to_string(),
            secret: DEV_SECRET.to_string(),
            token_expiry: DEV_EXPIRE_MILLIS / 1000,
        }
    }
}
