//! Runtime configuration
//!
//! Settings come from an optional TOML file and are then overridden by environment
//! variables, so a `.env`-style shell export always wins over the file:
//!
//! ```toml
//! [firebase]
//! api_key = "AIzaSy..."
//! project_id = "my-project"
//! app_id = "1:123456789:web:abc"
//!
//! [emulator]
//! auth_enabled = true
//! rules = "signed-in"
//!
//! [log]
//! level = "debug"
//! ```
//!
//! Missing backend settings are not an error here; [`crate::backend::Backend::connect`]
//! turns them into the setup-required state.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "spojen.toml";

/// Message shown when mandatory backend settings are absent
pub const MISSING_CONFIG_MESSAGE: &str =
    "Missing backend configuration. Copy spojen.example.toml to spojen.toml (or export FIREBASE_* variables) and fill in the values.";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Client settings for the backend project
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FirebaseConfig {
    pub api_key: Option<String>,
    pub auth_domain: Option<String>,
    pub project_id: Option<String>,
    pub storage_bucket: Option<String>,
    pub messaging_sender_id: Option<String>,
    pub app_id: Option<String>,
}

impl FirebaseConfig {
    /// Names of mandatory settings that are absent or blank
    pub fn missing_required(&self) -> Vec<&'static str> {
        let required = [
            ("api_key", &self.api_key),
            ("project_id", &self.project_id),
            ("app_id", &self.app_id),
        ];
        required
            .into_iter()
            .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
            .map(|(name, _)| name)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }
}

/// Access rules enforced by the emulator on the message collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RulesMode {
    /// `allow read, write: if true`
    Open,
    /// `allow read, write: if request.auth != null`
    #[default]
    SignedIn,
}

/// Behaviour of the in-process backend
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmulatorConfig {
    /// When false, every auth call fails with `auth/configuration-not-found`
    pub auth_enabled: bool,
    pub rules: RulesMode,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        EmulatorConfig {
            auth_enabled: true,
            rules: RulesMode::SignedIn,
        }
    }
}

/// Log sink settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
    /// Log file; defaults to `spojen.log` in the temp directory
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub firebase: FirebaseConfig,
    pub emulator: EmulatorConfig,
    pub log: LogConfig,
}

impl Config {
    /// Parse a TOML document
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Load configuration for a run.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is read if
    /// present and defaults are used otherwise. Environment variables are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Config::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override settings from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields: [(&str, &mut Option<String>); 6] = [
            ("FIREBASE_API_KEY", &mut self.firebase.api_key),
            ("FIREBASE_AUTH_DOMAIN", &mut self.firebase.auth_domain),
            ("FIREBASE_PROJECT_ID", &mut self.firebase.project_id),
            ("FIREBASE_STORAGE_BUCKET", &mut self.firebase.storage_bucket),
            (
                "FIREBASE_MESSAGING_SENDER_ID",
                &mut self.firebase.messaging_sender_id,
            ),
            ("FIREBASE_APP_ID", &mut self.firebase.app_id),
        ];
        for (key, slot) in fields {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                *slot = Some(value);
            }
        }

        if let Some(level) = lookup("SPOJEN_LOG").filter(|v| !v.is_empty()) {
            self.log.level = level;
        }
    }
}
