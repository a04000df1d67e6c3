//! Core configuration.
//!
//! # Responsibility
//! - Resolve the JSON store path and logging settings.
//! - Load optional overrides from a TOML file with per-field defaults.
//!
//! # Invariants
//! - A missing config file yields defaults, never an error.
//! - Paths starting with `~/` are expanded against the home directory.
//! - Without a platform data directory, defaults live in `data/` under the
//!   working directory (relative only if the working directory is unknown).

use crate::logging::default_log_level;
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DATA_FILE_NAME: &str = "app_data.json";
const LOG_DIR_NAME: &str = "logs";
const FALLBACK_DATA_DIR: &str = "data";

/// Errors from configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Store and logging settings for one core instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// JSON document holding every genre.
    #[serde(default = "default_data_path")]
    pub data_path: String,
    /// One of `trace|debug|info|warn|error`.
    #[serde(default = "default_level")]
    pub log_level: String,
    /// Directory for rolling log files.
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            log_level: default_level(),
            log_dir: default_log_dir(),
        }
    }
}

impl CoreConfig {
    /// Loads config from `path`, falling back to defaults when it is absent.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Expanded store path.
    pub fn data_path(&self) -> PathBuf {
        expand_path(&self.data_path)
    }

    /// Expanded log directory.
    pub fn log_dir(&self) -> PathBuf {
        expand_path(&self.log_dir)
    }
}

/// Expands a leading `~/` to the user's home directory.
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(path)
}

fn data_dir() -> PathBuf {
    ProjectDirs::from("com", "missionmanager", "missionmanager")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| fallback_data_dir(std::env::current_dir().ok()))
}

/// `data/` under the working directory, so default log dirs stay absolute.
fn fallback_data_dir(cwd: Option<PathBuf>) -> PathBuf {
    match cwd {
        Some(cwd) => cwd.join(FALLBACK_DATA_DIR),
        None => PathBuf::from(FALLBACK_DATA_DIR),
    }
}

fn default_data_path() -> String {
    data_dir().join(DATA_FILE_NAME).to_string_lossy().to_string()
}

fn default_log_dir() -> String {
    data_dir().join(LOG_DIR_NAME).to_string_lossy().to_string()
}

fn default_level() -> String {
    default_log_level().to_string()
}
