// ABOUTME: Grid configuration handling.
// ABOUTME: Resolves layout options from an explicit or per-user TOML file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Options recognized by the grid engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    /// Redistribute container resizes proportionally across all panels.
    /// When false, the trailing panels absorb the change and earlier
    /// panels keep their sizes.
    pub proportional_layout: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            proportional_layout: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Layout engine options
    pub grid: GridOptions,

    /// Initial container dimensions
    pub width: u32,
    pub height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridOptions::default(),
            width: 1200,
            height: 800,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot encode config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("no per-user config directory on this platform")]
    NoConfigDir,
}

const APP_DIR: &str = "splitgrid";
const FILE_NAME: &str = "config.toml";

impl Config {
    /// `<user config dir>/splitgrid/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join(APP_DIR).join(FILE_NAME))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Pick the configuration to run with.
    ///
    /// An explicit path must load. Without one, the per-user file is used
    /// when it exists and the built-in defaults otherwise. A per-user file
    /// that exists but does not parse is an error, not a silent fallback.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Ok(path) if path.is_file() => Self::load(&path),
            Ok(_) | Err(ConfigError::NoConfigDir) => Ok(Self::default()),
            Err(err) => Err(err),
        }
    }

    /// Write the config as TOML, creating missing parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml_string()?;
        let write_error = |source: io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(path, content).map_err(write_error)
    }
}
