//! Configuration loading.
//!
//! Everything is optional: a missing `config.toml` or a missing section
//! yields the built-in defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::chat::memory::DEFAULT_MEMORY_CAPACITY;
use crate::patterns::{SEQUENCE_DATA_END, SEQUENCE_DATA_START};

/// File name looked up inside [`config_dir`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Response normalizer settings.
    #[serde(default)]
    pub normalizer: NormalizerConfig,

    /// Parameter memory settings.
    #[serde(default)]
    pub memory: MemoryConfig,
}

/// Markers delimiting the sequence payload of a hybrid response.
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizerConfig {
    /// Marker opening the payload.
    #[serde(default = "default_start_marker")]
    pub start_marker: String,

    /// Marker closing the payload.
    #[serde(default = "default_end_marker")]
    pub end_marker: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            start_marker: default_start_marker(),
            end_marker: default_end_marker(),
        }
    }
}

fn default_start_marker() -> String {
    SEQUENCE_DATA_START.to_owned()
}

fn default_end_marker() -> String {
    SEQUENCE_DATA_END.to_owned()
}

/// Parameter memory limits.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Number of parameter summaries kept.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

fn default_capacity() -> usize {
    DEFAULT_MEMORY_CAPACITY
}

/// Load and parse a config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config at {}: {e}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("failed to parse config at {}: {e}", path.display()))?;
    Ok(config)
}

/// Resolve the default config directory (`~/.springseq/`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> anyhow::Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.home_dir().join(".springseq"))
}

/// Load `~/.springseq/config.toml`, or the defaults when it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_default_config() -> anyhow::Result<Config> {
    let path = config_dir()?.join(CONFIG_FILE_NAME);
    if path.exists() {
        load_config(&path)
    } else {
        Ok(Config::default())
    }
}
