//! keydeck settings, read from `~/.config/keydeck/config.toml` or `--config`.
//!
//! The file sets the key display style, how long status toasts stay up,
//! per-id shortcut rebinds under `[shortcuts]` and a `disabled` id list.
//! Every field has a default, so a missing or empty file is a valid config.
//! Top-level keys keydeck does not know about are reported with `warn!` and
//! otherwise ignored.
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::shortcuts::{KeyStyle, Platform};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Key display preference as written in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStyleSetting {
    /// Symbols on macOS, text elsewhere.
    #[default]
    Auto,
    Symbols,
    Text,
}

impl KeyStyleSetting {
    pub fn resolve(self, platform: Platform) -> KeyStyle {
        match self {
            Self::Auto => KeyStyle::for_platform(platform),
            Self::Symbols => KeyStyle::Symbols,
            Self::Text => KeyStyle::Text,
        }
    }
}

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub key_style: KeyStyleSetting,

    /// Seconds a status toast stays visible.
    pub status_timeout_secs: u64,

    /// Shortcut key overrides. Keys are shortcut ids, values are key strings
    /// such as `"Cmd+Shift+D"`.
    pub shortcuts: HashMap<String, String>,

    /// Shortcut ids to keep registered but disabled.
    pub disabled: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_style: KeyStyleSetting::Auto,
            status_timeout_secs: 3,
            shortcuts: HashMap::new(),
            disabled: Vec::new(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Default location: `$HOME/.config/keydeck/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("keydeck")
                .join("config.toml"),
        )
    }

    /// Read and parse the config at `path`.
    ///
    /// A file that does not exist yields the defaults. Anything over
    /// [`Self::MAX_FILE_SIZE`] is rejected before it is read.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match Self::read_capped(path)? {
            Some(content) => Self::parse(&content, path),
            None => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// File contents, or `None` when the file is absent (including when it
    /// vanishes between the size check and the read).
    fn read_capped(path: &Path) -> Result<Option<String>, ConfigError> {
        let size = match std::fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if size > Self::MAX_FILE_SIZE {
            return Err(ConfigError::TooLarge(format!(
                "{} is {} bytes, limit is {}",
                path.display(),
                size,
                Self::MAX_FILE_SIZE
            )));
        }

        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        // Parse the TOML content first as a raw table to detect unknown keys
        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = ["key_style", "status_timeout_secs", "shortcuts", "disabled"];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        tracing::info!(
            path = %path.display(),
            overrides = config.shortcuts.len(),
            disabled = config.disabled.len(),
            "Loaded configuration"
        );
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================
