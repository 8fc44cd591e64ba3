//! Path utilities for storelens.
//!
//! User files live under `~/.storelens/`:
//! - `~/.storelens/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the storelens home directory (`~/.storelens/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".storelens")
}

/// Returns the default config file path (`~/.storelens/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
