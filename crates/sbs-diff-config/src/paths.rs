//! Configuration and cache directory paths
//!
//! Uses platform directories via `dirs`:
//! - Linux: `~/.config/sbs-diff/`, `~/.cache/sbs-diff/`
//! - macOS: `~/Library/Application Support/sbs-diff/`, `~/Library/Caches/sbs-diff/`
//! - Windows: `%APPDATA%\sbs-diff\`, `%LOCALAPPDATA%\sbs-diff\`

use anyhow::{Context, Result};
use std::path::PathBuf;

pub const APP_NAME: &str = "sbs-diff";

/// Get the application cache directory, creating it if needed
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Could not create {}", dir.display()))?;
    Ok(dir)
}

/// Path of the config file inside the config directory. Nothing is created.
pub fn app_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME).join("config.toml"))
}
