//! Configuration and file locations for sbs-diff
//!
//! This crate provides:
//! - Config and cache directory paths
//! - Configuration file lookup (TOML)
//! - Application configuration (AppConfig)

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::{AppConfig, BatchSettings, DiffConfig, KeyBindingConfig, RenderSettings, ThemeConfig};
pub use config_file::load_config_file;
