//! Application configuration
//!
//! Configuration loaded from `.sbs-diff.toml`. Every field has a default, so
//! a partial file (or none at all) is fine.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Application configuration loaded from .sbs-diff.toml
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Batch tunables for incremental population
    #[serde(default)]
    pub render: RenderSettings,

    /// Initial theme
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Diff computation
    #[serde(default)]
    pub diff: DiffConfig,

    /// Extra key bindings; they take precedence over the built-in ones
    #[serde(default)]
    pub keybindings: Vec<KeyBindingConfig>,
}

/// Batch tunables of one job kind.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct BatchSettings {
    /// Items per side in the first round
    pub seed: usize,
    /// Factor the batch size grows by each round
    pub growth: usize,
    /// Pause before each round, in milliseconds
    pub delay_ms: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    #[serde(default = "default_content", deserialize_with = "content_batch")]
    pub content: BatchSettings,

    #[serde(default = "default_highlights", deserialize_with = "highlights_batch")]
    pub highlights: BatchSettings,
}

/// A `[render.*]` table as written; missing keys fall back per job kind.
#[derive(Deserialize)]
struct PartialBatch {
    seed: Option<usize>,
    growth: Option<usize>,
    delay_ms: Option<u64>,
}

impl PartialBatch {
    fn or(self, defaults: BatchSettings) -> BatchSettings {
        BatchSettings {
            seed: self.seed.unwrap_or(defaults.seed),
            growth: self.growth.unwrap_or(defaults.growth),
            delay_ms: self.delay_ms.unwrap_or(defaults.delay_ms),
        }
    }
}

fn content_batch<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BatchSettings, D::Error> {
    Ok(PartialBatch::deserialize(deserializer)?.or(default_content()))
}

fn highlights_batch<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BatchSettings, D::Error> {
    Ok(PartialBatch::deserialize(deserializer)?.or(default_highlights()))
}

fn default_content() -> BatchSettings {
    BatchSettings {
        seed: 1,
        growth: 5,
        delay_ms: 1,
    }
}

fn default_highlights() -> BatchSettings {
    BatchSettings {
        seed: 5,
        growth: 5,
        delay_ms: 10,
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            content: default_content(),
            highlights: default_highlights(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ThemeConfig {
    /// "dark" or "light"
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Accent color, any name or `#rrggbb` value ratatui understands
    #[serde(default = "default_accent")]
    pub accent: String,
}

fn default_mode() -> String {
    "dark".to_string()
}

fn default_accent() -> String {
    "blue".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            accent: default_accent(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DiffConfig {
    /// "myers", "patience" or "lcs"
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Highlight changed characters inside modified lines
    #[serde(default = "default_inline")]
    pub inline: bool,
}

fn default_algorithm() -> String {
    "myers".to_string()
}

fn default_inline() -> bool {
    true
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            inline: default_inline(),
        }
    }
}

/// A key pattern bound to a viewer action by name (e.g. `"q"` → `"close"`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct KeyBindingConfig {
    pub keys: String,
    pub action: String,
    /// Display hint, defaults to the key pattern
    #[serde(default)]
    pub hint: Option<String>,
}

impl AppConfig {
    /// Load config from CWD first, then home directory, then the config
    /// directory, or use defaults
    pub fn load() -> Self {
        if let Some((path, content)) = crate::load_config_file() {
            match Self::parse(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("Ignoring config file {}: {:#}", path.display(), e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Load config from an explicit path. Unlike [`AppConfig::load`], a
    /// missing or invalid file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::info!("Loaded app config from {}", path.display());
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject tunables that would stall or break incremental population.
    pub fn validate(&self) -> Result<()> {
        for (name, batch) in [
            ("render.content", &self.render.content),
            ("render.highlights", &self.render.highlights),
        ] {
            if batch.seed == 0 {
                bail!("{name}.seed must be at least 1");
            }
            if batch.growth == 0 {
                bail!("{name}.growth must be at least 1");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.render.content, default_content());
        assert_eq!(config.render.highlights.seed, 5);
        assert_eq!(config.render.highlights.delay_ms, 10);
        assert_eq!(config.theme.mode, "dark");
        assert_eq!(config.diff.algorithm, "myers");
        assert!(config.diff.inline);
        assert!(config.keybindings.is_empty());
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            [render.content]
            seed = 10
            growth = 2
            delay_ms = 0

            [theme]
            accent = "magenta"
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.render.content,
            BatchSettings {
                seed: 10,
                growth: 2,
                delay_ms: 0
            }
        );
        // Other fields should use defaults
        assert_eq!(config.render.highlights, default_highlights());
        assert_eq!(config.theme.mode, "dark");
        assert_eq!(config.theme.accent, "magenta");
    }

    #[test]
    fn test_partial_batch_tables_keep_kind_defaults() {
        let config = AppConfig::parse("[render.content]\nseed = 10\n").unwrap();
        assert_eq!(
            config.render.content,
            BatchSettings {
                seed: 10,
                growth: 5,
                delay_ms: 1
            }
        );
        assert_eq!(config.render.highlights, default_highlights());

        let config = AppConfig::parse("[render.highlights]\ndelay_ms = 0\n").unwrap();
        assert_eq!(config.render.content, default_content());
        assert_eq!(
            config.render.highlights,
            BatchSettings {
                seed: 5,
                growth: 5,
                delay_ms: 0
            }
        );

        let config = AppConfig::parse("[render.content]\n").unwrap();
        assert_eq!(config.render, RenderSettings::default());

        // Zero values are still rejected when the rest is defaulted.
        assert!(AppConfig::parse("[render.highlights]\ngrowth = 0\n").is_err());
    }

    #[test]
    fn test_keybindings() {
        let toml = r#"
            [[keybindings]]
            keys = "q"
            action = "close"

            [[keybindings]]
            keys = "ctrl+f"
            action = "page_down"
            hint = "Ctrl+F"
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.keybindings.len(), 2);
        assert_eq!(config.keybindings[0].hint, None);
        assert_eq!(config.keybindings[1].hint.as_deref(), Some("Ctrl+F"));
    }

    #[test]
    fn test_validate_rejects_zero_tunables() {
        let mut config = AppConfig::default();
        config.render.highlights.growth = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "render.highlights.growth must be at least 1");

        let result = AppConfig::parse("[render.content]\nseed = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_path() {
        let path = std::env::temp_dir().join(format!("sbs-diff-test-{}.toml", std::process::id()));
        std::fs::write(&path, "[theme]\nmode = \"light\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.theme.mode, "light");

        std::fs::remove_file(&path).unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }
}
