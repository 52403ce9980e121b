//! Turns the loaded configuration into viewer building blocks.

use anyhow::{anyhow, Context, Result};
use ratatui::style::Color;
use sbs_diff_config::{AppConfig, BatchSettings};
use sbs_diff_viewer::{
    BatchSchedule, KeyBinding, Keymap, LineDiffRenderer, RenderOptions, ThemeMode, ThemeState,
    ViewerAction,
};
use similar::Algorithm;
use std::str::FromStr;
use std::time::Duration;

fn schedule(name: &str, batch: &BatchSettings) -> Result<BatchSchedule> {
    BatchSchedule::new(batch.seed, batch.growth, Duration::from_millis(batch.delay_ms))
        .with_context(|| format!("Invalid render.{name} settings"))
}

pub fn render_options(config: &AppConfig) -> Result<RenderOptions> {
    Ok(RenderOptions {
        content: schedule("content", &config.render.content)?,
        highlights: schedule("highlights", &config.render.highlights)?,
    })
}

/// Initial theme; `mode` and `accent` override the config when given.
pub fn theme_state(config: &AppConfig, mode: Option<ThemeMode>, accent: Option<&str>) -> Result<ThemeState> {
    let mode = match mode {
        Some(mode) => mode,
        None => config.theme.mode.parse()?,
    };
    let accent = accent.unwrap_or(&config.theme.accent);
    let accent = Color::from_str(accent).map_err(|_| anyhow!("Unknown accent color {accent:?}"))?;
    Ok(ThemeState { accent, mode })
}

pub fn renderer(config: &AppConfig) -> Result<LineDiffRenderer> {
    let algorithm = match config.diff.algorithm.to_lowercase().as_str() {
        "myers" => Algorithm::Myers,
        "patience" => Algorithm::Patience,
        "lcs" => Algorithm::Lcs,
        other => return Err(anyhow!("Unknown diff algorithm {other:?}")),
    };
    Ok(LineDiffRenderer::new()
        .with_algorithm(algorithm)
        .with_inline(config.diff.inline))
}

/// Built-in bindings plus the configured ones, which win for keys bound in
/// both. Unknown action names are skipped.
pub fn keymap(config: &AppConfig) -> Keymap {
    let extra = config
        .keybindings
        .iter()
        .filter_map(|binding| {
            let Some(action) = ViewerAction::from_name(&binding.action) else {
                log::warn!("Ignoring key binding {:?}: unknown action {:?}", binding.keys, binding.action);
                return None;
            };
            let hint = binding.hint.clone().unwrap_or_else(|| binding.keys.clone());
            Some(KeyBinding::new(binding.keys.clone(), hint, action))
        })
        .collect();

    let mut keymap = Keymap::default();
    keymap.extend(extra);
    keymap
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use sbs_diff_config::KeyBindingConfig;

    #[test]
    fn test_default_render_options() {
        let options = render_options(&AppConfig::default()).unwrap();
        assert_eq!(options, RenderOptions::default());
    }

    #[test]
    fn test_theme_overrides() {
        let config = AppConfig::default();
        let state = theme_state(&config, None, None).unwrap();
        assert_eq!(state, ThemeState { accent: Color::Blue, mode: ThemeMode::Dark });

        let state = theme_state(&config, Some(ThemeMode::Light), Some("#ff8800")).unwrap();
        assert_eq!(state.mode, ThemeMode::Light);
        assert_eq!(state.accent, Color::Rgb(0xff, 0x88, 0x00));

        assert!(theme_state(&config, None, Some("not-a-color")).is_err());
    }

    #[test]
    fn test_unknown_algorithm() {
        let mut config = AppConfig::default();
        config.diff.algorithm = "Patience".to_string();
        assert!(renderer(&config).is_ok());
        config.diff.algorithm = "guess".to_string();
        assert!(renderer(&config).is_err());
    }

    #[test]
    fn test_configured_keybindings() {
        let mut config = AppConfig::default();
        config.keybindings = vec![
            KeyBindingConfig {
                keys: "q".to_string(),
                action: "close".to_string(),
                hint: None,
            },
            KeyBindingConfig {
                keys: "x".to_string(),
                action: "explode".to_string(),
                hint: None,
            },
        ];

        let keymap = keymap(&config);
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(keymap.match_key(&q), Some(ViewerAction::Close));
        assert_eq!(keymap.match_key(&x), None);
    }

    #[test]
    fn test_configured_keybinding_replaces_default() {
        let mut config = AppConfig::default();
        config.keybindings = vec![KeyBindingConfig {
            keys: "g".to_string(),
            action: "page_down".to_string(),
            hint: None,
        }];

        let keymap = keymap(&config);
        let g = KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE);
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(keymap.match_key(&g), Some(ViewerAction::PageDown));
        assert_eq!(keymap.match_key(&esc), Some(ViewerAction::Close));
        assert_eq!(keymap.compact_hint(ViewerAction::ScrollTop), Some("Home".to_string()));
    }
}
