//! Host theme settings and the viewer's subscription to them.
//!
//! The host owns a [`ThemeSettings`] and may change it at any time. The
//! viewer holds a [`ThemeSubscription`], an explicit handle that is released
//! when dropped, and polls it from its UI loop.

use ratatui::style::Color;
use std::str::FromStr;
use thiserror::Error;
use tokio::sync::watch;

/// Light or dark color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme mode {0:?}, expected \"dark\" or \"light\"")]
pub struct UnknownThemeMode(pub String);

impl FromStr for ThemeMode {
    type Err = UnknownThemeMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            _ => Err(UnknownThemeMode(s.to_string())),
        }
    }
}

/// Snapshot of the host theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    /// Accent color; used for the selection highlight.
    pub accent: Color,
    pub mode: ThemeMode,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            accent: Color::Blue,
            mode: ThemeMode::Dark,
        }
    }
}

impl ThemeState {
    /// Text color for diff content: white on dark backgrounds, black on light.
    pub fn foreground(&self) -> Color {
        match self.mode {
            ThemeMode::Dark => Color::White,
            ThemeMode::Light => Color::Black,
        }
    }
}

/// Host-owned theme settings.
#[derive(Debug)]
pub struct ThemeSettings {
    tx: watch::Sender<ThemeState>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self::new(ThemeState::default())
    }
}

impl ThemeSettings {
    pub fn new(initial: ThemeState) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Current theme.
    pub fn current(&self) -> ThemeState {
        *self.tx.borrow()
    }

    /// New handle observing changes from now on.
    pub fn subscribe(&self) -> ThemeSubscription {
        ThemeSubscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn set_accent(&self, accent: Color) {
        self.update(|state| state.accent = accent);
    }

    pub fn set_mode(&self, mode: ThemeMode) {
        self.update(|state| state.mode = mode);
    }

    fn update(&self, change: impl FnOnce(&mut ThemeState)) {
        let changed = self.tx.send_if_modified(|state| {
            let before = *state;
            change(state);
            *state != before
        });
        if changed {
            log::debug!("Theme changed: {:?}", self.current());
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Explicit handle on [`ThemeSettings`]; dropping it unsubscribes.
#[derive(Debug)]
pub struct ThemeSubscription {
    rx: watch::Receiver<ThemeState>,
}

impl ThemeSubscription {
    /// Current theme without marking it seen.
    pub fn current(&self) -> ThemeState {
        *self.rx.borrow()
    }

    /// The theme if it changed since the last call.
    ///
    /// Returns `None` once the settings are gone.
    pub fn take_changed(&mut self) -> Option<ThemeState> {
        match self.rx.has_changed() {
            Ok(true) => Some(*self.rx.borrow_and_update()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_foreground_follows_mode() {
        let mut state = ThemeState::default();
        assert_eq!(state.foreground(), Color::White);
        state.mode = ThemeMode::Light;
        assert_eq!(state.foreground(), Color::Black);
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("dark".parse::<ThemeMode>(), Ok(ThemeMode::Dark));
        assert_eq!(" Light ".parse::<ThemeMode>(), Ok(ThemeMode::Light));
        assert!("sepia".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn test_subscription_sees_changes_once() {
        let settings = ThemeSettings::default();
        let mut sub = settings.subscribe();
        assert_eq!(sub.take_changed(), None);

        settings.set_accent(Color::Magenta);
        let changed = sub.take_changed().map(|s| s.accent);
        assert_eq!(changed, Some(Color::Magenta));
        assert_eq!(sub.take_changed(), None);
    }

    #[test]
    fn test_setting_same_value_is_not_a_change() {
        let settings = ThemeSettings::default();
        let mut sub = settings.subscribe();
        settings.set_mode(ThemeMode::Dark);
        assert_eq!(sub.take_changed(), None);
    }

    #[test]
    fn test_dropping_subscription_releases_it() {
        let settings = ThemeSettings::default();
        let sub = settings.subscribe();
        assert_eq!(settings.subscriber_count(), 1);
        drop(sub);
        assert_eq!(settings.subscriber_count(), 0);
    }
}
