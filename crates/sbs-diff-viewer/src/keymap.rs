//! Keybinding system
//!
//! Maps keyboard input to [`ViewerAction`]s. Key patterns are textual
//! (`"esc"`, `"ctrl+d"`, `"G"`, `"pagedown"`) so hosts can load extra
//! bindings from configuration.

use crate::action::ViewerAction;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A single keybinding that maps a key pattern to an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    /// Textual representation of the key - e.g., "ctrl+d", "shift+tab"
    pub keys: String,
    /// Display hint for the UI - e.g., "Ctrl+D"
    pub hint: String,
    /// The action this binding triggers
    pub action: ViewerAction,
}

impl KeyBinding {
    pub fn new(keys: impl Into<String>, hint: impl Into<String>, action: ViewerAction) -> Self {
        Self {
            keys: keys.into(),
            hint: hint.into(),
            action,
        }
    }
}

/// Parsed key pattern for matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyChord {
    fn matches(&self, key: &KeyEvent) -> bool {
        match (self.code, key.code) {
            // BackTab arrives with or without SHIFT depending on the terminal
            (KeyCode::BackTab, KeyCode::BackTab) => true,
            // Same for uppercase letters
            (KeyCode::Char(c), KeyCode::Char(k)) if c.is_ascii_uppercase() && c == k => {
                key.modifiers == KeyModifiers::SHIFT || key.modifiers == KeyModifiers::NONE
            }
            _ => self.code == key.code && self.modifiers == key.modifiers,
        }
    }
}

/// Parse a textual key pattern into a matchable form
///
/// Supported formats:
/// - Single char: "q", "j", "G" (case-sensitive)
/// - With modifiers: "ctrl+d", "shift+tab", "ctrl+shift+c"
/// - Special keys: "tab", "esc", "pageup", "pagedown", "up", "down", "home", "end", "f1".."f12"
pub fn parse_key_pattern(pattern: &str) -> Option<KeyChord> {
    let pattern = pattern.trim();

    // Single characters keep their case, uppercase letters arrive with SHIFT
    if pattern.chars().count() == 1 {
        let c = pattern.chars().next()?;
        let modifiers = if c.is_ascii_uppercase() {
            KeyModifiers::SHIFT
        } else {
            KeyModifiers::NONE
        };
        return Some(KeyChord {
            code: KeyCode::Char(c),
            modifiers,
        });
    }

    let pattern_lower = pattern.to_lowercase();
    let mut modifiers = KeyModifiers::NONE;
    let mut key_part = pattern_lower.as_str();

    while let Some((modifier, rest)) = key_part.split_once('+') {
        match modifier {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => break,
        }
        key_part = rest;
    }

    let code = parse_key_code(key_part)?;
    Some(KeyChord { code, modifiers })
}

fn parse_key_code(s: &str) -> Option<KeyCode> {
    match s {
        "tab" => Some(KeyCode::Tab),
        "backtab" => Some(KeyCode::BackTab),
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" | "pgup" => Some(KeyCode::PageUp),
        "pagedown" | "pgdn" => Some(KeyCode::PageDown),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "space" => Some(KeyCode::Char(' ')),

        s if s.starts_with('f') && s.len() > 1 => {
            let num: u8 = s[1..].parse().ok()?;
            Some(KeyCode::F(num))
        }

        s if s.chars().count() == 1 => s.chars().next().map(KeyCode::Char),

        _ => None,
    }
}

/// The keymap - a collection of keybindings with matching logic
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<(KeyBinding, KeyChord)>,
}

impl Default for Keymap {
    fn default() -> Self {
        use ViewerAction::*;
        Self::new(vec![
            KeyBinding::new("esc", "Esc", Close),
            KeyBinding::new("ctrl+d", "Ctrl+D", Close),
            KeyBinding::new("j", "j", ScrollDown),
            KeyBinding::new("down", "↓", ScrollDown),
            KeyBinding::new("k", "k", ScrollUp),
            KeyBinding::new("up", "↑", ScrollUp),
            KeyBinding::new("pagedown", "PgDn", PageDown),
            KeyBinding::new("pageup", "PgUp", PageUp),
            KeyBinding::new("g", "g", ScrollTop),
            KeyBinding::new("home", "Home", ScrollTop),
            KeyBinding::new("G", "G", ScrollBottom),
            KeyBinding::new("end", "End", ScrollBottom),
            KeyBinding::new("tab", "Tab", SwitchFocus),
        ])
    }
}

impl Keymap {
    /// Create a keymap from a list of bindings. Unparseable patterns are skipped.
    pub fn new(bindings: Vec<KeyBinding>) -> Self {
        let parsed = bindings
            .into_iter()
            .filter_map(|binding| match parse_key_pattern(&binding.keys) {
                Some(chord) => Some((binding, chord)),
                None => {
                    log::warn!("Ignoring unknown key pattern {:?}", binding.keys);
                    None
                }
            })
            .collect();

        Self { bindings: parsed }
    }

    /// Add bindings ahead of the existing ones, so a new binding for an
    /// already bound key replaces the old action.
    pub fn extend(&mut self, bindings: Vec<KeyBinding>) {
        let mut merged = Self::new(bindings).bindings;
        merged.append(&mut self.bindings);
        self.bindings = merged;
    }

    /// The action bound to `key`, if any.
    pub fn match_key(&self, key: &KeyEvent) -> Option<ViewerAction> {
        self.bindings
            .iter()
            .find(|(_, chord)| chord.matches(key))
            .map(|(binding, _)| binding.action)
    }

    /// Get all bindings (for displaying in a help line)
    pub fn bindings(&self) -> impl Iterator<Item = &KeyBinding> {
        self.bindings.iter().map(|(b, _)| b)
    }

    /// Compact hint for an action (e.g., "Esc/Ctrl+D" for Close)
    pub fn compact_hint(&self, action: ViewerAction) -> Option<String> {
        let mut hints: Vec<&str> = Vec::new();
        for (index, (binding, chord)) in self.bindings.iter().enumerate() {
            // Skip keys taken by an earlier binding
            let shadowed = self.bindings[..index].iter().any(|(_, earlier)| earlier == chord);
            if binding.action == action && !shadowed && !hints.contains(&binding.hint.as_str()) {
                hints.push(&binding.hint);
            }
        }

        if hints.is_empty() {
            None
        } else {
            Some(hints.join("/"))
        }
    }
}
