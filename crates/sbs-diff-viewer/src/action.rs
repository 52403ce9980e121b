//! Viewer Actions
//!
//! Tagged actions the side-by-side viewer can process. The [`Keymap`] maps
//! key events to these, but a host can also dispatch them directly.
//!
//! [`Keymap`]: crate::keymap::Keymap

/// Actions that can be performed on the side-by-side viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    // === Scrolling ===
    /// Scroll down one line
    ScrollDown,
    /// Scroll up one line
    ScrollUp,
    /// Scroll down one page
    PageDown,
    /// Scroll up one page
    PageUp,
    /// Jump to the first line
    ScrollTop,
    /// Jump to the last line
    ScrollBottom,

    // === Focus ===
    /// Move focus to the other pane
    SwitchFocus,
    /// Focus the right pane
    Focus,

    // === General ===
    /// Ask the host to close the viewer
    Close,

    // === Viewport ===
    /// Set the visible row count (for page scrolling)
    SetViewport { height: u16 },
}

impl ViewerAction {
    /// Parse an action name as used in key binding configuration.
    pub fn from_name(name: &str) -> Option<Self> {
        let action = match name {
            "scroll_down" => ViewerAction::ScrollDown,
            "scroll_up" => ViewerAction::ScrollUp,
            "page_down" => ViewerAction::PageDown,
            "page_up" => ViewerAction::PageUp,
            "scroll_top" => ViewerAction::ScrollTop,
            "scroll_bottom" => ViewerAction::ScrollBottom,
            "switch_focus" => ViewerAction::SwitchFocus,
            "focus" => ViewerAction::Focus,
            "close" => ViewerAction::Close,
            _ => return None,
        };
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(ViewerAction::from_name("close"), Some(ViewerAction::Close));
        assert_eq!(
            ViewerAction::from_name("page_up"),
            Some(ViewerAction::PageUp)
        );
        assert_eq!(ViewerAction::from_name("explode"), None);
    }
}
