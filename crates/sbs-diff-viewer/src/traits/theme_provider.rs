//! Trait for providing widget colors to the side-by-side view.

use ratatui::style::Color;

/// Provides colors for the side-by-side widget.
///
/// Implement this trait to integrate the viewer with your application's
/// theme system. The theme instance should be injected from the host.
///
/// # Example
///
/// ```ignore
/// use sbs_diff_viewer::ThemeProvider;
/// use ratatui::style::Color;
///
/// struct SolarizedTheme;
///
/// impl ThemeProvider for SolarizedTheme {
///     fn inserted_background(&self) -> Color {
///         Color::Rgb(0, 43, 54)
///     }
///
///     fn deleted_background(&self) -> Color {
///         Color::Rgb(88, 14, 14)
///     }
/// }
/// ```
pub trait ThemeProvider: Send + Sync {
    /// Background for lines only present on the right.
    fn inserted_background(&self) -> Color;

    /// Background for lines only present on the left.
    fn deleted_background(&self) -> Color;

    /// Background for paired lines that differ.
    fn modified_background(&self) -> Color {
        Color::Rgb(50, 50, 25)
    }

    /// Background for unchanged lines.
    fn unchanged_background(&self) -> Color {
        Color::Reset
    }

    /// Background for alignment placeholders.
    fn filler_background(&self) -> Color {
        Color::Rgb(30, 30, 30)
    }

    /// Background for highlighted inserted text.
    fn inserted_highlight(&self) -> Color {
        Color::Rgb(40, 110, 40)
    }

    /// Background for highlighted deleted text.
    fn deleted_highlight(&self) -> Color {
        Color::Rgb(120, 40, 40)
    }

    /// Foreground for line numbers.
    fn line_number_foreground(&self) -> Color {
        Color::DarkGray
    }

    /// Border color of the focused pane.
    fn focused_border(&self) -> Color {
        Color::White
    }

    /// Border color of an unfocused pane.
    fn border(&self) -> Color {
        Color::DarkGray
    }

    /// Foreground color for key hints (the key part like "Esc", "j").
    fn hint_key_foreground(&self) -> Color {
        Color::Yellow
    }

    /// Foreground color for hint descriptions.
    fn hint_text_foreground(&self) -> Color {
        Color::DarkGray
    }
}

/// Default theme with sensible dark-mode colors.
#[derive(Debug, Clone, Default)]
pub struct DefaultTheme;

impl ThemeProvider for DefaultTheme {
    fn inserted_background(&self) -> Color {
        Color::Rgb(30, 60, 30) // dark green
    }

    fn deleted_background(&self) -> Color {
        Color::Rgb(60, 30, 30) // dark red
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = DefaultTheme;
        assert_eq!(theme.inserted_background(), Color::Rgb(30, 60, 30));
        assert_eq!(theme.deleted_background(), Color::Rgb(60, 30, 30));
        assert_eq!(theme.unchanged_background(), Color::Reset);
    }
}
