//! Two-pane widget rendering the populated sinks.

use crate::model::{DiffSide, DisplayBlock, Highlight, HighlightKind, LineKind};
use crate::sink::DiffPanes;
use crate::traits::ThemeProvider;
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Widget};

/// A single hint entry for the footer.
#[derive(Debug, Clone)]
pub struct FooterHint {
    /// The key (e.g., "Esc", "j").
    pub key: String,
    /// The description (e.g., "Close", "Down").
    pub description: String,
}

impl FooterHint {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }
}

/// Renders both panes of a [`DiffPanes`] next to each other.
///
/// Only what the render jobs have appended so far is drawn, so a large diff
/// fills in over a few frames.
///
/// # Example
///
/// ```ignore
/// let widget = SideBySideWidget::new(viewer.panes(), &DefaultTheme)
///     .with_titles("a.txt", "b.txt");
/// frame.render_widget(widget, area);
/// ```
pub struct SideBySideWidget<'a, T: ThemeProvider> {
    panes: &'a DiffPanes,
    theme: &'a T,
    titles: [String; 2],
    footer_hints: Vec<FooterHint>,
}

impl<'a, T: ThemeProvider> SideBySideWidget<'a, T> {
    pub fn new(panes: &'a DiffPanes, theme: &'a T) -> Self {
        Self {
            panes,
            theme,
            titles: ["Original".to_string(), "Modified".to_string()],
            footer_hints: Vec::new(),
        }
    }

    /// Set the pane titles (usually file names).
    pub fn with_titles(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.titles = [left.into(), right.into()];
        self
    }

    /// Set footer hints to display at the bottom border of the right pane.
    pub fn with_footer_hints(mut self, hints: Vec<FooterHint>) -> Self {
        self.footer_hints = hints;
        self
    }
}

impl<T: ThemeProvider> Widget for SideBySideWidget<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [left_area, right_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(area);

        // Shared so both panes line up
        let line_no_width = line_no_width(self.panes);

        self.render_pane(DiffSide::Left, left_area, line_no_width, buf);
        self.render_pane(DiffSide::Right, right_area, line_no_width, buf);
    }
}

/// Line numbers grow along each side, so the last numbered block is the widest.
fn line_no_width(panes: &DiffPanes) -> usize {
    let max_line = [&panes.left, &panes.right]
        .iter()
        .filter_map(|pane| pane.last_line_no())
        .max()
        .unwrap_or(0);
    max_line.to_string().len().max(3)
}

impl<T: ThemeProvider> SideBySideWidget<'_, T> {
    fn render_pane(&self, side: DiffSide, area: Rect, line_no_width: usize, buf: &mut Buffer) {
        let pane = self.panes.pane(side);
        let focused = self.panes.focused == Some(side);

        let border_style = if focused {
            Style::default().fg(self.theme.focused_border())
        } else {
            Style::default().fg(self.theme.border())
        };

        let title_style = if focused {
            Style::default()
                .fg(pane.selection_highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            border_style
        };

        let index = match side {
            DiffSide::Left => 0,
            DiffSide::Right => 1,
        };
        let title = Span::styled(format!(" {} ", self.titles[index]), title_style);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);

        if side == DiffSide::Right && !self.footer_hints.is_empty() {
            block = block.title_bottom(self.footer_line());
        }

        let inner = block.inner(area);
        block.render(area, buf);

        let visible_height = inner.height as usize;
        let mut window = pane.highlights_in(pane.scroll_offset, visible_height);
        for row in 0..visible_height {
            let index = pane.scroll_offset + row;
            let Some(display) = pane.blocks.get(index) else {
                break;
            };
            let y = inner.y + row as u16;
            let (highlights, rest) = window.split_at(window.partition_point(|h| h.block <= index));
            window = rest;
            self.render_block(display, highlights, inner.x, y, inner.width, line_no_width, buf);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_block(
        &self,
        display: &DisplayBlock,
        highlights: &[Highlight],
        x: u16,
        y: u16,
        width: u16,
        line_no_width: usize,
        buf: &mut Buffer,
    ) {
        let bg = match display.kind {
            LineKind::Inserted => self.theme.inserted_background(),
            LineKind::Deleted => self.theme.deleted_background(),
            LineKind::Modified => self.theme.modified_background(),
            LineKind::Filler => self.theme.filler_background(),
            LineKind::Unchanged => self.theme.unchanged_background(),
        };
        let base_style = Style::default().bg(bg);

        // Fill background
        let row = Rect::new(x, y, width, 1);
        buf.set_style(row, base_style);

        let line_no = display
            .line_no
            .map(|n| format!("{:>width$} ", n, width = line_no_width))
            .unwrap_or_else(|| " ".repeat(line_no_width + 1));

        let mut spans = vec![Span::styled(
            line_no,
            base_style.fg(self.theme.line_number_foreground()),
        )];
        spans.extend(self.text_spans(display, highlights, base_style.fg(display.foreground)));

        buf.set_line(x, y, &Line::from(spans), width);
    }

    /// Split the text at highlight boundaries.
    fn text_spans<'b>(
        &self,
        display: &'b DisplayBlock,
        highlights: &[Highlight],
        style: Style,
    ) -> Vec<Span<'b>> {
        let text = display.text.as_str();
        let char_count = display.char_len();
        let byte_at = |char_index: usize| {
            text.char_indices()
                .nth(char_index)
                .map(|(i, _)| i)
                .unwrap_or(text.len())
        };

        let mut spans = Vec::new();
        let mut cursor = 0;
        for highlight in highlights {
            let range = highlight.range();
            let start = range.start.clamp(cursor, char_count);
            let end = range.end.clamp(start, char_count);
            if start == end {
                continue;
            }
            if start > cursor {
                spans.push(Span::styled(&text[byte_at(cursor)..byte_at(start)], style));
            }
            let bg = match highlight.kind {
                HighlightKind::Inserted => self.theme.inserted_highlight(),
                HighlightKind::Deleted => self.theme.deleted_highlight(),
            };
            spans.push(Span::styled(&text[byte_at(start)..byte_at(end)], style.bg(bg)));
            cursor = end;
        }
        if cursor < char_count {
            spans.push(Span::styled(&text[byte_at(cursor)..], style));
        }
        spans
    }

    fn footer_line(&self) -> Line<'_> {
        let mut spans = vec![Span::raw(" ")];
        for (i, hint) in self.footer_hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    " │ ",
                    Style::default().fg(self.theme.hint_text_foreground()),
                ));
            }
            spans.push(Span::styled(
                hint.key.as_str(),
                Style::default()
                    .fg(self.theme.hint_key_foreground())
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" {}", hint.description),
                Style::default().fg(self.theme.hint_text_foreground()),
            ));
        }
        spans.push(Span::raw(" "));
        Line::from(spans)
    }
}
