//! Display items produced by the diff renderer and copied into the panes.

use ratatui::style::Color;
use std::ops::Range;

/// Which side of the side-by-side view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffSide {
    /// The original text.
    Left,
    /// The changed text.
    Right,
}

impl DiffSide {
    /// The other side.
    pub fn opposite(self) -> Self {
        match self {
            DiffSide::Left => DiffSide::Right,
            DiffSide::Right => DiffSide::Left,
        }
    }
}

/// Kind of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Present on both sides unchanged.
    Unchanged,
    /// Only present on the right side.
    Inserted,
    /// Only present on the left side.
    Deleted,
    /// Paired with a differing line on the other side.
    Modified,
    /// Placeholder keeping both sides aligned.
    Filler,
}

/// One rendered line of one side.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayBlock {
    /// 1-based line number in the side's text (None for fillers).
    pub line_no: Option<u32>,
    /// Line text without the line terminator.
    pub text: String,
    /// Line kind.
    pub kind: LineKind,
    /// Text color.
    pub foreground: Color,
    /// Char ranges that differ from the paired line (Modified lines only).
    pub changed: Vec<Range<usize>>,
}

impl DisplayBlock {
    /// Create a line with no inline changes.
    pub fn new(line_no: Option<u32>, text: impl Into<String>, kind: LineKind, foreground: Color) -> Self {
        Self {
            line_no,
            text: text.into(),
            kind,
            foreground,
            changed: Vec::new(),
        }
    }

    /// Create an alignment placeholder.
    pub fn filler(foreground: Color) -> Self {
        Self::new(None, String::new(), LineKind::Filler, foreground)
    }

    /// Attach inline change ranges.
    pub fn with_changes(mut self, changed: Vec<Range<usize>>) -> Self {
        self.changed = changed;
        self
    }

    /// Length of the text in chars.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Kind of a highlighted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    Inserted,
    Deleted,
}

/// A highlighted char range inside one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    /// Index of the block in its side.
    pub block: usize,
    /// First highlighted char.
    pub start: usize,
    /// Number of highlighted chars.
    pub len: usize,
    pub kind: HighlightKind,
}

impl Highlight {
    /// Char range covered by the highlight.
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(DiffSide::Left.opposite(), DiffSide::Right);
        assert_eq!(DiffSide::Right.opposite(), DiffSide::Left);
    }

    #[test]
    fn test_char_len_counts_chars() {
        let block = DisplayBlock::new(Some(1), "héllo", LineKind::Unchanged, Color::White);
        assert_eq!(block.char_len(), 5);
    }
}
