//! Per-side output of the diff renderer.

use super::block::{DiffSide, DisplayBlock, Highlight, HighlightKind, LineKind};

/// Ordered blocks of one side.
#[derive(Debug, Clone)]
pub struct SideContext {
    pub side: DiffSide,
    pub blocks: Vec<DisplayBlock>,
}

impl SideContext {
    pub fn new(side: DiffSide) -> Self {
        Self {
            side,
            blocks: Vec::new(),
        }
    }

    /// Derive the highlight set for this side, ordered by block.
    ///
    /// Inserted/deleted lines are highlighted as a whole, modified lines by
    /// their inline ranges. Empty lines produce no highlight.
    pub fn text_highlighters(&self) -> Vec<Highlight> {
        let kind = match self.side {
            DiffSide::Left => HighlightKind::Deleted,
            DiffSide::Right => HighlightKind::Inserted,
        };

        let mut highlights = Vec::new();
        for (index, block) in self.blocks.iter().enumerate() {
            match block.kind {
                LineKind::Inserted | LineKind::Deleted => {
                    let len = block.char_len();
                    if len > 0 {
                        highlights.push(Highlight {
                            block: index,
                            start: 0,
                            len,
                            kind,
                        });
                    }
                }
                LineKind::Modified => {
                    highlights.extend(block.changed.iter().filter(|r| !r.is_empty()).map(|r| {
                        Highlight {
                            block: index,
                            start: r.start,
                            len: r.end - r.start,
                            kind,
                        }
                    }));
                }
                LineKind::Unchanged | LineKind::Filler => {}
            }
        }
        highlights
    }

    /// Number of lines that carry text of this side.
    pub fn line_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.line_no.is_some()).count()
    }
}

/// Both sides of a rendered diff.
#[derive(Debug, Clone)]
pub struct DiffContext {
    pub left: SideContext,
    pub right: SideContext,
    /// Lines only present on the right (including the right half of modified pairs).
    pub insertions: usize,
    /// Lines only present on the left (including the left half of modified pairs).
    pub deletions: usize,
}

impl DiffContext {
    /// Whether both texts were identical.
    pub fn is_identical(&self) -> bool {
        self.insertions == 0 && self.deletions == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::style::Color;

    #[test]
    fn test_text_highlighters_per_kind() {
        let mut ctx = SideContext::new(DiffSide::Right);
        ctx.blocks = vec![
            DisplayBlock::new(Some(1), "same", LineKind::Unchanged, Color::White),
            DisplayBlock::new(Some(2), "added", LineKind::Inserted, Color::White),
            DisplayBlock::filler(Color::White),
            DisplayBlock::new(Some(3), "let x = 2;", LineKind::Modified, Color::White)
                .with_changes(vec![8..9]),
            DisplayBlock::new(Some(4), "", LineKind::Inserted, Color::White),
        ];

        assert_eq!(
            ctx.text_highlighters(),
            vec![
                Highlight {
                    block: 1,
                    start: 0,
                    len: 5,
                    kind: HighlightKind::Inserted
                },
                Highlight {
                    block: 3,
                    start: 8,
                    len: 1,
                    kind: HighlightKind::Inserted
                },
            ]
        );
        assert_eq!(ctx.line_count(), 4);
    }

    #[test]
    fn test_left_side_highlights_are_deletions() {
        let mut ctx = SideContext::new(DiffSide::Left);
        ctx.blocks = vec![DisplayBlock::new(Some(1), "gone", LineKind::Deleted, Color::White)];
        let highlights = ctx.text_highlighters();
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].kind, HighlightKind::Deleted);
    }
}
