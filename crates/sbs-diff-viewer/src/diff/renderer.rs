//! Turns two texts into aligned per-side display blocks.

use crate::model::{DiffContext, DiffSide, DisplayBlock, LineKind, SideContext};
use ratatui::style::Color;
use similar::{Algorithm, ChangeTag, DiffTag, TextDiff};
use std::ops::Range;

/// Produces the per-side contexts for a pair of texts.
///
/// Implement this trait to plug a different diff engine into the viewer.
/// Both returned sides must have the same number of blocks so that row `n`
/// of the left pane lines up with row `n` of the right pane.
pub trait DiffRenderer: Send + Sync {
    /// Generate display data for `left` (original) and `right` (changed).
    fn generate(&self, left: &str, right: &str, foreground: Color) -> DiffContext;
}

/// Line-based renderer with char-level highlights for modified lines.
#[derive(Debug, Clone, Copy)]
pub struct LineDiffRenderer {
    algorithm: Algorithm,
    inline: bool,
}

impl Default for LineDiffRenderer {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Myers,
            inline: true,
        }
    }
}

impl LineDiffRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different diff algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Enable or disable char-level ranges on modified lines.
    pub fn with_inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    fn inline_ranges(&self, old: &str, new: &str) -> (Vec<Range<usize>>, Vec<Range<usize>>) {
        if !self.inline {
            return (Vec::new(), Vec::new());
        }

        let diff = TextDiff::configure()
            .algorithm(self.algorithm)
            .diff_chars(old, new);

        let mut old_ranges: Vec<Range<usize>> = Vec::new();
        let mut new_ranges: Vec<Range<usize>> = Vec::new();
        let mut old_pos = 0;
        let mut new_pos = 0;

        for change in diff.iter_all_changes() {
            let len = change.value().chars().count();
            match change.tag() {
                ChangeTag::Equal => {
                    old_pos += len;
                    new_pos += len;
                }
                ChangeTag::Delete => {
                    push_range(&mut old_ranges, old_pos..old_pos + len);
                    old_pos += len;
                }
                ChangeTag::Insert => {
                    push_range(&mut new_ranges, new_pos..new_pos + len);
                    new_pos += len;
                }
            }
        }

        (old_ranges, new_ranges)
    }
}

/// Append `range`, merging it into the previous one when they touch.
fn push_range(ranges: &mut Vec<Range<usize>>, range: Range<usize>) {
    if let Some(last) = ranges.last_mut() {
        if last.end == range.start {
            last.end = range.end;
            return;
        }
    }
    ranges.push(range);
}

fn split_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

fn line_no(index: usize) -> Option<u32> {
    Some(index as u32 + 1)
}

impl DiffRenderer for LineDiffRenderer {
    fn generate(&self, left: &str, right: &str, foreground: Color) -> DiffContext {
        let old_lines = split_lines(left);
        let new_lines = split_lines(right);

        let diff = TextDiff::configure()
            .algorithm(self.algorithm)
            .diff_slices(old_lines.as_slice(), new_lines.as_slice());

        let mut left_ctx = SideContext::new(DiffSide::Left);
        let mut right_ctx = SideContext::new(DiffSide::Right);
        let mut insertions = 0;
        let mut deletions = 0;

        for op in diff.ops() {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            match tag {
                DiffTag::Equal => {
                    for (old_idx, new_idx) in old_range.zip(new_range) {
                        left_ctx.blocks.push(DisplayBlock::new(
                            line_no(old_idx),
                            old_lines[old_idx],
                            LineKind::Unchanged,
                            foreground,
                        ));
                        right_ctx.blocks.push(DisplayBlock::new(
                            line_no(new_idx),
                            new_lines[new_idx],
                            LineKind::Unchanged,
                            foreground,
                        ));
                    }
                }
                DiffTag::Delete => {
                    deletions += old_range.len();
                    for old_idx in old_range {
                        left_ctx.blocks.push(DisplayBlock::new(
                            line_no(old_idx),
                            old_lines[old_idx],
                            LineKind::Deleted,
                            foreground,
                        ));
                        right_ctx.blocks.push(DisplayBlock::filler(foreground));
                    }
                }
                DiffTag::Insert => {
                    insertions += new_range.len();
                    for new_idx in new_range {
                        left_ctx.blocks.push(DisplayBlock::filler(foreground));
                        right_ctx.blocks.push(DisplayBlock::new(
                            line_no(new_idx),
                            new_lines[new_idx],
                            LineKind::Inserted,
                            foreground,
                        ));
                    }
                }
                DiffTag::Replace => {
                    deletions += old_range.len();
                    insertions += new_range.len();
                    let rows = old_range.len().max(new_range.len());
                    for row in 0..rows {
                        let old_idx = Some(old_range.start + row).filter(|i| old_range.contains(i));
                        let new_idx = Some(new_range.start + row).filter(|i| new_range.contains(i));
                        match (old_idx, new_idx) {
                            (Some(o), Some(n)) => {
                                let (old_changes, new_changes) =
                                    self.inline_ranges(old_lines[o], new_lines[n]);
                                left_ctx.blocks.push(
                                    DisplayBlock::new(
                                        line_no(o),
                                        old_lines[o],
                                        LineKind::Modified,
                                        foreground,
                                    )
                                    .with_changes(old_changes),
                                );
                                right_ctx.blocks.push(
                                    DisplayBlock::new(
                                        line_no(n),
                                        new_lines[n],
                                        LineKind::Modified,
                                        foreground,
                                    )
                                    .with_changes(new_changes),
                                );
                            }
                            (Some(o), None) => {
                                left_ctx.blocks.push(DisplayBlock::new(
                                    line_no(o),
                                    old_lines[o],
                                    LineKind::Deleted,
                                    foreground,
                                ));
                                right_ctx.blocks.push(DisplayBlock::filler(foreground));
                            }
                            (None, Some(n)) => {
                                left_ctx.blocks.push(DisplayBlock::filler(foreground));
                                right_ctx.blocks.push(DisplayBlock::new(
                                    line_no(n),
                                    new_lines[n],
                                    LineKind::Inserted,
                                    foreground,
                                ));
                            }
                            (None, None) => {}
                        }
                    }
                }
            }
        }

        log::debug!(
            "Generated diff view data: {} rows, +{} -{}",
            left_ctx.blocks.len(),
            insertions,
            deletions
        );

        DiffContext {
            left: left_ctx,
            right: right_ctx,
            insertions,
            deletions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(ctx: &SideContext) -> Vec<LineKind> {
        ctx.blocks.iter().map(|b| b.kind).collect()
    }

    #[test]
    fn test_identical_texts() {
        let ctx = LineDiffRenderer::new().generate("a\nb\n", "a\nb", Color::White);
        assert!(ctx.is_identical());
        assert_eq!(kinds(&ctx.left), vec![LineKind::Unchanged, LineKind::Unchanged]);
        assert_eq!(ctx.right.blocks[1].line_no, Some(2));
    }

    #[test]
    fn test_empty_inputs_produce_no_blocks() {
        let ctx = LineDiffRenderer::new().generate("", "", Color::White);
        assert!(ctx.left.blocks.is_empty());
        assert!(ctx.right.blocks.is_empty());
        assert!(ctx.left.text_highlighters().is_empty());
    }

    #[test]
    fn test_insert_and_delete_are_padded() {
        let ctx = LineDiffRenderer::new().generate("a\nb\nc", "a\nc\nd", Color::White);

        assert_eq!(ctx.left.blocks.len(), ctx.right.blocks.len());
        assert_eq!(
            kinds(&ctx.left),
            vec![
                LineKind::Unchanged,
                LineKind::Deleted,
                LineKind::Unchanged,
                LineKind::Filler
            ]
        );
        assert_eq!(
            kinds(&ctx.right),
            vec![
                LineKind::Unchanged,
                LineKind::Filler,
                LineKind::Unchanged,
                LineKind::Inserted
            ]
        );
        assert_eq!(ctx.insertions, 1);
        assert_eq!(ctx.deletions, 1);
    }

    #[test]
    fn test_replaced_line_gets_inline_ranges() {
        let ctx = LineDiffRenderer::new().generate("let x = 1;", "let x = 22;", Color::White);

        assert_eq!(kinds(&ctx.left), vec![LineKind::Modified]);
        assert_eq!(kinds(&ctx.right), vec![LineKind::Modified]);
        assert_eq!(ctx.left.blocks[0].changed, vec![8..9]);
        assert_eq!(ctx.right.blocks[0].changed, vec![8..10]);
    }

    #[test]
    fn test_inline_can_be_disabled() {
        let ctx = LineDiffRenderer::new()
            .with_inline(false)
            .generate("one", "two", Color::White);
        assert!(ctx.left.blocks[0].changed.is_empty());
        assert!(ctx.right.text_highlighters().is_empty());
    }

    #[test]
    fn test_uneven_replace_pads_shorter_side() {
        let ctx = LineDiffRenderer::new().generate("x\nold", "x\nnew1\nnew2", Color::White);

        assert_eq!(ctx.left.blocks.len(), 3);
        assert_eq!(ctx.right.blocks.len(), 3);
        assert_eq!(ctx.left.blocks[2].kind, LineKind::Filler);
        assert_eq!(ctx.right.blocks[2].kind, LineKind::Inserted);
        assert_eq!(ctx.right.blocks[2].line_no, Some(3));
    }

    #[test]
    fn test_crlf_is_normalized() {
        let ctx = LineDiffRenderer::new().generate("a\r\nb\r\n", "a\nb\n", Color::White);
        assert!(ctx.is_identical());
        assert_eq!(ctx.left.blocks[0].text, "a");
    }

    #[test]
    fn test_foreground_is_applied() {
        let ctx = LineDiffRenderer::new().generate("a", "b", Color::Black);
        assert!(ctx
            .left
            .blocks
            .iter()
            .chain(ctx.right.blocks.iter())
            .all(|b| b.foreground == Color::Black));
    }
}
