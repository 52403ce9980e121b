//! Trait for keeping the two panes' scroll positions together.

use crate::model::DiffSide;

/// Scroll offsets of both panes, in blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollOffsets {
    pub left: usize,
    pub right: usize,
}

/// Decides where both panes scroll to when one of them moves.
///
/// The viewer calls [`ScrollSynchronizer::sync`] whenever the pane on
/// `source` is scrolled to `offset` and applies the returned offsets, after
/// clamping them to the content.
pub trait ScrollSynchronizer: Send {
    fn sync(&mut self, source: DiffSide, offset: usize) -> ScrollOffsets;
}

/// Keeps both panes at the same offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct LockstepScroll;

impl ScrollSynchronizer for LockstepScroll {
    fn sync(&mut self, _source: DiffSide, offset: usize) -> ScrollOffsets {
        ScrollOffsets {
            left: offset,
            right: offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lockstep_moves_both() {
        let mut sync = LockstepScroll;
        assert_eq!(
            sync.sync(DiffSide::Left, 12),
            ScrollOffsets { left: 12, right: 12 }
        );
        assert_eq!(sync.sync(DiffSide::Right, 0), ScrollOffsets::default());
    }
}
