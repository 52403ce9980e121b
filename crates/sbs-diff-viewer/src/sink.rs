//! Display surfaces the render jobs populate.

use crate::model::{DiffSide, DisplayBlock, Highlight};
use ratatui::style::Color;

/// Append-only ordered collection owned by a display surface.
///
/// Items keep the order they were appended in; the only way to remove
/// anything is [`DestinationSink::clear`].
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationSink<T> {
    items: Vec<T>,
}

impl<T> Default for DestinationSink<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> DestinationSink<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch at the end, keeping its order.
    pub fn append_batch(&mut self, batch: impl IntoIterator<Item = T>) {
        self.items.extend(batch);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }
}

/// One side of the viewer: its lines, their highlights and view state.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffPane {
    pub blocks: DestinationSink<DisplayBlock>,
    pub highlights: DestinationSink<Highlight>,
    /// Color used for selected text.
    pub selection_highlight: Color,
    /// Index of the first visible block.
    pub scroll_offset: usize,
}

impl Default for DiffPane {
    fn default() -> Self {
        Self {
            blocks: DestinationSink::new(),
            highlights: DestinationSink::new(),
            selection_highlight: Color::Blue,
            scroll_offset: 0,
        }
    }
}

impl DiffPane {
    /// Drop content and highlights; view state is kept.
    pub fn clear(&mut self) {
        self.highlights.clear();
        self.blocks.clear();
    }

    /// Highlights of blocks in `first..first + count`, in sink order.
    ///
    /// Highlights are appended in block order, so the window is found by
    /// binary search.
    pub fn highlights_in(&self, first: usize, count: usize) -> &[Highlight] {
        let end = first.saturating_add(count);
        let items = self.highlights.items();
        let start = items.partition_point(|h| h.block < first);
        let stop = start + items[start..].partition_point(|h| h.block < end);
        &items[start..stop]
    }

    /// Line number of the last block that has one.
    pub fn last_line_no(&self) -> Option<u32> {
        self.blocks.items().iter().rev().find_map(|b| b.line_no)
    }
}

/// Both display surfaces of the viewer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffPanes {
    pub left: DiffPane,
    pub right: DiffPane,
    /// Side receiving keyboard input, if the viewer has focus.
    pub focused: Option<DiffSide>,
}

impl DiffPanes {
    pub fn pane(&self, side: DiffSide) -> &DiffPane {
        match side {
            DiffSide::Left => &self.left,
            DiffSide::Right => &self.right,
        }
    }

    pub fn pane_mut(&mut self, side: DiffSide) -> &mut DiffPane {
        match side {
            DiffSide::Left => &mut self.left,
            DiffSide::Right => &mut self.right,
        }
    }

    /// Content sink of one side.
    pub fn blocks_mut(&mut self, side: DiffSide) -> &mut DestinationSink<DisplayBlock> {
        &mut self.pane_mut(side).blocks
    }

    /// Highlight sink of one side.
    pub fn highlights_mut(&mut self, side: DiffSide) -> &mut DestinationSink<Highlight> {
        &mut self.pane_mut(side).highlights
    }

    /// Clear all four sinks.
    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
    }

    /// Whether all four sinks are empty.
    pub fn is_empty(&self) -> bool {
        [&self.left, &self.right]
            .iter()
            .all(|p| p.blocks.is_empty() && p.highlights.is_empty())
    }

    /// Block count of the longer side.
    pub fn row_count(&self) -> usize {
        self.left.blocks.len().max(self.right.blocks.len())
    }

    /// Apply the same selection color to both sides.
    pub fn set_selection_highlight(&mut self, color: Color) {
        self.left.selection_highlight = color;
        self.right.selection_highlight = color;
    }
}
