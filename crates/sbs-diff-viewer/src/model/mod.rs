//! Data models for the side-by-side view.

mod block;
mod context;

pub use block::{DiffSide, DisplayBlock, Highlight, HighlightKind, LineKind};
pub use context::{DiffContext, SideContext};
