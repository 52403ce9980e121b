//! Ratatui widgets for the side-by-side viewer.

mod side_by_side;

pub use side_by_side::{FooterHint, SideBySideWidget};
