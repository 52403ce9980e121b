//! Diff computation collaborator.

mod renderer;

pub use renderer::{DiffRenderer, LineDiffRenderer};
