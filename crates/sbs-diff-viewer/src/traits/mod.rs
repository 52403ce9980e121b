//! Extension traits for customizing viewer behavior.

mod scroll_sync;
mod theme_provider;

pub use scroll_sync::{LockstepScroll, ScrollOffsets, ScrollSynchronizer};
pub use theme_provider::{DefaultTheme, ThemeProvider};
