//! # sbs-diff-viewer
//!
//! A side-by-side diff viewer control for terminal UIs that never blocks its
//! UI thread, no matter how large the diff.
//!
//! ## Design Principles
//!
//! The viewer computes a diff once and then copies the resulting lines and
//! highlights into its two panes in growing batches (1, 5, 25, ... lines),
//! from background tasks that hand every batch to the UI thread through a
//! cooperative, priority-ordered queue. Keyboard input posted in between
//! runs first. Starting a new render supersedes the old one through a
//! generation counter, so stale batches never land in fresh panes.
//!
//! The viewer is **instrumented**: it emits [`ViewerEvent`]s such as
//! [`ViewerEvent::CloseRequested`] instead of acting on the host.
//!
//! ## Collaborators
//!
//! - [`DiffRenderer`] computes the per-side blocks ([`LineDiffRenderer`] by default)
//! - [`ScrollSynchronizer`] keeps the panes aligned ([`LockstepScroll`])
//! - [`Keymap`] maps keys to [`ViewerAction`]s
//! - [`ThemeSettings`] feeds accent and mode through a [`ThemeSubscription`]
//! - [`ThemeProvider`] colors the [`SideBySideWidget`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sbs_diff_viewer::{DefaultTheme, SideBySideDiffViewer, SideBySideWidget, ThemeSettings, ViewerEvent};
//!
//! let theme = ThemeSettings::default();
//! let mut viewer = SideBySideDiffViewer::new(tokio::runtime::Handle::current(), &theme);
//! viewer.render_diff(&old_text, &new_text);
//!
//! // In the UI loop
//! viewer.pump();
//! frame.render_widget(SideBySideWidget::new(viewer.panes(), &DefaultTheme), area);
//! if viewer.handle_key(key) == Some(ViewerEvent::CloseRequested) {
//!     // leave the viewer
//! }
//! ```

pub mod action;
pub mod diff;
pub mod event;
pub mod keymap;
pub mod model;
pub mod render;
pub mod scheduler;
pub mod sink;
pub mod theme;
pub mod traits;
pub mod viewer;
pub mod widget;

// Re-export commonly used types
pub use action::ViewerAction;
pub use diff::{DiffRenderer, LineDiffRenderer};
pub use event::ViewerEvent;
pub use keymap::{parse_key_pattern, KeyBinding, Keymap};
pub use model::{
    DiffContext, DiffSide, DisplayBlock, Highlight, HighlightKind, LineKind, SideContext,
};
pub use render::{BatchSchedule, JobOutcome, RenderError, RenderOptions, ScheduleError};
pub use scheduler::{Priority, SchedulerError, UiDispatcher, UiQueue};
pub use sink::{DestinationSink, DiffPane, DiffPanes};
pub use theme::{ThemeMode, ThemeSettings, ThemeState, ThemeSubscription};
pub use traits::{DefaultTheme, LockstepScroll, ScrollOffsets, ScrollSynchronizer, ThemeProvider};
pub use viewer::SideBySideDiffViewer;
pub use widget::{FooterHint, SideBySideWidget};
