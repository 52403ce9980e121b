//! Events emitted by the viewer for the host application to handle.

use crate::model::DiffSide;

/// Events emitted by the side-by-side viewer.
///
/// The viewer never closes itself or touches the host's layout; it emits an
/// event and lets the host decide.
///
/// # Example
///
/// ```ignore
/// if let Some(ViewerEvent::CloseRequested) = viewer.handle_key(key) {
///     current_view = View::FileList;
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    /// User wants to close the viewer (Escape or Ctrl+D).
    CloseRequested,

    /// Keyboard focus moved to another pane.
    FocusChanged(DiffSide),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_has_no_payload() {
        assert_eq!(ViewerEvent::CloseRequested, ViewerEvent::CloseRequested);
        assert_ne!(
            ViewerEvent::CloseRequested,
            ViewerEvent::FocusChanged(DiffSide::Right)
        );
    }
}
