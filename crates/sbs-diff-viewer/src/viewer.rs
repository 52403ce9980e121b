//! The side-by-side viewer control.
//!
//! [`SideBySideDiffViewer`] owns both panes and the UI queue that background
//! render jobs post into. The host drives it from its UI loop:
//!
//! ```ignore
//! let mut viewer = SideBySideDiffViewer::new(Handle::current(), &theme);
//! viewer.render_diff(&old, &new);
//! loop {
//!     viewer.pump();
//!     terminal.draw(|f| f.render_widget(SideBySideWidget::new(viewer.panes(), &DefaultTheme), f.area()))?;
//!     if let Some(ViewerEvent::CloseRequested) = viewer.handle_key(next_key()?) {
//!         break;
//!     }
//! }
//! ```

use crate::action::ViewerAction;
use crate::diff::{DiffRenderer, LineDiffRenderer};
use crate::event::ViewerEvent;
use crate::keymap::Keymap;
use crate::model::DiffSide;
use crate::render::{
    drive, BatchSchedule, Generation, GenerationToken, JobKind, JobOutcome, RenderError,
    RenderJob, RenderOptions, SinkSelector,
};
use crate::scheduler::UiQueue;
use crate::sink::DiffPanes;
use crate::theme::{ThemeSettings, ThemeState, ThemeSubscription};
use crate::traits::{LockstepScroll, ScrollSynchronizer};
use ratatui::crossterm::event::KeyEvent;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

type JobHandle = JoinHandle<Result<JobOutcome, RenderError>>;

/// Side-by-side diff viewer with incremental population.
pub struct SideBySideDiffViewer<R: DiffRenderer = LineDiffRenderer> {
    renderer: R,
    panes: DiffPanes,
    queue: UiQueue<DiffPanes>,
    generation: Generation,
    runtime: Handle,
    options: RenderOptions,
    theme: Option<ThemeSubscription>,
    theme_state: ThemeState,
    scroll: Box<dyn ScrollSynchronizer>,
    keymap: Keymap,
    viewport_height: u16,
    jobs: Vec<JobHandle>,
}

impl SideBySideDiffViewer<LineDiffRenderer> {
    /// Viewer with the default line diff.
    pub fn new(runtime: Handle, theme: &ThemeSettings) -> Self {
        Self::with_renderer(LineDiffRenderer::default(), runtime, theme)
    }
}

impl<R: DiffRenderer> SideBySideDiffViewer<R> {
    /// Viewer using `renderer` to compute diffs. Jobs are spawned on `runtime`.
    pub fn with_renderer(renderer: R, runtime: Handle, theme: &ThemeSettings) -> Self {
        let subscription = theme.subscribe();
        let theme_state = subscription.current();

        let mut panes = DiffPanes::default();
        panes.set_selection_highlight(theme_state.accent);

        Self {
            renderer,
            panes,
            queue: UiQueue::new(),
            generation: Generation::new(),
            runtime,
            options: RenderOptions::default(),
            theme: Some(subscription),
            theme_state,
            scroll: Box::new(LockstepScroll),
            keymap: Keymap::default(),
            viewport_height: 20, // Updated by the host via SetViewport
            jobs: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    pub fn with_scroll_synchronizer(mut self, scroll: Box<dyn ScrollSynchronizer>) -> Self {
        self.scroll = scroll;
        self
    }

    // === Public operations ===

    /// Show the diff between `left` and `right`.
    ///
    /// Clears both panes, supersedes any render still in flight and starts
    /// one content job and one highlight job in the background. Content
    /// appears as the host keeps calling [`pump`](Self::pump).
    pub fn render_diff(&mut self, left: &str, right: &str) {
        self.apply_theme_changes();
        self.reset();
        let token = self.generation.advance();
        self.jobs.retain(|handle| !handle.is_finished());

        let context = self
            .renderer
            .generate(left, right, self.theme_state.foreground());
        log::debug!(
            "render #{}: {} rows, +{} -{}",
            token.value(),
            context.left.blocks.len(),
            context.insertions,
            context.deletions
        );

        let left_highlights = context.left.text_highlighters();
        let right_highlights = context.right.text_highlighters();

        let content = RenderJob::new(
            JobKind::Content,
            context.left.blocks,
            context.right.blocks,
            &self.options.content,
        );
        let highlights = RenderJob::new(
            JobKind::Highlights,
            left_highlights,
            right_highlights,
            &self.options.highlights,
        );

        let content_handle = self.spawn_job(
            content,
            self.options.content,
            token.clone(),
            DiffPanes::blocks_mut,
        );
        let highlights_handle = self.spawn_job(
            highlights,
            self.options.highlights,
            token,
            DiffPanes::highlights_mut,
        );
        self.jobs.push(content_handle);
        self.jobs.push(highlights_handle);
    }

    /// Drop everything shown and stop any render in flight.
    pub fn clear_cache(&mut self) {
        let token = self.generation.advance();
        log::debug!("cache cleared at generation #{}", token.value());
        self.reset();
    }

    /// Give keyboard focus to the right pane.
    pub fn focus(&mut self) {
        self.panes.focused = Some(DiffSide::Right);
    }

    /// Map a key through the keymap and handle the resulting action.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ViewerEvent> {
        let action = self.keymap.match_key(&key)?;
        self.handle_action(action).into_iter().next()
    }

    /// Handle an action and return the events for the host.
    pub fn handle_action(&mut self, action: ViewerAction) -> Vec<ViewerEvent> {
        let mut events = Vec::new();

        match action {
            ViewerAction::Close => events.push(ViewerEvent::CloseRequested),

            ViewerAction::ScrollDown => self.scroll_by(1),
            ViewerAction::ScrollUp => self.scroll_by(-1),
            ViewerAction::PageDown => self.scroll_by(self.page_size()),
            ViewerAction::PageUp => self.scroll_by(-self.page_size()),
            ViewerAction::ScrollTop => self.scroll_to(self.focused_side(), 0),
            ViewerAction::ScrollBottom => self.scroll_to(self.focused_side(), usize::MAX),

            ViewerAction::SwitchFocus => {
                let side = self.focused_side().opposite();
                self.panes.focused = Some(side);
                events.push(ViewerEvent::FocusChanged(side));
            }
            ViewerAction::Focus => {
                if self.panes.focused != Some(DiffSide::Right) {
                    self.focus();
                    events.push(ViewerEvent::FocusChanged(DiffSide::Right));
                }
            }

            ViewerAction::SetViewport { height } => {
                self.viewport_height = height;
                self.scroll_by(0);
            }
        }

        events
    }

    /// Run pending UI work and apply theme changes. Returns the number of
    /// units that ran.
    pub fn pump(&mut self) -> usize {
        self.apply_theme_changes();
        self.queue.pump(&mut self.panes)
    }

    /// Like [`pump`](Self::pump) but runs at most `budget` units.
    pub fn pump_budget(&mut self, budget: usize) -> usize {
        self.apply_theme_changes();
        self.queue.pump_budget(&mut self.panes, budget)
    }

    /// Whether a render job is still running.
    pub fn is_rendering(&self) -> bool {
        self.jobs.iter().any(|handle| !handle.is_finished())
    }

    /// Pump until every started job has finished and return their outcomes.
    pub async fn settle(&mut self) -> Result<Vec<JobOutcome>, RenderError> {
        while self.is_rendering() || self.queue.pending() > 0 {
            self.pump();
            tokio::task::yield_now().await;
        }

        let mut outcomes = Vec::with_capacity(self.jobs.len());
        for handle in self.jobs.drain(..) {
            outcomes.push(handle.await??);
        }
        Ok(outcomes)
    }

    /// Stop rendering and release the theme subscription.
    pub fn dispose(&mut self) {
        self.generation.advance();
        if self.theme.take().is_some() {
            log::debug!("viewer disposed, theme subscription released");
        }
    }

    // === Accessors ===

    pub fn panes(&self) -> &DiffPanes {
        &self.panes
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn theme_state(&self) -> ThemeState {
        self.theme_state
    }

    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    // === Internals ===

    /// Clear all four sinks. Runs on the UI side before a new job starts.
    fn reset(&mut self) {
        self.panes.clear();
    }

    fn spawn_job<T>(
        &self,
        job: RenderJob<T>,
        schedule: BatchSchedule,
        token: GenerationToken,
        select: SinkSelector<DiffPanes, T>,
    ) -> JobHandle
    where
        T: Clone + Send + Sync + 'static,
    {
        let dispatcher = self.queue.dispatcher();
        let kind = job.kind();

        self.runtime.spawn(async move {
            let result = drive(job, schedule.delay(), token.clone(), dispatcher, select).await;
            if let Err(err) = &result {
                if token.is_current() {
                    log::warn!("{:?} job #{} failed: {}", kind, token.value(), err);
                } else {
                    log::debug!("{:?} job #{} ended after supersede: {}", kind, token.value(), err);
                }
            }
            result
        })
    }

    fn apply_theme_changes(&mut self) {
        let Some(state) = self.theme.as_mut().and_then(ThemeSubscription::take_changed) else {
            return;
        };
        if state.accent != self.theme_state.accent {
            self.panes.set_selection_highlight(state.accent);
        }
        self.theme_state = state;
    }

    fn focused_side(&self) -> DiffSide {
        self.panes.focused.unwrap_or(DiffSide::Right)
    }

    fn page_size(&self) -> isize {
        self.viewport_height.max(1) as isize
    }

    fn max_scroll(&self) -> usize {
        self.panes
            .row_count()
            .saturating_sub(usize::from(self.viewport_height))
    }

    fn scroll_by(&mut self, delta: isize) {
        let side = self.focused_side();
        let current = self.panes.pane(side).scroll_offset;
        let target = current.saturating_add_signed(delta);
        self.scroll_to(side, target);
    }

    fn scroll_to(&mut self, source: DiffSide, offset: usize) {
        let max = self.max_scroll();
        let offsets = self.scroll.sync(source, offset.min(max));
        self.panes.left.scroll_offset = offsets.left.min(max);
        self.panes.right.scroll_offset = offsets.right.min(max);
    }
}

impl<R: DiffRenderer> Drop for SideBySideDiffViewer<R> {
    fn drop(&mut self) {
        self.generation.advance();
    }
}
