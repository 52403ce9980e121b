use anyhow::{Context, Result};
use clap::Parser;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use sbs_diff_config::AppConfig;
use sbs_diff_viewer::{
    DefaultTheme, FooterHint, SideBySideDiffViewer, SideBySideWidget, ThemeMode, ThemeSettings,
    ViewerAction, ViewerEvent,
};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

mod logger;
mod settings;

#[derive(Parser, Debug)]
#[command(name = "sbs-diff")]
#[command(author, version, about = "A side-by-side diff viewer")]
struct Args {
    /// Original file
    left: PathBuf,

    /// Changed file
    right: PathBuf,

    /// Theme mode: dark or light
    #[arg(long, value_enum)]
    theme: Option<CliThemeMode>,

    /// Accent color (name or #rrggbb)
    #[arg(long)]
    accent: Option<String>,

    /// Config file to use instead of the default lookup
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliThemeMode {
    Dark,
    Light,
}

impl From<CliThemeMode> for ThemeMode {
    fn from(mode: CliThemeMode) -> Self {
        match mode {
            CliThemeMode::Dark => ThemeMode::Dark,
            CliThemeMode::Light => ThemeMode::Light,
        }
    }
}

/// Frame interval while a render is filling in
const BUSY_POLL: Duration = Duration::from_millis(16);
/// Frame interval once everything is shown
const IDLE_POLL: Duration = Duration::from_millis(100);

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_file = logger::init()?;

    log::info!("Starting sbs-diff, logging to {}", log_file.display());

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };

    let left = read_input(&args.left)?;
    let right = read_input(&args.right)?;

    let theme = ThemeSettings::new(settings::theme_state(
        &config,
        args.theme.map(ThemeMode::from),
        args.accent.as_deref(),
    )?);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let mut viewer = SideBySideDiffViewer::with_renderer(
        settings::renderer(&config)?,
        runtime.handle().clone(),
        &theme,
    )
    .with_options(settings::render_options(&config)?)
    .with_keymap(settings::keymap(&config));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    viewer.focus();
    viewer.render_diff(&left, &right);

    let titles = (
        args.left.display().to_string(),
        args.right.display().to_string(),
    );
    let result = run_app(&mut terminal, &mut viewer, &titles);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    viewer.dispose();
    runtime.shutdown_timeout(Duration::from_millis(100));

    log::info!("Exiting sbs-diff");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    viewer: &mut SideBySideDiffViewer,
    titles: &(String, String),
) -> Result<()> {
    let hints = footer_hints(viewer);

    loop {
        viewer.pump();

        terminal.draw(|frame| {
            let area = frame.area();
            // Two border rows
            let height = area.height.saturating_sub(2);
            if height != viewer.viewport_height() {
                viewer.handle_action(ViewerAction::SetViewport { height });
            }

            let widget = SideBySideWidget::new(viewer.panes(), &DefaultTheme)
                .with_titles(titles.0.as_str(), titles.1.as_str())
                .with_footer_hints(hints.clone());
            frame.render_widget(widget, area);
        })?;

        let timeout = if viewer.is_rendering() {
            BUSY_POLL
        } else {
            IDLE_POLL
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press
                    && viewer.handle_key(key) == Some(ViewerEvent::CloseRequested)
                {
                    log::debug!("Close requested");
                    break;
                }
            }
        }
    }

    Ok(())
}

fn footer_hints(viewer: &SideBySideDiffViewer) -> Vec<FooterHint> {
    [
        (ViewerAction::ScrollDown, "Down"),
        (ViewerAction::ScrollUp, "Up"),
        (ViewerAction::PageDown, "Page"),
        (ViewerAction::SwitchFocus, "Focus"),
        (ViewerAction::Close, "Close"),
    ]
    .into_iter()
    .filter_map(|(action, description)| {
        viewer
            .keymap()
            .compact_hint(action)
            .map(|key| FooterHint::new(key, description))
    })
    .collect()
}
