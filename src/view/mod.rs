//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod dialogue_pane;
mod layout;
mod styles;

pub use dialogue_pane::DialoguePane;
pub use layout::{calculate_areas, render_layout, status_text, ScreenAreas};
pub use styles::{avatar_badge, glyph_symbol, initials, ColorConfig, DialogueStyles, FALLBACK_GLYPH};

use crate::catalog::AssetLoader;
use crate::config::keybindings::KeyBindings;
use crate::config::ResolvedConfig;
use crate::model::{AppError, KeyAction};
use crate::source::DocumentSource;
use crate::view_state::{CellMeasurer, DialogueViewState};
use constants::FALLBACK_WIDTH;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Position, Rect},
    Terminal,
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    view: DialogueViewState,
    key_bindings: KeyBindings,
    loader: Option<AssetLoader>,
    config: ResolvedConfig,
    title: String,
    styles: DialogueStyles,
    /// Last rendered dialogue area (for pointer hit detection)
    last_dialogue_area: Option<Rect>,
    last_tick: Instant,
    /// Elapsed time not yet consumed by a whole inertia frame
    frame_debt: Duration,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture
    pub fn new(view: DialogueViewState, config: ResolvedConfig, title: impl Into<String>) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::with_terminal(terminal, view, config, title))
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Polls at the frame interval so inertia
    /// and asset arrivals keep animating without input.
    pub fn run(&mut self) -> Result<(), TuiError> {
        let frame = self.config.frame_interval().max(Duration::from_millis(1));
        self.draw()?;

        loop {
            let mut dirty = false;

            if event::poll(frame)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        dirty = true;
                    }
                    Event::Mouse(mouse) => dirty |= self.handle_mouse(mouse),
                    Event::Resize(width, height) => {
                        self.handle_resize(width, height);
                        dirty = true;
                    }
                    _ => {}
                }
            }

            let elapsed = self.last_tick.elapsed();
            self.last_tick = Instant::now();
            dirty |= self.advance(elapsed);

            if dirty {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build an app over an already initialized terminal.
    pub fn with_terminal(
        terminal: Terminal<B>,
        view: DialogueViewState,
        config: ResolvedConfig,
        title: impl Into<String>,
    ) -> Self {
        Self {
            terminal,
            view,
            key_bindings: KeyBindings::default(),
            loader: None,
            config,
            title: title.into(),
            styles: DialogueStyles::new(),
            last_dialogue_area: None,
            last_tick: Instant::now(),
            frame_debt: Duration::ZERO,
        }
    }

    /// Receive image resolutions from a background loader.
    pub fn attach_loader(&mut self, loader: AssetLoader) {
        self.loader = Some(loader);
    }

    /// Current view state.
    pub fn view(&self) -> &DialogueViewState {
        &self.view
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match self.key_bindings.get(key) {
            Some(KeyAction::Quit) => true,
            Some(action) => {
                self.view.handle_key_action(action, self.config.wheel_step);
                false
            }
            None => false,
        }
    }

    /// Handle a single mouse event
    ///
    /// Left-button drags inside the dialogue pane scroll with inertia; the
    /// wheel scrolls by the configured step. Returns true if a redraw is needed.
    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let before = self.view.scroll().state();
        let y = f64::from(mouse.row);
        let scroll = self.view.scroll_mut();

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let inside = self
                    .last_dialogue_area
                    .is_some_and(|area| area.contains(Position::new(mouse.column, mouse.row)));
                if inside {
                    scroll.pointer_down(y);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => scroll.pointer_move(y),
            MouseEventKind::Up(MouseButton::Left) => scroll.pointer_up(),
            MouseEventKind::ScrollUp => scroll.wheel(-self.config.wheel_step),
            MouseEventKind::ScrollDown => scroll.wheel(self.config.wheel_step),
            _ => {}
        }

        self.view.scroll().state() != before
    }

    fn handle_resize(&mut self, width: u16, height: u16) {
        debug!("Handling resize to {}x{}", width, height);
        let width = if width > 0 { width } else { FALLBACK_WIDTH };
        let dialogue = calculate_areas(Rect::new(0, 0, width, height)).dialogue;
        self.sync_viewport(dialogue);
    }

    /// Drain loader results and advance inertia by `elapsed`.
    ///
    /// Inertia steps once per whole frame interval; the remainder carries
    /// into the next call, so coasting distance does not depend on how often
    /// the loop wakes.
    ///
    /// Returns true if anything visible changed.
    fn advance(&mut self, elapsed: Duration) -> bool {
        let mut changed = false;

        if let Some(loader) = self.loader.as_mut() {
            let events = loader.poll();
            if !events.is_empty() {
                changed |= self.view.apply_asset_events(events);
            }
            if loader.is_finished() {
                info!(
                    loaded = self.view.catalog().len(),
                    failed = self.view.catalog().failed_count(),
                    "Asset loading finished"
                );
                self.loader = None;
                changed = true;
            }
        }

        if self.view.scroll().is_animating() {
            let interval = self.config.frame_interval().max(Duration::from_millis(1));
            self.frame_debt += elapsed;
            while self.frame_debt >= interval && self.view.scroll().is_animating() {
                self.frame_debt -= interval;
                self.view.tick(1.0);
                changed = true;
            }
        }
        if !self.view.scroll().is_animating() {
            self.frame_debt = Duration::ZERO;
        }

        changed
    }

    fn sync_viewport(&mut self, dialogue: Rect) {
        self.last_dialogue_area = Some(dialogue);
        self.view
            .set_viewport(f64::from(dialogue.width), f64::from(dialogue.height));
    }

    /// Render the current frame
    ///
    /// Syncs the viewport to the dialogue area first so the frame reflects
    /// the real terminal size.
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let frame_area = Rect::new(0, 0, size.width.max(1), size.height);
        self.sync_viewport(calculate_areas(frame_area).dialogue);

        let view = &self.view;
        let title = &self.title;
        let styles = &self.styles;
        self.terminal.draw(|frame| {
            render_layout(frame, view, title, styles);
        })?;

        Ok(())
    }
}

/// Initialize and run the TUI for a document source.
///
/// Loads the document, starts background asset resolution, runs the event
/// loop and restores the terminal even on error.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(source: DocumentSource, config: ResolvedConfig) -> Result<(), TuiError> {
    let set = source.load()?;
    let assets = set.assets().to_vec();
    let view = DialogueViewState::new(set, config.metrics, CellMeasurer, config.scroll);

    let mut app = TuiApp::new(view, config, source.label())?;
    app.attach_loader(AssetLoader::spawn(assets));

    let result = app.run();

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
