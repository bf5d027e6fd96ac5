/// Ratatui-based TUI for toolbadge.
///
/// Architecture:
///   reader task:  tokio::spawn — parses snapshot lines, sends FeedEvents over mpsc
///   main task:    event loop — animation ticker + FeedEvent drain + crossterm keys
///
/// Layout:
///   ┌────────────────────────────────────────────────┐
///   │  header (1 line)                               │
///   ├────────────────────────────────────────────────┤
///   │  badge list (scrollable, Min(0))               │
///   ├────────────────────────────────────────────────┤
///   │  status bar (1 line)                           │
///   └────────────────────────────────────────────────┘
pub mod badges;
pub mod render;

use std::io;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tokio::time::{Duration, Interval, MissedTickBehavior};

use crate::badge::Theme;
use crate::config::ResolvedConfig;
use crate::feed::{Applied, Board, FeedEvent, Source};

// Header + status bar around the badge list
const CHROME_ROWS: usize = 2;

// ── App state ─────────────────────────────────────────────────────────────────

pub struct AppState {
    pub board: Board,
    pub theme: Theme,
    pub source: String,
    pub spinner_tick: u32,
    /// Lines scrolled up from the bottom. 0 = follow newest.
    pub scroll: usize,
    /// Rows available to the badge list (terminal height minus header and status bar).
    pub viewport: usize,
    pub feed_closed: bool,
    pub show_timestamps: bool,
}

impl AppState {
    pub fn new(resolved: &ResolvedConfig, source: &Source, show_timestamps: bool) -> Self {
        Self {
            board: Board::new(),
            theme: resolved.theme,
            source: source.describe(),
            spinner_tick: 0,
            scroll: 0,
            viewport: 0,
            feed_closed: false,
            show_timestamps,
        }
    }

    pub fn apply_event(&mut self, ev: FeedEvent) {
        match ev {
            FeedEvent::Snapshot(inv) => {
                let (id, lifecycle) = (inv.id.clone(), inv.lifecycle_state);
                let applied = self.board.apply(inv);
                tracing::debug!(id = %id, state = lifecycle.as_str(), ?applied, "snapshot applied");
                // New rows push the view down; keep a scrolled-up view anchored.
                if applied == Applied::Inserted && self.scroll > 0 {
                    self.scroll = (self.scroll + 1).min(self.max_scroll());
                }
            }
            FeedEvent::Malformed { .. } => self.board.record_malformed(),
            FeedEvent::Closed => self.feed_closed = true,
        }
    }

    /// Spinner only advances while something is still running.
    pub fn is_animating(&self) -> bool {
        self.board.busy_count() > 0
    }

    /// Furthest the view can scroll up before the oldest badge hits the top.
    fn max_scroll(&self) -> usize {
        self.board.len().saturating_sub(self.viewport)
    }

    pub fn set_viewport(&mut self, term_height: u16) {
        self.viewport = (term_height as usize).saturating_sub(CHROME_ROWS);
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn scroll_up(&mut self, n: usize) {
        self.scroll = (self.scroll + n).min(self.max_scroll());
    }

    fn scroll_down(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_sub(n);
    }
}

// ── Terminal setup ────────────────────────────────────────────────────────────

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();
}

// ── Main TUI run loop ─────────────────────────────────────────────────────────

pub async fn run(
    resolved: ResolvedConfig,
    source: Source,
    feed: mpsc::UnboundedReceiver<FeedEvent>,
    show_timestamps: bool,
) -> Result<()> {
    let mut terminal = setup_terminal()?;

    // Panic hook — restore terminal before printing panic
    let orig_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        orig_hook(info);
    }));

    let state = AppState::new(&resolved, &source, show_timestamps);
    let result = event_loop(&mut terminal, state, feed, resolved.tick_ms).await;

    restore_terminal(&mut terminal);
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut state: AppState,
    mut feed: mpsc::UnboundedReceiver<FeedEvent>,
    tick_ms: u64,
) -> Result<()> {
    let mut crossterm_events = EventStream::new();
    let mut ticker = spinner_ticker(tick_ms);

    state.set_viewport(terminal.size()?.height);
    terminal.draw(|f| render::draw(f, &state))?;

    loop {
        tokio::select! {
            // ── Animation tick ────────────────────────────────────────────────
            _ = ticker.tick() => {
                if state.is_animating() {
                    state.spinner_tick = state.spinner_tick.wrapping_add(1);
                    terminal.draw(|f| render::draw(f, &state))?;
                }
            }

            // ── Drain snapshots from the reader task ──────────────────────────
            Some(ev) = feed.recv(), if !state.feed_closed => {
                state.apply_event(ev);
                terminal.draw(|f| render::draw(f, &state))?;
            }

            // ── Keyboard/resize events ────────────────────────────────────────
            Some(Ok(ev)) = crossterm_events.next() => {
                match ev {
                    Event::Key(key) => {
                        if !handle_key(key, &mut state) {
                            break;
                        }
                    }
                    Event::Resize(_, height) => state.set_viewport(height),
                    _ => {}
                }
                terminal.draw(|f| render::draw(f, &state))?;
            }
        }
    }

    tracing::info!(
        calls = state.board.len(),
        done = state.board.done_count(),
        skipped = state.board.skipped(),
        "tui exited"
    );
    Ok(())
}

/// Late ticks are dropped rather than replayed, so a slow draw doesn't make
/// the spinner jump frames.
fn spinner_ticker(tick_ms: u64) -> Interval {
    let mut ticker = tokio::time::interval(Duration::from_millis(tick_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

// ── Key handler ───────────────────────────────────────────────────────────────

/// Returns false when the app should quit.
fn handle_key(key: KeyEvent, state: &mut AppState) -> bool {
    if key.kind != KeyEventKind::Press {
        return true;
    }
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return false,
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => return false,
        (KeyCode::Up, _)       => state.scroll_up(1),
        (KeyCode::Down, _)     => state.scroll_down(1),
        (KeyCode::PageUp, _)   => state.scroll_up(10),
        (KeyCode::PageDown, _) => state.scroll_down(10),
        (KeyCode::End, _)      => state.scroll = 0,
        _ => {}
    }
    true
}
