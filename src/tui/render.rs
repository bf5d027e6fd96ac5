/// Ratatui draw entry-point for toolbadge.
/// Thin dispatcher — the badge list lives in badges.rs.
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::AppState;
use crate::ui::DONE_DOT;

// ── Main draw entry point ─────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(0),    // badge list
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    draw_header(f, state, chunks[0]);
    super::badges::draw_badges(f, state, chunks[1]);
    draw_status_bar(f, state, chunks[2]);
}

// ── Header ────────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, state: &AppState, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            " ▲ toolbadge",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
        Span::styled(state.source.clone(), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

// ── Status bar ────────────────────────────────────────────────────────────────

fn draw_status_bar(f: &mut Frame, state: &AppState, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let board = &state.board;

    let mut spans = vec![
        Span::styled(format!(" {} busy", board.busy_count()), Style::default().fg(state.theme.busy)),
        Span::styled("  ·  ", dim),
        Span::styled(
            format!("{DONE_DOT} {} done", board.done_count()),
            Style::default().fg(state.theme.done),
        ),
    ];
    if board.skipped() > 0 {
        spans.push(Span::styled("  ·  ", dim));
        spans.push(Span::styled(
            format!("{} skipped", board.skipped()),
            Style::default().fg(Color::Yellow),
        ));
    }
    if state.feed_closed {
        spans.push(Span::styled("  ·  stream closed", dim));
    }
    if state.show_timestamps {
        if let Some(ts) = board.last_update() {
            spans.push(Span::styled(format!("  ·  last {}", ts.format("%H:%M:%S")), dim));
        }
    }
    if state.scroll > 0 {
        spans.push(Span::styled(format!("  ·  ↑{} (End to follow)", state.scroll), dim));
    }
    spans.push(Span::styled("  ·  q quit", dim));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
