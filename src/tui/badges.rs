/// Badge list pane: one chip per tool call, newest at the bottom.
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem},
};

use super::AppState;
use crate::ui::truncate_cols;

// "  [ ⠋ " + " ]" around the label
const CHIP_CHROME_COLS: usize = 8;

pub fn build_items(state: &AppState, term_width: u16) -> Vec<ListItem<'static>> {
    if state.board.is_empty() {
        let hint = if state.feed_closed {
            "no tool calls in input"
        } else {
            "waiting for tool calls…"
        };
        return vec![ListItem::new(Line::from(Span::styled(
            format!("  {hint}"),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )))];
    }

    let max_label = (term_width as usize).saturating_sub(CHIP_CHROME_COLS).max(8);
    state
        .board
        .entries()
        .iter()
        .map(|entry| {
            let mut badge = entry.badge.clone();
            badge.label = truncate_cols(&badge.label, max_label);
            let mut line = badge.line(state.spinner_tick, &state.theme);
            if state.show_timestamps {
                line.spans.push(Span::styled(
                    format!("  {}", entry.updated_at.format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(line)
        })
        .collect()
}

pub fn draw_badges(f: &mut Frame, state: &AppState, area: Rect) {
    let all_items = build_items(state, area.width);
    let total = all_items.len();
    let visible = area.height as usize;

    let skip = if total > visible {
        (total - visible).saturating_sub(state.scroll)
    } else {
        0
    };

    let sliced: Vec<ListItem<'static>> = all_items.into_iter().skip(skip).collect();
    let list = List::new(sliced)
        .block(Block::default().style(Style::default().bg(Color::Rgb(8, 8, 14))));
    f.render_widget(list, area);
}
