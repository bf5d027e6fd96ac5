/// Status badge for a single tool invocation: a label plus a busy spinner or a
/// done dot.
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::invocation::{LifecycleState, ToolInvocation};
use crate::label::{is_known_tool, resolve_label};
use crate::ui::{DONE_DOT, spinner_glyph};

// ── Display mode ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Still running, or completed without a payload yet
    Busy,
    /// Completed with a result payload
    Done,
}

impl DisplayMode {
    /// The state label alone isn't enough: a `result` snapshot with no payload
    /// is still busy.
    pub fn of(inv: &ToolInvocation) -> Self {
        match inv.lifecycle_state {
            LifecycleState::Result if inv.has_result() => DisplayMode::Done,
            _ => DisplayMode::Busy,
        }
    }
}

// ── Theme ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub busy: Color,
    pub done: Color,
    pub label: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            busy: Color::Blue,
            done: Color::Green,
            label: Color::Gray,
        }
    }
}

// ── Badge ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub mode: DisplayMode,
}

impl Badge {
    pub fn from_invocation(inv: &ToolInvocation) -> Self {
        let label = resolve_label(&inv.tool_name, &inv.arguments);
        if label == inv.tool_name && is_known_tool(&inv.tool_name) {
            tracing::debug!(
                tool = %inv.tool_name,
                command = ?inv.arguments.get("command"),
                "no label for command, showing tool name"
            );
        }
        Self { label, mode: DisplayMode::of(inv) }
    }

    pub fn is_done(&self) -> bool {
        self.mode == DisplayMode::Done
    }

    /// Indicator glyph for this frame. Done badges ignore the tick.
    pub fn indicator(&self, tick: u32) -> &'static str {
        match self.mode {
            DisplayMode::Busy => spinner_glyph(tick),
            DisplayMode::Done => DONE_DOT,
        }
    }

    /// Plain-text rendering for non-TUI output.
    pub fn plain(&self, tick: u32) -> String {
        format!("{} {}", self.indicator(tick), self.label)
    }

    /// Chip-style TUI line: `[ ⠋ Creating /App.jsx ]`.
    pub fn line(&self, tick: u32, theme: &Theme) -> Line<'static> {
        let edge = Style::default().fg(Color::DarkGray);
        let indicator_style = match self.mode {
            DisplayMode::Busy => Style::default().fg(theme.busy),
            DisplayMode::Done => Style::default().fg(theme.done).add_modifier(Modifier::BOLD),
        };
        Line::from(vec![
            Span::raw("  "),
            Span::styled("[ ", edge),
            Span::styled(self.indicator(tick), indicator_style),
            Span::raw(" "),
            Span::styled(self.label.clone(), Style::default().fg(theme.label)),
            Span::styled(" ]", edge),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn inv(state: LifecycleState, result: Option<Value>) -> ToolInvocation {
        ToolInvocation {
            id: "tc1".to_string(),
            tool_name: "str_replace_editor".to_string(),
            arguments: json!({"command": "create", "path": "/App.jsx"})
                .as_object()
                .cloned()
                .unwrap(),
            lifecycle_state: state,
            result,
        }
    }

    #[test]
    fn test_pending_states_are_busy_regardless_of_result() {
        for state in [LifecycleState::PartialCall, LifecycleState::Call] {
            assert_eq!(DisplayMode::of(&inv(state, None)), DisplayMode::Busy);
            assert_eq!(DisplayMode::of(&inv(state, Some(json!("Success")))), DisplayMode::Busy);
        }
    }

    #[test]
    fn test_result_without_payload_is_busy() {
        assert_eq!(DisplayMode::of(&inv(LifecycleState::Result, None)), DisplayMode::Busy);
        assert_eq!(DisplayMode::of(&inv(LifecycleState::Result, Some(Value::Null))), DisplayMode::Busy);
    }

    #[test]
    fn test_result_with_payload_is_done() {
        for payload in [json!("Success"), json!({"success": true}), json!(false), json!(0), json!("")] {
            assert_eq!(DisplayMode::of(&inv(LifecycleState::Result, Some(payload))), DisplayMode::Done);
        }
    }

    #[test]
    fn test_badge_embeds_label() {
        let badge = Badge::from_invocation(&inv(LifecycleState::Call, None));
        assert_eq!(badge.label, "Creating /App.jsx");
        assert_eq!(badge.mode, DisplayMode::Busy);
    }

    #[test]
    fn test_fallback_label_still_renders() {
        let mut i = inv(LifecycleState::Result, Some(json!("done")));
        i.tool_name = "mystery_tool".to_string();
        let badge = Badge::from_invocation(&i);
        assert_eq!(badge.plain(0), "● mystery_tool");
    }

    #[test]
    fn test_busy_spins_done_is_static() {
        let busy = Badge::from_invocation(&inv(LifecycleState::Call, None));
        assert_ne!(busy.indicator(0), busy.indicator(1));
        assert_eq!(busy.plain(0), "⠋ Creating /App.jsx");

        let done = Badge::from_invocation(&inv(LifecycleState::Result, Some(json!("ok"))));
        assert_eq!(done.indicator(0), DONE_DOT);
        assert_eq!(done.indicator(7), DONE_DOT);
    }

    #[test]
    fn test_line_uses_theme_colours() {
        let theme = Theme::default();
        let done = Badge::from_invocation(&inv(LifecycleState::Result, Some(json!("ok"))));
        let line = done.line(0, &theme);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "  [ ● Creating /App.jsx ]");
        assert_eq!(line.spans[2].style.fg, Some(theme.done));

        let busy = Badge::from_invocation(&inv(LifecycleState::PartialCall, None));
        assert_eq!(busy.line(3, &theme).spans[2].style.fg, Some(theme.busy));
    }
}
