/// UI helpers shared between the TUI and plain-stdout modes.
use unicode_width::UnicodeWidthChar;

// ── Indicators ────────────────────────────────────────────────────────────────

pub const SPINNER_GLYPHS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub const DONE_DOT: &str = "●";

pub fn spinner_glyph(tick: u32) -> &'static str {
    SPINNER_GLYPHS[(tick as usize) % SPINNER_GLYPHS.len()]
}

// ── Text ──────────────────────────────────────────────────────────────────────

/// Cut `s` to at most `max_cols` terminal columns, ending in `…` when cut.
pub fn truncate_cols(s: &str, max_cols: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_cols {
        return s.to_string();
    }
    if max_cols == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_cols - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
