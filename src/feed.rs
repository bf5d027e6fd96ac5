/// Snapshot feed: newline-delimited ToolInvocation JSON from a file or stdin,
/// folded into a board holding the latest snapshot per call id.
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::io::BufRead;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::badge::Badge;
use crate::invocation::ToolInvocation;

// ── Source ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// `-` means stdin.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Source::Stdin
        } else {
            Source::File(PathBuf::from(arg))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Source::Stdin => "stdin".to_string(),
            Source::File(p) => p.display().to_string(),
        }
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> Result<Option<ToolInvocation>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .context("Malformed tool invocation snapshot")
}

// ── Reader task ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum FeedEvent {
    Snapshot(ToolInvocation),
    Malformed { line_no: usize, error: String },
    /// Input ended (EOF or read error). No more events follow.
    Closed,
}

/// Turn one raw input line into an event. `None` for blank lines.
fn line_event(line_no: usize, raw: Vec<u8>) -> Option<FeedEvent> {
    let parsed = String::from_utf8(raw)
        .context("Snapshot line is not valid UTF-8")
        .and_then(|line| parse_line(&line));
    match parsed {
        Ok(Some(inv)) => Some(FeedEvent::Snapshot(inv)),
        Ok(None) => None,
        Err(e) => {
            let error = format!("{e:#}");
            tracing::warn!(line_no, error = %error, "skipping malformed snapshot");
            Some(FeedEvent::Malformed { line_no, error })
        }
    }
}

/// Read lines until EOF, forwarding each as a FeedEvent. Stops early if the
/// receiver is gone. Only IO errors end the feed; bad lines are skipped.
pub async fn pump<R>(reader: R, tx: mpsc::UnboundedSender<FeedEvent>)
where
    R: AsyncBufRead + Unpin,
{
    let mut segments = AsyncBufReadExt::split(reader, b'\n');
    let mut line_no = 0usize;
    loop {
        let raw = match segments.next_segment().await {
            Ok(Some(raw)) => raw,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "snapshot feed read failed");
                break;
            }
        };
        line_no += 1;

        let Some(event) = line_event(line_no, raw) else { continue };
        if tx.send(event).is_err() {
            return;
        }
    }
    tracing::info!(lines = line_no, "snapshot feed closed");
    let _ = tx.send(FeedEvent::Closed);
}

/// Blocking twin of `pump` for readers that can't be cancelled (stdin).
pub fn pump_blocking<R>(reader: R, tx: mpsc::UnboundedSender<FeedEvent>)
where
    R: BufRead,
{
    let mut line_no = 0usize;
    for raw in BufRead::split(reader, b'\n') {
        let raw = match raw {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(error = %e, "snapshot feed read failed");
                break;
            }
        };
        line_no += 1;

        let Some(event) = line_event(line_no, raw) else { continue };
        if tx.send(event).is_err() {
            return;
        }
    }
    tracing::info!(lines = line_no, "snapshot feed closed");
    let _ = tx.send(FeedEvent::Closed);
}

/// Open `source` and start a reader for it. Opening errors are returned
/// here; everything after that arrives as events.
///
/// Stdin is read on a detached OS thread: a blocking read on an idle pipe
/// would otherwise hold up runtime shutdown after the TUI quits.
pub async fn spawn_reader(source: &Source) -> Result<mpsc::UnboundedReceiver<FeedEvent>> {
    let (tx, rx) = mpsc::unbounded_channel();
    match source {
        Source::Stdin => {
            std::thread::Builder::new()
                .name("stdin-feed".to_string())
                .spawn(move || pump_blocking(std::io::stdin().lock(), tx))
                .context("Failed to start stdin reader thread")?;
        }
        Source::File(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open snapshot file {}", path.display()))?;
            tokio::spawn(pump(BufReader::new(file), tx));
        }
    }
    Ok(rx)
}

// ── Board ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Entry {
    pub invocation: ToolInvocation,
    pub badge: Badge,
    pub updated_at: DateTime<Local>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Inserted,
    Updated,
}

/// Latest snapshot per call id, in first-seen order. Lives for one run only.
#[derive(Debug, Default)]
pub struct Board {
    entries: Vec<Entry>,
    by_id: HashMap<String, usize>,
    skipped: usize,
    last_update: Option<DateTime<Local>>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, invocation: ToolInvocation) -> Applied {
        let now = Local::now();
        self.last_update = Some(now);
        let entry = Entry {
            badge: Badge::from_invocation(&invocation),
            invocation,
            updated_at: now,
        };

        // Empty ids can't be grouped; each one is its own call.
        if !entry.invocation.id.is_empty() {
            if let Some(&idx) = self.by_id.get(&entry.invocation.id) {
                self.entries[idx] = entry;
                return Applied::Updated;
            }
            self.by_id.insert(entry.invocation.id.clone(), self.entries.len());
        }
        self.entries.push(entry);
        Applied::Inserted
    }

    pub fn record_malformed(&mut self) {
        self.skipped += 1;
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn done_count(&self) -> usize {
        self.entries.iter().filter(|e| e.badge.is_done()).count()
    }

    pub fn busy_count(&self) -> usize {
        self.len() - self.done_count()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }
}
