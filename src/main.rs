mod badge;
mod config;
mod feed;
mod invocation;
mod label;
mod logging;
mod prompt;
mod tui;
mod ui;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use config::{ConfigFile, ResolvedConfig};
use feed::{Board, FeedEvent, Source};
use serde_json::{Map, Value};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "toolbadge",
    about = "Live status badges for coding-agent tool calls",
    long_about = None,
)]
struct Args {
    /// Snapshot file (one tool invocation JSON per line), or - for stdin
    #[arg(default_value = "-")]
    input: String,

    /// Print badges to stdout instead of starting the TUI
    #[arg(long)]
    plain: bool,

    /// With --plain: print only the final state of each call once input ends
    #[arg(long = "final", requires = "plain")]
    final_only: bool,

    /// Resolve the label for a single tool call and exit
    #[arg(long, value_name = "TOOL")]
    label: Option<String>,

    /// JSON object of arguments for --label
    #[arg(long, value_name = "JSON", requires = "label")]
    args: Option<String>,

    /// Print the app-builder generation prompt and exit
    #[arg(long)]
    prompt: bool,

    /// Spinner frame period in milliseconds
    #[arg(long, env = "TOOLBADGE_TICK_MS")]
    tick_ms: Option<u64>,

    /// Show the arrival time of each snapshot
    #[arg(long)]
    timestamps: bool,

    /// Write JSON logs to this file
    #[arg(long, env = "TOOLBADGE_LOG", value_name = "FILE")]
    log: Option<PathBuf>,

    /// Write a default config file to ~/.config/toolbadge/config.toml and exit
    #[arg(long)]
    init: bool,

    /// Generate shell completions and print to stdout (bash, zsh, fish, elvish)
    #[arg(long, value_name = "SHELL")]
    completions: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = match &args.log {
        Some(path) => Some(logging::init(path)?),
        None => None,
    };

    // ── --init ────────────────────────────────────────────────────────────────
    if args.init {
        let path = ConfigFile::write_default_if_missing()?;
        println!("Config written to: {}", path.display());
        return Ok(());
    }

    // ── --completions ─────────────────────────────────────────────────────────
    if let Some(shell_name) = &args.completions {
        return generate_completions(shell_name);
    }

    // ── --prompt ──────────────────────────────────────────────────────────────
    if args.prompt {
        print!("{}", prompt::GENERATION_PROMPT);
        return Ok(());
    }

    // ── --label ───────────────────────────────────────────────────────────────
    if let Some(tool) = &args.label {
        let arguments = parse_args_json(args.args.as_deref())?;
        println!("{}", label::resolve_label(tool, &arguments));
        return Ok(());
    }

    let file = ConfigFile::load()?;
    let resolved = ResolvedConfig::resolve(&file, args.tick_ms);
    let source = Source::from_arg(&args.input);
    tracing::info!(source = %source.describe(), tick_ms = resolved.tick_ms, plain = args.plain, "starting");

    if !args.plain && source == Source::Stdin && std::io::stdin().is_terminal() {
        bail!("No snapshot input: pipe tool invocations into stdin or pass a file path");
    }

    let feed = feed::spawn_reader(&source).await?;

    if args.plain {
        let (mut out, mut err) = (std::io::stdout().lock(), std::io::stderr().lock());
        return run_plain(feed, args.final_only, &mut out, &mut err).await;
    }

    tui::run(resolved, source, feed, args.timestamps).await
}

// ── Plain mode (stdout, no TUI) ───────────────────────────────────────────────

async fn run_plain<W: Write, E: Write>(
    mut feed: tokio::sync::mpsc::UnboundedReceiver<FeedEvent>,
    final_only: bool,
    out: &mut W,
    err: &mut E,
) -> Result<()> {
    let mut board = Board::new();

    while let Some(ev) = feed.recv().await {
        match ev {
            FeedEvent::Snapshot(inv) => {
                if !final_only {
                    // No animation on stdout; busy badges show the first frame.
                    writeln!(out, "{}", badge::Badge::from_invocation(&inv).plain(0))?;
                }
                board.apply(inv);
            }
            FeedEvent::Malformed { line_no, error } => {
                board.record_malformed();
                writeln!(err, "  line {line_no}: {error}")?;
            }
            FeedEvent::Closed => break,
        }
    }

    if final_only {
        for entry in board.entries() {
            writeln!(out, "{}", entry.badge.plain(0))?;
        }
    }
    if board.skipped() > 0 {
        writeln!(err, "  {} malformed line(s) skipped", board.skipped())?;
    }
    out.flush()?;
    Ok(())
}

/// `--args` must be a JSON object; absent means no arguments.
fn parse_args_json(raw: Option<&str>) -> Result<Map<String, Value>> {
    let Some(raw) = raw else {
        return Ok(Map::new());
    };
    match serde_json::from_str::<Value>(raw).context("--args is not valid JSON")? {
        Value::Object(map) => Ok(map),
        other => bail!("--args must be a JSON object, got: {other}"),
    }
}

// ── Shell completions ─────────────────────────────────────────────────────────

fn generate_completions(shell_name: &str) -> Result<()> {
    use clap_complete::{Shell, generate};

    let shell = match shell_name.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "elvish" => Shell::Elvish,
        "powershell" | "pwsh" => Shell::PowerShell,
        other => bail!("Unknown shell: {other}. Supported: bash, zsh, fish, elvish, powershell"),
    };

    let mut cmd = Args::command();
    generate(shell, &mut cmd, "toolbadge", &mut std::io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_args_json() {
        assert!(parse_args_json(None).unwrap().is_empty());
        let map = parse_args_json(Some(r#"{"command":"view","path":"/a"}"#)).unwrap();
        assert_eq!(label::resolve_label("str_replace_editor", &map), "Viewing /a");
        assert!(parse_args_json(Some("[1,2]")).is_err());
        assert!(parse_args_json(Some("{oops")).is_err());
    }

    const SESSION: &[u8] = b"{\"toolCallId\":\"1\",\"toolName\":\"str_replace_editor\",\"args\":{\"command\":\"create\",\"path\":\"/App.jsx\"},\"state\":\"call\"}\n\
        {\"toolCallId\":\"2\",\"toolName\":\"file_manager\",\"args\":{\"command\":\"delete\",\"path\":\"/old.tsx\"},\"state\":\"partial-call\"}\n\
        not json\n\
        {\"toolCallId\":\"1\",\"toolName\":\"str_replace_editor\",\"args\":{\"command\":\"create\",\"path\":\"/App.jsx\"},\"state\":\"result\",\"result\":\"Success\"}\n\
        {\"toolCallId\":\"2\",\"toolName\":\"file_manager\",\"args\":{\"command\":\"delete\",\"path\":\"/old.tsx\"},\"state\":\"result\"}\n";

    async fn plain_output(final_only: bool) -> (String, String) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        feed::pump(SESSION, tx).await;
        let (mut out, mut err) = (Vec::new(), Vec::new());
        run_plain(rx, final_only, &mut out, &mut err).await.unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[tokio::test]
    async fn test_plain_prints_every_snapshot() {
        let (out, err) = plain_output(false).await;
        assert_eq!(
            out,
            "⠋ Creating /App.jsx\n\
             ⠋ Deleting /old.tsx\n\
             ● Creating /App.jsx\n\
             ⠋ Deleting /old.tsx\n"
        );
        assert!(err.contains("line 3:"));
        assert!(err.contains("1 malformed line(s) skipped"));
    }

    #[tokio::test]
    async fn test_plain_final_prints_latest_state_per_call() {
        let (out, err) = plain_output(true).await;
        // first-seen order; call 2 completed without a result so stays busy
        assert_eq!(out, "● Creating /App.jsx\n⠋ Deleting /old.tsx\n");
        assert!(err.contains("1 malformed line(s) skipped"));
    }

    #[tokio::test]
    async fn test_plain_clean_input_has_no_summary() {
        let input: &[u8] = b"{\"toolName\":\"mystery_tool\",\"state\":\"result\",\"result\":0}\n";
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        feed::pump(input, tx).await;
        let (mut out, mut err) = (Vec::new(), Vec::new());
        run_plain(rx, false, &mut out, &mut err).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "● mystery_tool\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_unknown_shell_rejected() {
        assert!(generate_completions("tcsh").is_err());
    }
}
