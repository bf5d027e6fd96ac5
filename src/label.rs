/// Human-readable labels for tool calls.
///
/// Labels are best-effort: a missing or wrong-typed argument becomes an empty
/// string inside the template, and an unrecognised (tool, command) pair shows
/// the raw tool name.
use serde_json::{Map, Value};

// ── Argument extraction ───────────────────────────────────────────────────────

/// The string inside `value`, or `default` for anything else (absent, number,
/// bool, object…). Never stringifies.
pub fn as_str_or<'a>(value: Option<&'a Value>, default: &'a str) -> &'a str {
    value.and_then(Value::as_str).unwrap_or(default)
}

/// Arguments a label template may reference.
struct LabelArgs<'a> {
    path: &'a str,
    new_path: &'a str,
}

type Template = fn(&LabelArgs<'_>) -> String;

// ── Dispatch table ────────────────────────────────────────────────────────────

const LABELS: &[(&str, &str, Template)] = &[
    ("str_replace_editor", "create",      |a| format!("Creating {}", a.path)),
    ("str_replace_editor", "str_replace", |a| format!("Editing {}", a.path)),
    ("str_replace_editor", "insert",      |a| format!("Editing {}", a.path)),
    ("str_replace_editor", "view",        |a| format!("Viewing {}", a.path)),
    ("str_replace_editor", "undo_edit",   |a| format!("Undoing edit on {}", a.path)),
    ("file_manager",       "rename",      |a| format!("Renaming {} → {}", a.path, a.new_path)),
    ("file_manager",       "delete",      |a| format!("Deleting {}", a.path)),
];

/// Label for a tool call given its name and raw arguments.
pub fn resolve_label(tool_name: &str, arguments: &Map<String, Value>) -> String {
    let command = as_str_or(arguments.get("command"), "");

    let template = LABELS
        .iter()
        .find(|(tool, cmd, _)| *tool == tool_name && *cmd == command)
        .map(|(_, _, t)| *t);

    match template {
        Some(render) => render(&LabelArgs {
            path: as_str_or(arguments.get("path"), ""),
            new_path: as_str_or(arguments.get("new_path"), ""),
        }),
        None => tool_name.to_string(),
    }
}

/// Tools that have at least one labelled command.
pub fn is_known_tool(tool_name: &str) -> bool {
    LABELS.iter().any(|(tool, _, _)| *tool == tool_name)
}
