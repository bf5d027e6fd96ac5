/// Tool invocation snapshots as emitted by the upstream chat stream.
///
/// Wire shape (one JSON object per snapshot):
///   {"toolCallId": "tc1", "toolName": "str_replace_editor",
///    "args": {"command": "create", "path": "/App.jsx"},
///    "state": "result", "result": "Success"}
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ── Lifecycle ─────────────────────────────────────────────────────────────────

/// Where a tool call is in its life. The stream moves partial → call → result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    /// Arguments are still streaming in
    #[serde(rename = "partial-call", alias = "pending-partial")]
    PartialCall,
    /// Arguments complete, tool is running
    #[serde(rename = "call", alias = "pending-call")]
    Call,
    /// Tool has returned
    #[serde(rename = "result", alias = "completed")]
    Result,
}

impl LifecycleState {
    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleState::PartialCall => "partial-call",
            LifecycleState::Call        => "call",
            LifecycleState::Result      => "result",
        }
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Opaque call id. Only used to group snapshots of the same call.
    #[serde(rename = "toolCallId", alias = "id", default)]
    pub id: String,
    #[serde(rename = "toolName")]
    pub tool_name: String,
    /// Untyped argument bag, never schema-checked.
    #[serde(
        rename = "args",
        alias = "arguments",
        default,
        deserialize_with = "object_or_empty"
    )]
    pub arguments: Map<String, Value>,
    #[serde(rename = "state")]
    pub lifecycle_state: LifecycleState,
    /// `None` covers both a missing key and an explicit `null`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl ToolInvocation {
    /// True when the tool returned an actual payload. Falsy payloads
    /// (`false`, `0`, `""`) still count.
    pub fn has_result(&self) -> bool {
        self.result.as_ref().is_some_and(|v| !v.is_null())
    }
}

/// Anything that isn't a JSON object becomes an empty argument map.
fn object_or_empty<'de, D>(de: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(de)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_wire_names() {
        let inv: ToolInvocation = serde_json::from_value(json!({
            "toolCallId": "tc1",
            "toolName": "str_replace_editor",
            "args": { "command": "create", "path": "/App.jsx" },
            "state": "partial-call"
        }))
        .unwrap();
        assert_eq!(inv.id, "tc1");
        assert_eq!(inv.tool_name, "str_replace_editor");
        assert_eq!(inv.lifecycle_state, LifecycleState::PartialCall);
        assert_eq!(inv.arguments["path"], json!("/App.jsx"));
        assert!(inv.result.is_none());
    }

    #[test]
    fn test_accepts_descriptive_state_aliases() {
        for (raw, expected) in [
            ("pending-partial", LifecycleState::PartialCall),
            ("pending-call", LifecycleState::Call),
            ("completed", LifecycleState::Result),
        ] {
            let inv: ToolInvocation = serde_json::from_value(json!({
                "toolName": "x", "state": raw
            }))
            .unwrap();
            assert_eq!(inv.lifecycle_state, expected);
        }
    }

    #[test]
    fn test_null_result_is_absent() {
        let inv: ToolInvocation = serde_json::from_value(json!({
            "toolName": "x", "state": "result", "result": null
        }))
        .unwrap();
        assert!(!inv.has_result());
    }

    #[test]
    fn test_falsy_result_is_present() {
        for payload in [json!(false), json!(0), json!(""), json!([])] {
            let inv: ToolInvocation = serde_json::from_value(json!({
                "toolName": "x", "state": "result", "result": payload
            }))
            .unwrap();
            assert!(inv.has_result(), "payload should count as present");
        }
    }

    #[test]
    fn test_non_object_args_become_empty() {
        let inv: ToolInvocation = serde_json::from_value(json!({
            "toolName": "x", "args": "oops", "state": "call"
        }))
        .unwrap();
        assert!(inv.arguments.is_empty());
    }

    #[test]
    fn test_missing_args_and_id_default() {
        let inv: ToolInvocation = serde_json::from_value(json!({
            "toolName": "x", "state": "call"
        }))
        .unwrap();
        assert!(inv.id.is_empty());
        assert!(inv.arguments.is_empty());
    }

    #[test]
    fn test_unknown_state_rejected() {
        let res: Result<ToolInvocation, _> = serde_json::from_value(json!({
            "toolName": "x", "state": "finished"
        }));
        assert!(res.is_err());
    }
}
