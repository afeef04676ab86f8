use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Activation action carried by a rendered row. Decoded once from the
/// host's raw payload rather than dispatched on a loosely-typed map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ItemAction {
    /// Toggle the connection, carrying the query to re-render afterward.
    Toggle {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        query: Option<String>,
    },
    /// Copy a node's address to the clipboard.
    Copy { value: String },
}

impl ItemAction {
    /// Decodes a raw host payload. Unknown or malformed payloads yield
    /// `None`; activation of such rows is a no-op.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        serde_json::from_value(payload.clone()).ok()
    }
}

/// One rendered result row.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DisplayItem {
    pub icon: String,
    pub title: String,
    pub subtitle: String,
    pub action: ItemAction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_toggle_payload_with_query() {
        let action = ItemAction::from_payload(&json!({"action": "toggle", "query": "nas"}));
        assert_eq!(
            action,
            Some(ItemAction::Toggle {
                query: Some("nas".to_string())
            })
        );
    }

    #[test]
    fn decodes_toggle_payload_without_query() {
        let action = ItemAction::from_payload(&json!({"action": "toggle"}));
        assert_eq!(action, Some(ItemAction::Toggle { query: None }));
    }

    #[test]
    fn decodes_copy_payload() {
        let action = ItemAction::from_payload(&json!({"action": "copy", "value": "100.64.0.1"}));
        assert_eq!(
            action,
            Some(ItemAction::Copy {
                value: "100.64.0.1".to_string()
            })
        );
    }

    #[test]
    fn unknown_payloads_decode_to_none() {
        assert_eq!(ItemAction::from_payload(&json!({"action": "launch"})), None);
        assert_eq!(ItemAction::from_payload(&json!({"query": "nas"})), None);
        assert_eq!(ItemAction::from_payload(&json!(null)), None);
    }

    #[test]
    fn toggle_serializes_with_action_tag() {
        let value = serde_json::to_value(ItemAction::Toggle {
            query: Some("nas".to_string()),
        })
        .unwrap();
        assert_eq!(value, json!({"action": "toggle", "query": "nas"}));
    }
}
