//! Body-shape normalization.
//!
//! Clients send one of three recognized shapes: a bare JSON string, an
//! already-structured `{"contents": [...]}` list, or a `{"prompt": "..."}`
//! object. Anything else is left alone and forwarded verbatim by the caller.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
    System,
}

/// One element of the canonical content list. Parts are carried as raw JSON
/// so structured payloads (inline data, function calls) pass through intact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentMessage {
    pub role: Role,
    pub parts: Vec<Value>,
}

impl ContentMessage {
    pub fn text(role: Role, text: &str) -> Self {
        Self {
            role,
            parts: vec![json!({ "text": text })],
        }
    }

    /// Concatenated text of all `text` parts, used for keyword scanning.
    pub fn text_content(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Canonicalize a decoded request body into an ordered content list.
///
/// Returns `None` for unrecognized shapes; the caller degrades to forwarding
/// the original body unchanged rather than rejecting the request.
pub fn normalize(body: &Value) -> Option<Vec<ContentMessage>> {
    if let Some(text) = body.as_str() {
        return Some(vec![ContentMessage::text(Role::User, text)]);
    }

    if let Some(contents) = body.get("contents") {
        let items = contents.as_array()?;
        return Some(items.iter().map(normalize_entry).collect());
    }

    if let Some(prompt) = body.get("prompt").and_then(|p| p.as_str()) {
        return Some(vec![ContentMessage::text(Role::User, prompt)]);
    }

    None
}

/// Elements without a role (or with an unknown one) default to `user`;
/// `parts` pass through unchanged.
fn normalize_entry(entry: &Value) -> ContentMessage {
    let role = match entry.get("role").and_then(|r| r.as_str()) {
        Some("model") => Role::Model,
        Some("system") => Role::System,
        _ => Role::User,
    };
    let parts = entry
        .get("parts")
        .and_then(|p| p.as_array())
        .cloned()
        .unwrap_or_default();

    ContentMessage { role, parts }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_string_becomes_user_message() {
        let body = json!("hello there");
        let messages = normalize(&body).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].parts[0]["text"], "hello there");
    }

    #[test]
    fn test_prompt_field_becomes_user_message() {
        let body = json!({ "prompt": "summarize this" });
        let messages = normalize(&body).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text_content(), "summarize this");
    }

    #[test]
    fn test_contents_roles_default_to_user() {
        let body = json!({
            "contents": [
                { "parts": [{ "text": "Hello" }] },
                { "role": "model", "parts": [{ "text": "Hi!" }] }
            ]
        });
        let messages = normalize(&body).unwrap();
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].role, Role::Model);
    }

    #[test]
    fn test_contents_order_preserved() {
        let body = json!({
            "contents": [
                { "role": "user", "parts": [{ "text": "a" }] },
                { "role": "model", "parts": [{ "text": "b" }] },
                { "role": "user", "parts": [{ "text": "c" }] }
            ]
        });
        let messages = normalize(&body).unwrap();
        let texts: Vec<String> = messages.iter().map(|m| m.text_content()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_structured_parts_pass_through() {
        let body = json!({
            "contents": [
                { "parts": [{ "inlineData": { "mimeType": "image/png", "data": "AAAA" } }] }
            ]
        });
        let messages = normalize(&body).unwrap();
        assert_eq!(
            messages[0].parts[0]["inlineData"]["mimeType"],
            "image/png"
        );
    }

    #[test]
    fn test_unrecognized_shape_is_none() {
        assert!(normalize(&json!({ "messages": [] })).is_none());
        assert!(normalize(&json!(42)).is_none());
        assert!(normalize(&json!({ "contents": "not-a-list" })).is_none());
    }
}
