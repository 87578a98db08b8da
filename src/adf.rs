//! Minimal Atlassian Document Format (ADF) support.

use serde_json::{Value, json};

/// Wrap plain text in a single-paragraph ADF document.
pub fn document(text: &str) -> Value {
    json!({
        "type": "doc",
        "version": 1,
        "content": [{
            "type": "paragraph",
            "content": [{"type": "text", "text": text}]
        }]
    })
}

/// Flatten an ADF tree to text, joining text nodes with single spaces.
pub fn to_plain_text(node: &Value) -> String {
    let mut parts = Vec::new();
    collect_text(node, &mut parts);
    parts.join(" ")
}

fn collect_text<'a>(node: &'a Value, parts: &mut Vec<&'a str>) {
    match node {
        Value::Object(map) => {
            if map.get("type").and_then(Value::as_str) == Some("text") {
                if let Some(text) = map.get("text").and_then(Value::as_str) {
                    parts.push(text);
                }
            } else if let Some(children) = map.get("content") {
                collect_text(children, parts);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_text(item, parts);
            }
        }
        _ => {}
    }
}
