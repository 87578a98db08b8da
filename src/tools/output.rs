use std::fmt::Display;

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;

pub const MAX_RESULTS_LIMIT: u32 = 100;

/// Clamp a requested page size to `1..=100`, falling back to `default`.
pub fn page_size(requested: Option<u32>, default: u32) -> u32 {
    requested.unwrap_or(default).clamp(1, MAX_RESULTS_LIMIT)
}

/// Render a canonical entity as pretty JSON.
pub fn pretty<T: Serialize>(tool: &str, value: &T) -> CallToolResult {
    match serde_json::to_string_pretty(value) {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => failure(tool, e),
    }
}

pub fn message(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

pub fn failure(tool: &str, error: impl Display) -> CallToolResult {
    let text = format!("Error executing tool {}: {}", tool, error);
    tracing::error!("{}", text);
    CallToolResult::error(vec![Content::text(text)])
}

/// Turn a client result into a tool result.
pub fn respond<T, E>(tool: &str, result: Result<T, E>) -> CallToolResult
where
    T: Serialize,
    E: Display,
{
    match result {
        Ok(value) => pretty(tool, &value),
        Err(e) => failure(tool, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn rendered(result: &CallToolResult) -> (String, bool) {
        let value = serde_json::to_value(result).unwrap();
        let text = value["content"][0]["text"].as_str().unwrap().to_string();
        let is_error = value["isError"].as_bool().unwrap_or(false);
        (text, is_error)
    }

    #[test]
    fn page_size_clamps_to_bounds() {
        assert_eq!(page_size(None, 50), 50);
        assert_eq!(page_size(Some(500), 50), 100);
        assert_eq!(page_size(Some(0), 50), 1);
    }

    #[test]
    fn failure_names_the_tool() {
        let result = failure("jira_get_issue", "boom");

        let (text, is_error) = rendered(&result);
        assert!(is_error);
        assert_eq!(text, "Error executing tool jira_get_issue: boom");
    }

    #[test]
    fn respond_renders_pretty_json() {
        let result = respond::<_, String>("jira_get_projects", Ok(vec!["A", "B"]));

        let (text, is_error) = rendered(&result);
        assert!(!is_error);
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, serde_json::json!(["A", "B"]));
        assert!(text.contains('\n'));
    }
}
