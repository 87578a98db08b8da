use serde_json::Value;

use super::fields::{first_number, items};
use super::{normalize_issue, normalize_page};
use crate::model::{Issue, Page, SearchResult};

const ISSUE_ITEMS: &[&str] = &["issues", "data", "results"];
const PAGE_ITEMS: &[&str] = &["pages", "data", "results"];
const TOTAL: &[&str] = &["total", "size"];

pub fn normalize_issue_search(raw: &Value, start: u32, limit: u32) -> SearchResult<Issue> {
    search(raw, ISSUE_ITEMS, start, limit, normalize_issue)
}

pub fn normalize_page_search(raw: &Value, start: u32, limit: u32) -> SearchResult<Page> {
    search(raw, PAGE_ITEMS, start, limit, normalize_page)
}

fn search<T>(
    raw: &Value,
    envelopes: &[&str],
    start: u32,
    limit: u32,
    normalize: fn(&Value) -> T,
) -> SearchResult<T> {
    let results: Vec<T> = items(raw, envelopes).iter().map(normalize).collect();
    let size = first_number(raw, TOTAL)
        .map(|total| u32::try_from(total).unwrap_or(u32::MAX))
        .unwrap_or(results.len() as u32);

    SearchResult {
        results,
        start,
        limit,
        size,
    }
}

/// Offset and page size echoed by the upstream, if any.
pub(crate) fn paging(raw: &Value) -> (u32, u32) {
    let read = |aliases: &[&str]| {
        first_number(raw, aliases).and_then(|n| u32::try_from(n).ok())
    };
    let start = read(&["start", "startAt", "offset"]).unwrap_or(0);
    let limit = read(&["limit", "maxResults"]).unwrap_or_else(|| {
        let count = items(raw, &["issues", "pages", "data", "results"]).len();
        count as u32
    });
    (start, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_upstream_array_yields_empty_result() {
        let result = normalize_issue_search(&json!({"issues": []}), 0, 50);

        assert_eq!(result.size, 0);
        assert!(result.results.is_empty());
        assert_eq!(result.start, 0);
        assert_eq!(result.limit, 50);
    }

    #[test]
    fn bare_empty_array_yields_empty_result() {
        let result = normalize_page_search(&json!([]), 10, 25);

        assert_eq!(result.size, 0);
        assert!(result.results.is_empty());
        assert_eq!(result.start, 10);
    }

    #[test]
    fn size_prefers_upstream_total() {
        let raw = json!({"data": [{"id": "1"}, {"id": "2"}], "total": 40});

        let result = normalize_issue_search(&raw, 0, 2);

        assert_eq!(result.results.len(), 2);
        assert_eq!(result.size, 40);
    }

    #[test]
    fn size_falls_back_to_item_count() {
        let raw = json!({"results": [{"title": "A"}, {"title": "B"}, {"title": "C"}]});

        let result = normalize_page_search(&raw, 0, 25);

        assert_eq!(result.size, 3);
        assert_eq!(result.results[2].title, "C");
    }

    #[test]
    fn paging_reads_upstream_offsets() {
        assert_eq!(paging(&json!({"startAt": 20, "maxResults": 10, "issues": []})), (20, 10));
        assert_eq!(paging(&json!({"data": [{}, {}]})), (0, 2));
    }
}
