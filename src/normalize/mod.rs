//! Best-effort mapping of arbitrary upstream JSON onto the canonical model.
//!
//! Every attribute is read from an ordered list of alias keys and the first
//! populated one wins. Missing attributes take deterministic defaults, so
//! these functions never fail. Types are not validated: scalars are coerced
//! into the canonical field's representation.

mod comment;
pub(crate) mod fields;
mod issue;
mod page;
mod search;

pub use comment::normalize_comment;
pub use issue::{normalize_issue, normalize_project, normalize_transition};
pub use page::{normalize_page, normalize_space};
pub use search::{normalize_issue_search, normalize_page_search};

use serde::Serialize;
use serde_json::Value;

use crate::model::{Comment, Issue, Page, Project, SearchResult, Space, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Issue,
    Page,
    Project,
    Comment,
    Space,
    Transition,
    IssueSearch,
    PageSearch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CanonicalEntity {
    Issue(Issue),
    Page(Page),
    Project(Project),
    Comment(Comment),
    Space(Space),
    Transition(Transition),
    IssueSearch(SearchResult<Issue>),
    PageSearch(SearchResult<Page>),
}

/// Normalize `raw` as the given kind. Search kinds take their offset and
/// limit from the payload itself.
pub fn normalize(raw: &Value, kind: EntityKind) -> CanonicalEntity {
    match kind {
        EntityKind::Issue => CanonicalEntity::Issue(normalize_issue(raw)),
        EntityKind::Page => CanonicalEntity::Page(normalize_page(raw)),
        EntityKind::Project => CanonicalEntity::Project(normalize_project(raw)),
        EntityKind::Comment => CanonicalEntity::Comment(normalize_comment(raw)),
        EntityKind::Space => CanonicalEntity::Space(normalize_space(raw)),
        EntityKind::Transition => CanonicalEntity::Transition(normalize_transition(raw)),
        EntityKind::IssueSearch => {
            let (start, limit) = search::paging(raw);
            CanonicalEntity::IssueSearch(normalize_issue_search(raw, start, limit))
        }
        EntityKind::PageSearch => {
            let (start, limit) = search::paging(raw);
            CanonicalEntity::PageSearch(normalize_page_search(raw, start, limit))
        }
    }
}

/// Normalize every element of a list response.
pub fn normalize_list<T>(raw: &Value, envelope: &str, normalize: fn(&Value) -> T) -> Vec<T> {
    fields::items(raw, &[envelope, "data"])
        .iter()
        .map(normalize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const KINDS: [EntityKind; 8] = [
        EntityKind::Issue,
        EntityKind::Page,
        EntityKind::Project,
        EntityKind::Comment,
        EntityKind::Space,
        EntityKind::Transition,
        EntityKind::IssueSearch,
        EntityKind::PageSearch,
    ];

    fn renormalize(entity: &CanonicalEntity, kind: EntityKind) -> CanonicalEntity {
        let value = serde_json::to_value(entity).unwrap();
        normalize(&value, kind)
    }

    #[test]
    fn normalizing_canonical_output_is_idempotent() {
        let samples = [
            json!({}),
            json!({
                "id": 7, "number": "DEMO-7", "title": "Crash on save", "state": "Open",
                "assignee": "bob", "reporter": {"displayName": "Ann", "email": "ann@example.com"},
                "created_at": "2024-01-01T00:00:00Z", "priority": "High",
                "project": {"key": "DEMO", "name": "Demo"}, "tags": ["a", "b"],
                "body": "Steps", "space": "DEV", "revision": 3, "author": "carol",
                "comment": "hi", "to_status": "Done", "lead": "dave",
                "issues": [{"summary": "nested", "created": "2024-01-02T00:00:00Z"}],
                "pages": [{"title": "nested", "created": "2024-01-02T00:00:00Z"}]
            }),
        ];

        for sample in &samples {
            for kind in KINDS {
                let once = normalize(sample, kind);
                let twice = renormalize(&once, kind);
                assert_eq!(once, twice, "kind {kind:?}");
            }
        }
    }

    #[test]
    fn normalize_dispatches_on_kind() {
        let raw = json!({"key": "DEMO-1", "title": "Hello"});

        match normalize(&raw, EntityKind::Issue) {
            CanonicalEntity::Issue(issue) => assert_eq!(issue.key, "DEMO-1"),
            other => panic!("expected issue, got {other:?}"),
        }
        match normalize(&raw, EntityKind::Page) {
            CanonicalEntity::Page(page) => assert_eq!(page.title, "Hello"),
            other => panic!("expected page, got {other:?}"),
        }
    }

    #[test]
    fn string_assignee_becomes_display_name() {
        let issue = normalize_issue(&json!({"assignee": "bob"}));

        assert_eq!(issue.assignee.unwrap().display_name, "bob");
    }

    #[test]
    fn every_field_is_serialized_even_when_absent() {
        let value = serde_json::to_value(normalize_issue(&json!({}))).unwrap();

        for key in [
            "id", "key", "summary", "description", "status", "assignee", "reporter",
            "created", "updated", "priority", "type", "project", "labels",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert!(value["assignee"].is_null());
    }

    #[test]
    fn normalize_list_reads_envelope_then_data() {
        let wrapped = json!({"comments": [{"id": "1"}]});
        let generic = json!({"data": [{"id": "1"}, {"id": "2"}]});

        assert_eq!(normalize_list(&wrapped, "comments", normalize_comment).len(), 1);
        assert_eq!(normalize_list(&generic, "comments", normalize_comment).len(), 2);
    }
}
