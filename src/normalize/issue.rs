use serde_json::Value;

use super::fields::{
    first_key_ref, first_named_ref, first_rich_text, first_text, first_user, labels, now, text_or,
};
use crate::model::{
    DEFAULT_ISSUE_TYPE, Issue, KeyRef, NamedRef, Project, Transition, UNKNOWN,
};

const ID: &[&str] = &["id", "issue_id"];
const KEY: &[&str] = &["key", "id", "number"];
const SUMMARY: &[&str] = &["title", "summary", "name"];
const DESCRIPTION: &[&str] = &["description", "body", "content"];
const STATUS: &[&str] = &["status", "state"];
const REPORTER: &[&str] = &["reporter", "created_by"];
const CREATED: &[&str] = &["created", "created_at"];
const UPDATED: &[&str] = &["updated", "updated_at"];
const TYPE: &[&str] = &["type", "issue_type", "issuetype"];
const PROJECT: &[&str] = &["project", "project_key"];
const LABELS: &[&str] = &["labels", "tags"];

pub fn normalize_issue(raw: &Value) -> Issue {
    let created = first_text(raw, CREATED).unwrap_or_else(now);
    let updated = first_text(raw, UPDATED).unwrap_or_else(|| created.clone());

    Issue {
        id: text_or(raw, ID, ""),
        key: text_or(raw, KEY, ""),
        summary: text_or(raw, SUMMARY, ""),
        description: first_rich_text(raw, DESCRIPTION).unwrap_or_default(),
        status: first_named_ref(raw, STATUS).unwrap_or_else(|| NamedRef::named(UNKNOWN)),
        assignee: first_user(raw, &["assignee"]),
        reporter: first_user(raw, REPORTER),
        created,
        updated,
        priority: first_named_ref(raw, &["priority"]),
        issue_type: first_named_ref(raw, TYPE)
            .unwrap_or_else(|| NamedRef::named(DEFAULT_ISSUE_TYPE)),
        project: first_key_ref(raw, PROJECT).unwrap_or_else(|| KeyRef {
            key: String::new(),
            name: None,
        }),
        labels: labels(raw, LABELS),
    }
}

pub fn normalize_project(raw: &Value) -> Project {
    Project {
        id: text_or(raw, &["id", "project_id"], ""),
        key: text_or(raw, &["key", "code", "id"], ""),
        name: text_or(raw, &["name", "title"], ""),
        description: first_rich_text(raw, &["description"]),
        lead: first_user(raw, &["lead", "owner"]).map(|user| user.display_name),
    }
}

pub fn normalize_transition(raw: &Value) -> Transition {
    let name = text_or(raw, &["name", "status", "to_status"], "");
    let target_status = first_named_ref(
        raw,
        &["targetStatus", "to_status", "target_status", "to", "name"],
    )
    .unwrap_or_else(|| NamedRef::named(name.clone()));

    Transition {
        id: text_or(raw, &["id", "transition_id"], ""),
        name,
        target_status,
    }
}
