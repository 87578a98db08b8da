use serde_json::Value;

use super::fields::{
    first, first_key_ref, first_number, first_text, first_user, lookup, now,
    number, scalar_text, text_or,
};
use crate::model::{
    DEFAULT_PAGE_STATUS, DEFAULT_PAGE_TYPE, DEFAULT_SPACE_TYPE, Page, PageBody, PageHistory,
    PageVersion, Space, UNKNOWN,
};

const BODY: &[&str] = &["content", "body", "text"];
const SPACE: &[&str] = &["space", "space_key", "namespace"];
const VERSION: &[&str] = &["version", "revision"];
const CREATED: &[&str] = &["history.createdDate", "created", "created_at"];
const CREATED_BY: &[&str] = &[
    "history.createdByDisplayName",
    "history.createdBy",
    "created_by",
    "author",
];
const UPDATED: &[&str] = &["version.when", "updated", "updated_at"];
const UPDATED_BY: &[&str] = &[
    "version.byDisplayName",
    "version.by",
    "updated_by",
    "author",
];
const URL: &[&str] = &["url", "link", "_links.webui"];

const STORAGE: &[&str] = &["storageValue", "storage.value", "value"];
const VIEW: &[&str] = &["viewValue", "view.value"];

pub fn normalize_page(raw: &Value) -> Page {
    let created_date = first_text(raw, CREATED).unwrap_or_else(now);
    let created_by = first_user(raw, CREATED_BY)
        .map(|user| user.display_name)
        .unwrap_or_else(|| UNKNOWN.to_string());

    let version = PageVersion {
        number: VERSION
            .iter()
            .filter_map(|alias| lookup(raw, alias))
            .find_map(version_number)
            .unwrap_or(1),
        when: first_text(raw, UPDATED).unwrap_or_else(|| created_date.clone()),
        by_display_name: first_user(raw, UPDATED_BY)
            .map(|user| user.display_name)
            .unwrap_or_else(|| created_by.clone()),
    };

    Page {
        id: text_or(raw, &["id", "page_id"], ""),
        title: text_or(raw, &["title", "name"], ""),
        page_type: text_or(raw, &["type"], DEFAULT_PAGE_TYPE),
        status: text_or(raw, &["status"], DEFAULT_PAGE_STATUS),
        space: first_key_ref(raw, SPACE),
        body: first(raw, BODY).map(body).unwrap_or_else(|| PageBody {
            storage_value: String::new(),
            view_value: String::new(),
        }),
        version,
        history: PageHistory {
            created_date,
            created_by_display_name: created_by,
        },
        url: first_text(raw, URL),
    }
}

fn version_number(value: &Value) -> Option<u64> {
    match value {
        Value::Object(_) => first_number(value, &["number", "version", "revision"]),
        other => number(other),
    }
}

fn body(value: &Value) -> PageBody {
    match value {
        Value::Object(_) => {
            let storage_value = first_text(value, STORAGE).unwrap_or_default();
            let view_value = first_text(value, VIEW).unwrap_or_else(|| storage_value.clone());
            PageBody {
                storage_value,
                view_value,
            }
        }
        other => {
            let text = scalar_text(other).unwrap_or_default();
            PageBody {
                storage_value: text.clone(),
                view_value: text,
            }
        }
    }
}

pub fn normalize_space(raw: &Value) -> Space {
    let description = lookup(raw, "description").and_then(|value| match value {
        Value::Object(_) => first_text(value, &["plain.value", "view.value", "value"]),
        other => scalar_text(other),
    });

    Space {
        key: text_or(raw, &["key", "id", "code"], ""),
        name: text_or(raw, &["name", "title"], ""),
        description,
        space_type: text_or(raw, &["type"], DEFAULT_SPACE_TYPE),
        owner: first_user(raw, &["owner", "lead", "created_by"]).map(|user| user.display_name),
        url: first_text(raw, URL),
    }
}
