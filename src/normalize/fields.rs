//! Alias lookup over loosely shaped JSON objects.
//!
//! A value counts as populated when it is not `null`, not an empty string
//! and not an empty array or object. Numbers and booleans always count.

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::adf;
use crate::model::{KeyRef, NamedRef, User, UNKNOWN};

pub(crate) const USER_NAME: &[&str] = &["name", "displayName", "display_name", "email"];
pub(crate) const USER_EMAIL: &[&str] = &["email", "emailAddress", "email_address"];
pub(crate) const REF_NAME: &[&str] = &["name", "value", "displayName"];
pub(crate) const REF_KEY: &[&str] = &["key", "id", "code"];
pub(crate) const REF_TITLE: &[&str] = &["name", "title"];

pub(crate) fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn is_populated(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Resolve a dotted path such as `_links.webui`.
pub(crate) fn lookup<'a>(raw: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(raw, |node, segment| node.get(segment))
        .filter(|value| is_populated(value))
}

/// The first populated alias, in priority order.
pub(crate) fn first<'a>(raw: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    aliases.iter().find_map(|alias| lookup(raw, alias))
}

pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// The first alias whose value can be rendered as text.
pub(crate) fn first_text(raw: &Value, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .filter_map(|alias| lookup(raw, alias))
        .find_map(scalar_text)
}

pub(crate) fn text_or(raw: &Value, aliases: &[&str], default: &str) -> String {
    first_text(raw, aliases).unwrap_or_else(|| default.to_string())
}

pub(crate) fn first_number(raw: &Value, aliases: &[&str]) -> Option<u64> {
    aliases
        .iter()
        .filter_map(|alias| lookup(raw, alias))
        .find_map(number)
}

pub(crate) fn number(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Text content of a field that may be plain text or an ADF document.
pub(crate) fn rich_text(value: &Value) -> Option<String> {
    match value {
        Value::Object(_) | Value::Array(_) => {
            let text = adf::to_plain_text(value);
            (!text.is_empty()).then_some(text)
        }
        other => scalar_text(other),
    }
}

pub(crate) fn first_rich_text(raw: &Value, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .filter_map(|alias| lookup(raw, alias))
        .find_map(rich_text)
}

pub(crate) fn user(value: &Value) -> Option<User> {
    match value {
        Value::Object(_) => {
            let email = first_text(value, USER_EMAIL);
            let display_name = first_text(value, USER_NAME).unwrap_or_else(|| UNKNOWN.to_string());
            Some(User {
                display_name,
                email,
            })
        }
        other => scalar_text(other).map(User::named),
    }
}

pub(crate) fn first_user(raw: &Value, aliases: &[&str]) -> Option<User> {
    aliases
        .iter()
        .filter_map(|alias| lookup(raw, alias))
        .find_map(user)
}

pub(crate) fn named_ref(value: &Value) -> Option<NamedRef> {
    match value {
        Value::Object(_) => first_text(value, REF_NAME).map(|name| NamedRef {
            name,
            id: first_text(value, &["id"]),
        }),
        other => scalar_text(other).map(NamedRef::named),
    }
}

pub(crate) fn first_named_ref(raw: &Value, aliases: &[&str]) -> Option<NamedRef> {
    aliases
        .iter()
        .filter_map(|alias| lookup(raw, alias))
        .find_map(named_ref)
}

pub(crate) fn key_ref(value: &Value) -> Option<KeyRef> {
    match value {
        Value::Object(_) => {
            let name = first_text(value, REF_TITLE);
            let key = first_text(value, REF_KEY).or_else(|| name.clone())?;
            Some(KeyRef { key, name })
        }
        other => scalar_text(other).map(|key| KeyRef {
            name: Some(key.clone()),
            key,
        }),
    }
}

pub(crate) fn first_key_ref(raw: &Value, aliases: &[&str]) -> Option<KeyRef> {
    aliases
        .iter()
        .filter_map(|alias| lookup(raw, alias))
        .find_map(key_ref)
}

/// Labels from an array of scalars or a comma separated string, first
/// occurrence wins.
pub(crate) fn labels(raw: &Value, aliases: &[&str]) -> Vec<String> {
    let candidates: Vec<String> = match first(raw, aliases) {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    dedup_labels(candidates)
}

/// Drop repeated labels, keeping first occurrences in order.
pub(crate) fn dedup_labels(labels: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        if !out.contains(&label) {
            out.push(label);
        }
    }
    out
}

/// Items of a list response: either a bare array or the first array found
/// under one of the envelope keys.
pub(crate) fn items<'a>(raw: &'a Value, envelopes: &[&str]) -> &'a [Value] {
    if let Value::Array(list) = raw {
        return list;
    }
    envelopes
        .iter()
        .find_map(|key| raw.get(key).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
