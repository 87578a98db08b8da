//! Confluence REST (`rest/api/content`, `rest/api/space`) payloads.

use serde::{Deserialize, Serialize};

use crate::model::{
    self, DEFAULT_PAGE_STATUS, DEFAULT_PAGE_TYPE, DEFAULT_SPACE_TYPE, KeyRef, PageBody,
    PageHistory, PageVersion, UNKNOWN,
};
use crate::normalize::fields::now;

#[derive(Debug, Deserialize, Serialize)]
pub struct Content {
    pub id: String,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub status: Option<String>,
    pub title: Option<String>,
    pub space: Option<SpaceRef>,
    pub body: Option<Body>,
    pub version: Option<Version>,
    pub history: Option<History>,
    #[serde(rename = "_links")]
    pub links: Option<Links>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SpaceRef {
    pub key: String,
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Body {
    pub storage: Option<BodyValue>,
    pub view: Option<BodyValue>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BodyValue {
    pub value: String,
    pub representation: Option<String>,
}

impl BodyValue {
    pub fn storage(value: &str) -> Self {
        Self {
            value: value.to_string(),
            representation: Some("storage".to_string()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Version {
    pub number: u64,
    pub when: Option<String>,
    pub by: Option<Person>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    pub created_date: Option<String>,
    pub created_by: Option<Person>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Links {
    pub webui: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ContentList {
    #[serde(default)]
    pub results: Vec<Content>,
    pub start: Option<u32>,
    pub limit: Option<u32>,
    pub size: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Space {
    pub key: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub space_type: Option<String>,
    pub description: Option<SpaceDescription>,
    #[serde(rename = "_links")]
    pub links: Option<Links>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SpaceDescription {
    pub plain: Option<BodyValue>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SpaceList {
    #[serde(default)]
    pub results: Vec<Space>,
}

/// Request body for POST /rest/api/content.
#[derive(Debug, Serialize)]
pub struct CreateContent {
    #[serde(rename = "type")]
    pub content_type: &'static str,
    pub title: String,
    pub space: SpaceKey,
    pub body: StorageBody,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<ContentId>,
}

/// Request body for PUT /rest/api/content/{id}.
#[derive(Debug, Serialize)]
pub struct UpdateContent {
    pub version: VersionNumber,
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: &'static str,
    pub body: StorageBody,
}

/// Request body for a comment attached to a page.
#[derive(Debug, Serialize)]
pub struct CreateComment {
    #[serde(rename = "type")]
    pub content_type: &'static str,
    pub container: Container,
    pub body: StorageBody,
}

#[derive(Debug, Serialize)]
pub struct SpaceKey {
    pub key: String,
}

#[derive(Debug, Serialize)]
pub struct ContentId {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct Container {
    pub id: String,
    #[serde(rename = "type")]
    pub container_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct VersionNumber {
    pub number: u64,
}

#[derive(Debug, Serialize)]
pub struct StorageBody {
    pub storage: BodyValue,
}

impl StorageBody {
    pub fn new(value: &str) -> Self {
        Self {
            storage: BodyValue::storage(value),
        }
    }
}

fn display_name(person: Option<Person>) -> Option<String> {
    person
        .and_then(|p| p.display_name)
        .filter(|name| !name.is_empty())
}

impl From<Content> for model::Page {
    fn from(content: Content) -> Self {
        let body = content.body.unwrap_or_default();
        let storage_value = body.storage.map(|s| s.value).unwrap_or_default();
        let view_value = body
            .view
            .map(|v| v.value)
            .unwrap_or_else(|| storage_value.clone());

        let history = content.history;
        let created_date = history
            .as_ref()
            .and_then(|h| h.created_date.clone())
            .unwrap_or_else(now);
        let created_by = display_name(history.and_then(|h| h.created_by))
            .unwrap_or_else(|| UNKNOWN.to_string());

        let version = match content.version {
            Some(v) => PageVersion {
                number: v.number,
                when: v.when.unwrap_or_else(|| created_date.clone()),
                by_display_name: display_name(v.by).unwrap_or_else(|| created_by.clone()),
            },
            None => PageVersion {
                number: 1,
                when: created_date.clone(),
                by_display_name: created_by.clone(),
            },
        };

        Self {
            id: content.id,
            title: content.title.unwrap_or_default(),
            page_type: content
                .content_type
                .unwrap_or_else(|| DEFAULT_PAGE_TYPE.to_string()),
            status: content
                .status
                .unwrap_or_else(|| DEFAULT_PAGE_STATUS.to_string()),
            space: content.space.map(|s| KeyRef {
                key: s.key,
                name: s.name,
            }),
            body: PageBody {
                storage_value,
                view_value,
            },
            version,
            history: PageHistory {
                created_date,
                created_by_display_name: created_by,
            },
            url: content.links.and_then(|l| l.webui),
        }
    }
}

impl From<Content> for model::Comment {
    fn from(content: Content) -> Self {
        let body_text = content
            .body
            .and_then(|b| b.storage)
            .map(|s| s.value)
            .unwrap_or_default();
        let (when, author) = match content.version {
            Some(v) => (v.when, display_name(v.by)),
            None => (None, None),
        };
        let created = when.unwrap_or_else(now);

        Self {
            id: content.id,
            author: author
                .map(model::User::named)
                .unwrap_or_else(model::User::unknown),
            body_text,
            updated: created.clone(),
            created,
        }
    }
}

impl From<Space> for model::Space {
    fn from(space: Space) -> Self {
        Self {
            name: space.name.unwrap_or_default(),
            key: space.key,
            description: space
                .description
                .and_then(|d| d.plain)
                .map(|p| p.value)
                .filter(|d| !d.is_empty()),
            space_type: space
                .space_type
                .unwrap_or_else(|| DEFAULT_SPACE_TYPE.to_string()),
            owner: None,
            url: space.links.and_then(|l| l.webui),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_conversion_reads_expanded_fields() {
        let content: Content = serde_json::from_value(json!({
            "id": "123",
            "type": "page",
            "status": "current",
            "title": "Release notes",
            "space": {"key": "DEV", "name": "Development"},
            "body": {"storage": {"value": "<p>v1.2</p>", "representation": "storage"}},
            "version": {"number": 3, "when": "2024-06-01T00:00:00.000Z", "by": {"displayName": "Kim"}},
            "_links": {"webui": "/spaces/DEV/pages/123"}
        }))
        .unwrap();

        let page = model::Page::from(content);

        assert_eq!(page.title, "Release notes");
        assert_eq!(page.body.storage_value, "<p>v1.2</p>");
        assert_eq!(page.body.view_value, "<p>v1.2</p>");
        assert_eq!(page.version.number, 3);
        assert_eq!(page.version.by_display_name, "Kim");
        assert_eq!(page.history.created_by_display_name, "Unknown");
        assert_eq!(page.url.as_deref(), Some("/spaces/DEV/pages/123"));
    }

    #[test]
    fn comment_conversion_reads_version_author() {
        let content: Content = serde_json::from_value(json!({
            "id": "900",
            "type": "comment",
            "body": {"storage": {"value": "<p>Nice</p>"}},
            "version": {"number": 1, "when": "2024-06-02T00:00:00.000Z", "by": {"displayName": "Lee"}}
        }))
        .unwrap();

        let comment = model::Comment::from(content);

        assert_eq!(comment.author.display_name, "Lee");
        assert_eq!(comment.body_text, "<p>Nice</p>");
        assert_eq!(comment.created, "2024-06-02T00:00:00.000Z");
    }

    #[test]
    fn create_content_omits_empty_ancestors() {
        let request = CreateContent {
            content_type: "page",
            title: "New".to_string(),
            space: SpaceKey {
                key: "DEV".to_string(),
            },
            body: StorageBody::new("<p>Hi</p>"),
            ancestors: Vec::new(),
        };

        let value = serde_json::to_value(&request).unwrap();

        assert!(value.get("ancestors").is_none());
        assert_eq!(value["body"]["storage"]["representation"], "storage");
    }
}
