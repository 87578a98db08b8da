mod models;

pub use models::*;

use reqwest::{Method, StatusCode};
use serde_json::{Value, json};

use crate::config::{Backend, Config};
use crate::error::{Error, Result};
use crate::http::Upstream;
use crate::model;
use crate::normalize::fields::{first_text, items};
use crate::normalize::{
    normalize_comment, normalize_list, normalize_page, normalize_page_search, normalize_space,
};
use crate::query::degrade_cql;

pub const DEFAULT_EXPAND: [&str; 4] = ["body.storage", "version", "space", "history"];
const PAGE_ENVELOPES: &[&str] = &["pages", "data", "results"];
const LIST_EXPAND: &str = "body.storage,space,version";

#[derive(Clone)]
pub struct ConfluenceClient {
    upstream: Upstream,
    backend: Backend,
    max_results_default: u32,
}

impl ConfluenceClient {
    pub fn new(upstream: Upstream, backend: Backend, max_results_default: u32) -> Self {
        Self {
            upstream,
            backend,
            max_results_default,
        }
    }

    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let upstream = Upstream::new(&config.base_url, &config.auth, config.timeout)?;
        Ok(Self::new(
            upstream,
            config.backend.clone(),
            config.max_results_default,
        ))
    }

    pub async fn get_page(&self, page_id: &str, expand: &[String]) -> Result<model::Page> {
        match &self.backend {
            Backend::Standard => {
                let expand = if expand.is_empty() {
                    DEFAULT_EXPAND.join(",")
                } else {
                    expand.join(",")
                };
                let request = self
                    .upstream
                    .request(Method::GET, &format!("rest/api/content/{}", page_id))
                    .query(&[("expand", expand)]);
                let content: Content = self.upstream.execute(request, "get_page", page_id).await?;
                Ok(content.into())
            }
            Backend::Custom { version } => {
                let request = self
                    .upstream
                    .request(Method::GET, &format!("{}/pages/{}", version, page_id));
                let raw: Value = self.upstream.execute(request, "get_page", page_id).await?;
                Ok(normalize_page(&raw))
            }
        }
    }

    /// Look a page up by exact title. `None` when nothing matches.
    pub async fn get_page_by_title(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<Option<model::Page>> {
        match &self.backend {
            Backend::Standard => {
                let request = self
                    .upstream
                    .request(Method::GET, "rest/api/content")
                    .query(&[
                        ("spaceKey", space_key),
                        ("title", title),
                        ("expand", "body.storage,version,space,history"),
                    ]);
                let list: ContentList = self
                    .upstream
                    .execute(request, "get_page_by_title", title)
                    .await?;
                Ok(list.results.into_iter().next().map(Into::into))
            }
            Backend::Custom { version } => {
                let request = self
                    .upstream
                    .request(Method::GET, &format!("{}/pages/search", version))
                    .query(&[("q", title), ("space", space_key), ("limit", "1")]);
                let raw: Value = self
                    .upstream
                    .execute(request, "get_page_by_title", title)
                    .await?;

                let wanted = title.to_lowercase();
                Ok(items(&raw, PAGE_ENVELOPES)
                    .iter()
                    .find(|page| {
                        first_text(page, &["title", "name"])
                            .is_some_and(|candidate| candidate.to_lowercase() == wanted)
                    })
                    .map(normalize_page))
            }
        }
    }

    pub async fn search_content(
        &self,
        query: &str,
        max_results: u32,
        start_at: u32,
    ) -> Result<model::SearchResult<model::Page>> {
        match &self.backend {
            Backend::Standard => {
                let request = self
                    .upstream
                    .request(Method::GET, "rest/api/content/search")
                    .query(&[
                        ("cql", query.to_string()),
                        ("limit", max_results.to_string()),
                        ("start", start_at.to_string()),
                        ("expand", LIST_EXPAND.to_string()),
                    ]);
                let list: ContentList =
                    self.upstream.execute(request, "search_content", query).await?;

                Ok(model::SearchResult {
                    start: list.start.unwrap_or(start_at),
                    limit: list.limit.unwrap_or(max_results),
                    size: list.size.unwrap_or(list.results.len() as u32),
                    results: list.results.into_iter().map(Into::into).collect(),
                })
            }
            Backend::Custom { version } => {
                let terms = degrade_cql(query);
                tracing::debug!(%terms, "degraded CQL for custom API");

                let request = self
                    .upstream
                    .request(Method::GET, &format!("{}/pages/search", version))
                    .query(&[
                        ("q", terms),
                        ("limit", max_results.to_string()),
                        ("offset", start_at.to_string()),
                    ]);
                let raw: Value = self.upstream.execute(request, "search_content", query).await?;

                let mut result = normalize_page_search(&raw, start_at, max_results);
                result.size = result.results.len() as u32;
                Ok(result)
            }
        }
    }

    pub async fn create_page(
        &self,
        space_key: &str,
        title: &str,
        content: &str,
        parent_page_id: Option<&str>,
    ) -> Result<model::Page> {
        match &self.backend {
            Backend::Standard => {
                let body = CreateContent {
                    content_type: "page",
                    title: title.to_string(),
                    space: SpaceKey {
                        key: space_key.to_string(),
                    },
                    body: StorageBody::new(content),
                    ancestors: parent_page_id
                        .map(|id| ContentId { id: id.to_string() })
                        .into_iter()
                        .collect(),
                };
                let request = self
                    .upstream
                    .request(Method::POST, "rest/api/content")
                    .json(&body);
                let created: Content =
                    self.upstream.execute(request, "create_page", title).await?;
                tracing::info!(id = %created.id, "created page");
                Ok(created.into())
            }
            Backend::Custom { version } => {
                let mut payload = json!({
                    "title": title,
                    "content": content,
                    "space": space_key,
                });
                if let Some(parent) = parent_page_id {
                    payload["parent_id"] = json!(parent);
                }
                let request = self
                    .upstream
                    .request(Method::POST, &format!("{}/pages", version))
                    .json(&payload);
                let raw: Value = self.upstream.execute(request, "create_page", title).await?;
                Ok(normalize_page(&raw))
            }
        }
    }

    /// Replace a page's title and content. `version` is the page's current
    /// version; the update is written as `version + 1`.
    pub async fn update_page(
        &self,
        page_id: &str,
        title: &str,
        content: &str,
        version: u64,
    ) -> Result<model::Page> {
        let next = version.checked_add(1).ok_or_else(|| Error::InvalidArgument {
            operation: "update_page",
            target: page_id.to_string(),
            reason: "version number is too large",
        })?;
        match &self.backend {
            Backend::Standard => {
                let body = UpdateContent {
                    version: VersionNumber { number: next },
                    title: title.to_string(),
                    content_type: "page",
                    body: StorageBody::new(content),
                };
                let request = self
                    .upstream
                    .request(Method::PUT, &format!("rest/api/content/{}", page_id))
                    .json(&body);
                let updated: Content =
                    self.upstream.execute(request, "update_page", page_id).await?;
                Ok(updated.into())
            }
            Backend::Custom { version: api } => {
                let request = self
                    .upstream
                    .request(Method::PUT, &format!("{}/pages/{}", api, page_id))
                    .json(&json!({"title": title, "content": content, "version": next}));
                let raw: Value = self.upstream.execute(request, "update_page", page_id).await?;
                Ok(normalize_page(&raw))
            }
        }
    }

    pub async fn delete_page(&self, page_id: &str) -> Result<()> {
        let path = match &self.backend {
            Backend::Standard => format!("rest/api/content/{}", page_id),
            Backend::Custom { version } => format!("{}/pages/{}", version, page_id),
        };
        let request = self.upstream.request(Method::DELETE, &path);

        self.upstream
            .execute_empty(request, "delete_page", page_id)
            .await
    }

    pub async fn get_spaces(&self, max_results: u32) -> Result<Vec<model::Space>> {
        let limit = max_results.to_string();
        match &self.backend {
            Backend::Standard => {
                let request = self
                    .upstream
                    .request(Method::GET, "rest/api/space")
                    .query(&[("limit", limit)]);
                let list: SpaceList = self.upstream.execute(request, "get_spaces", "*").await?;
                Ok(list.results.into_iter().map(Into::into).collect())
            }
            Backend::Custom { version } => {
                let request = self
                    .upstream
                    .request(Method::GET, &format!("{}/spaces", version))
                    .query(&[("limit", limit)]);
                let raw: Value = self.upstream.execute(request, "get_spaces", "*").await?;
                Ok(normalize_list(&raw, "spaces", normalize_space))
            }
        }
    }

    /// Look a space up by key. `None` when it does not exist.
    pub async fn get_space(&self, space_key: &str) -> Result<Option<model::Space>> {
        match &self.backend {
            Backend::Standard => {
                let request = self
                    .upstream
                    .request(Method::GET, &format!("rest/api/space/{}", space_key))
                    .query(&[("expand", "description.plain,homepage")]);
                match self
                    .upstream
                    .execute::<Space>(request, "get_space", space_key)
                    .await
                {
                    Ok(space) => Ok(Some(space.into())),
                    Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => Ok(None),
                    Err(e) => Err(e),
                }
            }
            Backend::Custom { .. } => {
                let spaces = self.get_spaces(self.max_results_default).await?;
                Ok(spaces
                    .into_iter()
                    .find(|space| space.key == space_key || space.name == space_key))
            }
        }
    }

    pub async fn get_page_children(&self, page_id: &str) -> Result<Vec<model::Page>> {
        match &self.backend {
            Backend::Standard => {
                let request = self
                    .upstream
                    .request(
                        Method::GET,
                        &format!("rest/api/content/{}/child/page", page_id),
                    )
                    .query(&[("expand", LIST_EXPAND)]);
                let list: ContentList = self
                    .upstream
                    .execute(request, "get_page_children", page_id)
                    .await?;
                Ok(list.results.into_iter().map(Into::into).collect())
            }
            Backend::Custom { version } => {
                let request = self.upstream.request(
                    Method::GET,
                    &format!("{}/pages/{}/children", version, page_id),
                );
                let raw = self
                    .upstream
                    .execute::<Value>(request, "get_page_children", page_id)
                    .await;
                Ok(optional_list(raw, "get_page_children", |raw| {
                    normalize_list(raw, "children", normalize_page)
                }))
            }
        }
    }

    pub async fn add_comment(&self, page_id: &str, comment: &str) -> Result<model::Comment> {
        match &self.backend {
            Backend::Standard => {
                let body = CreateComment {
                    content_type: "comment",
                    container: Container {
                        id: page_id.to_string(),
                        container_type: "page",
                    },
                    body: StorageBody::new(comment),
                };
                let request = self
                    .upstream
                    .request(Method::POST, "rest/api/content")
                    .json(&body);
                let created: Content =
                    self.upstream.execute(request, "add_comment", page_id).await?;
                Ok(created.into())
            }
            Backend::Custom { version } => {
                let request = self
                    .upstream
                    .request(
                        Method::POST,
                        &format!("{}/pages/{}/comments", version, page_id),
                    )
                    .json(&json!({ "comment": comment }));
                let raw: Value = self.upstream.execute(request, "add_comment", page_id).await?;
                Ok(normalize_comment(&raw))
            }
        }
    }

    pub async fn get_comments(&self, page_id: &str) -> Result<Vec<model::Comment>> {
        match &self.backend {
            Backend::Standard => {
                let request = self
                    .upstream
                    .request(
                        Method::GET,
                        &format!("rest/api/content/{}/child/comment", page_id),
                    )
                    .query(&[("expand", "body.storage,version")]);
                let list: ContentList =
                    self.upstream.execute(request, "get_comments", page_id).await?;
                Ok(list.results.into_iter().map(Into::into).collect())
            }
            Backend::Custom { version } => {
                let request = self.upstream.request(
                    Method::GET,
                    &format!("{}/pages/{}/comments", version, page_id),
                );
                let raw = self
                    .upstream
                    .execute::<Value>(request, "get_comments", page_id)
                    .await;
                Ok(optional_list(raw, "get_comments", |raw| {
                    normalize_list(raw, "comments", normalize_comment)
                }))
            }
        }
    }

    pub fn max_results_default(&self) -> u32 {
        self.max_results_default
    }
}

/// Custom backends often lack child and comment routes; treat any failure
/// as an empty list.
fn optional_list<T>(
    raw: Result<Value>,
    operation: &str,
    normalize: impl FnOnce(&Value) -> Vec<T>,
) -> Vec<T> {
    match raw {
        Ok(raw) => normalize(&raw),
        Err(e) => {
            tracing::warn!(operation, error = %e, "custom API list unavailable, returning empty");
            Vec::new()
        }
    }
}
