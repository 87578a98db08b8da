mod models;

pub use models::*;

use reqwest::Method;
use serde_json::{Value, json};

use crate::config::{Backend, Config};
use crate::error::Result;
use crate::http::Upstream;
use crate::model;
use crate::normalize::{
    normalize_comment, normalize_issue, normalize_issue_search, normalize_list, normalize_project,
    normalize_transition,
};
use crate::query::degrade_jql;

/// Fields for a new issue.
#[derive(Debug, Clone, Default)]
pub struct NewIssue {
    pub project_key: String,
    pub summary: String,
    pub description: Option<String>,
    pub issue_type: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub labels: Vec<String>,
}

/// Fields to change on an existing issue. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct IssueChanges {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub priority: Option<String>,
    pub labels: Option<Vec<String>>,
}

#[derive(Clone)]
pub struct JiraClient {
    upstream: Upstream,
    backend: Backend,
}

impl JiraClient {
    pub fn new(upstream: Upstream, backend: Backend) -> Self {
        Self { upstream, backend }
    }

    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let upstream = Upstream::new(&config.base_url, &config.auth, config.timeout)?;
        Ok(Self::new(upstream, config.backend.clone()))
    }

    pub async fn get_issue(&self, issue_key: &str) -> Result<model::Issue> {
        match &self.backend {
            Backend::Standard => {
                let request = self
                    .upstream
                    .request(Method::GET, &format!("rest/api/3/issue/{}", issue_key));
                let issue: Issue = self.upstream.execute(request, "get_issue", issue_key).await?;
                Ok(issue.into())
            }
            Backend::Custom { version } => {
                let request = self
                    .upstream
                    .request(Method::GET, &format!("{}/issues/{}", version, issue_key));
                let raw: Value = self.upstream.execute(request, "get_issue", issue_key).await?;
                Ok(normalize_issue(&raw))
            }
        }
    }

    pub async fn search_issues(
        &self,
        jql: &str,
        max_results: u32,
        start_at: u32,
    ) -> Result<model::SearchResult<model::Issue>> {
        match &self.backend {
            Backend::Standard => {
                let request = self
                    .upstream
                    .request(Method::POST, "rest/api/3/search")
                    .json(&SearchRequest::new(jql, max_results, start_at));
                let result: SearchResult =
                    self.upstream.execute(request, "search_issues", jql).await?;

                let size = result.total.unwrap_or(result.issues.len() as u32);
                Ok(model::SearchResult {
                    start: result.start_at.unwrap_or(start_at),
                    limit: result.max_results.unwrap_or(max_results),
                    size,
                    results: result.issues.into_iter().map(Into::into).collect(),
                })
            }
            Backend::Custom { version } => {
                let filters = degrade_jql(jql);
                tracing::debug!(?filters, "degraded JQL for custom API");

                let mut params: Vec<(String, String)> = filters.into_iter().collect();
                params.push(("limit".to_string(), max_results.to_string()));
                params.push(("offset".to_string(), start_at.to_string()));

                let request = self
                    .upstream
                    .request(Method::GET, &format!("{}/issues/search", version))
                    .query(&params);
                let raw: Value = self.upstream.execute(request, "search_issues", jql).await?;
                Ok(normalize_issue_search(&raw, start_at, max_results))
            }
        }
    }

    pub async fn create_issue(&self, issue: &NewIssue) -> Result<model::Issue> {
        match &self.backend {
            Backend::Standard => {
                let mut fields = IssueFieldsRequest::new()
                    .project(&issue.project_key)
                    .summary(&issue.summary)
                    .issue_type(issue.issue_type.as_deref().unwrap_or("Task"));
                if let Some(description) = non_empty(&issue.description) {
                    fields = fields.description(description);
                }
                if let Some(priority) = non_empty(&issue.priority) {
                    fields = fields.priority(priority);
                }
                if let Some(assignee) = non_empty(&issue.assignee) {
                    fields = fields.assignee(assignee);
                }
                if !issue.labels.is_empty() {
                    fields = fields.labels(&issue.labels);
                }

                let request = self
                    .upstream
                    .request(Method::POST, "rest/api/3/issue")
                    .json(&fields);
                let created: CreatedIssue = self
                    .upstream
                    .execute(request, "create_issue", &issue.project_key)
                    .await?;
                tracing::info!(key = %created.key, id = %created.id, "created issue");

                self.get_issue(&created.key).await
            }
            Backend::Custom { version } => {
                let payload = json!({
                    "project": issue.project_key,
                    "title": issue.summary,
                    "description": issue.description.clone().unwrap_or_default(),
                    "type": issue.issue_type.as_deref().unwrap_or("Task").to_lowercase(),
                    "priority": issue.priority,
                    "assignee": issue.assignee,
                    "labels": issue.labels,
                });
                let request = self
                    .upstream
                    .request(Method::POST, &format!("{}/issues", version))
                    .json(&payload);
                let raw: Value = self
                    .upstream
                    .execute(request, "create_issue", &issue.project_key)
                    .await?;
                Ok(normalize_issue(&raw))
            }
        }
    }

    pub async fn update_issue(&self, issue_key: &str, changes: &IssueChanges) -> Result<()> {
        let request = match &self.backend {
            Backend::Standard => {
                let mut fields = IssueFieldsRequest::new();
                if let Some(summary) = non_empty(&changes.summary) {
                    fields = fields.summary(summary);
                }
                if let Some(description) = non_empty(&changes.description) {
                    fields = fields.description(description);
                }
                if let Some(assignee) = non_empty(&changes.assignee) {
                    fields = fields.assignee(assignee);
                }
                if let Some(priority) = non_empty(&changes.priority) {
                    fields = fields.priority(priority);
                }
                if let Some(labels) = changes.labels.as_ref().filter(|l| !l.is_empty()) {
                    fields = fields.labels(labels);
                }

                self.upstream
                    .request(Method::PUT, &format!("rest/api/3/issue/{}", issue_key))
                    .json(&fields)
            }
            Backend::Custom { version } => {
                let mut payload = serde_json::Map::new();
                if let Some(summary) = non_empty(&changes.summary) {
                    payload.insert("title".to_string(), json!(summary));
                }
                if let Some(description) = non_empty(&changes.description) {
                    payload.insert("description".to_string(), json!(description));
                }
                if let Some(assignee) = non_empty(&changes.assignee) {
                    payload.insert("assignee".to_string(), json!(assignee));
                }
                if let Some(priority) = non_empty(&changes.priority) {
                    payload.insert("priority".to_string(), json!(priority));
                }
                if let Some(labels) = changes.labels.as_ref().filter(|l| !l.is_empty()) {
                    payload.insert("labels".to_string(), json!(labels));
                }

                self.upstream
                    .request(Method::PUT, &format!("{}/issues/{}", version, issue_key))
                    .json(&payload)
            }
        };

        self.upstream
            .execute_empty(request, "update_issue", issue_key)
            .await
    }

    pub async fn add_comment(&self, issue_key: &str, comment: &str) -> Result<model::Comment> {
        match &self.backend {
            Backend::Standard => {
                let request = self
                    .upstream
                    .request(
                        Method::POST,
                        &format!("rest/api/3/issue/{}/comment", issue_key),
                    )
                    .json(&AddCommentRequest::new(comment));
                let comment: Comment =
                    self.upstream.execute(request, "add_comment", issue_key).await?;
                Ok(comment.into())
            }
            Backend::Custom { version } => {
                let request = self
                    .upstream
                    .request(
                        Method::POST,
                        &format!("{}/issues/{}/comments", version, issue_key),
                    )
                    .json(&json!({ "comment": comment }));
                let raw: Value = self.upstream.execute(request, "add_comment", issue_key).await?;
                Ok(normalize_comment(&raw))
            }
        }
    }

    pub async fn get_comments(&self, issue_key: &str) -> Result<Vec<model::Comment>> {
        match &self.backend {
            Backend::Standard => {
                let request = self.upstream.request(
                    Method::GET,
                    &format!("rest/api/3/issue/{}/comment", issue_key),
                );
                let response: CommentResponse =
                    self.upstream.execute(request, "get_comments", issue_key).await?;
                Ok(response.comments.into_iter().map(Into::into).collect())
            }
            Backend::Custom { version } => {
                let request = self.upstream.request(
                    Method::GET,
                    &format!("{}/issues/{}/comments", version, issue_key),
                );
                let raw: Value = self.upstream.execute(request, "get_comments", issue_key).await?;
                Ok(normalize_list(&raw, "comments", normalize_comment))
            }
        }
    }

    pub async fn get_projects(&self) -> Result<Vec<model::Project>> {
        match &self.backend {
            Backend::Standard => {
                let request = self.upstream.request(Method::GET, "rest/api/3/project");
                let projects: Vec<Project> =
                    self.upstream.execute(request, "get_projects", "*").await?;
                Ok(projects.into_iter().map(Into::into).collect())
            }
            Backend::Custom { version } => {
                let request = self
                    .upstream
                    .request(Method::GET, &format!("{}/projects", version));
                let raw: Value = self.upstream.execute(request, "get_projects", "*").await?;
                Ok(normalize_list(&raw, "projects", normalize_project))
            }
        }
    }

    pub async fn get_transitions(&self, issue_key: &str) -> Result<Vec<model::Transition>> {
        match &self.backend {
            Backend::Standard => {
                let request = self.upstream.request(
                    Method::GET,
                    &format!("rest/api/3/issue/{}/transitions", issue_key),
                );
                let response: TransitionsResponse = self
                    .upstream
                    .execute(request, "get_transitions", issue_key)
                    .await?;
                Ok(response.transitions.into_iter().map(Into::into).collect())
            }
            Backend::Custom { version } => {
                let request = self.upstream.request(
                    Method::GET,
                    &format!("{}/issues/{}/transitions", version, issue_key),
                );
                let raw: Value = self
                    .upstream
                    .execute(request, "get_transitions", issue_key)
                    .await?;
                Ok(normalize_list(&raw, "transitions", normalize_transition))
            }
        }
    }

    pub async fn transition_issue(&self, issue_key: &str, transition_id: &str) -> Result<()> {
        let request = match &self.backend {
            Backend::Standard => self
                .upstream
                .request(
                    Method::POST,
                    &format!("rest/api/3/issue/{}/transitions", issue_key),
                )
                .json(&TransitionRequest {
                    transition: TransitionId {
                        id: transition_id.to_string(),
                    },
                }),
            Backend::Custom { version } => self
                .upstream
                .request(
                    Method::POST,
                    &format!("{}/issues/{}/transitions", version, issue_key),
                )
                .json(&json!({ "transition": transition_id })),
        };

        self.upstream
            .execute_empty(request, "transition_issue", issue_key)
            .await
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Auth;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn standard_client(server: &MockServer) -> JiraClient {
        let auth = Auth::Basic {
            username: "test@example.com".to_string(),
            api_token: "test-token".to_string(),
        };
        let upstream = Upstream::new(&server.uri(), &auth, Duration::from_secs(5)).unwrap();
        JiraClient::new(upstream, Backend::Standard)
    }

    fn custom_client(server: &MockServer) -> JiraClient {
        let auth = Auth::Bearer("custom-key".to_string());
        let upstream = Upstream::new(&server.uri(), &auth, Duration::from_secs(5)).unwrap();
        JiraClient::new(
            upstream,
            Backend::Custom {
                version: "v1".to_string(),
            },
        )
    }

    fn jira_issue(key: &str, summary: &str, status: &str) -> Value {
        json!({
            "id": "10001",
            "key": key,
            "self": format!("https://example.atlassian.net/rest/api/3/issue/{}", key),
            "fields": {
                "summary": summary,
                "status": {"id": "3", "name": status},
                "assignee": {"displayName": "Test User", "emailAddress": "test@example.com"},
                "priority": {"id": "3", "name": "Medium"},
                "issuetype": {"id": "10001", "name": "Task", "subtask": false},
                "project": {"key": "PROJ", "name": "Project"},
                "created": "2024-01-15T10:00:00.000+0000",
                "updated": "2024-01-16T14:30:00.000+0000",
                "labels": []
            }
        })
    }

    #[tokio::test]
    async fn search_issues_returns_matching_issues() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/3/search"))
            .and(header(
                "Authorization",
                "Basic dGVzdEBleGFtcGxlLmNvbTp0ZXN0LXRva2Vu",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 1,
                "maxResults": 50,
                "startAt": 0,
                "issues": [jira_issue("PROJ-123", "Fix login bug", "Open")]
            })))
            .mount(&mock_server)
            .await;

        let client = standard_client(&mock_server);

        let result = client.search_issues("project = PROJ", 50, 0).await.unwrap();

        assert_eq!(result.size, 1);
        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].key, "PROJ-123");
        assert_eq!(result.results[0].summary, "Fix login bug");
        assert_eq!(
            result.results[0].assignee.as_ref().map(|a| a.display_name.as_str()),
            Some("Test User")
        );
    }

    #[tokio::test]
    async fn search_issues_returns_empty_when_no_matches() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/3/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 0, "maxResults": 50, "startAt": 0, "issues": []
            })))
            .mount(&mock_server)
            .await;

        let client = standard_client(&mock_server);

        let result = client.search_issues("project = EMPTY", 50, 0).await.unwrap();

        assert_eq!(result.size, 0);
        assert!(result.results.is_empty());
    }

    #[tokio::test]
    async fn search_issues_returns_error_on_api_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/3/search"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&mock_server)
            .await;

        let client = standard_client(&mock_server);

        let result = client.search_issues("project = PROJ", 50, 0).await;

        assert!(result.is_err());
        let error_message = result.unwrap_err().to_string();
        assert!(error_message.contains("401"));
        assert!(error_message.contains("search_issues"));
    }

    #[tokio::test]
    async fn get_issue_returns_issue_details() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/3/issue/PROJ-456"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(jira_issue("PROJ-456", "Implement feature X", "In Progress")),
            )
            .mount(&mock_server)
            .await;

        let client = standard_client(&mock_server);

        let issue = client.get_issue("PROJ-456").await.unwrap();

        assert_eq!(issue.key, "PROJ-456");
        assert_eq!(issue.summary, "Implement feature X");
        assert_eq!(issue.status.name, "In Progress");
        assert_eq!(issue.project.key, "PROJ");
    }

    #[tokio::test]
    async fn get_issue_returns_error_when_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/3/issue/PROJ-999"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Issue not found"))
            .mount(&mock_server)
            .await;

        let client = standard_client(&mock_server);

        let result = client.get_issue("PROJ-999").await;

        let error_message = result.unwrap_err().to_string();
        assert!(error_message.contains("404"));
        assert!(error_message.contains("PROJ-999"));
    }

    #[tokio::test]
    async fn create_issue_posts_fields_then_fetches_issue() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/3/issue"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"id": "10050", "key": "PROJ-50"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/api/3/issue/PROJ-50"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(jira_issue("PROJ-50", "New task", "To Do")),
            )
            .mount(&mock_server)
            .await;

        let client = standard_client(&mock_server);

        let issue = client
            .create_issue(&NewIssue {
                project_key: "PROJ".to_string(),
                summary: "New task".to_string(),
                description: Some("Details".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(issue.key, "PROJ-50");
        assert_eq!(issue.status.name, "To Do");
    }

    #[tokio::test]
    async fn add_comment_creates_comment_on_issue() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/3/issue/PROJ-123/comment"))
            .and(body_json(json!({"body": crate::adf::document("This is a test comment")})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "10100",
                "self": "https://example.atlassian.net/rest/api/3/issue/PROJ-123/comment/10100",
                "author": {"displayName": "Test User", "emailAddress": "test@example.com"},
                "body": crate::adf::document("This is a test comment"),
                "created": "2024-01-17T09:00:00.000+0000"
            })))
            .mount(&mock_server)
            .await;

        let client = standard_client(&mock_server);

        let comment = client
            .add_comment("PROJ-123", "This is a test comment")
            .await
            .unwrap();

        assert_eq!(comment.id, "10100");
        assert_eq!(comment.author.display_name, "Test User");
        assert_eq!(comment.body_text, "This is a test comment");
    }

    #[tokio::test]
    async fn add_comment_returns_error_when_issue_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/3/issue/PROJ-999/comment"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Issue not found"))
            .mount(&mock_server)
            .await;

        let client = standard_client(&mock_server);

        let result = client.add_comment("PROJ-999", "Test comment").await;

        assert!(result.unwrap_err().to_string().contains("404"));
    }

    #[tokio::test]
    async fn transition_issue_posts_transition_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/3/issue/PROJ-1/transitions"))
            .and(body_json(json!({"transition": {"id": "31"}})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = standard_client(&mock_server);

        client.transition_issue("PROJ-1", "31").await.unwrap();
    }

    #[tokio::test]
    async fn get_transitions_maps_target_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/3/issue/PROJ-1/transitions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transitions": [{"id": "21", "name": "Start", "to": {"id": "3", "name": "In Progress"}}]
            })))
            .mount(&mock_server)
            .await;

        let client = standard_client(&mock_server);

        let transitions = client.get_transitions("PROJ-1").await.unwrap();

        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].target_status.name, "In Progress");
    }

    #[tokio::test]
    async fn custom_search_sends_degraded_filters() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/issues/search"))
            .and(header("Authorization", "Bearer custom-key"))
            .and(query_param("project", "DEMO"))
            .and(query_param("status", "Open"))
            .and(query_param("assignee", "me"))
            .and(query_param("limit", "10"))
            .and(query_param("offset", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"number": "DEMO-1", "title": "First", "state": "Open", "assignee": "bob"}]
            })))
            .mount(&mock_server)
            .await;

        let client = custom_client(&mock_server);

        let result = client
            .search_issues(
                r#"project = DEMO AND status = "Open" AND assignee = currentUser()"#,
                10,
                20,
            )
            .await
            .unwrap();

        assert_eq!(result.start, 20);
        assert_eq!(result.limit, 10);
        assert_eq!(result.size, 1);
        assert_eq!(result.results[0].key, "DEMO-1");
        assert_eq!(
            result.results[0].assignee.as_ref().map(|a| a.display_name.as_str()),
            Some("bob")
        );
    }

    #[tokio::test]
    async fn custom_get_issue_normalizes_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/issues/OPS-3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3, "key": "OPS-3", "name": "Renew domain", "tags": ["billing"]
            })))
            .mount(&mock_server)
            .await;

        let client = custom_client(&mock_server);

        let issue = client.get_issue("OPS-3").await.unwrap();

        assert_eq!(issue.id, "3");
        assert_eq!(issue.summary, "Renew domain");
        assert_eq!(issue.labels, vec!["billing"]);
        assert_eq!(issue.status.name, "Unknown");
    }

    #[tokio::test]
    async fn custom_create_issue_sends_flat_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/issues"))
            .and(body_json(json!({
                "project": "OPS",
                "title": "Audit logs",
                "description": "",
                "type": "bug",
                "priority": null,
                "assignee": null,
                "labels": []
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "900", "key": "OPS-900", "title": "Audit logs", "type": "bug"
            })))
            .mount(&mock_server)
            .await;

        let client = custom_client(&mock_server);

        let issue = client
            .create_issue(&NewIssue {
                project_key: "OPS".to_string(),
                summary: "Audit logs".to_string(),
                issue_type: Some("Bug".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(issue.key, "OPS-900");
        assert_eq!(issue.issue_type.name, "bug");
    }

    #[tokio::test]
    async fn custom_update_issue_sends_only_changed_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/v1/issues/OPS-1"))
            .and(body_json(json!({"title": "Renamed", "priority": "Low"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = custom_client(&mock_server);

        client
            .update_issue(
                "OPS-1",
                &IssueChanges {
                    summary: Some("Renamed".to_string()),
                    priority: Some("Low".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn custom_comments_accept_data_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/issues/OPS-1/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"comment_id": "1", "user": "zoe", "content": "First!"}]
            })))
            .mount(&mock_server)
            .await;

        let client = custom_client(&mock_server);

        let comments = client.get_comments("OPS-1").await.unwrap();

        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].author.display_name, "zoe");
        assert_eq!(comments[0].body_text, "First!");
    }

    #[tokio::test]
    async fn custom_projects_accept_bare_array() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"code": "OPS", "title": "Operations", "owner": "sam"}
            ])))
            .mount(&mock_server)
            .await;

        let client = custom_client(&mock_server);

        let projects = client.get_projects().await.unwrap();

        assert_eq!(projects[0].key, "OPS");
        assert_eq!(projects[0].name, "Operations");
        assert_eq!(projects[0].lead.as_deref(), Some("sam"));
    }

    #[tokio::test]
    async fn custom_transition_posts_bare_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/issues/OPS-1/transitions"))
            .and(body_json(json!({"transition": "done"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = custom_client(&mock_server);

        client.transition_issue("OPS-1", "done").await.unwrap();
    }
}
