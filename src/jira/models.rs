use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::adf;
use crate::model::{self, DEFAULT_ISSUE_TYPE, KeyRef, NamedRef, UNKNOWN};
use crate::normalize::fields::{dedup_labels, now, rich_text};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub jql: String,
    pub max_results: u32,
    pub start_at: u32,
    pub fields: Vec<String>,
}

impl SearchRequest {
    pub fn new(jql: &str, max_results: u32, start_at: u32) -> Self {
        Self {
            jql: jql.to_string(),
            max_results,
            start_at,
            fields: [
                "summary",
                "status",
                "assignee",
                "reporter",
                "created",
                "updated",
                "priority",
                "issuetype",
                "project",
                "labels",
                "description",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub total: Option<u32>,
    pub max_results: Option<u32>,
    pub start_at: Option<u32>,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Issue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: Option<String>,
    #[serde(default)]
    pub fields: IssueFields,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct IssueFields {
    pub summary: Option<String>,
    pub status: Option<Status>,
    pub assignee: Option<User>,
    pub reporter: Option<User>,
    pub priority: Option<Priority>,
    #[serde(rename = "issuetype")]
    pub issue_type: Option<IssueType>,
    pub project: Option<ProjectRef>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub description: Option<Value>,
    #[serde(default)]
    pub labels: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct IssueType {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub subtask: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Status {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Priority {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ProjectRef {
    pub key: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub display_name: String,
    pub email_address: Option<String>,
    pub account_id: Option<String>,
}

/// Response from GET /rest/api/3/issue/{issueIdOrKey}/comment
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub start_at: Option<u32>,
    pub max_results: Option<u32>,
    pub total: Option<u32>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Comment {
    pub id: String,
    #[serde(rename = "self")]
    pub self_url: Option<String>,
    pub author: Option<User>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AddCommentRequest {
    pub body: Value,
}

impl AddCommentRequest {
    pub fn new(text: &str) -> Self {
        Self {
            body: adf::document(text),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Project {
    pub id: String,
    pub key: String,
    pub name: String,
    pub description: Option<String>,
    pub lead: Option<User>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TransitionsResponse {
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Transition {
    pub id: String,
    pub name: String,
    pub to: Option<Status>,
}

#[derive(Debug, Serialize)]
pub struct TransitionRequest {
    pub transition: TransitionId,
}

#[derive(Debug, Serialize)]
pub struct TransitionId {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
}

/// Request body for creating or updating an issue.
/// Uses HashMap to allow flexible field updates.
#[derive(Debug, Serialize, Default)]
pub struct IssueFieldsRequest {
    pub fields: HashMap<String, Value>,
}

impl IssueFieldsRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(mut self, project_key: &str) -> Self {
        self.fields.insert(
            "project".to_string(),
            serde_json::json!({"key": project_key}),
        );
        self
    }

    pub fn issue_type(mut self, issue_type: &str) -> Self {
        self.fields.insert(
            "issuetype".to_string(),
            serde_json::json!({"name": issue_type}),
        );
        self
    }

    /// Set the summary (title) of the issue
    pub fn summary(mut self, summary: &str) -> Self {
        self.fields
            .insert("summary".to_string(), serde_json::json!(summary));
        self
    }

    /// Set the description, wrapped as a one-paragraph ADF document
    pub fn description(mut self, description: &str) -> Self {
        self.fields
            .insert("description".to_string(), adf::document(description));
        self
    }

    /// Set the priority by name (e.g., "High", "Medium", "Low")
    pub fn priority(mut self, priority_name: &str) -> Self {
        self.fields.insert(
            "priority".to_string(),
            serde_json::json!({"name": priority_name}),
        );
        self
    }

    /// Set the assignee by user name
    pub fn assignee(mut self, name: &str) -> Self {
        self.fields
            .insert("assignee".to_string(), serde_json::json!({"name": name}));
        self
    }

    /// Set labels
    pub fn labels(mut self, labels: &[String]) -> Self {
        self.fields
            .insert("labels".to_string(), serde_json::json!(labels));
        self
    }
}

impl From<User> for model::User {
    fn from(user: User) -> Self {
        Self {
            display_name: user.display_name,
            email: user.email_address,
        }
    }
}

impl From<Issue> for model::Issue {
    fn from(issue: Issue) -> Self {
        let fields = issue.fields;
        let created = fields.created.unwrap_or_else(now);
        let updated = fields.updated.unwrap_or_else(|| created.clone());

        Self {
            id: issue.id,
            key: issue.key,
            summary: fields.summary.unwrap_or_default(),
            description: fields
                .description
                .as_ref()
                .and_then(rich_text)
                .unwrap_or_default(),
            status: fields
                .status
                .map(|s| NamedRef {
                    name: s.name,
                    id: s.id,
                })
                .unwrap_or_else(|| NamedRef::named(UNKNOWN)),
            assignee: fields.assignee.map(Into::into),
            reporter: fields.reporter.map(Into::into),
            created,
            updated,
            priority: fields.priority.map(|p| NamedRef {
                name: p.name,
                id: p.id,
            }),
            issue_type: fields
                .issue_type
                .map(|t| NamedRef {
                    name: t.name,
                    id: t.id,
                })
                .unwrap_or_else(|| NamedRef::named(DEFAULT_ISSUE_TYPE)),
            project: fields
                .project
                .map(|p| KeyRef {
                    key: p.key,
                    name: p.name,
                })
                .unwrap_or_else(|| KeyRef {
                    key: String::new(),
                    name: None,
                }),
            labels: dedup_labels(fields.labels),
        }
    }
}

impl From<Comment> for model::Comment {
    fn from(comment: Comment) -> Self {
        let created = comment.created.unwrap_or_else(now);
        let updated = comment.updated.unwrap_or_else(|| created.clone());

        Self {
            id: comment.id,
            author: comment
                .author
                .map(Into::into)
                .unwrap_or_else(model::User::unknown),
            body_text: comment
                .body
                .as_ref()
                .and_then(rich_text)
                .unwrap_or_default(),
            created,
            updated,
        }
    }
}

impl From<Project> for model::Project {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            key: project.key,
            name: project.name,
            description: project.description.filter(|d| !d.is_empty()),
            lead: project.lead.map(|lead| lead.display_name),
        }
    }
}

impl From<Transition> for model::Transition {
    fn from(transition: Transition) -> Self {
        let target_status = match transition.to {
            Some(to) => NamedRef {
                name: to.name,
                id: to.id,
            },
            None => NamedRef::named(transition.name.clone()),
        };

        Self {
            id: transition.id,
            name: transition.name,
            target_status,
        }
    }
}
