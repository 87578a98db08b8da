use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IssueKeyParams {
    /// The Jira issue key (e.g., 'PROJ-123')
    pub issue_key: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchIssuesParams {
    /// JQL query string (e.g., 'project = PROJ AND status = Open')
    pub jql: String,
    /// Maximum number of results to return (max: 100)
    pub max_results: Option<u32>,
    /// Starting index for pagination (default: 0)
    pub start_at: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateIssueParams {
    /// The project key where to create the issue
    pub project_key: String,
    /// Issue summary/title
    pub summary: String,
    /// Issue description
    pub description: Option<String>,
    /// Issue type (e.g., Task, Bug, Story). Defaults to Task
    pub issue_type: Option<String>,
    /// Issue priority (e.g., High, Medium, Low)
    pub priority: Option<String>,
    /// Assignee username or email
    pub assignee: Option<String>,
    /// Labels to add to the issue
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateIssueParams {
    /// The Jira issue key to update
    pub issue_key: String,
    /// New issue summary/title
    pub summary: Option<String>,
    /// New issue description
    pub description: Option<String>,
    /// New assignee username or email
    pub assignee: Option<String>,
    /// New issue priority
    pub priority: Option<String>,
    /// Labels to set on the issue, replacing the current ones
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddIssueCommentParams {
    /// The Jira issue key
    pub issue_key: String,
    /// Comment text to add
    pub comment: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TransitionIssueParams {
    /// The Jira issue key
    pub issue_key: String,
    /// The ID of the transition to execute (see jira_get_transitions)
    pub transition_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetPageParams {
    /// The Confluence page ID
    pub page_id: String,
    /// Properties to expand (e.g., body.storage, version, space)
    pub expand: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PageIdParams {
    /// The Confluence page ID
    pub page_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetPageByTitleParams {
    /// The space key
    pub space_key: String,
    /// The page title
    pub title: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchContentParams {
    /// CQL query string (e.g., 'space = DEV AND title ~ "release"')
    pub query: String,
    /// Maximum number of results to return (max: 100)
    pub max_results: Option<u32>,
    /// Starting index for pagination (default: 0)
    pub start_at: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreatePageParams {
    /// The space key where to create the page
    pub space_key: String,
    /// Page title
    pub title: String,
    /// Page content in Confluence storage format
    pub content: String,
    /// Parent page ID, to create the page as a child
    pub parent_page_id: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdatePageParams {
    /// The page ID to update
    pub page_id: String,
    /// New page title
    pub title: String,
    /// New page content in Confluence storage format
    pub content: String,
    /// Current version number of the page
    pub version: u64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetSpacesParams {
    /// Maximum number of spaces to return (max: 100)
    pub max_results: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SpaceKeyParams {
    /// The space key
    pub space_key: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddPageCommentParams {
    /// The page ID
    pub page_id: String,
    /// Comment text in Confluence storage format
    pub comment: String,
}
