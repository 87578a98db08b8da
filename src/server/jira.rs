use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, handler::server::router::tool::ToolRouter,
    handler::server::tool::Parameters, model::*, tool, tool_handler, tool_router,
};

use crate::jira::{IssueChanges, JiraClient, NewIssue};
use crate::tools::output::{failure, message, page_size, respond};
use crate::tools::{
    AddIssueCommentParams, CreateIssueParams, IssueKeyParams, SearchIssuesParams,
    TransitionIssueParams, UpdateIssueParams,
};

#[derive(Clone)]
pub struct JiraServer {
    jira: Arc<JiraClient>,
    max_results_default: u32,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl JiraServer {
    pub fn new(jira: JiraClient, max_results_default: u32) -> Self {
        Self {
            jira: Arc::new(jira),
            max_results_default,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "jira_get_issue",
        description = "Get a specific Jira issue by key (e.g., PROJ-123)."
    )]
    async fn get_issue(
        &self,
        Parameters(params): Parameters<IssueKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond(
            "jira_get_issue",
            self.jira.get_issue(&params.issue_key).await,
        ))
    }

    #[tool(
        name = "jira_search_issues",
        description = "Search for Jira issues using JQL (Jira Query Language). On custom APIs only simple field = value clauses are honored."
    )]
    async fn search_issues(
        &self,
        Parameters(params): Parameters<SearchIssuesParams>,
    ) -> Result<CallToolResult, McpError> {
        let max_results = page_size(params.max_results, self.max_results_default);
        let start_at = params.start_at.unwrap_or(0);

        Ok(respond(
            "jira_search_issues",
            self.jira
                .search_issues(&params.jql, max_results, start_at)
                .await,
        ))
    }

    #[tool(name = "jira_create_issue", description = "Create a new Jira issue.")]
    async fn create_issue(
        &self,
        Parameters(params): Parameters<CreateIssueParams>,
    ) -> Result<CallToolResult, McpError> {
        let issue = NewIssue {
            project_key: params.project_key,
            summary: params.summary,
            description: params.description,
            issue_type: params.issue_type,
            priority: params.priority,
            assignee: params.assignee,
            labels: params.labels.unwrap_or_default(),
        };

        Ok(respond(
            "jira_create_issue",
            self.jira.create_issue(&issue).await,
        ))
    }

    #[tool(
        name = "jira_update_issue",
        description = "Update an existing Jira issue. Only the fields given are changed."
    )]
    async fn update_issue(
        &self,
        Parameters(params): Parameters<UpdateIssueParams>,
    ) -> Result<CallToolResult, McpError> {
        let changes = IssueChanges {
            summary: params.summary,
            description: params.description,
            assignee: params.assignee,
            priority: params.priority,
            labels: params.labels,
        };

        match self.jira.update_issue(&params.issue_key, &changes).await {
            Ok(()) => Ok(message(format!(
                "Successfully updated issue {}",
                params.issue_key
            ))),
            Err(e) => Ok(failure("jira_update_issue", e)),
        }
    }

    #[tool(name = "jira_add_comment", description = "Add a comment to a Jira issue.")]
    async fn add_comment(
        &self,
        Parameters(params): Parameters<AddIssueCommentParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond(
            "jira_add_comment",
            self.jira
                .add_comment(&params.issue_key, &params.comment)
                .await,
        ))
    }

    #[tool(
        name = "jira_get_comments",
        description = "Get all comments for a Jira issue."
    )]
    async fn get_comments(
        &self,
        Parameters(params): Parameters<IssueKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond(
            "jira_get_comments",
            self.jira.get_comments(&params.issue_key).await,
        ))
    }

    #[tool(
        name = "jira_get_projects",
        description = "Get all available Jira projects."
    )]
    async fn get_projects(&self) -> Result<CallToolResult, McpError> {
        Ok(respond("jira_get_projects", self.jira.get_projects().await))
    }

    #[tool(
        name = "jira_get_transitions",
        description = "Get the workflow transitions available for a Jira issue."
    )]
    async fn get_transitions(
        &self,
        Parameters(params): Parameters<IssueKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond(
            "jira_get_transitions",
            self.jira.get_transitions(&params.issue_key).await,
        ))
    }

    #[tool(
        name = "jira_transition_issue",
        description = "Move a Jira issue to a new status by executing a transition."
    )]
    async fn transition_issue(
        &self,
        Parameters(params): Parameters<TransitionIssueParams>,
    ) -> Result<CallToolResult, McpError> {
        match self
            .jira
            .transition_issue(&params.issue_key, &params.transition_id)
            .await
        {
            Ok(()) => Ok(message(format!(
                "Successfully transitioned issue {}",
                params.issue_key
            ))),
            Err(e) => Ok(failure("jira_transition_issue", e)),
        }
    }
}

#[tool_handler]
impl rmcp::ServerHandler for JiraServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Jira MCP Server - Search, create, update, comment on and transition Jira issues"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
