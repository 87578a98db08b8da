use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, handler::server::router::tool::ToolRouter,
    handler::server::tool::Parameters, model::*, tool, tool_handler, tool_router,
};

use crate::confluence::ConfluenceClient;
use crate::tools::output::{failure, message, page_size, pretty, respond};
use crate::tools::{
    AddPageCommentParams, CreatePageParams, GetPageByTitleParams, GetPageParams,
    GetSpacesParams, PageIdParams, SearchContentParams, SpaceKeyParams, UpdatePageParams,
};

#[derive(Clone)]
pub struct ConfluenceServer {
    confluence: Arc<ConfluenceClient>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ConfluenceServer {
    pub fn new(confluence: ConfluenceClient) -> Self {
        Self {
            confluence: Arc::new(confluence),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "confluence_get_page",
        description = "Get a Confluence page by ID, optionally choosing which properties to expand."
    )]
    async fn get_page(
        &self,
        Parameters(params): Parameters<GetPageParams>,
    ) -> Result<CallToolResult, McpError> {
        let expand = params.expand.unwrap_or_default();

        Ok(respond(
            "confluence_get_page",
            self.confluence.get_page(&params.page_id, &expand).await,
        ))
    }

    #[tool(
        name = "confluence_get_page_by_title",
        description = "Get a Confluence page by its title within a space."
    )]
    async fn get_page_by_title(
        &self,
        Parameters(params): Parameters<GetPageByTitleParams>,
    ) -> Result<CallToolResult, McpError> {
        const TOOL: &str = "confluence_get_page_by_title";

        match self
            .confluence
            .get_page_by_title(&params.space_key, &params.title)
            .await
        {
            Ok(Some(page)) => Ok(pretty(TOOL, &page)),
            Ok(None) => Ok(message(format!(
                "Page '{}' not found in space {}",
                params.title, params.space_key
            ))),
            Err(e) => Ok(failure(TOOL, e)),
        }
    }

    #[tool(
        name = "confluence_search_content",
        description = "Search Confluence content using CQL (Confluence Query Language). On custom APIs the query is reduced to plain search terms."
    )]
    async fn search_content(
        &self,
        Parameters(params): Parameters<SearchContentParams>,
    ) -> Result<CallToolResult, McpError> {
        let max_results = page_size(params.max_results, self.confluence.max_results_default());
        let start_at = params.start_at.unwrap_or(0);

        Ok(respond(
            "confluence_search_content",
            self.confluence
                .search_content(&params.query, max_results, start_at)
                .await,
        ))
    }

    #[tool(
        name = "confluence_create_page",
        description = "Create a new Confluence page, optionally under a parent page."
    )]
    async fn create_page(
        &self,
        Parameters(params): Parameters<CreatePageParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond(
            "confluence_create_page",
            self.confluence
                .create_page(
                    &params.space_key,
                    &params.title,
                    &params.content,
                    params.parent_page_id.as_deref(),
                )
                .await,
        ))
    }

    #[tool(
        name = "confluence_update_page",
        description = "Update an existing Confluence page. Pass the page's current version number."
    )]
    async fn update_page(
        &self,
        Parameters(params): Parameters<UpdatePageParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond(
            "confluence_update_page",
            self.confluence
                .update_page(
                    &params.page_id,
                    &params.title,
                    &params.content,
                    params.version,
                )
                .await,
        ))
    }

    #[tool(name = "confluence_delete_page", description = "Delete a Confluence page.")]
    async fn delete_page(
        &self,
        Parameters(params): Parameters<PageIdParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.confluence.delete_page(&params.page_id).await {
            Ok(()) => Ok(message(format!(
                "Successfully deleted page {}",
                params.page_id
            ))),
            Err(e) => Ok(failure("confluence_delete_page", e)),
        }
    }

    #[tool(
        name = "confluence_get_spaces",
        description = "List the Confluence spaces visible to the current user."
    )]
    async fn get_spaces(
        &self,
        Parameters(params): Parameters<GetSpacesParams>,
    ) -> Result<CallToolResult, McpError> {
        let max_results = page_size(params.max_results, self.confluence.max_results_default());

        Ok(respond(
            "confluence_get_spaces",
            self.confluence.get_spaces(max_results).await,
        ))
    }

    #[tool(
        name = "confluence_get_space",
        description = "Get a Confluence space by key."
    )]
    async fn get_space(
        &self,
        Parameters(params): Parameters<SpaceKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        const TOOL: &str = "confluence_get_space";

        match self.confluence.get_space(&params.space_key).await {
            Ok(Some(space)) => Ok(pretty(TOOL, &space)),
            Ok(None) => Ok(message(format!("Space {} not found", params.space_key))),
            Err(e) => Ok(failure(TOOL, e)),
        }
    }

    #[tool(
        name = "confluence_get_page_children",
        description = "Get the child pages of a Confluence page."
    )]
    async fn get_page_children(
        &self,
        Parameters(params): Parameters<PageIdParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond(
            "confluence_get_page_children",
            self.confluence.get_page_children(&params.page_id).await,
        ))
    }

    #[tool(
        name = "confluence_add_comment",
        description = "Add a comment to a Confluence page."
    )]
    async fn add_comment(
        &self,
        Parameters(params): Parameters<AddPageCommentParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond(
            "confluence_add_comment",
            self.confluence
                .add_comment(&params.page_id, &params.comment)
                .await,
        ))
    }

    #[tool(
        name = "confluence_get_comments",
        description = "Get the comments on a Confluence page."
    )]
    async fn get_comments(
        &self,
        Parameters(params): Parameters<PageIdParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond(
            "confluence_get_comments",
            self.confluence.get_comments(&params.page_id).await,
        ))
    }
}

#[tool_handler]
impl rmcp::ServerHandler for ConfluenceServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Confluence MCP Server - Read, search, create, update and comment on Confluence pages"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
