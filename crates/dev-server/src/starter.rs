//! Minimal MCP server to copy when starting a new tool server.

use crate::types::{AddParams, HelloParams};
use rmcp::handler::server::ServerHandler;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{ErrorData as McpError, tool, tool_handler, tool_router};

/// Starter server with a greeting and an addition tool.
#[derive(Debug, Clone)]
pub struct StarterService {
    tool_router: ToolRouter<Self>,
}

impl StarterService {
    /// Creates the service.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for StarterService {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl StarterService {
    /// Greets someone.
    #[tool(description = "Say hello to someone.")]
    async fn hello(
        &self,
        Parameters(params): Parameters<HelloParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(format!(
            "Hello, {}!",
            params.name
        ))]))
    }

    /// Adds two numbers.
    #[tool(description = "Add two numbers.")]
    async fn add(
        &self,
        Parameters(AddParams { a, b }): Parameters<AddParams>,
    ) -> Result<CallToolResult, McpError> {
        let sum = a
            .checked_add(b)
            .ok_or_else(|| McpError::invalid_params(format!("{a} + {b} overflows"), None))?;
        Ok(CallToolResult::success(vec![Content::text(sum.to_string())]))
    }
}

#[tool_handler]
impl ServerHandler for StarterService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some("Example tools: hello and add.".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;

    fn text(result: Result<CallToolResult, McpError>) -> String {
        result.unwrap().content[0].as_text().unwrap().text.clone()
    }

    #[tokio::test]
    async fn test_hello() {
        let service = StarterService::new();
        let default: HelloParams = serde_json::from_str("{}").unwrap();
        assert_eq!(text(service.hello(Parameters(default)).await), "Hello, World!");

        let named = HelloParams {
            name: "Ada".to_string(),
        };
        assert_eq!(text(service.hello(Parameters(named)).await), "Hello, Ada!");
    }

    #[tokio::test]
    async fn test_add() {
        let service = StarterService::default();
        assert_eq!(
            text(service.add(Parameters(AddParams { a: 2, b: -5 })).await),
            "-3"
        );

        let err = service
            .add(Parameters(AddParams { a: i64::MAX, b: 1 }))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[test]
    fn test_get_info() {
        let info = StarterService::new().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.prompts.is_none());
    }
}
