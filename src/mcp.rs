//! MCP server exposing the menu order tool to Model Context Protocol clients.

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ErrorData, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde_json::Value;
use tracing::debug;

use crate::client::MenuApi;
use crate::menu_order::{MenuOrderTool, ToolOutcome};
use crate::tools::ToolError;

/// MCP server handler wrapping a [`MenuOrderTool`].
///
/// Failed calls are reported with `is_error` set on the result rather than as
/// protocol errors, so the model sees the failure text and can react to it.
#[derive(Debug, Clone)]
pub struct MenuOrderServer<A> {
    tool: MenuOrderTool<A>,
}

impl<A: MenuApi> MenuOrderServer<A> {
    pub fn new(tool: MenuOrderTool<A>) -> Self {
        Self { tool }
    }

    pub fn tool(&self) -> &MenuOrderTool<A> {
        &self.tool
    }

    /// Answer to `tools/list`.
    pub fn list_tools_result(&self) -> ListToolsResult {
        ListToolsResult::with_all_items(vec![self.tool.definition()])
    }

    /// Handle a `tools/call` request independently of the transport.
    pub async fn handle_call(
        &self,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, ErrorData> {
        debug!("tools/call {}", request.name);

        let args = request.arguments.map(Value::Object).unwrap_or(Value::Null);
        let outcome = self
            .tool
            .invoke(&request.name, args)
            .await
            .map_err(into_error_data)?;

        Ok(into_call_result(outcome))
    }
}

fn into_error_data(err: ToolError) -> ErrorData {
    match err {
        ToolError::NotFound(_) | ToolError::InvalidArguments(_) => {
            ErrorData::invalid_params(err.to_string(), None)
        }
        ToolError::Serialization(_) => ErrorData::internal_error(err.to_string(), None),
    }
}

fn into_call_result(outcome: ToolOutcome) -> CallToolResult {
    match outcome {
        ToolOutcome::Success { data } => CallToolResult::success(vec![Content::text(data.to_string())]),
        ToolOutcome::Error { message, .. } => CallToolResult::error(vec![Content::text(message)]),
    }
}

impl<A: MenuApi + 'static> ServerHandler for MenuOrderServer<A> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Call menu_order_tool without items to read the menu, \
                 or with a list of item ids to place an order."
                    .to_string(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(self.list_tools_result())
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.handle_call(request).await
    }
}
