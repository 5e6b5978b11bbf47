//! The `menu_order_tool`: menu lookup and order placement for agents.
//!
//! One entry point serves both purposes. When the agent passes a non-empty
//! list of item ids an order is placed; otherwise the full menu is returned.
//! Client failures never escape the tool. They come back as a tagged
//! [`ToolOutcome::Error`] so the agent can tell them apart from menu data.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::api::MenuApiClient;
use crate::client::{ClientError, MenuApi};
use crate::options::MenuApiConfig;
use crate::tools::{tool_definition, Tool, ToolError, ToolService};

pub const TOOL_NAME: &str = "menu_order_tool";

pub const TOOL_DESCRIPTION: &str = "A comprehensive tool for interacting with the restaurant's \
     Menu API, allowing users to search the menu and place orders directly.";

/// Input accepted by the tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OrderInput {
    /// Array of item IDs to order
    #[serde(default)]
    pub items: Option<Vec<i64>>,
}

impl OrderInput {
    pub fn menu() -> Self {
        Self { items: None }
    }

    pub fn order(items: Vec<i64>) -> Self {
        Self { items: Some(items) }
    }

    /// Items to order, or `None` when the menu should be fetched instead.
    /// An empty list counts as no order.
    pub fn order_items(&self) -> Option<&[i64]> {
        self.items.as_deref().filter(|items| !items.is_empty())
    }
}

/// Category of a failed tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
    /// The service answered with a non-success status.
    Status,
    /// The request never completed (DNS, connect, timeout, ...).
    Transport,
    /// The response body was not valid JSON.
    Decode,
    /// The client configuration could not produce a request.
    Config,
}

/// Result of one tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolOutcome {
    Success {
        data: Value,
    },
    Error {
        kind: ToolErrorKind,
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status_code: Option<u16>,
    },
}

impl ToolOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, ToolOutcome::Error { .. })
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            ToolOutcome::Success { data } => Some(data),
            ToolOutcome::Error { .. } => None,
        }
    }
}

impl From<Result<Value, ClientError>> for ToolOutcome {
    fn from(result: Result<Value, ClientError>) -> Self {
        match result {
            Ok(data) => ToolOutcome::Success { data },
            Err(e) => ToolOutcome::from(e),
        }
    }
}

impl From<ClientError> for ToolOutcome {
    fn from(err: ClientError) -> Self {
        let kind = match &err {
            ClientError::Status { .. } => ToolErrorKind::Status,
            ClientError::Http(e) if e.is_decode() => ToolErrorKind::Decode,
            ClientError::Http(_) => ToolErrorKind::Transport,
            ClientError::Parse(_) => ToolErrorKind::Decode,
            ClientError::Config(_) => ToolErrorKind::Config,
        };
        ToolOutcome::Error {
            kind,
            status_code: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Tool that handles menu retrieval and order placement for a restaurant.
#[derive(Debug, Clone, Default)]
pub struct MenuOrderTool<A = MenuApiClient> {
    api: A,
}

impl MenuOrderTool<MenuApiClient> {
    /// Create a tool backed by a real HTTP client.
    pub fn from_config(config: MenuApiConfig) -> Self {
        Self::new(MenuApiClient::new(config))
    }
}

impl<A: MenuApi> MenuOrderTool<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Definition advertised to agent runtimes.
    pub fn definition(&self) -> Tool {
        tool_definition::<OrderInput>(TOOL_NAME, TOOL_DESCRIPTION)
    }

    /// Run the tool, blocking the calling thread.
    ///
    /// # Panics
    ///
    /// With the default [`MenuApiClient`] backend this panics when called from
    /// an async runtime thread, because reqwest's blocking client cannot be
    /// created or dropped there. Use the async entry point instead, or move the
    /// call onto a blocking thread.
    ///
    /// ```no_run
    /// use menu_order_tool::{MenuApiConfig, MenuOrderTool, OrderInput};
    ///
    /// # async fn example() -> Result<(), tokio::task::JoinError> {
    /// let tool = MenuOrderTool::from_config(MenuApiConfig::from_env());
    /// let outcome = tokio::task::spawn_blocking(move || tool.run(&OrderInput::menu())).await?;
    /// println!("{:?}", outcome);
    /// # Ok(())
    /// # }
    /// ```
    pub fn run(&self, input: &OrderInput) -> ToolOutcome {
        let outcome = ToolOutcome::from(match input.order_items() {
            Some(items) => {
                info!("Placing order for {} item(s)", items.len());
                self.api.place_order(items)
            }
            None => {
                info!("Fetching menu");
                self.api.get_menu()
            }
        });
        log_outcome(&outcome);
        outcome
    }

    /// Run the tool.
    pub async fn run_async(&self, input: &OrderInput) -> ToolOutcome {
        let outcome = ToolOutcome::from(match input.order_items() {
            Some(items) => {
                info!("Placing order for {} item(s)", items.len());
                self.api.place_order_async(items).await
            }
            None => {
                info!("Fetching menu");
                self.api.get_menu_async().await
            }
        });
        log_outcome(&outcome);
        outcome
    }

    /// Decode raw runtime arguments for the named tool and run it.
    pub async fn invoke(&self, name: &str, args: Value) -> Result<ToolOutcome, ToolError> {
        let input = parse_input(name, args)?;
        Ok(self.run_async(&input).await)
    }

    /// Blocking counterpart of [`MenuOrderTool::invoke`].
    ///
    /// # Panics
    ///
    /// With the default [`MenuApiClient`] backend this panics when called from
    /// an async runtime thread, because reqwest's blocking client cannot be
    /// created or dropped there. Use the async entry point instead, or move the
    /// call onto a blocking thread.
    pub fn invoke_blocking(&self, name: &str, args: Value) -> Result<ToolOutcome, ToolError> {
        let input = parse_input(name, args)?;
        Ok(self.run(&input))
    }

    /// Blocking counterpart of [`ToolService::call_tool`].
    ///
    /// # Panics
    ///
    /// With the default [`MenuApiClient`] backend this panics when called from
    /// an async runtime thread, because reqwest's blocking client cannot be
    /// created or dropped there. Use the async entry point instead, or move the
    /// call onto a blocking thread.
    pub fn call_tool_blocking(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        encode_outcome(&self.invoke_blocking(name, args)?)
    }
}

#[async_trait]
impl<A: MenuApi> ToolService for MenuOrderTool<A> {
    async fn list_tools(&self) -> Result<Vec<Tool>, ToolError> {
        Ok(vec![self.definition()])
    }

    async fn call_tool(&self, name: String, args: Value) -> Result<Value, ToolError> {
        encode_outcome(&self.invoke(&name, args).await?)
    }
}

fn parse_input(name: &str, args: Value) -> Result<OrderInput, ToolError> {
    if name != TOOL_NAME {
        return Err(ToolError::NotFound(name.to_string()));
    }
    // Runtimes send `null` for tools called without arguments.
    if args.is_null() {
        return Ok(OrderInput::default());
    }
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

fn encode_outcome(outcome: &ToolOutcome) -> Result<Value, ToolError> {
    serde_json::to_value(outcome).map_err(|e| ToolError::Serialization(e.to_string()))
}

fn log_outcome(outcome: &ToolOutcome) {
    if let ToolOutcome::Error { kind, message, .. } = outcome {
        warn!("{} failed ({:?}): {}", TOOL_NAME, kind, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn empty_list_means_menu() {
        assert_eq!(OrderInput::order(vec![]).order_items(), None);
        assert_eq!(OrderInput::menu().order_items(), None);
        assert_eq!(OrderInput::order(vec![7]).order_items(), Some(&[7][..]));
    }

    #[test]
    fn status_error_maps_to_tagged_outcome() {
        let outcome = ToolOutcome::from(ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "status": "error",
                "kind": "status",
                "message": "Error 500: Internal Server Error",
                "status_code": 500
            })
        );
    }

    #[test]
    fn parse_error_maps_to_decode() {
        let err = serde_json::from_str::<Value>("not json").unwrap_err();
        let outcome = ToolOutcome::from(ClientError::from(err));
        assert!(matches!(
            outcome,
            ToolOutcome::Error {
                kind: ToolErrorKind::Decode,
                status_code: None,
                ..
            }
        ));
    }

    #[test]
    fn success_serializes_with_data() {
        let outcome = ToolOutcome::Success {
            data: json!([{ "id": 1 }]),
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({ "status": "success", "data": [{ "id": 1 }] })
        );
    }

    #[test]
    fn null_args_are_menu_request() {
        assert_eq!(parse_input(TOOL_NAME, Value::Null).unwrap(), OrderInput::menu());
        assert_eq!(
            parse_input(TOOL_NAME, json!({})).unwrap(),
            OrderInput::menu()
        );
    }

    #[test]
    fn wrong_name_is_not_found() {
        assert!(matches!(
            parse_input("other_tool", json!({})),
            Err(ToolError::NotFound(_))
        ));
    }

    #[test]
    fn non_integer_items_are_rejected() {
        assert!(matches!(
            parse_input(TOOL_NAME, json!({ "items": ["soup"] })),
            Err(ToolError::InvalidArguments(_))
        ));
    }
}
