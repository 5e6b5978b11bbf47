//! # menu_order_tool - Restaurant Menu API as an agent tool
//!
//! A thin adapter that exposes a restaurant's Menu API (`GET /menu`,
//! `POST /order`) as a callable tool for LLM agent runtimes.
//!
//! ## Architecture
//!
//! 1. **[`MenuApiClient`]** talks HTTP. Every operation comes in a blocking and
//!    an async flavor sharing the same request construction.
//! 2. **[`MenuOrderTool`]** is the tool surface. It fetches the menu when no
//!    items are given and places an order otherwise, returning a tagged
//!    [`ToolOutcome`] instead of propagating client errors.
//! 3. **[`MenuOrderServer`]** serves the tool over MCP.
//!
//! ## Example
//! ```no_run
//! use menu_order_tool::{MenuApiConfig, MenuOrderTool, OrderInput};
//!
//! #[tokio::main]
//! async fn main() {
//!     let tool = MenuOrderTool::from_config(MenuApiConfig::from_env());
//!
//!     let menu = tool.run_async(&OrderInput::menu()).await;
//!     println!("{:?}", menu);
//!
//!     let receipt = tool.run_async(&OrderInput::order(vec![1, 2, 3])).await;
//!     println!("{:?}", receipt);
//! }
//! ```

pub mod api;
pub mod client;
pub mod http;
pub mod mcp;
pub mod menu_order;
pub mod options;
pub mod tools;

pub use api::MenuApiClient;
pub use client::{ClientError, MenuApi, MenuResponse, OrderResponse};
pub use mcp::MenuOrderServer;
pub use menu_order::{MenuOrderTool, OrderInput, ToolErrorKind, ToolOutcome};
pub use options::{MenuApiConfig, TransportOptions};
pub use tools::{Tool, ToolError, ToolService};

// Re-export rmcp for convenience
pub use rmcp;
