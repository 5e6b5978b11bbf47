use menu_order_tool::{MenuApiConfig, MenuOrderServer, MenuOrderTool};
use rmcp::{transport::stdio, ServiceExt};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Serves the menu order tool over MCP on stdin/stdout.
///
/// Configuration comes from `MENU_API_URL` and `MENU_API_KEY`. Logs go to
/// stderr since stdout carries the protocol.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = MenuApiConfig::from_env();
    info!(
        "Starting menu order MCP server for {} (authenticated: {})",
        config.base_url,
        config.credential().is_some()
    );

    let server = MenuOrderServer::new(MenuOrderTool::from_config(config));
    let service = server.serve(stdio()).await?;

    let reason = service.waiting().await?;
    info!("MCP session ended: {:?}", reason);
    Ok(())
}
