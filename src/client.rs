//! Core Menu API trait and error types.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Full menu as returned by the remote service, typically an array of objects.
pub type MenuResponse = Value;

/// Order confirmation as returned by the remote service, typically an object.
pub type OrderResponse = Value;

/// Errors that can occur while talking to the Menu API.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Error {}: {reason}", .status.as_u16())]
    Status { status: StatusCode, reason: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Build a status error from a non-success response code.
    pub fn from_status(status: StatusCode) -> Self {
        ClientError::Status {
            status,
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    /// The HTTP status that caused this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
            _ => None,
        }
    }
}

/// Operations offered by the restaurant Menu API.
///
/// Every operation comes in a blocking and a suspension-capable flavor. The
/// blocking methods must not be called from inside an async runtime thread.
#[async_trait]
pub trait MenuApi: Send + Sync {
    /// Fetch the full menu, blocking the calling thread.
    fn get_menu(&self) -> Result<MenuResponse, ClientError>;

    /// Fetch the full menu.
    async fn get_menu_async(&self) -> Result<MenuResponse, ClientError>;

    /// Place an order for the given item ids, blocking the calling thread.
    fn place_order(&self, items: &[i64]) -> Result<OrderResponse, ClientError>;

    /// Place an order for the given item ids.
    async fn place_order_async(&self, items: &[i64]) -> Result<OrderResponse, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_code_and_reason() {
        let err = ClientError::from_status(StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Error 404: Not Found");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn config_error_has_no_status() {
        let err = ClientError::Config("bad url".to_string());
        assert_eq!(err.status(), None);
    }
}
