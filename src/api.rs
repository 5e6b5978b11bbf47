//! Restaurant Menu API client.
//!
//! Requests are described once by [`MenuRequest`] and then sent either with
//! the blocking or the async reqwest client, so both call styles put exactly
//! the same bytes on the wire.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use tracing::debug;

use crate::client::{ClientError, MenuApi, MenuResponse, OrderResponse};
use crate::http::{
    build_blocking_http_client, build_http_client, BlockingResponseExt, RequestBuilderExt,
    ResponseExt,
};
use crate::options::MenuApiConfig;

/// JSON body of `POST /order`.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest<'a> {
    pub items: &'a [i64],
}

/// A fully built request, independent of the client that will send it.
#[derive(Debug)]
pub struct MenuRequest<'a> {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<OrderRequest<'a>>,
}

/// Client for the restaurant Menu API.
///
/// Holds configuration only. Each call builds its own HTTP client, so there is
/// no connection state shared between calls.
#[derive(Debug, Clone, Default)]
pub struct MenuApiClient {
    config: MenuApiConfig,
}

impl MenuApiClient {
    /// Create a new client.
    pub fn new(config: MenuApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MenuApiConfig {
        &self.config
    }

    /// Describe `GET /menu`.
    pub fn menu_request(&self) -> Result<MenuRequest<'static>, ClientError> {
        Ok(MenuRequest {
            method: Method::GET,
            url: self.endpoint("menu")?,
            headers: self.auth_headers()?,
            body: None,
        })
    }

    /// Describe `POST /order` for the given item ids.
    pub fn order_request<'a>(&self, items: &'a [i64]) -> Result<MenuRequest<'a>, ClientError> {
        let mut headers = self.auth_headers()?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(MenuRequest {
            method: Method::POST,
            url: self.endpoint("order")?,
            headers,
            body: Some(OrderRequest { items }),
        })
    }

    /// `<base>/<path>`, once the base URL is known to be usable.
    fn endpoint(&self, path: &str) -> Result<String, ClientError> {
        let base_url = &self.config.base_url;
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| ClientError::Config(format!("invalid base URL {}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "invalid base URL {}: not a hierarchical URL",
                base_url
            )));
        }
        Ok(format!("{}/{}", base_url, path))
    }

    /// Bearer header when a non-empty credential is configured, nothing otherwise.
    fn auth_headers(&self) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = self.config.credential() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|e| ClientError::Config(format!("invalid API key: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Send a request with a blocking HTTP client and decode the JSON body.
    pub fn send<T: serde::de::DeserializeOwned>(
        &self,
        request: MenuRequest<'_>,
    ) -> Result<T, ClientError> {
        debug!("{} {}", request.method, request.url);

        let http_client = build_blocking_http_client(&self.config.transport)?;
        let mut req = http_client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = &request.body {
            req = req.json_logged(body);
        }

        let response = req.send()?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            debug!("API error response ({}): {}", status, body);
            return Err(ClientError::from_status(status));
        }

        response.json_logged()
    }

    /// Send a request with an async HTTP client and decode the JSON body.
    pub async fn send_async<T: serde::de::DeserializeOwned>(
        &self,
        request: MenuRequest<'_>,
    ) -> Result<T, ClientError> {
        debug!("{} {}", request.method, request.url);

        let http_client = build_http_client(&self.config.transport)?;
        let mut req = http_client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = &request.body {
            req = req.json_logged(body);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("API error response ({}): {}", status, body);
            return Err(ClientError::from_status(status));
        }

        response.json_logged().await
    }
}

#[async_trait]
impl MenuApi for MenuApiClient {
    fn get_menu(&self) -> Result<MenuResponse, ClientError> {
        self.send(self.menu_request()?)
    }

    async fn get_menu_async(&self) -> Result<MenuResponse, ClientError> {
        self.send_async(self.menu_request()?).await
    }

    fn place_order(&self, items: &[i64]) -> Result<OrderResponse, ClientError> {
        self.send(self.order_request(items)?)
    }

    async fn place_order_async(&self, items: &[i64]) -> Result<OrderResponse, ClientError> {
        self.send_async(self.order_request(items)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_request_without_credential_has_no_auth() {
        let client = MenuApiClient::new(MenuApiConfig::new("http://menu.test"));
        let request = client.menu_request().unwrap();

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url, "http://menu.test/menu");
        assert!(request.headers.get(AUTHORIZATION).is_none());
        assert!(request.body.is_none());
    }

    #[test]
    fn order_request_carries_bearer_and_body() {
        let client =
            MenuApiClient::new(MenuApiConfig::new("http://menu.test").with_api_key("abc123"));
        let items = [1, 2, 3];
        let request = client.order_request(&items).unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, "http://menu.test/order");
        assert_eq!(request.headers.get(AUTHORIZATION).unwrap(), "Bearer abc123");
        assert_eq!(
            request.headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(
            serde_json::to_value(request.body.unwrap()).unwrap(),
            serde_json::json!({ "items": [1, 2, 3] })
        );
    }

    #[test]
    fn empty_credential_omits_header() {
        let client = MenuApiClient::new(MenuApiConfig::new("http://menu.test").with_api_key(""));
        let request = client.menu_request().unwrap();
        assert!(request.headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn unparsable_base_url_is_config_error() {
        for base_url in ["not a url", "mailto:kitchen@example.com"] {
            let client = MenuApiClient::new(MenuApiConfig::new(base_url));
            assert!(matches!(client.menu_request(), Err(ClientError::Config(_))));
            assert!(matches!(
                client.order_request(&[1]),
                Err(ClientError::Config(_))
            ));
        }
    }

    #[test]
    fn unprintable_credential_is_config_error() {
        let client =
            MenuApiClient::new(MenuApiConfig::new("http://menu.test").with_api_key("bad\nkey"));
        assert!(matches!(client.menu_request(), Err(ClientError::Config(_))));
    }
}
