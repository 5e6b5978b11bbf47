//! HTTP client utilities shared by the blocking and async request paths.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::client::ClientError;
use crate::options::TransportOptions;

/// Build a configured async HTTP client from transport options.
pub fn build_http_client(
    transport_options: &TransportOptions,
) -> Result<reqwest::Client, ClientError> {
    let mut builder = reqwest::Client::builder().default_headers(extra_headers(transport_options)?);

    match transport_options {
        TransportOptions::Http { timeout, proxy, .. } => {
            if let Some(t) = timeout {
                builder = builder.timeout(*t);
            }
            if let Some(proxy_url) = proxy {
                builder = builder.proxy(parse_proxy(proxy_url)?);
            }
        }
    }

    Ok(builder.build()?)
}

/// Build a configured blocking HTTP client from transport options.
///
/// Must be called outside of an async runtime thread, like every other
/// blocking reqwest operation.
pub fn build_blocking_http_client(
    transport_options: &TransportOptions,
) -> Result<reqwest::blocking::Client, ClientError> {
    let mut builder =
        reqwest::blocking::Client::builder().default_headers(extra_headers(transport_options)?);

    match transport_options {
        TransportOptions::Http { timeout, proxy, .. } => {
            // The blocking client defaults to 30s while the async one has no
            // timeout. `None` clears it so both flavors behave the same.
            builder = builder.timeout(*timeout);
            if let Some(proxy_url) = proxy {
                builder = builder.proxy(parse_proxy(proxy_url)?);
            }
        }
    }

    Ok(builder.build()?)
}

fn parse_proxy(proxy_url: &str) -> Result<reqwest::Proxy, ClientError> {
    reqwest::Proxy::all(proxy_url)
        .map_err(|e| ClientError::Config(format!("proxy {}: {}", proxy_url, e)))
}

/// Collect the extra headers from transport options into a header map.
pub fn extra_headers(transport_options: &TransportOptions) -> Result<HeaderMap, ClientError> {
    let mut map = HeaderMap::new();
    match transport_options {
        TransportOptions::Http { headers, .. } => {
            if let Some(h) = headers {
                for (key, value) in h {
                    let name = HeaderName::from_bytes(key.as_bytes())
                        .map_err(|e| ClientError::Config(format!("header {key}: {e}")))?;
                    let value = HeaderValue::from_str(value)
                        .map_err(|e| ClientError::Config(format!("header {key}: {e}")))?;
                    map.insert(name, value);
                }
            }
        }
    }
    Ok(map)
}

/// Log a request body at debug level before it is sent.
pub fn log_request_body<T: serde::Serialize + ?Sized>(json: &T) {
    if let Ok(req_body) = serde_json::to_string_pretty(json) {
        tracing::debug!("API request body ({} bytes):\n{}", req_body.len(), req_body);
    }
}

/// Log a response body at debug level and decode it as JSON.
pub fn decode_logged<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, ClientError> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        tracing::debug!("API response ({} bytes):\n{}", text.len(), text);
    }

    serde_json::from_slice(bytes).map_err(ClientError::from)
}

/// Extension trait for request builders that logs the JSON body.
pub trait RequestBuilderExt {
    /// Set JSON request body and log it. Returns the builder for chaining.
    fn json_logged<T: serde::Serialize + ?Sized>(self, json: &T) -> Self;
}

impl RequestBuilderExt for reqwest::RequestBuilder {
    fn json_logged<T: serde::Serialize + ?Sized>(self, json: &T) -> Self {
        log_request_body(json);
        self.json(json)
    }
}

impl RequestBuilderExt for reqwest::blocking::RequestBuilder {
    fn json_logged<T: serde::Serialize + ?Sized>(self, json: &T) -> Self {
        log_request_body(json);
        self.json(json)
    }
}

/// Extension trait for async responses that logs the body.
#[async_trait::async_trait]
pub trait ResponseExt {
    /// Parse response as JSON and log it. Consumes the response.
    async fn json_logged<T: serde::de::DeserializeOwned>(self) -> Result<T, ClientError>;
}

#[async_trait::async_trait]
impl ResponseExt for reqwest::Response {
    async fn json_logged<T: serde::de::DeserializeOwned>(self) -> Result<T, ClientError> {
        let bytes = self.bytes().await?;
        decode_logged(&bytes)
    }
}

/// Blocking counterpart of [`ResponseExt`].
pub trait BlockingResponseExt {
    /// Parse response as JSON and log it. Consumes the response.
    fn json_logged<T: serde::de::DeserializeOwned>(self) -> Result<T, ClientError>;
}

impl BlockingResponseExt for reqwest::blocking::Response {
    fn json_logged<T: serde::de::DeserializeOwned>(self) -> Result<T, ClientError> {
        let bytes = self.bytes()?;
        decode_logged(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_headers_are_collected() {
        let options = TransportOptions::new().with_header("X-Location", "downtown");
        let map = extra_headers(&options).unwrap();
        assert_eq!(map.get("x-location").unwrap(), "downtown");
    }

    #[test]
    fn invalid_header_is_config_error() {
        let options = TransportOptions::new().with_header("bad header", "x");
        assert!(matches!(
            extra_headers(&options),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn invalid_proxy_is_config_error() {
        let options = TransportOptions::new().with_proxy("::::not-a-proxy");
        assert!(matches!(
            build_http_client(&options),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            build_blocking_http_client(&options),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn decode_rejects_malformed_body() {
        let result: Result<serde_json::Value, _> = decode_logged(b"<html>");
        assert!(matches!(result, Err(ClientError::Parse(_))));
    }
}
