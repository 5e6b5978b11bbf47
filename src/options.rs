//! Configuration for the Menu API client and its HTTP transport.

use std::collections::HashMap;
use std::time::Duration;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://grumpy-camels-double.loca.lt";

/// Environment variable holding the bearer credential.
pub const API_KEY_ENV: &str = "MENU_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "MENU_API_URL";

/// Settings a [`MenuApiClient`](crate::api::MenuApiClient) is built from.
///
/// The client never reads the process environment itself. Callers that want
/// environment-driven configuration resolve it once via [`MenuApiConfig::from_env`]
/// and pass the result in.
#[derive(Debug, Clone)]
pub struct MenuApiConfig {
    /// Root of the remote service, without a trailing slash.
    pub base_url: String,

    /// Optional bearer credential. An empty string is treated as absent.
    pub api_key: Option<String>,

    /// Transport tuning for the underlying HTTP clients.
    pub transport: TransportOptions,
}

impl Default for MenuApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            transport: TransportOptions::default(),
        }
    }
}

impl MenuApiConfig {
    /// Create a configuration pointing at `base_url` with no credential.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Resolve configuration from `MENU_API_URL` and `MENU_API_KEY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_ENV)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut config = Self::new(base_url);
        config.api_key = lookup(API_KEY_ENV);
        config
    }

    /// Set the bearer credential.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the transport options.
    pub fn with_transport(mut self, transport: TransportOptions) -> Self {
        self.transport = transport;
        self
    }

    /// The credential, if one is set and non-empty.
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }
}

/// Transport configuration options.
///
/// Controls how requests are sent over the network. Every field defaults to
/// the HTTP library's own behavior.
#[derive(Debug, Clone)]
pub enum TransportOptions {
    /// HTTP transport configuration
    Http {
        /// Request timeout. If None, default client timeout is used.
        timeout: Option<Duration>,
        /// HTTP proxy URL.
        proxy: Option<String>,
        /// Additional HTTP headers to send with every request.
        headers: Option<HashMap<String, String>>,
    },
}

impl Default for TransportOptions {
    fn default() -> Self {
        TransportOptions::Http {
            timeout: None,
            proxy: None,
            headers: None,
        }
    }
}

impl TransportOptions {
    /// Create new default HTTP transport options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, duration: Duration) -> Self {
        match &mut self {
            TransportOptions::Http { timeout, .. } => *timeout = Some(duration),
        }
        self
    }

    /// Set the proxy.
    pub fn with_proxy(mut self, proxy_url: impl Into<String>) -> Self {
        match &mut self {
            TransportOptions::Http { proxy, .. } => *proxy = Some(proxy_url.into()),
        }
        self
    }

    /// Add a header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            TransportOptions::Http { headers, .. } => {
                headers
                    .get_or_insert_with(HashMap::new)
                    .insert(key.into(), value.into());
            }
        }
        self
    }
}
