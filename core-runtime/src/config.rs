//! # Core Configuration Module
//!
//! Provides configuration management for the todo platform core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a [`CoreConfig`]
//! instance that holds all dependencies and settings the core requires. It
//! enforces fail-fast validation so a missing bridge surfaces at startup with
//! an actionable message, not deep inside a request.
//!
//! ## Required Dependencies
//!
//! - `SecureStore` - credential persistence
//! - `Navigator` - route changes on login/logout/forced logout
//!
//! ## Optional Dependencies (with platform defaults)
//!
//! - `HttpClient` - HTTP transport (desktop default: reqwest)
//!
//! When the `desktop-shims` feature is enabled, desktop-ready defaults for
//! `HttpClient` and `SecureStore` are injected automatically if not provided.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//!
//! let config = CoreConfig::builder()
//!     .api_base_url("https://api.example.com")
//!     .navigator(navigator)
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{HttpClient, Navigator, SecureStore};
use std::sync::Arc;
use url::Url;

/// Default buffer size for the core event bus.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

/// Core configuration for the todo platform core.
///
/// Use [`CoreConfig::builder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Base URL of the backend API
    pub api_base_url: Url,

    /// HTTP transport (optional with desktop default)
    pub http_client: Option<Arc<dyn HttpClient>>,

    /// Secure credential storage (required; desktop default available)
    pub secure_store: Option<Arc<dyn SecureStore>>,

    /// Navigation capability (required)
    pub navigator: Option<Arc<dyn Navigator>>,

    /// Event bus buffer size
    pub event_buffer_size: usize,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("api_base_url", &self.api_base_url.as_str())
            .field(
                "http_client",
                &self.http_client.as_ref().map(|_| "HttpClient { ... }"),
            )
            .field(
                "secure_store",
                &self.secure_store.as_ref().map(|_| "SecureStore { ... }"),
            )
            .field(
                "navigator",
                &self.navigator.as_ref().map(|_| "Navigator { ... }"),
            )
            .field("event_buffer_size", &self.event_buffer_size)
            .finish()
    }
}

impl CoreConfig {
    /// Start building a configuration.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }
}

/// Builder for [`CoreConfig`].
#[derive(Default)]
pub struct CoreConfigBuilder {
    api_base_url: Option<String>,
    http_client: Option<Arc<dyn HttpClient>>,
    secure_store: Option<Arc<dyn SecureStore>>,
    navigator: Option<Arc<dyn Navigator>>,
    event_buffer_size: Option<usize>,
}

impl CoreConfigBuilder {
    /// Backend origin, e.g. `https://api.example.com`.
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn secure_store(mut self, store: Arc<dyn SecureStore>) -> Self {
        self.secure_store = Some(store);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = Some(size);
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// - `Error::Config` when the base URL is missing or unparseable
    /// - `Error::CapabilityMissing` when a required bridge is absent and no
    ///   platform default applies
    pub fn build(self) -> Result<CoreConfig> {
        let api_base_url = self
            .api_base_url
            .ok_or_else(|| Error::Config("api_base_url is required".to_string()))?;
        let api_base_url = Url::parse(&api_base_url)
            .map_err(|e| Error::Config(format!("Invalid api_base_url: {}", e)))?;

        #[cfg(feature = "desktop-shims")]
        let http_client: Option<Arc<dyn HttpClient>> = match self.http_client {
            Some(client) => Some(client),
            None => Some(Arc::new(
                bridge_desktop::ReqwestHttpClient::new()
                    .map_err(|e| Error::Internal(e.to_string()))?,
            )),
        };
        #[cfg(not(feature = "desktop-shims"))]
        let http_client = self.http_client;

        #[cfg(feature = "desktop-shims")]
        let secure_store: Option<Arc<dyn SecureStore>> = self
            .secure_store
            .or_else(|| Some(Arc::new(bridge_desktop::KeyringSecureStore::new())));
        #[cfg(not(feature = "desktop-shims"))]
        let secure_store = self.secure_store;

        if http_client.is_none() {
            return Err(Error::CapabilityMissing {
                capability: "HttpClient".to_string(),
                message: "No HTTP client implementation provided. \
                          Desktop: enable the desktop-shims feature. \
                          Other hosts: inject a platform-native adapter."
                    .to_string(),
            });
        }

        if secure_store.is_none() {
            return Err(Error::CapabilityMissing {
                capability: "SecureStore".to_string(),
                message: "No secure store implementation provided. \
                          Desktop: enable the desktop-shims feature for the OS keychain. \
                          Other hosts: inject a platform-native adapter."
                    .to_string(),
            });
        }

        if self.navigator.is_none() {
            return Err(Error::CapabilityMissing {
                capability: "Navigator".to_string(),
                message: "No navigator provided. The core must be able to move the \
                          host to the login view on forced logout; inject a Navigator \
                          (e.g. bridge_desktop::WatchNavigator)."
                    .to_string(),
            });
        }

        Ok(CoreConfig {
            api_base_url,
            http_client,
            secure_store,
            navigator: self.navigator,
            event_buffer_size: self.event_buffer_size.unwrap_or(DEFAULT_EVENT_BUFFER_SIZE),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::http::{HttpRequest, HttpResponse};
    use bridge_traits::navigation::Route;

    struct NoopHttpClient;

    #[async_trait]
    impl HttpClient for NoopHttpClient {
        async fn execute(&self, _request: HttpRequest) -> BridgeResult<HttpResponse> {
            Err(bridge_traits::BridgeError::NotAvailable(
                "noop".to_string(),
            ))
        }
    }

    struct NoopSecureStore;

    #[async_trait]
    impl SecureStore for NoopSecureStore {
        async fn set_secret(&self, _key: &str, _value: &[u8]) -> BridgeResult<()> {
            Ok(())
        }
        async fn get_secret(&self, _key: &str) -> BridgeResult<Option<Vec<u8>>> {
            Ok(None)
        }
        async fn delete_secret(&self, _key: &str) -> BridgeResult<()> {
            Ok(())
        }
    }

    struct NoopNavigator;

    impl Navigator for NoopNavigator {
        fn navigate(&self, _route: Route) {}
    }

    fn full_builder() -> CoreConfigBuilder {
        CoreConfig::builder()
            .api_base_url("https://api.example.com")
            .http_client(Arc::new(NoopHttpClient))
            .secure_store(Arc::new(NoopSecureStore))
            .navigator(Arc::new(NoopNavigator))
    }

    #[test]
    fn test_build_with_all_capabilities() {
        let config = full_builder().build().expect("config should build");
        assert_eq!(config.api_base_url.as_str(), "https://api.example.com/");
        assert_eq!(config.event_buffer_size, DEFAULT_EVENT_BUFFER_SIZE);
    }

    #[test]
    fn test_missing_base_url_fails() {
        let result = CoreConfig::builder()
            .http_client(Arc::new(NoopHttpClient))
            .secure_store(Arc::new(NoopSecureStore))
            .navigator(Arc::new(NoopNavigator))
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_base_url_fails() {
        let result = full_builder().api_base_url("not a url").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_navigator_fails() {
        let result = CoreConfig::builder()
            .api_base_url("https://api.example.com")
            .http_client(Arc::new(NoopHttpClient))
            .secure_store(Arc::new(NoopSecureStore))
            .build();
        assert!(matches!(
            result,
            Err(Error::CapabilityMissing { capability, .. }) if capability == "Navigator"
        ));
    }

    #[cfg(not(feature = "desktop-shims"))]
    #[test]
    fn test_missing_http_client_fails_without_shims() {
        let result = CoreConfig::builder()
            .api_base_url("https://api.example.com")
            .secure_store(Arc::new(NoopSecureStore))
            .navigator(Arc::new(NoopNavigator))
            .build();
        assert!(matches!(
            result,
            Err(Error::CapabilityMissing { capability, .. }) if capability == "HttpClient"
        ));
    }

    #[test]
    fn test_debug_redacts_bridges() {
        let config = full_builder().build().unwrap();
        let debug = format!("{:?}", config);
        assert!(debug.contains("api.example.com"));
        assert!(!debug.contains("NoopSecureStore"));
    }
}
