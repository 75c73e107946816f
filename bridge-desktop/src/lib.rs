//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! This crate provides production-ready implementations using
//! desktop-appropriate libraries:
//! - `HttpClient` using `reqwest`
//! - `SecureStore` using the `keyring` crate (OS keychain), plus an in-process
//!   `MemorySecureStore` for hosts without a keychain
//! - `Navigator` using a `tokio::sync::watch` channel the host shell observes
//!
//! ## Feature Flags
//!
//! - `secure-store`: Enable OS keychain integration (default)
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{ReqwestHttpClient, WatchNavigator};
//!
//! let http_client = ReqwestHttpClient::new();
//! let (navigator, mut routes) = WatchNavigator::new();
//! // Pass both into the core configuration; drive the UI from `routes`.
//! ```

mod http;
mod navigation;
mod memory_store;

#[cfg(feature = "secure-store")]
mod secure_store;

pub use http::ReqwestHttpClient;
pub use memory_store::MemorySecureStore;
pub use navigation::WatchNavigator;

#[cfg(feature = "secure-store")]
pub use secure_store::KeyringSecureStore;
