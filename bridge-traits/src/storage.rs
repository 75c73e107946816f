//! Secure Storage Abstraction
//!
//! Provides a platform-agnostic trait for persisting opaque secrets such as
//! session credentials.
//!
//! Implementations exist per platform:
//! - macOS: Keychain
//! - Windows: Credential Manager (DPAPI)
//! - Linux: Secret Service / libsecret
//! - Embedded web view: origin-scoped storage
//!
//! # Security Requirements
//!
//! Implementations MUST:
//! - Encrypt data at rest where the platform supports it
//! - Never log or expose secret values
//!
//! # Example
//!
//! ```ignore
//! use bridge_traits::storage::SecureStore;
//!
//! async fn store_token(store: &dyn SecureStore, token: &str) -> Result<()> {
//!     store.set_secret("auth.access_token", token.as_bytes()).await?;
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;

use crate::error::Result;

/// Secure credential storage trait
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// Store a secret value
    ///
    /// The previous value under `key` is overwritten.
    async fn set_secret(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Retrieve a secret value
    ///
    /// Returns `Ok(None)` if the key doesn't exist. Returned data should be
    /// handled securely and never logged.
    async fn get_secret(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Delete a secret
    ///
    /// Idempotent: deleting an absent key succeeds.
    async fn delete_secret(&self, key: &str) -> Result<()>;

    /// Check if a secret exists without retrieving it
    async fn has_secret(&self, key: &str) -> Result<bool> {
        Ok(self.get_secret(key).await?.is_some())
    }
}
