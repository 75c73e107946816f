//! Durable storage for the access/refresh credential pair.
//!
//! Wraps the platform [`SecureStore`] bridge with typed accessors and the
//! both-or-none invariant: the pair is written and cleared atomically from
//! the caller's perspective. A partial write failure rolls the store back to
//! empty rather than leaving a mismatched pair behind.
//!
//! Read failures are deliberately indistinguishable from absence: a corrupt
//! or unavailable backing store degrades to "not signed in", never to a
//! crash.

use bridge_traits::SecureStore;
use std::sync::Arc;
use tracing::warn;

use crate::types::TokenPair;

const ACCESS_TOKEN_KEY: &str = "auth.access_token";
const REFRESH_TOKEN_KEY: &str = "auth.refresh_token";

/// Which half of the credential pair to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    Access,
    Refresh,
}

impl CredentialKind {
    fn storage_key(&self) -> &'static str {
        match self {
            CredentialKind::Access => ACCESS_TOKEN_KEY,
            CredentialKind::Refresh => REFRESH_TOKEN_KEY,
        }
    }
}

/// Typed credential storage over the secure store bridge.
#[derive(Clone)]
pub struct CredentialStore {
    secure_store: Arc<dyn SecureStore>,
}

impl CredentialStore {
    pub fn new(secure_store: Arc<dyn SecureStore>) -> Self {
        Self { secure_store }
    }

    /// Read one credential. Absent, unreadable, and non-UTF-8 values all
    /// yield `None`.
    pub async fn get(&self, kind: CredentialKind) -> Option<String> {
        let key = kind.storage_key();
        match self.secure_store.get_secret(key).await {
            Ok(Some(bytes)) => match String::from_utf8(bytes) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(key, "Stored credential is not valid UTF-8, treating as absent");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key, error = %e, "Credential read failed, treating as absent");
                None
            }
        }
    }

    /// Store a credential pair, replacing any previous pair.
    ///
    /// If either write fails the store is cleared so that subsequent reads
    /// never observe a half-updated pair.
    pub async fn set(&self, pair: &TokenPair) {
        let access = self
            .secure_store
            .set_secret(ACCESS_TOKEN_KEY, pair.access_token.as_bytes())
            .await;
        let refresh = self
            .secure_store
            .set_secret(REFRESH_TOKEN_KEY, pair.refresh_token.as_bytes())
            .await;

        if let Err(e) = access.and(refresh) {
            warn!(error = %e, "Credential write failed, clearing pair");
            self.clear().await;
        }
    }

    /// Remove both credentials. Best-effort: delete failures are logged and
    /// swallowed so logout always succeeds locally.
    pub async fn clear(&self) {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(e) = self.secure_store.delete_secret(key).await {
                warn!(key, error = %e, "Failed to delete stored credential");
            }
        }
    }

    /// Whether an access credential is present, without exposing its value.
    pub async fn has_access_credential(&self) -> bool {
        self.get(CredentialKind::Access).await.is_some()
    }
}
