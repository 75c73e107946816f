//! Core authentication types: credential pair, user identity, session state,
//! and the wire payloads exchanged with the backend auth endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// An access/refresh credential pair.
///
/// The two credentials are always stored and rotated together. `Debug` output
/// is redacted so the values never reach logs.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// The authenticated user as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub email_verified: bool,
}

/// Session lifecycle state.
///
/// Starts in [`SessionState::Bootstrapping`] and settles into exactly one of
/// the other two states after the initial credential check. It never returns
/// to `Bootstrapping`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Initial state while stored credentials are being validated.
    Bootstrapping,
    /// A user identity is established.
    Authenticated,
    /// No session; only the public surface is usable.
    Anonymous,
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Bootstrapping)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Bootstrapping => "bootstrapping",
            SessionState::Authenticated => "authenticated",
            SessionState::Anonymous => "anonymous",
        };
        write!(f, "{}", s)
    }
}

// Wire payloads. Field names follow the backend JSON contract.

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub tenant_slug: String,
}

#[derive(Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub email: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Error envelope the backend uses for non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
