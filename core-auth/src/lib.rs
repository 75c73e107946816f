//! # Authentication Module
//!
//! Authenticated API access layer and session lifecycle for the todo platform.
//!
//! ## Overview
//!
//! This crate owns the only protocol-shaped part of the client: attaching
//! bearer credentials to outbound requests, detecting credential expiry,
//! performing a single coordinated refresh per failing request, replaying the
//! original request, and deterministically forcing logout when refresh is
//! impossible.
//!
//! ## Components
//!
//! - [`CredentialStore`] - durable access/refresh credential pair storage
//! - [`ApiRequest`] - pending request descriptor with the single-retry marker
//! - [`AuthPipeline`] - request authenticator + refresh coordinator
//! - [`SessionManager`] - bootstrap / login / register / logout / identity

pub mod credential_store;
pub mod error;
pub mod pipeline;
pub mod request;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod testkit;

pub use credential_store::{CredentialKind, CredentialStore};
pub use error::{AuthError, Result};
pub use pipeline::AuthPipeline;
pub use request::ApiRequest;
pub use session::SessionManager;
pub use types::{SessionState, TokenPair, User};
