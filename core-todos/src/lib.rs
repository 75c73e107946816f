//! # Todo Access Layer
//!
//! Thin, typed wrappers over the backend's todo endpoints. All calls flow
//! through the authenticated pipeline in `core-auth`, which transparently
//! handles bearer attachment and refresh-on-401; this crate adds no error
//! handling of its own beyond decoding.

pub mod client;
pub mod types;

pub use client::TodoClient;
pub use core_auth::{AuthError, Result};
pub use types::{NewTodo, Todo, TodoPatch};
