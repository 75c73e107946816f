//! # Core Runtime
//!
//! Shared runtime infrastructure for the todo platform core:
//!
//! - [`config`] - Dependency wiring with fail-fast capability validation
//! - [`events`] - Typed event bus for session state changes
//! - [`logging`] - `tracing` subscriber setup
//! - [`error`] - Runtime error type

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::{CoreConfig, CoreConfigBuilder};
pub use error::{Error, Result};
pub use events::{CoreEvent, EventBus, SessionEvent};
