//! # Event Bus System
//!
//! Decoupled communication between the core and host UIs using
//! `tokio::sync::broadcast`. The session manager and auth pipeline emit typed
//! events; any number of subscribers (status bars, analytics, tests) listen
//! independently.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{EventBus, CoreEvent, SessionEvent};
//!
//! let event_bus = EventBus::new(100);
//! let mut stream = event_bus.subscribe();
//!
//! event_bus
//!     .emit(CoreEvent::Session(SessionEvent::SignedOut))
//!     .ok();
//! ```
//!
//! ## Error Handling
//!
//! Subscribers can observe two errors from `recv`:
//!
//! - `RecvError::Lagged(n)`: the subscriber missed `n` events; non-fatal.
//! - `RecvError::Closed`: all senders dropped; treat as shutdown.
//!
//! Emission is fire-and-forget: a send error only means nobody is listening.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Top-level event enum encompassing all event categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Session lifecycle events
    Session(SessionEvent),
}

impl CoreEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            CoreEvent::Session(e) => e.description(),
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            CoreEvent::Session(SessionEvent::SessionError {
                recoverable: false, ..
            }) => EventSeverity::Error,
            CoreEvent::Session(SessionEvent::SessionError {
                recoverable: true, ..
            }) => EventSeverity::Warning,
            CoreEvent::Session(SessionEvent::SignedIn { .. }) => EventSeverity::Info,
            CoreEvent::Session(SessionEvent::SignedOut) => EventSeverity::Info,
            _ => EventSeverity::Debug,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

/// Events related to the authentication session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum SessionEvent {
    /// A user successfully authenticated (login or bootstrap).
    SignedIn {
        /// The authenticated user id.
        user_id: String,
    },
    /// The session ended: explicit logout or forced logout after an
    /// exhausted refresh.
    SignedOut,
    /// The credential pair was rotated after an authorization failure.
    TokenRefreshed,
    /// A session-level error occurred.
    SessionError {
        /// Human-readable error message (never contains credentials).
        message: String,
        /// Whether the caller can retry (e.g. wrong password vs. dead session).
        recoverable: bool,
    },
}

impl SessionEvent {
    fn description(&self) -> &str {
        match self {
            SessionEvent::SignedIn { .. } => "User signed in",
            SessionEvent::SignedOut => "User signed out",
            SessionEvent::TokenRefreshed => "Credentials refreshed",
            SessionEvent::SessionError { .. } => "Session error",
        }
    }
}

/// Central broadcast channel for core events.
///
/// Cloning an `EventBus` clones the sender handle; all clones feed the same
/// set of subscribers.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Create a new event bus with the given buffer size.
    pub fn new(buffer_size: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer_size);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of subscribers that received the event. An `Err`
    /// only means there are no subscribers, which callers normally ignore.
    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        self.sender.send(event)
    }

    /// Subscribe to all events emitted after this call.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
