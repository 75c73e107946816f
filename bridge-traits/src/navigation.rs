//! Navigation Abstraction
//!
//! The core decides *when* the user must move between views (forced logout
//! lands on the login view, a successful login lands on the todo view), but
//! *how* a view change happens is host territory. Hosts inject a [`Navigator`]
//! so the core never touches a real browsing context and the behavior stays
//! testable.

use std::fmt;

/// Application routes the core can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The login entry point
    Login,
    /// The main todo view
    Todos,
}

impl Route {
    /// Path form of the route, for hosts that map routes onto URLs
    pub fn as_path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Todos => "/todos",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_path())
    }
}

/// Navigation capability injected into the core.
///
/// `navigate` must not block and must not fail; a host that cannot honor a
/// route change (e.g. headless test harness) simply records or ignores it.
pub trait Navigator: Send + Sync {
    /// Request a transition to `route`.
    fn navigate(&self, route: Route);
}
