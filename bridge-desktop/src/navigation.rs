//! Navigator implementation for desktop shells
//!
//! The core calls [`Navigator::navigate`]; the host UI observes the resulting
//! route changes on a `tokio::sync::watch` channel and swaps views accordingly.

use bridge_traits::navigation::{Navigator, Route};
use tokio::sync::watch;
use tracing::debug;

/// Navigator publishing route changes on a watch channel.
///
/// Only the latest route matters to a view layer, which is exactly the watch
/// channel contract.
pub struct WatchNavigator {
    tx: watch::Sender<Route>,
}

impl WatchNavigator {
    /// Create a navigator and the receiver the host shell should watch.
    ///
    /// The initial observed route is [`Route::Login`].
    pub fn new() -> (Self, watch::Receiver<Route>) {
        let (tx, rx) = watch::channel(Route::Login);
        (Self { tx }, rx)
    }
}

impl Navigator for WatchNavigator {
    fn navigate(&self, route: Route) {
        debug!(route = %route, "Navigation requested");
        // Send only fails when the host dropped its receiver; at that point
        // there is no UI left to move.
        let _ = self.tx.send(route);
    }
}
