//! Minimal navigation collaborator. The session layer only needs the current
//! location, a way to force a navigation, and the stream of completed
//! transitions.

use std::sync::RwLock;

use tokio::sync::broadcast;
use tracing::debug;

const EVENT_CAPACITY: usize = 16;

/// The locations that matter to session tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPath {
    Root,
    SignIn,
    SignOut,
}

impl AuthPath {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AuthPath::Root => "/",
            AuthPath::SignIn => "/auth/sign-in",
            AuthPath::SignOut => "/auth/sign-out",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterEvent {
    NavigationStart { url: String },
    NavigationEnd { url: String },
}

/// In-process location state. Navigations complete synchronously: a
/// [RouterEvent::NavigationStart] is published, the location swaps, then a
/// [RouterEvent::NavigationEnd] follows.
pub struct Router {
    current: RwLock<String>,
    events: broadcast::Sender<RouterEvent>,
}

impl Router {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            current: RwLock::new(AuthPath::Root.as_str().to_owned()),
            events,
        }
    }

    pub fn url(&self) -> String {
        self.current.read().expect("router location poisoned").clone()
    }

    pub fn navigate_by_url(&self, url: &str) {
        debug!("navigating to {url}");
        let _ = self.events.send(RouterEvent::NavigationStart { url: url.to_owned() });
        *self.current.write().expect("router location poisoned") = url.to_owned();
        let _ = self.events.send(RouterEvent::NavigationEnd { url: url.to_owned() });
    }

    pub fn events(&self) -> broadcast::Receiver<RouterEvent> {
        self.events.subscribe()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
