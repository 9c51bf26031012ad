use std::sync::Arc;
use tokio::sync::watch;

use crate::routes::location::Location;
use crate::routes::store::{Subscription, Writable};

/// Route path for a raw fragment: the leading `#` is dropped and an empty
/// fragment maps to `/`
pub fn path_from_hash(hash: &str) -> String {
    let path = hash.strip_prefix('#').unwrap_or(hash);
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

/// Hash-fragment router
///
/// Publishes the current fragment as an observable path and exposes a
/// navigation setter. There is no route table; consumers match on the path
/// themselves.
pub struct PathRouter {
    location: Arc<dyn Location>,
    current: Writable<String>,
}

impl PathRouter {
    /// Seed the path from the location and start listening for changes
    ///
    /// Each change event re-reads the location, so subscribers only ever see
    /// the fragment as it is when the event is handled. The listener holds
    /// weak references; once the router is dropped it does nothing.
    pub fn new(location: Arc<dyn Location>) -> Self {
        let current = Writable::new(path_from_hash(&location.hash()));

        let publisher = current.downgrade();
        let source = Arc::downgrade(&location);
        location.add_hash_change_listener(Arc::new(move |_event: &str| {
            let (Some(current), Some(location)) = (publisher.upgrade(), source.upgrade()) else {
                return;
            };
            let path = path_from_hash(&location.hash());
            if current.set(path.clone()) {
                tracing::debug!(%path, "Route changed");
            }
        }));

        Self { location, current }
    }

    /// Path as last published
    pub fn current(&self) -> String {
        self.current.get()
    }

    /// Callback subscription; runs immediately with the current path
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&String) + Send + Sync + 'static,
    {
        self.current.subscribe(callback)
    }

    /// Async view of the current path
    pub fn watch(&self) -> watch::Receiver<String> {
        self.current.watch()
    }

    /// Write `path` to the fragment. Subscribers see it once the location
    /// delivers its change event, not during this call.
    pub fn navigate(&self, path: &str) {
        tracing::debug!(%path, "Navigating");
        self.location.set_hash(path);
    }
}

impl std::fmt::Debug for PathRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathRouter")
            .field("current", &self.current())
            .finish()
    }
}
