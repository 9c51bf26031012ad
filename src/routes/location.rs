//! Document location abstraction.
//!
//! The router never touches a platform location directly; it goes through the
//! [`Location`] trait so the owner of the real URL can be injected.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

/// Callback fired with the new fragment (including `#`, or empty) after a change
pub type HashChangeListener = Arc<dyn Fn(&str) + Send + Sync>;

/// Owner of the current URL fragment
pub trait Location: Send + Sync {
    /// Current fragment including the leading `#`, or an empty string
    fn hash(&self) -> String;

    /// Write the fragment.
    ///
    /// Implementations must not invoke change listeners from inside this
    /// call; notification happens on a later turn of the event loop.
    fn set_hash(&self, hash: &str);

    fn add_hash_change_listener(&self, listener: HashChangeListener);
}

/// Normalise a written fragment the way browsers do: a missing `#` is added and
/// an empty fragment reads back as the empty string
pub fn normalize_hash(hash: &str) -> String {
    let fragment = hash.strip_prefix('#').unwrap_or(hash);
    if fragment.is_empty() {
        String::new()
    } else {
        format!("#{}", fragment)
    }
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-process location with browser `hashchange` semantics
///
/// Changes are queued and delivered in order by a Tokio task, so listeners
/// never run inside `set_hash`. Writing the current fragment again fires
/// nothing. The delivery task ends when the location is dropped.
pub struct MemoryLocation {
    hash: Mutex<String>,
    listeners: Arc<Mutex<Vec<HashChangeListener>>>,
    events: mpsc::UnboundedSender<String>,
}

impl MemoryLocation {
    /// Create a location seeded with `initial`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(initial: &str) -> Arc<Self> {
        let (events, mut queue) = mpsc::unbounded_channel::<String>();
        let listeners: Arc<Mutex<Vec<HashChangeListener>>> = Arc::new(Mutex::new(Vec::new()));

        let dispatch = Arc::clone(&listeners);
        tokio::spawn(async move {
            while let Some(hash) = queue.recv().await {
                let snapshot: Vec<HashChangeListener> = lock(&dispatch).clone();
                tracing::trace!(%hash, listeners = snapshot.len(), "Dispatching hashchange");
                for listener in snapshot {
                    listener(&hash);
                }
            }
        });

        Arc::new(Self {
            hash: Mutex::new(normalize_hash(initial)),
            listeners,
            events,
        })
    }
}

impl Location for MemoryLocation {
    fn hash(&self) -> String {
        lock(&self.hash).clone()
    }

    fn set_hash(&self, hash: &str) {
        let next = normalize_hash(hash);
        let mut current = lock(&self.hash);
        if *current == next {
            return;
        }
        *current = next.clone();
        drop(current);

        if self.events.send(next).is_err() {
            tracing::warn!("hashchange delivery task is gone, change not announced");
        }
    }

    fn add_hash_change_listener(&self, listener: HashChangeListener) {
        lock(&self.listeners).push(listener);
    }
}

impl std::fmt::Debug for MemoryLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryLocation")
            .field("hash", &self.hash())
            .field("listeners", &lock(&self.listeners).len())
            .finish()
    }
}
