//! Observable single-value store.
//!
//! A [`Writable`] holds the latest value and republishes it on change to two
//! kinds of consumers:
//! - callback subscribers, invoked synchronously from `set` in the order they
//!   subscribed (and once immediately on subscribe with the current value)
//! - `tokio::sync::watch` receivers for async consumers

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::watch;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Shared<T> {
    tx: watch::Sender<T>,
    subscribers: Mutex<Vec<(u64, Callback<T>)>>,
    next_id: AtomicU64,
}

/// Latest-value store with ordered subscribers
pub struct Writable<T> {
    inner: Arc<Shared<T>>,
}

impl<T> Clone for Writable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T> Writable<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            inner: Arc::new(Shared {
                tx,
                subscribers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Current value
    pub fn get(&self) -> T {
        self.inner.tx.borrow().clone()
    }

    /// Replace the value and notify subscribers.
    ///
    /// Setting a value equal to the current one is a no-op. Returns whether
    /// subscribers were notified.
    pub fn set(&self, value: T) -> bool {
        let changed = self.inner.tx.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value.clone();
            true
        });

        if changed {
            // Snapshot so callbacks may subscribe or unsubscribe re-entrantly
            let callbacks: Vec<Callback<T>> = lock(&self.inner.subscribers)
                .iter()
                .map(|(_, callback)| Arc::clone(callback))
                .collect();
            for callback in callbacks {
                callback(&value);
            }
        }

        changed
    }

    /// Register a callback. It runs immediately with the current value and
    /// then after every change until the returned [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let callback: Callback<T> = Arc::new(callback);
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.inner.subscribers).push((id, Arc::clone(&callback)));

        callback(&self.get());

        let shared = Arc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(shared) = shared.upgrade() {
                    lock(&shared.subscribers).retain(|(sub_id, _)| *sub_id != id);
                }
            })),
        }
    }

    /// Receiver that observes every change made after this call
    pub fn watch(&self) -> watch::Receiver<T> {
        self.inner.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner.subscribers).len()
    }

    /// Handle that does not keep the store alive
    pub fn downgrade(&self) -> WeakWritable<T> {
        WeakWritable {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

/// Non-owning reference to a [`Writable`]
pub struct WeakWritable<T> {
    inner: Weak<Shared<T>>,
}

impl<T> Clone for WeakWritable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T> WeakWritable<T> {
    /// The store, if any strong handle is still alive
    pub fn upgrade(&self) -> Option<Writable<T>> {
        self.inner.upgrade().map(|inner| Writable { inner })
    }
}

/// Handle for a callback subscription; dropping it unsubscribes
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
