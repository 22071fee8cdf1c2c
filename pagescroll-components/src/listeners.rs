//! Page change observers.
//!
//! The registry holds observers weakly: it never keeps one alive, and
//! observers that have been dropped are skipped and pruned on the next
//! notification. Membership is by identity, so adding the same observer twice
//! or removing one that was never added does nothing.
//!
//! ```
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//! use pagescroll_components::listeners::ListenerRegistry;
//!
//! let seen = Arc::new(AtomicUsize::new(usize::MAX));
//! let listener = {
//!     let seen = Arc::clone(&seen);
//!     Arc::new(move |page: usize| seen.store(page, Ordering::SeqCst))
//! };
//!
//! let mut registry = ListenerRegistry::new();
//! assert!(registry.add(&listener));
//! assert!(!registry.add(&listener));
//! registry.notify_page_changed(2);
//! assert_eq!(seen.load(Ordering::SeqCst), 2);
//! ```

use std::sync::{Arc, Weak};

use smallvec::SmallVec;
use tracing::trace;

/// Observes page changes.
pub trait PageChangeListener: Send + Sync {
    /// Called synchronously after the active page changed to `page`.
    fn on_page_change(&self, page: usize);
}

impl<F> PageChangeListener for F
where
    F: Fn(usize) + Send + Sync,
{
    fn on_page_change(&self, page: usize) {
        self(page)
    }
}

/// Ordered, identity-based set of weakly held observers.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: SmallVec<[Weak<dyn PageChangeListener>; 4]>,
}

fn same_listener(weak: &Weak<dyn PageChangeListener>, ptr: *const ()) -> bool {
    Weak::as_ptr(weak) as *const () == ptr
}

impl ListenerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener`. Returns `false` if it was already registered.
    pub fn add<L: PageChangeListener + 'static>(&mut self, listener: &Arc<L>) -> bool {
        self.prune();
        let ptr = Arc::as_ptr(listener) as *const ();
        if self.listeners.iter().any(|weak| same_listener(weak, ptr)) {
            return false;
        }
        let weak: Weak<L> = Arc::downgrade(listener);
        self.listeners.push(weak);
        true
    }

    /// Unregisters `listener`. Returns `false` if it was not registered.
    pub fn remove<L: PageChangeListener + 'static>(&mut self, listener: &Arc<L>) -> bool {
        self.prune();
        let ptr = Arc::as_ptr(listener) as *const ();
        let before = self.listeners.len();
        self.listeners.retain(|weak| !same_listener(weak, ptr));
        self.listeners.len() != before
    }

    /// Number of registered observers that are still alive.
    pub fn len(&self) -> usize {
        self.listeners
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Returns `true` if no live observer is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Notifies every live observer, in registration order.
    pub fn notify_page_changed(&mut self, page: usize) {
        self.prune();
        let live: SmallVec<[Arc<dyn PageChangeListener>; 4]> =
            self.listeners.iter().filter_map(Weak::upgrade).collect();
        trace!(page, listeners = live.len(), "notifying page change");
        for listener in live {
            listener.on_page_change(page);
        }
    }
}

impl ListenerRegistry {
    // Drops entries whose observer is gone.
    fn prune(&mut self) {
        self.listeners.retain(|weak| weak.strong_count() > 0);
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
