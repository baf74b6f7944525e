use parking_lot::Mutex;
use std::sync::Arc;

/// Ordered registry of callbacks keyed by a monotonically increasing id.
///
/// Callers snapshot the registry and invoke callbacks after releasing any
/// lock, so a callback may freely re-enter the owner (read a store, register
/// another listener, unsubscribe itself).
pub(crate) struct Listeners<F: ?Sized> {
    next_id: u64,
    entries: Vec<(u64, Arc<F>)>,
}

impl<F: ?Sized> Listeners<F> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, callback: Arc<F>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    pub(crate) fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn snapshot(&self) -> Vec<Arc<F>> {
        self.entries.iter().map(|(_, cb)| cb.clone()).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<F: ?Sized> Default for Listeners<F> {
    fn default() -> Self {
        Self::new()
    }
}

type Cancel = Box<dyn FnOnce() + Send>;

/// Handle returned by every `subscribe` call.
///
/// Dropping the handle leaves the callback registered; call
/// [`Subscription::unsubscribe`] to remove it. Unsubscribing more than once
/// is a no-op.
pub struct Subscription {
    cancel: Mutex<Option<Cancel>>,
}

impl Subscription {
    pub(crate) fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Mutex::new(Some(Box::new(cancel))),
        }
    }

    /// Combines several subscriptions into one handle that cancels them all.
    pub(crate) fn merge(parts: Vec<Subscription>) -> Self {
        Self::new(move || {
            for part in parts {
                part.unsubscribe();
            }
        })
    }

    pub fn unsubscribe(&self) {
        let cancel = self.cancel.lock().take();
        if let Some(cancel) = cancel {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.lock().is_some()
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
