use super::subscription::{Listeners, Subscription};
use crate::core::{Record, StoreError};
use crate::storage::{Medium, WatchGuard};
use parking_lot::{Mutex, RwLock};
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

type ValueCallback<T> = dyn Fn(&[T]) + Send + Sync;
type WarningCallback = dyn Fn(&StoreError) + Send + Sync;

struct Inner<T: Record> {
    key: String,
    default: Vec<T>,
    medium: Arc<dyn Medium>,
    items: RwLock<Vec<T>>,
    subscribers: Mutex<Listeners<ValueCallback<T>>>,
    warning_listeners: Mutex<Listeners<WarningCallback>>,
    last_warning: Mutex<Option<StoreError>>,
    watch: Mutex<Option<WatchGuard>>,
}

/// A typed collection kept in sync with one slot of a [`Medium`].
///
/// The whole collection is serialized as a JSON array under `key`. Cloning the
/// store yields another handle to the same collection.
///
/// Storage problems never surface as errors from `get`, `set` or `subscribe`:
/// the in-memory value stays authoritative, the problem is logged and handed
/// to [`on_warning`](Self::on_warning) listeners.
pub struct PersistedCollectionStore<T: Record> {
    inner: Arc<Inner<T>>,
}

impl<T: Record> Clone for PersistedCollectionStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Record> PersistedCollectionStore<T> {
    /// Opens the collection stored under `key`, seeding it with `default` when
    /// nothing usable is stored yet.
    ///
    /// A missing slot is initialized with `default` right away. An unreadable
    /// medium or an unparseable slot also falls back to `default`, but leaves
    /// the slot untouched until the next `set`.
    pub fn open(medium: Arc<dyn Medium>, key: impl Into<String>, default: Vec<T>) -> Self {
        let key = key.into();
        let mut pending_warning = None;
        let mut write_through = false;

        let items = match medium.read(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<T>>(&raw) {
                Ok(items) => {
                    debug!(key = %key, len = items.len(), "loaded collection from medium");
                    items
                }
                Err(e) => {
                    pending_warning = Some(StoreError::deserialization(&key, e));
                    default.clone()
                }
            },
            Ok(None) => {
                write_through = true;
                default.clone()
            }
            Err(err) => {
                pending_warning = Some(err);
                default.clone()
            }
        };

        let store = Self {
            inner: Arc::new(Inner {
                key,
                default,
                medium,
                items: RwLock::new(items),
                subscribers: Mutex::new(Listeners::new()),
                warning_listeners: Mutex::new(Listeners::new()),
                last_warning: Mutex::new(None),
                watch: Mutex::new(None),
            }),
        };

        if let Some(err) = pending_warning {
            store.inner.raise(err);
        }
        if write_through {
            let items = store.inner.items.read().clone();
            store.inner.persist(&items);
        }
        store.attach_watch();
        store
    }

    fn attach_watch(&self) {
        let weak: Weak<Inner<T>> = Arc::downgrade(&self.inner);
        let guard = self.inner.medium.watch(
            &self.inner.key,
            Arc::new(move |_key: &str, raw: Option<&str>| {
                if let Some(inner) = weak.upgrade() {
                    inner.apply_external(raw);
                }
            }),
        );
        *self.inner.watch.lock() = Some(guard);
    }

    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Current in-memory value.
    pub fn get(&self) -> Vec<T> {
        self.inner.items.read().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.items.read().is_empty()
    }

    /// Runs `f` against the current value without cloning it.
    pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.inner.items.read())
    }

    /// Replaces the whole collection, writes it through and notifies every
    /// local subscriber. A failed write is reported as a warning only.
    pub fn set(&self, items: Vec<T>) {
        *self.inner.items.write() = items.clone();
        self.inner.persist(&items);
        self.inner.notify(&items);
    }

    /// Registers `callback` for every change of the collection, local or
    /// external.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&[T]) + Send + Sync + 'static,
    {
        let id = self.inner.subscribers.lock().insert(Arc::new(callback));
        let weak = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.subscribers.lock().remove(id);
            }
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }

    /// Registers `callback` for non-fatal storage problems.
    pub fn on_warning<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&StoreError) + Send + Sync + 'static,
    {
        let id = self.inner.warning_listeners.lock().insert(Arc::new(callback));
        let weak = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.warning_listeners.lock().remove(id);
            }
        })
    }

    /// Most recent storage problem, if any occurred.
    pub fn last_warning(&self) -> Option<StoreError> {
        self.inner.last_warning.lock().clone()
    }

    /// Returns the most recent storage problem and clears it, so the next
    /// call only reports problems raised after this one.
    pub fn take_warning(&self) -> Option<StoreError> {
        self.inner.last_warning.lock().take()
    }
}

impl<T: Record> Inner<T> {
    fn persist(&self, items: &[T]) {
        let raw = match serde_json::to_string(items) {
            Ok(raw) => raw,
            Err(e) => {
                self.raise(StoreError::write(&self.key, format!("serialization failed: {}", e)));
                return;
            }
        };
        if let Err(err) = self.medium.write(&self.key, &raw) {
            self.raise(err);
        }
    }

    fn notify(&self, items: &[T]) {
        let subscribers = self.subscribers.lock().snapshot();
        for subscriber in subscribers {
            subscriber(items);
        }
    }

    fn raise(&self, err: StoreError) {
        warn!(key = %self.key, error = %err, "collection storage degraded");
        *self.last_warning.lock() = Some(err.clone());
        let listeners = self.warning_listeners.lock().snapshot();
        for listener in listeners {
            listener(&err);
        }
    }

    /// Another context changed our slot: adopt its value.
    fn apply_external(&self, raw: Option<&str>) {
        let items = match raw {
            Some(raw) => match serde_json::from_str::<Vec<T>>(raw) {
                Ok(items) => items,
                Err(e) => {
                    self.raise(StoreError::deserialization(&self.key, e));
                    return;
                }
            },
            None => self.default.clone(),
        };
        debug!(key = %self.key, len = items.len(), "adopting external change");
        *self.items.write() = items.clone();
        self.notify(&items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryMedium;
    use serde::{Deserialize, Serialize};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Task {
        id: String,
        done: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    }

    impl Record for Task {
        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: String) {
            self.id = id;
        }

        fn is_completed(&self) -> bool {
            self.done
        }
    }

    fn task(id: &str, done: bool) -> Task {
        Task {
            id: id.to_string(),
            done,
            note: None,
        }
    }

    #[test]
    fn test_missing_slot_is_written_through() {
        let medium = MemoryMedium::new();
        let store = PersistedCollectionStore::open(
            Arc::new(medium.clone()),
            "tasks",
            vec![task("1", false)],
        );
        assert_eq!(store.get(), vec![task("1", false)]);
        let raw = medium.read("tasks").unwrap().unwrap();
        assert_eq!(raw, r#"[{"id":"1","done":false}]"#);
        assert!(store.last_warning().is_none());
    }

    #[test]
    fn test_stored_value_wins_over_default() {
        let medium = MemoryMedium::new();
        medium.write("tasks", r#"[{"id":"9","done":true,"note":"x"}]"#).unwrap();
        let store = PersistedCollectionStore::open(
            Arc::new(medium),
            "tasks",
            vec![task("1", false)],
        );
        let items = store.get();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "9");
        assert_eq!(items[0].note.as_deref(), Some("x"));
    }

    #[test]
    fn test_corrupt_slot_falls_back_without_overwrite() {
        let medium = MemoryMedium::new();
        medium.write("tasks", "{not json").unwrap();
        let store: PersistedCollectionStore<Task> = PersistedCollectionStore::open(
            Arc::new(medium.clone()),
            "tasks",
            vec![task("1", false)],
        );
        assert_eq!(store.get(), vec![task("1", false)]);
        assert!(matches!(
            store.last_warning(),
            Some(StoreError::DeserializationFailure { .. })
        ));
        assert_eq!(medium.read("tasks").unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_wrong_shape_is_a_deserialization_failure() {
        let medium = MemoryMedium::new();
        medium.write("tasks", r#"{"id":"1"}"#).unwrap();
        let store: PersistedCollectionStore<Task> =
            PersistedCollectionStore::open(Arc::new(medium), "tasks", Vec::new());
        assert!(store.is_empty());
        assert!(matches!(
            store.last_warning(),
            Some(StoreError::DeserializationFailure { .. })
        ));
    }

    #[test]
    fn test_unavailable_medium_uses_default() {
        let medium = MemoryMedium::new();
        medium.set_available(false);
        let store = PersistedCollectionStore::open(
            Arc::new(medium),
            "tasks",
            vec![task("1", true)],
        );
        assert_eq!(store.get(), vec![task("1", true)]);
        assert!(matches!(
            store.last_warning(),
            Some(StoreError::StorageUnavailable { .. })
        ));
    }

    #[test]
    fn test_set_replaces_and_notifies() {
        let medium = MemoryMedium::new();
        let store = PersistedCollectionStore::open(Arc::new(medium.clone()), "tasks", Vec::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = store.subscribe(move |items: &[Task]| sink.lock().push(items.len()));

        store.set(vec![task("1", false), task("2", true)]);
        store.set(vec![task("2", true)]);

        assert_eq!(*seen.lock(), vec![2, 1]);
        assert_eq!(store.get(), vec![task("2", true)]);
        assert_eq!(
            medium.read("tasks").unwrap().as_deref(),
            Some(r#"[{"id":"2","done":true}]"#)
        );
    }

    #[test]
    fn test_failed_write_still_updates_memory_and_subscribers() {
        let medium = MemoryMedium::new();
        let store = PersistedCollectionStore::open(Arc::new(medium.clone()), "tasks", Vec::new());
        let notified = Arc::new(AtomicUsize::new(0));
        let counter = notified.clone();
        let _sub = store.subscribe(move |_: &[Task]| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let warnings = Arc::new(AtomicUsize::new(0));
        let warn_counter = warnings.clone();
        let _warn = store.on_warning(move |_| {
            warn_counter.fetch_add(1, Ordering::SeqCst);
        });

        medium.set_available(false);
        store.set(vec![task("1", false)]);

        assert_eq!(store.get(), vec![task("1", false)]);
        assert_eq!(notified.load(Ordering::SeqCst), 1);
        assert_eq!(warnings.load(Ordering::SeqCst), 1);
        assert!(matches!(
            store.last_warning(),
            Some(StoreError::WriteFailure { .. })
        ));

        medium.set_available(true);
        store.set(vec![task("2", false)]);
        assert_eq!(
            medium.read("tasks").unwrap().as_deref(),
            Some(r#"[{"id":"2","done":false}]"#)
        );
    }

    #[test]
    fn test_unsubscribe_twice_keeps_other_subscribers() {
        let store: PersistedCollectionStore<Task> =
            PersistedCollectionStore::open(Arc::new(MemoryMedium::new()), "tasks", Vec::new());
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let c1 = first.clone();
        let c2 = second.clone();
        let sub_a = store.subscribe(move |_: &[Task]| {
            c1.fetch_add(1, Ordering::SeqCst);
        });
        let _sub_b = store.subscribe(move |_: &[Task]| {
            c2.fetch_add(1, Ordering::SeqCst);
        });

        sub_a.unsubscribe();
        sub_a.unsubscribe();
        store.set(vec![task("1", false)]);

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn test_subscriber_may_read_store_reentrantly() {
        let store: PersistedCollectionStore<Task> =
            PersistedCollectionStore::open(Arc::new(MemoryMedium::new()), "tasks", Vec::new());
        let observed = Arc::new(Mutex::new(0));
        let reader = store.clone();
        let sink = observed.clone();
        let _sub = store.subscribe(move |_: &[Task]| {
            *sink.lock() = reader.len();
        });
        store.set(vec![task("1", false), task("2", false)]);
        assert_eq!(*observed.lock(), 2);
    }

    #[test]
    fn test_external_change_reaches_other_context() {
        let tab_a = MemoryMedium::new();
        let tab_b = tab_a.context();
        let store_a: PersistedCollectionStore<Task> =
            PersistedCollectionStore::open(Arc::new(tab_a), "tasks", Vec::new());
        let store_b: PersistedCollectionStore<Task> =
            PersistedCollectionStore::open(Arc::new(tab_b), "tasks", Vec::new());

        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        let _sub = store_b.subscribe(move |items: &[Task]| sink.lock().push(items.to_vec()));

        store_a.set(vec![task("7", true)]);

        assert_eq!(*received.lock(), vec![vec![task("7", true)]]);
        assert_eq!(store_b.get(), vec![task("7", true)]);
    }

    #[test]
    fn test_external_garbage_is_ignored() {
        let tab_a = MemoryMedium::new();
        let tab_b = tab_a.context();
        let store_b = PersistedCollectionStore::open(
            Arc::new(tab_b),
            "tasks",
            vec![task("1", false)],
        );
        tab_a.write("tasks", "garbage").unwrap();
        assert_eq!(store_b.get(), vec![task("1", false)]);
        assert!(matches!(
            store_b.last_warning(),
            Some(StoreError::DeserializationFailure { .. })
        ));
    }

    #[test]
    fn test_external_removal_resets_to_default() {
        let tab_a = MemoryMedium::new();
        let tab_b = tab_a.context();
        let store_b = PersistedCollectionStore::open(
            Arc::new(tab_b),
            "tasks",
            vec![task("1", false)],
        );
        store_b.set(vec![task("2", true)]);
        tab_a.remove("tasks");
        assert_eq!(store_b.get(), vec![task("1", false)]);
    }

    #[test]
    fn test_dropped_store_stops_watching() {
        let tab_a = MemoryMedium::new();
        let tab_b = tab_a.context();
        let live: PersistedCollectionStore<Task> =
            PersistedCollectionStore::open(Arc::new(tab_b.clone()), "tasks", Vec::new());
        let store_b: PersistedCollectionStore<Task> =
            PersistedCollectionStore::open(Arc::new(tab_b), "tasks", Vec::new());
        assert_eq!(tab_a.watcher_count("tasks"), 2);

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let _sub = live.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        drop(store_b);
        assert_eq!(tab_a.watcher_count("tasks"), 1);

        tab_a.write("tasks", r#"[{"id":"1","done":true}]"#).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(live.len(), 1);
    }
}
