use super::medium::{ChangeCallback, Medium, WatchGuard};
use crate::core::{Result, StoreError};
use crate::store::subscription::Listeners;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

struct MemoryWatch {
    key: String,
    context: u64,
    callback: ChangeCallback,
}

struct Backend {
    entries: Mutex<HashMap<String, String>>,
    watchers: Mutex<Listeners<MemoryWatch>>,
    next_context: AtomicU64,
    available: AtomicBool,
    quota_bytes: Mutex<Option<usize>>,
}

/// Process-local medium, the in-memory counterpart of browser local storage.
///
/// Every handle obtained with [`MemoryMedium::context`] behaves like a separate
/// tab sharing the same storage: writes are visible everywhere, and watchers
/// hear about writes from other contexts only. Cloning a handle keeps its
/// context.
#[derive(Clone)]
pub struct MemoryMedium {
    backend: Arc<Backend>,
    context: u64,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self {
            backend: Arc::new(Backend {
                entries: Mutex::new(HashMap::new()),
                watchers: Mutex::new(Listeners::new()),
                next_context: AtomicU64::new(1),
                available: AtomicBool::new(true),
                quota_bytes: Mutex::new(None),
            }),
            context: 0,
        }
    }

    /// Opens another execution context over the same storage.
    pub fn context(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            context: self.backend.next_context.fetch_add(1, Ordering::SeqCst),
        }
    }

    /// Caps the total size of stored keys and values, in bytes.
    pub fn with_quota(self, bytes: usize) -> Self {
        *self.backend.quota_bytes.lock() = Some(bytes);
        self
    }

    /// Simulates the storage becoming unreachable (or reachable again).
    pub fn set_available(&self, available: bool) {
        self.backend.available.store(available, Ordering::SeqCst);
    }

    /// Removes `key`, notifying watchers in other contexts.
    pub fn remove(&self, key: &str) {
        let removed = self.backend.entries.lock().remove(key).is_some();
        if removed {
            self.notify_others(key, None);
        }
    }

    /// Number of live watches on `key`, across every context.
    pub fn watcher_count(&self, key: &str) -> usize {
        self.backend
            .watchers
            .lock()
            .snapshot()
            .iter()
            .filter(|watch| watch.key == key)
            .count()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.backend.entries.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn notify_others(&self, key: &str, value: Option<&str>) {
        let targets: Vec<_> = self
            .backend
            .watchers
            .lock()
            .snapshot()
            .into_iter()
            .filter(|watch| watch.key == key && watch.context != self.context)
            .collect();
        for watch in targets {
            (watch.callback)(key, value);
        }
    }

    fn ensure_available(&self, key: &str) -> Result<()> {
        if self.backend.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::unavailable(key, "memory medium is offline"))
        }
    }
}

impl Default for MemoryMedium {
    fn default() -> Self {
        Self::new()
    }
}

impl Medium for MemoryMedium {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.ensure_available(key)?;
        Ok(self.backend.entries.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if !self.backend.available.load(Ordering::SeqCst) {
            return Err(StoreError::write(key, "memory medium is offline"));
        }
        {
            let mut entries = self.backend.entries.lock();
            if let Some(quota) = *self.backend.quota_bytes.lock() {
                let others: usize = entries
                    .iter()
                    .filter(|(existing, _)| existing.as_str() != key)
                    .map(|(k, v)| k.len() + v.len())
                    .sum();
                let needed = others + key.len() + value.len();
                if needed > quota {
                    return Err(StoreError::write(
                        key,
                        format!("quota exceeded: {} of {} bytes", needed, quota),
                    ));
                }
            }
            entries.insert(key.to_string(), value.to_string());
        }
        self.notify_others(key, Some(value));
        Ok(())
    }

    fn watch(&self, key: &str, callback: ChangeCallback) -> WatchGuard {
        let id = self.backend.watchers.lock().insert(Arc::new(MemoryWatch {
            key: key.to_string(),
            context: self.context,
            callback,
        }));
        let backend = Arc::downgrade(&self.backend);
        WatchGuard::new(move || {
            if let Some(backend) = backend.upgrade() {
                backend.watchers.lock().remove(id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_write_visible_across_contexts() {
        let tab_a = MemoryMedium::new();
        let tab_b = tab_a.context();
        tab_a.write("k", "[1]").unwrap();
        assert_eq!(tab_b.read("k").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_watch_skips_own_context() {
        let tab_a = MemoryMedium::new();
        let tab_b = tab_a.context();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        let _own = tab_a.watch(
            "k",
            Arc::new(move |_: &str, v: Option<&str>| sink.lock().push(format!("a:{:?}", v))),
        );
        let sink = seen.clone();
        let _other = tab_b.watch(
            "k",
            Arc::new(move |_: &str, v: Option<&str>| sink.lock().push(format!("b:{:?}", v))),
        );

        tab_a.write("k", "x").unwrap();
        assert_eq!(*seen.lock(), vec!["b:Some(\"x\")".to_string()]);
    }

    #[test]
    fn test_dropping_guard_stops_notifications() {
        let tab_a = MemoryMedium::new();
        let tab_b = tab_a.context();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let guard = tab_b.watch(
            "k",
            Arc::new(move |_: &str, _: Option<&str>| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        tab_a.write("k", "1").unwrap();
        drop(guard);
        tab_a.write("k", "2").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_offline_medium_rejects_io() {
        let medium = MemoryMedium::new();
        medium.set_available(false);
        assert!(matches!(
            medium.read("k"),
            Err(StoreError::StorageUnavailable { .. })
        ));
        assert!(matches!(
            medium.write("k", "v"),
            Err(StoreError::WriteFailure { .. })
        ));
        medium.set_available(true);
        assert!(medium.write("k", "v").is_ok());
    }

    #[test]
    fn test_quota_rejects_oversized_write() {
        let medium = MemoryMedium::new().with_quota(10);
        assert!(medium.write("k", "1234").is_ok());
        let err = medium.write("k", "0123456789").unwrap_err();
        assert!(matches!(err, StoreError::WriteFailure { .. }));
        assert_eq!(medium.read("k").unwrap().as_deref(), Some("1234"));
    }

    #[test]
    fn test_remove_notifies_with_none() {
        let tab_a = MemoryMedium::new();
        let tab_b = tab_a.context();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _guard = tab_b.watch(
            "k",
            Arc::new(move |_: &str, v: Option<&str>| sink.lock().push(v.map(str::to_string))),
        );
        tab_a.write("k", "v").unwrap();
        tab_a.remove("k");
        assert_eq!(*seen.lock(), vec![Some("v".to_string()), None]);
        assert!(tab_a.keys().is_empty());
    }
}
