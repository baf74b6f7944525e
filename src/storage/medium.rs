use crate::core::Result;
use std::sync::Arc;

/// Callback fired when another execution context changes a watched key.
///
/// Receives the key and its new raw value, or `None` when the key was removed.
pub type ChangeCallback = Arc<dyn Fn(&str, Option<&str>) + Send + Sync>;

/// Durable string-keyed, string-valued storage shared by the stores.
///
/// A medium instance represents one execution context. Writes made through it
/// are visible to reads from every context, and watchers registered through it
/// are only told about writes that came from *other* contexts.
pub trait Medium: Send + Sync {
    /// Read the raw value stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the raw value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Register `callback` for changes to `key` made by other contexts.
    fn watch(&self, key: &str, callback: ChangeCallback) -> WatchGuard;
}

/// Keeps a medium watcher registered; unregisters it on drop.
pub struct WatchGuard {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl WatchGuard {
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A guard for media that never report external changes.
    pub fn detached() -> Self {
        Self { cancel: None }
    }
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for WatchGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchGuard")
            .field("attached", &self.cancel.is_some())
            .finish()
    }
}
