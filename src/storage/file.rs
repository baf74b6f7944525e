//! Directory-backed medium: one JSON file per storage key.

use super::medium::{ChangeCallback, Medium, WatchGuard};
use crate::core::{Result, StoreError};
use crate::store::subscription::Listeners;
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::debug;

struct FileWatch {
    key: String,
    callback: ChangeCallback,
}

/// Stores each key as `<root>/<key>.json`.
///
/// Every `FileMedium` instance is its own execution context. Changes written
/// by another instance (or another process) over the same directory are
/// discovered by [`FileMedium::poll_changes`], which compares each watched
/// file against the contents this instance last read or wrote.
pub struct FileMedium {
    root: PathBuf,
    seen: Mutex<HashMap<String, Option<String>>>,
    watchers: Arc<Mutex<Listeners<FileWatch>>>,
}

impl FileMedium {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            seen: Mutex::new(HashMap::new()),
            watchers: Arc::new(Mutex::new(Listeners::new())),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{}.json", file_name))
    }

    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::unavailable(
                key,
                format!("failed to read '{}': {}", path.display(), e),
            )),
        }
    }

    /// Detects keys rewritten by other contexts and fires their watchers.
    ///
    /// Returns the keys whose contents changed since this instance last saw
    /// them.
    pub fn poll_changes(&self) -> Vec<String> {
        let watched: BTreeSet<String> = self
            .watchers
            .lock()
            .snapshot()
            .iter()
            .map(|watch| watch.key.clone())
            .collect();

        let mut changed = Vec::new();
        for key in watched {
            let current = match self.load(&key) {
                Ok(current) => current,
                Err(err) => {
                    debug!(key = %key, error = %err, "skipping unreadable key while polling");
                    continue;
                }
            };
            let mut seen = self.seen.lock();
            if seen.get(&key) != Some(&current) {
                seen.insert(key.clone(), current.clone());
                changed.push((key, current));
            }
        }

        let watchers = self.watchers.lock().snapshot();
        for (key, current) in &changed {
            for watch in watchers.iter().filter(|watch| &watch.key == key) {
                (watch.callback)(key, current.as_deref());
            }
        }
        changed.into_iter().map(|(key, _)| key).collect()
    }
}

impl Medium for FileMedium {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let contents = self.load(key)?;
        self.seen.lock().insert(key.to_string(), contents.clone());
        Ok(contents)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.root).map_err(|e| {
            StoreError::write(
                key,
                format!("failed to create directory '{}': {}", self.root.display(), e),
            )
        })?;
        let mut temp = NamedTempFile::new_in(&self.root)
            .map_err(|e| StoreError::write(key, format!("failed to create temp file: {}", e)))?;
        temp.write_all(value.as_bytes())
            .map_err(|e| StoreError::write(key, format!("failed to write temp file: {}", e)))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| StoreError::write(key, format!("failed to sync temp file: {}", e)))?;
        temp.persist(&path).map_err(|e| {
            StoreError::write(
                key,
                format!("failed to rename temp file -> '{}': {}", path.display(), e.error),
            )
        })?;
        self.seen
            .lock()
            .insert(key.to_string(), Some(value.to_string()));
        Ok(())
    }

    fn watch(&self, key: &str, callback: ChangeCallback) -> WatchGuard {
        {
            let mut seen = self.seen.lock();
            if !seen.contains_key(key) {
                let baseline = self.load(key).unwrap_or(None);
                seen.insert(key.to_string(), baseline);
            }
        }
        let id = self.watchers.lock().insert(Arc::new(FileWatch {
            key: key.to_string(),
            callback,
        }));
        let watchers = Arc::downgrade(&self.watchers);
        WatchGuard::new(move || {
            if let Some(watchers) = watchers.upgrade() {
                watchers.lock().remove(id);
            }
        })
    }
}
