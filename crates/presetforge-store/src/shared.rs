//! Thread-safe handle around a [`PresetStore`].
//!
//! The store itself is single-threaded. Hosts that reach it from more than
//! one thread share it through this handle; the lock is held for the whole
//! snapshot + edit + save + notify unit, so edits never interleave.
//!
//! Observers run while the lock is held and must not call back into the
//! handle.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use presetforge_common::CollectionKind;
use serde_json::Value;

use crate::store::PresetStore;

/// Cloneable, mutex-guarded store handle.
#[derive(Clone, Debug, Default)]
pub struct SharedPresetStore {
    inner: Arc<Mutex<PresetStore>>,
}

impl SharedPresetStore {
    /// Wraps a store.
    #[must_use]
    pub fn new(store: PresetStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Locks the store for a sequence of calls.
    pub fn lock(&self) -> MutexGuard<'_, PresetStore> {
        self.inner.lock()
    }

    /// Runs `f` with exclusive access.
    pub fn with<R>(&self, f: impl FnOnce(&mut PresetStore) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Names in a collection.
    #[must_use]
    pub fn list_names(&self, kind: CollectionKind) -> Vec<String> {
        self.inner.lock().list_names(kind)
    }

    /// Copy of an entry.
    #[must_use]
    pub fn get(&self, kind: CollectionKind, name: &str) -> Option<Value> {
        self.inner.lock().get(kind, name)
    }

    /// Undo the last edit.
    pub fn undo(&self) -> bool {
        self.inner.lock().undo()
    }

    /// Redo the last undone edit.
    pub fn redo(&self) -> bool {
        self.inner.lock().redo()
    }
}
