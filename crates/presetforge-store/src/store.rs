//! The preset store.
//!
//! Owns the three collections, their backing files and the undo/redo
//! history. Every edit runs the same pipeline:
//!
//! 1. push a snapshot of all collections (pre-edit)
//! 2. apply the edit
//! 3. save synchronously if autosave is on
//! 4. notify observers
//!
//! Reads hand out owned copies, so nothing outside the store can alias its
//! data.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use presetforge_common::{unique_name, CollectionKind, MoveDirection, PresetResult, COLLECTION_COUNT};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::document::PresetDocument;
use crate::error::StoreResult;
use crate::history::{History, StoreState, MAX_UNDO_LEVELS};
use crate::preset_map::PresetMap;

/// Result returned by change observers.
pub type ObserverResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

type Observer = Box<dyn FnMut() -> ObserverResult + Send>;

/// Preset data store for transitions, shaders and text shaders.
pub struct PresetStore {
    /// Backing file per collection; an empty path disables load/save.
    paths: [PathBuf; COLLECTION_COUNT],
    /// Whether the backing file is known to hold this store's data, so an
    /// emptied document must still be written to it.
    on_disk: [bool; COLLECTION_COUNT],
    state: StoreState,
    history: History,
    auto_save: bool,
    last_save_ok: bool,
    observers: Vec<Observer>,
}

impl fmt::Debug for PresetStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresetStore")
            .field("paths", &self.paths)
            .field("auto_save", &self.auto_save)
            .field("last_save_ok", &self.last_save_ok)
            .field("undo_count", &self.history.undo_count())
            .field("redo_count", &self.history.redo_count())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Default for PresetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetStore {
    /// Creates an empty store with autosave on and the default undo depth.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_undo_levels(MAX_UNDO_LEVELS)
    }

    /// Creates an empty store with a custom undo depth.
    #[must_use]
    pub fn with_max_undo_levels(max_levels: usize) -> Self {
        Self {
            paths: Default::default(),
            on_disk: [false; COLLECTION_COUNT],
            state: StoreState::default(),
            history: History::new(max_levels),
            auto_save: true,
            last_save_ok: true,
            observers: Vec::new(),
        }
    }

    // === Configuration ===

    /// Sets the backing files for all three collections.
    pub fn set_paths(
        &mut self,
        transitions: impl AsRef<Path>,
        shaders: impl AsRef<Path>,
        text_shaders: impl AsRef<Path>,
    ) {
        self.set_path(CollectionKind::Transitions, transitions);
        self.set_path(CollectionKind::Shaders, shaders);
        self.set_path(CollectionKind::TextShaders, text_shaders);
    }

    /// Sets the backing file for one collection. An empty path disables it.
    pub fn set_path(&mut self, kind: CollectionKind, path: impl AsRef<Path>) {
        self.paths[kind.index()] = path.as_ref().to_path_buf();
        self.on_disk[kind.index()] = false;
    }

    /// Backing file of a collection, if one is configured.
    #[must_use]
    pub fn path(&self, kind: CollectionKind) -> Option<&Path> {
        let path = &self.paths[kind.index()];
        (!path.as_os_str().is_empty()).then_some(path.as_path())
    }

    /// Enables or disables saving after every edit.
    pub fn set_auto_save(&mut self, auto_save: bool) {
        self.auto_save = auto_save;
    }

    /// Whether edits are saved immediately.
    #[must_use]
    pub fn auto_save(&self) -> bool {
        self.auto_save
    }

    /// Outcome of the most recent save, explicit or automatic.
    #[must_use]
    pub fn last_save_succeeded(&self) -> bool {
        self.last_save_ok
    }

    // === Load / save ===

    /// Loads every configured collection.
    ///
    /// Missing files load as empty collections and are not failures. A file
    /// that exists but can not be read or parsed also loads as empty and
    /// makes the result false. History is cleared either way.
    pub fn load(&mut self) -> bool {
        let mut success = true;
        for kind in CollectionKind::ALL {
            if let Err(e) = self.read_collection(kind) {
                warn!(collection = %kind, "{e}");
                success = false;
            }
        }

        self.history.clear();
        self.notify();
        success
    }

    /// Reloads a single collection, clearing history and notifying like
    /// [`load`](Self::load).
    pub fn load_collection(&mut self, kind: CollectionKind) -> StoreResult<()> {
        let result = self.read_collection(kind);
        self.history.clear();
        self.notify();
        result
    }

    fn read_collection(&mut self, kind: CollectionKind) -> StoreResult<()> {
        let Some(path) = self.path(kind).map(Path::to_path_buf) else {
            return Ok(());
        };

        let loaded = PresetDocument::read_from(kind, &path);
        let document = match &loaded {
            Ok(Some(document)) => {
                info!(
                    collection = %kind,
                    path = %path.display(),
                    presets = document.presets().len(),
                    "Loaded presets"
                );
                document.clone()
            },
            Ok(None) => {
                info!(collection = %kind, path = %path.display(), "Preset file not found, starting empty");
                PresetDocument::new(kind)
            },
            Err(_) => PresetDocument::new(kind),
        };
        *self.state.document_mut(kind) = document;
        self.on_disk[kind.index()] = matches!(loaded, Ok(Some(_)));
        loaded.map(|_| ())
    }

    /// Saves every collection that has a path and content.
    ///
    /// All writes are attempted even if one fails. Returns false if any
    /// failed; in-memory state is never rolled back.
    pub fn save(&mut self) -> bool {
        let mut success = true;
        for kind in CollectionKind::ALL {
            if let Err(e) = self.save_collection(kind) {
                error!(collection = %kind, "{e}");
                success = false;
            }
        }
        self.last_save_ok = success;
        success
    }

    /// Saves one collection. Returns `Ok(false)` when skipped because the
    /// collection has no path, or has no content and no file of its own yet.
    ///
    /// A collection emptied by undo after it was written is saved as an
    /// empty table, so the file never holds presets the store no longer has.
    pub fn save_collection(&mut self, kind: CollectionKind) -> StoreResult<bool> {
        let Some(path) = self.path(kind) else {
            return Ok(false);
        };
        let document = self.state.document(kind);
        if !document.is_empty() {
            document.write_to(path)?;
        } else if self.on_disk[kind.index()] {
            let mut cleared = document.clone();
            cleared.presets_mut();
            cleared.write_to(path)?;
        } else {
            return Ok(false);
        }
        self.on_disk[kind.index()] = true;
        Ok(true)
    }

    // === Reads ===

    /// Non-comment names in list order.
    #[must_use]
    pub fn list_names(&self, kind: CollectionKind) -> Vec<String> {
        self.presets(kind).names().map(str::to_string).collect()
    }

    /// Copy of an entry (comment entries included), or `None`.
    #[must_use]
    pub fn get(&self, kind: CollectionKind, name: &str) -> Option<Value> {
        self.presets(kind).get(name).cloned()
    }

    /// Whether `name` exists in the collection.
    #[must_use]
    pub fn contains(&self, kind: CollectionKind, name: &str) -> bool {
        self.presets(kind).contains(name)
    }

    /// Number of non-comment entries.
    #[must_use]
    pub fn len(&self, kind: CollectionKind) -> usize {
        self.presets(kind).len()
    }

    /// True when the collection has no non-comment entries.
    #[must_use]
    pub fn is_empty(&self, kind: CollectionKind) -> bool {
        self.presets(kind).is_empty()
    }

    /// `base` if free, else the first free `base_N`.
    #[must_use]
    pub fn unique_name(&self, kind: CollectionKind, base: &str) -> String {
        unique_name(self.presets(kind).names(), base)
    }

    /// Unique name from the collection's default base.
    #[must_use]
    pub fn unique_name_default(&self, kind: CollectionKind) -> String {
        self.unique_name(kind, kind.default_base_name())
    }

    /// Full document of a collection as pretty JSON.
    pub fn document_json(&self, kind: CollectionKind) -> PresetResult<String> {
        self.state.document(kind).to_pretty_string()
    }

    /// Copy of the whole store state.
    #[must_use]
    pub fn snapshot(&self) -> StoreState {
        self.state.clone()
    }

    // === Edits ===

    /// Inserts or overwrites an entry, recording undo.
    pub fn set(&mut self, kind: CollectionKind, name: &str, value: Value) {
        self.set_with_undo(kind, name, value, true);
    }

    /// Inserts or overwrites an entry.
    ///
    /// With `record_undo` false no snapshot is pushed and redo history is
    /// kept. Use it only for follow-up writes of an edit whose snapshot was
    /// already recorded (e.g. the frames of a slider drag).
    pub fn set_with_undo(&mut self, kind: CollectionKind, name: &str, value: Value, record_undo: bool) {
        let label = record_undo.then(|| format!("Edit {}: {name}", kind.display_name()));
        self.apply_edit(label, |state| {
            state.document_mut(kind).presets_mut().insert(name, value);
        });
    }

    /// Adds an entry; overwrites if the name exists. Always records undo.
    pub fn add(&mut self, kind: CollectionKind, name: &str, value: Value) {
        let label = format!("Add {}: {name}", kind.display_name());
        self.apply_edit(Some(label), |state| {
            state.document_mut(kind).presets_mut().insert(name, value);
        });
    }

    /// Deletes an entry. Absent names are a no-op with no undo step.
    pub fn delete(&mut self, kind: CollectionKind, name: &str) -> bool {
        if !self.contains(kind, name) {
            return false;
        }
        let label = format!("Delete {}: {name}", kind.display_name());
        self.apply_edit(Some(label), |state| {
            state.document_mut(kind).presets_mut().remove(name);
        });
        true
    }

    /// Deletes several entries as one undo step. Returns how many were removed.
    pub fn delete_many<S: AsRef<str>>(&mut self, kind: CollectionKind, names: &[S]) -> usize {
        let mut present: Vec<&str> = Vec::new();
        for name in names.iter().map(|n| n.as_ref()) {
            if self.contains(kind, name) && !present.contains(&name) {
                present.push(name);
            }
        }

        let label = match present.as_slice() {
            [] => return 0,
            [name] => format!("Delete {}: {name}", kind.display_name()),
            _ => format!("Delete {} {}", present.len(), kind.plural_name()),
        };
        self.apply_edit(Some(label), |state| {
            let presets = state.document_mut(kind).presets_mut();
            names
                .iter()
                .filter_map(|n| presets.remove(n.as_ref()))
                .count()
        })
    }

    /// Renames an entry, keeping its position.
    ///
    /// Turning a preset into a comment entry (or back) moves it to the end
    /// of the other section. Fails without any effect if `old` is missing or
    /// `new` is taken.
    pub fn rename(&mut self, kind: CollectionKind, old: &str, new: &str) -> bool {
        let mut renamed = self.presets(kind).clone();
        if !renamed.rename(old, new) {
            debug!(collection = %kind, old, new, "Rename refused");
            return false;
        }

        let label = format!("Rename {}: {old} -> {new}", kind.display_name());
        self.apply_edit(Some(label), |state| {
            *state.document_mut(kind).presets_mut() = renamed;
        });
        true
    }

    /// Copies an entry to `new_name`, appended at the end.
    ///
    /// Fails if `name` is missing or `new_name` is taken.
    pub fn duplicate(&mut self, kind: CollectionKind, name: &str, new_name: &str) -> bool {
        let Some(value) = self.get(kind, name) else {
            return false;
        };
        if self.contains(kind, new_name) {
            debug!(collection = %kind, name, new_name, "Duplicate target exists");
            return false;
        }

        let label = format!("Duplicate {}: {name}", kind.display_name());
        self.apply_edit(Some(label), |state| {
            state.document_mut(kind).presets_mut().insert(new_name, value);
        });
        true
    }

    /// Moves an entry within the name list.
    ///
    /// A move that would not change the order (unknown name, comment entry,
    /// or already at the boundary) returns false and records nothing.
    pub fn move_entry(&mut self, kind: CollectionKind, name: &str, direction: MoveDirection) -> bool {
        if !self.presets(kind).can_move(name, direction) {
            return false;
        }
        let label = format!("Move {} {direction}: {name}", kind.display_name());
        self.apply_edit(Some(label), |state| {
            state.document_mut(kind).presets_mut().move_entry(name, direction)
        })
    }

    /// Moves several entries as one undo step, keeping their relative order.
    pub fn move_many<S: AsRef<str>>(
        &mut self,
        kind: CollectionKind,
        names: &[S],
        direction: MoveDirection,
    ) -> bool {
        let mut moved = self.presets(kind).clone();
        if !moved.move_many(names, direction) {
            return false;
        }
        let label = format!("Move {} {} {direction}", names.len(), kind.plural_name());
        self.apply_edit(Some(label), |state| {
            *state.document_mut(kind).presets_mut() = moved;
        });
        true
    }

    // === History ===

    /// Restores the state before the last edit.
    pub fn undo(&mut self) -> bool {
        let current = self.state.clone();
        let Some(previous) = self.history.undo(current) else {
            return false;
        };
        self.state = previous;
        self.after_edit();
        true
    }

    /// Re-applies the last undone edit.
    pub fn redo(&mut self) -> bool {
        let current = self.state.clone();
        let Some(next) = self.history.redo(current) else {
            return false;
        };
        self.state = next;
        self.after_edit();
        true
    }

    /// Whether undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of undo steps.
    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    /// Number of redo steps.
    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.history.redo_count()
    }

    /// Description of the edit the next undo reverts.
    #[must_use]
    pub fn undo_label(&self) -> Option<&str> {
        self.history.undo_label()
    }

    /// Description of the edit the next redo re-applies.
    #[must_use]
    pub fn redo_label(&self) -> Option<&str> {
        self.history.redo_label()
    }

    // === Observation ===

    /// Registers a callback run after every successful edit, load, undo and redo.
    ///
    /// Errors and panics from a callback are logged and do not stop the
    /// remaining callbacks.
    pub fn on_change<F>(&mut self, callback: F)
    where
        F: FnMut() -> ObserverResult + Send + 'static,
    {
        self.observers.push(Box::new(callback));
    }

    // === Internals ===

    fn presets(&self, kind: CollectionKind) -> &PresetMap {
        self.state.document(kind).presets()
    }

    fn apply_edit<R>(&mut self, label: Option<String>, edit: impl FnOnce(&mut StoreState) -> R) -> R {
        if let Some(label) = label {
            self.history.push(label, self.state.clone());
        }
        let result = edit(&mut self.state);
        self.after_edit();
        result
    }

    fn after_edit(&mut self) {
        if self.auto_save {
            self.save();
        }
        self.notify();
    }

    fn notify(&mut self) {
        for (index, observer) in self.observers.iter_mut().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| observer())) {
                Ok(Ok(())) => {},
                Ok(Err(e)) => warn!(observer = index, "Change observer failed: {e}"),
                Err(_) => error!(observer = index, "Change observer panicked"),
            }
        }
    }
}
