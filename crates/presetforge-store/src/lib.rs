//! # PresetForge Store
//!
//! In-memory document state for the three preset collections, with
//! persistence and cross-collection undo/redo.
//!
//! This crate provides:
//! - `PresetStore`: the store (CRUD, reordering, load/save, history, observers)
//! - `PresetMap`: ordered preset table with pinned comment entries
//! - `PresetDocument`: one preset file, including unknown top-level keys
//! - `History`: bounded undo stack and redo stack of full-store snapshots
//! - `SharedPresetStore`: mutex-guarded handle for multi-threaded hosts
//! - `SelectionState`: multi-selection over a name list
//!
//! # Architecture
//!
//! ```text
//! PresetStore
//! ├── paths: [PathBuf; 3]          (one file per collection)
//! ├── state: StoreState            (three PresetDocuments)
//! ├── history: History             (undo/redo of StoreState)
//! └── observers                    (called after every edit)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod document;
pub mod error;
pub mod history;
pub mod preset_map;
pub mod selection;
pub mod shared;
pub mod store;

pub use document::PresetDocument;
pub use error::{StoreError, StoreResult};
pub use history::{History, Snapshot, StoreState, MAX_UNDO_LEVELS};
pub use preset_map::PresetMap;
pub use selection::SelectionState;
pub use shared::SharedPresetStore;
pub use store::{ObserverResult, PresetStore};
