//! Store error types.

use std::path::PathBuf;

use presetforge_common::{CollectionKind, PresetError};
use thiserror::Error;

/// Errors raised while moving a collection between memory and disk.
///
/// The store's `load()`/`save()` log these and report a boolean; the typed
/// form is returned by the per-collection entry points.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file exists but could not be read.
    #[error("failed to read {collection} file {path:?}: {source}")]
    Read {
        /// Collection being loaded
        collection: CollectionKind,
        /// File path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not a valid preset document.
    #[error("failed to parse {collection} file {path:?}: {source}")]
    Parse {
        /// Collection being loaded
        collection: CollectionKind,
        /// File path
        path: PathBuf,
        /// JSON or shape error
        #[source]
        source: PresetError,
    },

    /// The document could not be written.
    #[error("failed to write {collection} file {path:?}: {source}")]
    Write {
        /// Collection being saved
        collection: CollectionKind,
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: PresetError,
    },
}

impl StoreError {
    /// Collection the error belongs to.
    #[must_use]
    pub fn collection(&self) -> CollectionKind {
        match self {
            Self::Read { collection, .. }
            | Self::Parse { collection, .. }
            | Self::Write { collection, .. } => *collection,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display_names_collection() {
        let err = StoreError::Parse {
            collection: CollectionKind::Shaders,
            path: PathBuf::from("shader_presets.json"),
            source: PresetError::InvalidDocument {
                path: PathBuf::from("shader_presets.json"),
                reason: "root is not an object".to_string(),
            },
        };
        let msg = format!("{err}");
        assert!(msg.contains("shaders"));
        assert!(msg.contains("shader_presets.json"));
        assert_eq!(err.collection(), CollectionKind::Shaders);
    }
}
