//! One collection's backing document.
//!
//! A preset file is a JSON object with one well-known key holding the preset
//! table (`"presets"` or `"shader_presets"`). Any other top-level keys are
//! kept verbatim, in file order, and written back untouched.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use presetforge_common::{CollectionKind, PresetError, PresetResult};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::preset_map::PresetMap;

/// Indentation used for every preset file.
pub const JSON_INDENT: &[u8] = b"    ";

/// In-memory form of one preset file.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetDocument {
    kind: CollectionKind,
    /// Top-level object. The preset key, when present, holds a `Null`
    /// placeholder so its position among the other keys survives a save.
    header: Map<String, Value>,
    presets: PresetMap,
}

impl PresetDocument {
    /// Creates an empty document with no top-level keys.
    #[must_use]
    pub fn new(kind: CollectionKind) -> Self {
        Self {
            kind,
            header: Map::new(),
            presets: PresetMap::new(),
        }
    }

    /// Builds a document from a parsed JSON value.
    pub fn from_value(kind: CollectionKind, value: Value, path: &Path) -> PresetResult<Self> {
        let Value::Object(mut header) = value else {
            return Err(invalid(path, "root is not a JSON object".to_string()));
        };

        let key = kind.file_key();
        let presets = match header.get_mut(key).map(Value::take) {
            None | Some(Value::Null) => PresetMap::new(),
            Some(Value::Object(table)) => PresetMap::from_json_map(table),
            Some(other) => {
                return Err(invalid(
                    path,
                    format!("\"{key}\" is {}, expected an object", json_type_name(&other)),
                ));
            },
        };

        Ok(Self {
            kind,
            header,
            presets,
        })
    }

    /// Parses document text.
    pub fn parse(kind: CollectionKind, text: &str, path: &Path) -> PresetResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(kind, value, path)
    }

    /// Reads a document from disk. A missing file is `Ok(None)`.
    pub fn read_from(kind: CollectionKind, path: &Path) -> StoreResult<Option<Self>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    collection: kind,
                    path: path.to_path_buf(),
                    source,
                });
            },
        };

        Self::parse(kind, &text, path)
            .map(Some)
            .map_err(|source| StoreError::Parse {
                collection: kind,
                path: path.to_path_buf(),
                source,
            })
    }

    /// Writes the document through a temp file and an atomic rename.
    pub fn write_to(&self, path: &Path) -> StoreResult<()> {
        let write_error = |source: PresetError| StoreError::Write {
            collection: self.kind,
            path: path.to_path_buf(),
            source,
        };

        let text = self.to_pretty_string().map_err(write_error)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_error(e.into()))?;
        }

        let temp_path = temp_path_for(path);
        {
            let file = File::create(&temp_path).map_err(|e| write_error(e.into()))?;
            let mut writer = BufWriter::new(file);
            writer
                .write_all(text.as_bytes())
                .and_then(|()| writer.flush())
                .map_err(|e| write_error(e.into()))?;
        }

        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            write_error(e.into())
        })?;

        debug!(collection = %self.kind, path = %path.display(), "Preset file written");
        Ok(())
    }

    /// Collection this document belongs to.
    #[must_use]
    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// True when the document has no top-level keys at all.
    ///
    /// A document whose preset table exists but is empty is not empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
    }

    /// The preset table.
    #[must_use]
    pub fn presets(&self) -> &PresetMap {
        &self.presets
    }

    /// Mutable preset table; creates the table key if the file had none.
    pub fn presets_mut(&mut self) -> &mut PresetMap {
        self.header
            .entry(self.kind.file_key())
            .or_insert(Value::Null);
        &mut self.presets
    }

    /// Top-level keys other than the preset table, in file order.
    pub fn extra_keys(&self) -> impl Iterator<Item = &str> + '_ {
        let key = self.kind.file_key();
        self.header.keys().map(String::as_str).filter(move |k| *k != key)
    }

    /// A top-level value other than the preset table.
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&Value> {
        if key == self.kind.file_key() {
            return None;
        }
        self.header.get(key)
    }

    /// Full document as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut root = self.header.clone();
        if let Some(slot) = root.get_mut(self.kind.file_key()) {
            *slot = Value::Object(self.presets.to_json_map());
        }
        Value::Object(root)
    }

    /// Full document as pretty JSON with four-space indentation.
    pub fn to_pretty_string(&self) -> PresetResult<String> {
        let mut buf = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
        self.to_value().serialize(&mut serializer)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }
}

fn invalid(path: &Path, reason: String) -> PresetError {
    PresetError::InvalidDocument {
        path: path.to_path_buf(),
        reason,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
