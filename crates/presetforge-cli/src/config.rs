//! Editor configuration.
//!
//! Locates the three preset files (and the shader folders the editor scans)
//! from a `presetforge.toml`. Relative paths are resolved against the
//! directory holding the config file; empty paths disable a collection.

use std::fs;
use std::path::{Path, PathBuf};

use presetforge_common::CollectionKind;
use presetforge_store::MAX_UNDO_LEVELS;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "presetforge.toml";

/// Directory under the platform config dir.
const CONFIG_DIR_NAME: &str = "presetforge";

/// Largest undo depth accepted from a config file.
const MAX_CONFIGURABLE_UNDO_LEVELS: usize = 500;

/// Paths and editing options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    // === Preset files ===
    /// Transition presets file
    pub transition_presets: PathBuf,
    /// Shader presets file
    pub shader_presets: PathBuf,
    /// Text shader presets file
    pub textshader_presets: PathBuf,

    // === Source folders ===
    /// Folder with shader definitions
    pub shader_folder: PathBuf,
    /// Folder with text shader definitions
    pub text_shader_folder: PathBuf,
    /// Game root folder
    pub game_folder: PathBuf,

    // === Editing ===
    /// Save after every edit
    pub autosave: bool,
    /// Undo depth
    pub max_undo_levels: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            transition_presets: PathBuf::from("game/presets/transition_presets.json"),
            shader_presets: PathBuf::from("game/presets/shader_presets.json"),
            textshader_presets: PathBuf::from("game/presets/textshader_presets.json"),
            shader_folder: PathBuf::from("game/shader"),
            text_shader_folder: PathBuf::from("game/text_shader"),
            game_folder: PathBuf::from("game"),
            autosave: true,
            max_undo_levels: MAX_UNDO_LEVELS,
        }
    }
}

impl EditorConfig {
    /// Finds and loads the configuration.
    ///
    /// Uses `explicit` if given, else `presetforge.toml` in the working
    /// directory, else the platform config directory. Returns the config
    /// with resolved paths and the config file path it was resolved against.
    pub fn discover(explicit: Option<&Path>) -> (Self, PathBuf) {
        let path = match explicit {
            Some(path) => absolute(path),
            None => Self::candidate_paths()
                .into_iter()
                .find(|p| p.exists())
                .unwrap_or_else(|| absolute(Path::new(CONFIG_FILE))),
        };
        (Self::load_from(&path), path)
    }

    /// Loads from `path`, falling back to defaults if the file is missing or
    /// invalid. Paths come back resolved against the file's directory.
    pub fn load_from(path: &Path) -> Self {
        let mut config = if path.exists() {
            match fs::read_to_string(path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => {
                        info!("Loaded config from {}", path.display());
                        config
                    },
                    Err(e) => {
                        warn!("Failed to parse config file: {e}");
                        Self::default()
                    },
                },
                Err(e) => {
                    warn!("Failed to read config file: {e}");
                    Self::default()
                },
            }
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };

        let base = path.parent().map(absolute).unwrap_or_default();
        config.resolve_paths(&base);
        config.validate();
        config
    }

    /// Makes every non-empty relative path absolute against `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.transition_presets,
            &mut self.shader_presets,
            &mut self.textshader_presets,
            &mut self.shader_folder,
            &mut self.text_shader_folder,
            &mut self.game_folder,
        ] {
            if !path.as_os_str().is_empty() && path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Clamps values to sensible ranges.
    pub fn validate(&mut self) {
        self.max_undo_levels = self.max_undo_levels.clamp(1, MAX_CONFIGURABLE_UNDO_LEVELS);
    }

    /// Preset file for a collection (may be empty).
    #[must_use]
    pub fn preset_path(&self, kind: CollectionKind) -> &Path {
        match kind {
            CollectionKind::Transitions => &self.transition_presets,
            CollectionKind::Shaders => &self.shader_presets,
            CollectionKind::TextShaders => &self.textshader_presets,
        }
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut candidates = vec![absolute(Path::new(CONFIG_FILE))];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE));
        }
        candidates
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}
