//! Command-line surface.
//!
//! Each invocation loads the store, applies at most one edit through the
//! store's write API and lets autosave persist it.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use presetforge_common::{CollectionKind, MoveDirection};
use presetforge_store::{PresetStore, SelectionState};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::EditorConfig;

/// Edit transition, shader and text shader presets.
#[derive(Debug, Parser)]
#[command(name = "presetforge", version)]
#[command(about = "Edit transition, shader and text shader presets")]
pub struct Cli {
    /// Config file (default: ./presetforge.toml, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List preset names in order
    List {
        /// transitions, shaders or text-shaders
        collection: CollectionKind,
    },
    /// Print one preset as JSON
    Show {
        /// transitions, shaders or text-shaders
        collection: CollectionKind,
        /// Preset name
        name: String,
    },
    /// Create or overwrite a preset
    Set {
        /// transitions, shaders or text-shaders
        collection: CollectionKind,
        /// Preset name
        name: String,
        /// Preset value as JSON
        json: String,
    },
    /// Add a preset, generating a unique name unless one is given
    Add {
        /// transitions, shaders or text-shaders
        collection: CollectionKind,
        /// Preset value as JSON
        json: String,
        /// Name to use (made unique if taken)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Delete presets
    Delete {
        /// transitions, shaders or text-shaders
        collection: CollectionKind,
        /// Names to delete
        #[arg(required_unless_present = "all")]
        names: Vec<String>,
        /// Delete every preset in the collection
        #[arg(long)]
        all: bool,
    },
    /// Rename a preset
    Rename {
        /// transitions, shaders or text-shaders
        collection: CollectionKind,
        /// Current name
        old: String,
        /// New name
        new: String,
    },
    /// Copy a preset under a new name
    Duplicate {
        /// transitions, shaders or text-shaders
        collection: CollectionKind,
        /// Preset to copy
        name: String,
        /// Name of the copy (default: <name>_copy, made unique)
        new_name: Option<String>,
    },
    /// Reorder presets
    Move {
        /// transitions, shaders or text-shaders
        collection: CollectionKind,
        /// top, up, down or bottom
        direction: MoveDirection,
        /// Names to move, or a range written FIRST..LAST
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print the resolved configuration
    Paths,
}

impl Command {
    fn is_edit(&self) -> bool {
        !matches!(self, Self::List { .. } | Self::Show { .. } | Self::Paths)
    }
}

/// Runs a parsed command, writing user output to `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let (config, config_path) = EditorConfig::discover(cli.config.as_deref());
    debug!("Using config {}", config_path.display());

    if let Command::Paths = cli.command {
        return print_paths(&config, &config_path, out);
    }

    let mut store = open_store(&config);
    let loaded = store.load();
    if !loaded {
        if cli.command.is_edit() {
            bail!("refusing to edit: a preset file could not be read (see log above)");
        }
        warn!("Some preset files could not be read and are shown as empty");
    }

    match &cli.command {
        Command::List { collection } => {
            for name in store.list_names(*collection) {
                writeln!(out, "{name}")?;
            }
        },
        Command::Show { collection, name } => {
            let Some(value) = store.get(*collection, name) else {
                bail!("no {} named {name:?}", collection.display_name());
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        },
        Command::Set {
            collection,
            name,
            json,
        } => {
            store.set(*collection, name, parse_value(json)?);
        },
        Command::Add {
            collection,
            json,
            name,
        } => {
            let value = parse_value(json)?;
            let base = name.as_deref().unwrap_or(collection.default_base_name());
            let name = store.unique_name(*collection, base);
            store.add(*collection, &name, value);
            writeln!(out, "{name}")?;
        },
        Command::Delete {
            collection,
            names,
            all,
        } => {
            let mut selection = SelectionState::new(store.list_names(*collection));
            let targets = if *all {
                selection.select_all().to_vec()
            } else {
                names.clone()
            };
            let removed = store.delete_many(*collection, &targets);
            if removed == 0 {
                bail!("nothing to delete");
            }
            writeln!(out, "deleted {removed}")?;
        },
        Command::Rename {
            collection,
            old,
            new,
        } => {
            if !store.rename(*collection, old, new) {
                bail!(
                    "cannot rename {} {old:?} to {new:?}: source missing or target exists",
                    collection.display_name()
                );
            }
        },
        Command::Duplicate {
            collection,
            name,
            new_name,
        } => {
            let new_name = match new_name {
                Some(n) => n.clone(),
                None => store.unique_name(*collection, &format!("{name}_copy")),
            };
            if !store.duplicate(*collection, name, &new_name) {
                bail!(
                    "cannot duplicate {} {name:?} as {new_name:?}: source missing or target exists",
                    collection.display_name()
                );
            }
            writeln!(out, "{new_name}")?;
        },
        Command::Move {
            collection,
            direction,
            names,
        } => {
            let mut selection = SelectionState::new(store.list_names(*collection));
            for name in names {
                select_arg(&mut selection, name);
            }
            if !store.move_many(*collection, selection.selected(), *direction) {
                bail!("nothing moved");
            }
        },
        Command::Paths => {},
    }

    if cli.command.is_edit() {
        persist(&mut store)?;
    }
    Ok(())
}

fn open_store(config: &EditorConfig) -> PresetStore {
    let mut store = PresetStore::with_max_undo_levels(config.max_undo_levels);
    store.set_auto_save(config.autosave);
    store.set_paths(
        config.preset_path(CollectionKind::Transitions),
        config.preset_path(CollectionKind::Shaders),
        config.preset_path(CollectionKind::TextShaders),
    );
    store
}

/// Adds `arg` to the selection; `a..b` selects the range between two names.
fn select_arg(selection: &mut SelectionState, arg: &str) {
    match arg.split_once("..") {
        Some((first, last)) if !first.is_empty() && !last.is_empty() => {
            let already: Vec<String> = selection.selected().to_vec();
            selection.click(first, false, false);
            selection.click(last, false, true);
            let range = selection.selected().to_vec();
            selection.select_none();
            for name in already.iter().chain(range.iter()) {
                if !selection.is_selected(name) {
                    selection.click(name, true, false);
                }
            }
        },
        _ => {
            if !selection.is_selected(arg) {
                selection.click(arg, true, false);
            }
        },
    }
}

fn persist(store: &mut PresetStore) -> Result<()> {
    if !store.auto_save() && !store.save() {
        bail!("failed to save preset files");
    }
    if !store.last_save_succeeded() {
        bail!("edit applied in memory but saving failed");
    }
    Ok(())
}

fn parse_value(json: &str) -> Result<Value> {
    serde_json::from_str(json).with_context(|| format!("invalid JSON value: {json}"))
}

fn print_paths(config: &EditorConfig, config_path: &std::path::Path, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "config: {}", config_path.display())?;
    for kind in CollectionKind::ALL {
        writeln!(out, "{kind}: {}", config.preset_path(kind).display())?;
    }
    writeln!(out, "shader folder: {}", config.shader_folder.display())?;
    writeln!(out, "text shader folder: {}", config.text_shader_folder.display())?;
    writeln!(out, "game folder: {}", config.game_folder.display())?;
    writeln!(out, "autosave: {}", config.autosave)?;
    writeln!(out, "undo levels: {}", config.max_undo_levels)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    fn workspace() -> (TempDir, PathBuf) {
        let dir = tempdir().expect("tempdir");
        let config = dir.path().join("presetforge.toml");
        fs::write(
            &config,
            "transition_presets = \"t.json\"\nshader_presets = \"s.json\"\ntextshader_presets = \"x.json\"\n",
        )
        .expect("write config");
        fs::write(
            dir.path().join("t.json"),
            r#"{"presets": {"_meta": "notes", "fade": {"duration": 0.4}, "slide": {}}}"#,
        )
        .expect("write transitions");
        (dir, config)
    }

    fn exec(config: &Path, args: &[&str]) -> Result<String> {
        let mut argv = vec!["presetforge", "--config"];
        let config = config.to_str().expect("utf-8 path");
        argv.push(config);
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv)?;
        let mut out = Vec::new();
        run(&cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn transitions_on_disk(dir: &Path) -> Value {
        let text = fs::read_to_string(dir.join("t.json")).expect("read");
        serde_json::from_str(&text).expect("parse")
    }

    #[test]
    fn test_parse_collection_and_direction() {
        let cli = Cli::try_parse_from(["presetforge", "move", "text-shaders", "top", "a"]).expect("parse");
        match cli.command {
            Command::Move {
                collection,
                direction,
                names,
            } => {
                assert_eq!(collection, CollectionKind::TextShaders);
                assert_eq!(direction, MoveDirection::Top);
                assert_eq!(names, vec!["a"]);
            },
            other => panic!("unexpected command {other:?}"),
        }
        assert!(Cli::try_parse_from(["presetforge", "list", "sounds"]).is_err());
    }

    #[test]
    fn test_list_hides_comments() {
        let (_dir, config) = workspace();
        let out = exec(&config, &["list", "transitions"]).expect("list");
        assert_eq!(out, "fade\nslide\n");
    }

    #[test]
    fn test_show_missing_is_error() {
        let (_dir, config) = workspace();
        assert!(exec(&config, &["show", "transitions", "ghost"]).is_err());
        let out = exec(&config, &["show", "transitions", "fade"]).expect("show");
        assert!(out.contains("\"duration\": 0.4"));
    }

    #[test]
    fn test_add_generates_unique_name_and_saves() {
        let (dir, config) = workspace();
        let out = exec(&config, &["add", "transitions", "{}", "--name", "fade"]).expect("add");
        assert_eq!(out.trim(), "fade_1");

        let saved = transitions_on_disk(dir.path());
        assert_eq!(saved["presets"]["fade_1"], serde_json::json!({}));
    }

    #[test]
    fn test_move_writes_comment_first() {
        let (dir, config) = workspace();
        exec(&config, &["move", "transitions", "top", "slide"]).expect("move");

        let saved = transitions_on_disk(dir.path());
        let keys: Vec<String> = saved["presets"]
            .as_object()
            .map(|o| o.keys().cloned().collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["_meta", "slide", "fade"]);
    }

    #[test]
    fn test_rename_conflict_fails() {
        let (dir, config) = workspace();
        assert!(exec(&config, &["rename", "transitions", "fade", "slide"]).is_err());
        assert_eq!(transitions_on_disk(dir.path())["presets"]["fade"]["duration"], 0.4);
    }

    #[test]
    fn test_duplicate_default_name() {
        let (_dir, config) = workspace();
        let out = exec(&config, &["duplicate", "transitions", "fade"]).expect("duplicate");
        assert_eq!(out.trim(), "fade_copy");
        let out = exec(&config, &["list", "transitions"]).expect("list");
        assert_eq!(out, "fade\nslide\nfade_copy\n");
    }

    #[test]
    fn test_delete_all_keeps_comments() {
        let (dir, config) = workspace();
        let out = exec(&config, &["delete", "transitions", "--all"]).expect("delete");
        assert_eq!(out.trim(), "deleted 2");
        assert_eq!(
            transitions_on_disk(dir.path()),
            serde_json::json!({"presets": {"_meta": "notes"}})
        );
    }

    #[test]
    fn test_malformed_file_blocks_edits() {
        let (dir, config) = workspace();
        fs::write(dir.path().join("s.json"), "{ nope").expect("write");
        assert!(exec(&config, &["set", "shaders", "glow", "{}"]).is_err());
        assert_eq!(
            fs::read_to_string(dir.path().join("s.json")).expect("read"),
            "{ nope"
        );
        // Reads still work.
        assert!(exec(&config, &["list", "transitions"]).is_ok());
    }

    #[test]
    fn test_range_selection_for_move() {
        let mut selection = SelectionState::new(
            ["a", "b", "c", "d"].iter().map(|s| (*s).to_string()).collect(),
        );
        select_arg(&mut selection, "d");
        select_arg(&mut selection, "a..b");
        assert_eq!(selection.selected(), ["d", "a", "b"]);
    }
}
