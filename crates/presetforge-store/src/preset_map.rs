//! Ordered preset table with pinned comment entries.
//!
//! A preset file's table is an ordered JSON object. Keys starting with `_`
//! are comments that must always be written first, in their original
//! relative order. `PresetMap` keeps the two kinds of entries in separate
//! lists so every reorder and every save goes through the same rule.

use presetforge_common::{is_comment_key, MoveDirection};
use serde_json::{Map, Value};

/// Insertion-ordered `name -> value` table for one collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetMap {
    comments: Vec<(String, Value)>,
    entries: Vec<(String, Value)>,
}

impl PresetMap {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from a JSON object, keeping the object's key order.
    #[must_use]
    pub fn from_json_map(map: Map<String, Value>) -> Self {
        let mut table = Self::new();
        for (key, value) in map {
            table.insert(key, value);
        }
        table
    }

    /// Serializes back to a JSON object: comments first, then entries.
    #[must_use]
    pub fn to_json_map(&self) -> Map<String, Value> {
        self.iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    /// Number of non-comment entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no non-comment entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-comment names in list order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Comment keys in file order.
    pub fn comment_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.comments.iter().map(|(key, _)| key.as_str())
    }

    /// Every key/value pair in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.comments
            .iter()
            .chain(self.entries.iter())
            .map(|(key, value)| (key.as_str(), value))
    }

    /// True if `key` exists, comment or not.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.section(key).iter().any(|(k, _)| k == key)
    }

    /// Looks up any key, comment or not.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.section(key)
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Position of a non-comment entry in the name list.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == name)
    }

    /// Inserts or overwrites. Overwrites keep their position; new keys are
    /// appended to their section. Returns the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        let section = self.section_mut(&key);
        if let Some(slot) = section.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        section.push((key, value));
        None
    }

    /// Removes a key, keeping the order of everything else.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let section = self.section_mut(key);
        let index = section.iter().position(|(k, _)| k == key)?;
        Some(section.remove(index).1)
    }

    /// Renames an entry.
    ///
    /// Within one section the entry keeps its position. Renaming a comment
    /// to a plain name (or back) moves it to the end of the other section.
    /// Fails if `old` is absent or `new` already exists.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        if self.contains(new) {
            return false;
        }
        if is_comment_key(old) == is_comment_key(new) {
            return match self.section_mut(old).iter_mut().find(|(k, _)| k == old) {
                Some(slot) => {
                    slot.0 = new.to_string();
                    true
                },
                None => false,
            };
        }
        match self.remove(old) {
            Some(value) => {
                self.section_mut(new).push((new.to_string(), value));
                true
            },
            None => false,
        }
    }

    /// Whether `move_entry(name, direction)` would change the order.
    #[must_use]
    pub fn can_move(&self, name: &str, direction: MoveDirection) -> bool {
        let Some(index) = self.position(name) else {
            return false;
        };
        let last = self.entries.len() - 1;
        match direction {
            MoveDirection::Top | MoveDirection::Up => index > 0,
            MoveDirection::Down | MoveDirection::Bottom => index < last,
        }
    }

    /// Moves a non-comment entry. Returns false when nothing moved.
    pub fn move_entry(&mut self, name: &str, direction: MoveDirection) -> bool {
        if !self.can_move(name, direction) {
            return false;
        }
        let Some(index) = self.position(name) else {
            return false;
        };
        match direction {
            MoveDirection::Top => {
                let entry = self.entries.remove(index);
                self.entries.insert(0, entry);
            },
            MoveDirection::Up => self.entries.swap(index, index - 1),
            MoveDirection::Down => self.entries.swap(index, index + 1),
            MoveDirection::Bottom => {
                let entry = self.entries.remove(index);
                self.entries.push(entry);
            },
        }
        true
    }

    /// Moves several entries as a block, keeping their relative order.
    ///
    /// Unknown and comment names are ignored. An entry that is blocked by a
    /// selected neighbour stays put instead of hopping over it.
    pub fn move_many<S: AsRef<str>>(&mut self, names: &[S], direction: MoveDirection) -> bool {
        let before: Vec<String> = self.names().map(str::to_string).collect();
        let mut selected: Vec<&str> = before
            .iter()
            .map(String::as_str)
            .filter(|name| names.iter().any(|n| n.as_ref() == *name))
            .collect();
        if selected.is_empty() {
            return false;
        }

        match direction {
            MoveDirection::Top | MoveDirection::Bottom => {
                if direction == MoveDirection::Top {
                    selected.reverse();
                }
                for name in selected {
                    self.move_entry(name, direction);
                }
            },
            MoveDirection::Up => {
                let mut floor = 0;
                for name in selected {
                    let Some(index) = self.position(name) else { continue };
                    if index > floor {
                        self.entries.swap(index, index - 1);
                        floor = index;
                    } else {
                        floor = index + 1;
                    }
                }
            },
            MoveDirection::Down => {
                let mut ceiling = self.entries.len();
                for name in selected.into_iter().rev() {
                    let Some(index) = self.position(name) else { continue };
                    if index + 1 < ceiling {
                        self.entries.swap(index, index + 1);
                        ceiling = index + 1;
                    } else {
                        ceiling = index;
                    }
                }
            },
        }

        self.names().ne(before.iter().map(String::as_str))
    }

    fn section(&self, key: &str) -> &[(String, Value)] {
        if is_comment_key(key) {
            &self.comments
        } else {
            &self.entries
        }
    }

    fn section_mut(&mut self, key: &str) -> &mut Vec<(String, Value)> {
        if is_comment_key(key) {
            &mut self.comments
        } else {
            &mut self.entries
        }
    }
}
