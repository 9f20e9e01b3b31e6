//! The three preset collections and list reordering directions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PresetError;

/// Number of collections held by a store.
pub const COLLECTION_COUNT: usize = 3;

/// One of the independent preset namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    /// Screen transition presets.
    Transitions,
    /// Shader presets.
    Shaders,
    /// Text shader presets.
    TextShaders,
}

impl CollectionKind {
    /// All collections, in storage order.
    pub const ALL: [Self; COLLECTION_COUNT] = [Self::Transitions, Self::Shaders, Self::TextShaders];

    /// Stable slot index used for per-collection arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Transitions => 0,
            Self::Shaders => 1,
            Self::TextShaders => 2,
        }
    }

    /// Top-level JSON key holding the preset table in this collection's file.
    #[must_use]
    pub const fn file_key(self) -> &'static str {
        match self {
            Self::Transitions | Self::TextShaders => "presets",
            Self::Shaders => "shader_presets",
        }
    }

    /// Singular noun used in history labels and log lines.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Transitions => "transition",
            Self::Shaders => "shader",
            Self::TextShaders => "text shader",
        }
    }

    /// Plural noun used in batch history labels.
    #[must_use]
    pub const fn plural_name(self) -> &'static str {
        match self {
            Self::Transitions => "transitions",
            Self::Shaders => "shaders",
            Self::TextShaders => "text shaders",
        }
    }

    /// Base name used when creating a new entry without an explicit name.
    #[must_use]
    pub const fn default_base_name(self) -> &'static str {
        match self {
            Self::Transitions => "new_preset",
            Self::Shaders => "new_shader",
            Self::TextShaders => "new_text_preset",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural_name())
    }
}

impl FromStr for CollectionKind {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transitions" | "transition" => Ok(Self::Transitions),
            "shaders" | "shader" => Ok(Self::Shaders),
            "text-shaders" | "text_shaders" | "textshaders" | "textshader" | "text-shader" => {
                Ok(Self::TextShaders)
            },
            _ => Err(PresetError::UnknownCollection(s.to_string())),
        }
    }
}

/// Where to move an entry within its collection's name list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    /// First non-comment position.
    Top,
    /// Swap with the previous entry.
    Up,
    /// Swap with the next entry.
    Down,
    /// Last position.
    Bottom,
}

impl MoveDirection {
    /// Lowercase name used in history labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Up => "up",
            Self::Down => "down",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoveDirection {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "bottom" => Ok(Self::Bottom),
            _ => Err(PresetError::UnknownDirection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_index_matches_all_order() {
        for (i, kind) in CollectionKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_collection_parse_aliases() {
        assert_eq!("transitions".parse::<CollectionKind>().ok(), Some(CollectionKind::Transitions));
        assert_eq!("Shader".parse::<CollectionKind>().ok(), Some(CollectionKind::Shaders));
        assert_eq!("text-shaders".parse::<CollectionKind>().ok(), Some(CollectionKind::TextShaders));
        assert_eq!("textshader".parse::<CollectionKind>().ok(), Some(CollectionKind::TextShaders));
        assert!("sounds".parse::<CollectionKind>().is_err());
    }

    #[test]
    fn test_default_base_names() {
        assert_eq!(CollectionKind::Transitions.default_base_name(), "new_preset");
        assert_eq!(CollectionKind::Shaders.default_base_name(), "new_shader");
        assert_eq!(CollectionKind::TextShaders.default_base_name(), "new_text_preset");
    }

    #[test]
    fn test_move_direction_parse() {
        assert_eq!("TOP".parse::<MoveDirection>().ok(), Some(MoveDirection::Top));
        assert_eq!("down".parse::<MoveDirection>().ok(), Some(MoveDirection::Down));
        assert!(matches!(
            "sideways".parse::<MoveDirection>(),
            Err(PresetError::UnknownDirection(_))
        ));
    }
}
