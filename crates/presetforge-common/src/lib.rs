//! # PresetForge Common
//!
//! Shared vocabulary for the PresetForge workspace.
//!
//! This crate provides the types every other crate agrees on:
//! - The three preset collections and their on-disk keys
//! - Move directions for list reordering
//! - Comment-key rules and unique-name generation
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod collection;
pub mod error;
pub mod names;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::collection::*;
    pub use crate::error::*;
    pub use crate::names::*;
}

pub use prelude::*;
