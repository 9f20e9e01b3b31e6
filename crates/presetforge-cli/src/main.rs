//! # PresetForge
//!
//! Command-line editor for the JSON preset files of a visual novel project:
//! screen transitions, shaders and text shaders.
//!
//! Ties together:
//! - Config: locating the preset files
//! - Store: loading, editing and saving the three collections

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod commands;
mod config;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::commands::Cli;

/// Main entry point.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "presetforge=debug" } else { "presetforge=info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env().add_directive(default_level.parse()?))
        .init();

    debug!("PresetForge {}", env!("CARGO_PKG_VERSION"));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&cli, &mut out)
}
