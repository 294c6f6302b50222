//! Library exports for layerenv-cli.
//!
//! This module exports the CLI structure for use by the binary and by
//! tooling that needs the command definition (completions, man pages).

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
