//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CheckCommand, CompletionsCommand, CtxCommand, GetCommand, ShowCommand, WhichCommand,
};
use crate::error::CliError;
use crate::utils::parse_key_value;
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line tool for inspecting layered environment variables.
#[derive(Parser)]
#[command(name = "layerenv")]
#[command(
    version,
    about = "Merge defaults, .env values, the process environment and constants",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Read .env values from this file instead of ./.env
    #[arg(long, value_name = "PATH", global = true, env = "LAYERENV_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Do not read any .env file
    #[arg(long, global = true)]
    pub no_dotenv: bool,

    /// Read update options from a YAML or JSON file
    #[arg(long, value_name = "PATH", global = true)]
    pub options: Option<PathBuf>,

    /// Add a default value (lowest precedence)
    #[arg(long = "default", value_name = "KEY=VALUE", global = true, value_parser = parse_key_value)]
    pub defaults: Vec<(String, String)>,

    /// Add a constant value (highest precedence)
    #[arg(long = "constant", value_name = "KEY=VALUE", global = true, value_parser = parse_key_value)]
    pub constants: Vec<(String, String)>,

    /// Exit with status 1 unless this variable is set after merging
    #[arg(long, value_name = "NAME", global = true)]
    pub ensure: Vec<String>,

    /// Log .env lines that could not be parsed
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    ///
    /// Help and version requests print and exit. Every other parse failure
    /// becomes [`CliError::InvalidArguments`].
    pub fn parse_args<I, T>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Ok(cli),
            Err(e) if e.use_stderr() => Err(e.into()),
            Err(e) => e.exit(),
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the merged environment
    Show(ShowCommand),

    /// Print one merged value
    Get(GetCommand),

    /// Check that variables are set
    Check(CheckCommand),

    /// Show which layer supplies a variable
    Which(WhichCommand),

    /// Print the full layered context as JSON
    Ctx(CtxCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
