//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including flag parsing, options loading and context construction.

use crate::error::CliError;
use layerenv::{
    bootstrap, init_logger, DotenvConfig, EnvContext, EnvList, EnvOptions, Logger, ProcessExit,
};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the `.env` file location.
    pub env_file: Option<PathBuf>,

    /// Skip reading the `.env` file.
    pub no_dotenv: bool,

    /// Options file to start from.
    pub options: Option<PathBuf>,

    /// Extra default values from `--default`.
    pub defaults: Vec<(String, String)>,

    /// Extra constant values from `--constant`.
    pub constants: Vec<(String, String)>,

    /// Names from `--ensure`.
    pub ensure: Vec<String>,

    /// Log unparsed `.env` lines.
    pub debug: bool,
}

impl GlobalOptions {
    /// The logger selected by `--verbose`/`--quiet` and `LAYERENV_LOG_MODE`.
    pub fn logger(&self) -> Logger {
        init_logger(self.verbose || self.debug, self.quiet)
    }

    /// Options carried by the `--default`, `--constant`, `--ensure` and
    /// `--no-dotenv` flags alone.
    pub fn flag_overlay(&self) -> EnvOptions {
        let mut overlay = EnvOptions::new()
            .with_defaults(self.defaults.iter().cloned())
            .with_constants(self.constants.iter().cloned());
        if self.no_dotenv {
            overlay = overlay.without_dotenv();
        }
        self.ensure
            .iter()
            .fold(overlay, |overlay, name| overlay.ensure(name.clone()))
    }
}

/// Parse a `KEY=VALUE` argument.
///
/// Only the first `=` separates; the value may be empty or contain `=`.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.trim().is_empty() {
        return Err(format!("missing key in '{s}'"));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

/// Build the update options.
///
/// Precedence: flags over the options file over built-in defaults. Maps
/// are combined key by key, and `--no-dotenv` always wins.
pub fn load_options(global: &GlobalOptions) -> Result<EnvOptions, CliError> {
    let base = match &global.options {
        Some(path) => EnvOptions::from_file(path).map_err(|e| match e {
            layerenv::Error::Io(io) => CliError::Io(io),
            other => CliError::Config(format!("{}: {other}", path.display())),
        })?,
        None => EnvOptions::new(),
    };

    Ok(base.merged_with(global.flag_overlay()))
}

/// Create an empty context reading the real process environment.
pub fn build_context(global: &GlobalOptions) -> EnvContext {
    let mut dotenv = DotenvConfig::default().with_debug(global.debug);
    if let Some(path) = &global.env_file {
        dotenv = dotenv.with_path(path);
    }

    EnvContext::builder()
        .with_dotenv_config(dotenv)
        .with_logger(global.logger())
        .build()
}

/// Build the context and run the initial update.
///
/// A `--ensure` miss ends the process with status 1 after each missing
/// name has been logged.
pub fn load_environment(global: &GlobalOptions) -> Result<(EnvContext, EnvList), CliError> {
    let options = load_options(global)?;
    let ctx = build_context(global);

    match bootstrap(&ctx, &options, &ProcessExit)? {
        Some(list) => Ok((ctx, list)),
        None => Err(CliError::SemanticFailure(
            "required environment variables are not set".to_string(),
        )),
    }
}
