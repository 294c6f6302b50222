//! Output formatting module for merged variables.
//!
//! This module provides various output formats for displaying a merged
//! environment, including shell-specific export statements, JSON, dotenv
//! format, and human-readable output.

mod formatters;
mod shell;

use crate::context::EnvMap;
use crate::{Error, Result};

pub use formatters::{DotenvFormatter, ExportFormatter, HumanFormatter, JsonFormatter};
pub use shell::ShellType;

/// Trait for formatting variables into different output formats.
pub trait OutputFormatter {
    /// Format the given variables into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the formatting fails (e.g., invalid environment variable names).
    fn format(&self, vars: &EnvMap) -> Result<String>;
}

/// Available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Shell-specific export statements.
    Export(ShellType),
    /// JSON format.
    Json,
    /// Dotenv (.env file) format.
    Dotenv,
    /// Human-readable format.
    Human,
}

impl OutputFormat {
    /// Parse a format name.
    ///
    /// `shell` is only consulted for "export"; when absent the shell is
    /// detected from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a validation error for unknown format or shell names.
    ///
    /// # Examples
    ///
    /// ```
    /// use layerenv::output::{OutputFormat, ShellType};
    ///
    /// assert_eq!(OutputFormat::parse("json", None).unwrap(), OutputFormat::Json);
    /// assert_eq!(
    ///     OutputFormat::parse("export", Some("fish")).unwrap(),
    ///     OutputFormat::Export(ShellType::Fish)
    /// );
    /// assert!(OutputFormat::parse("xml", None).is_err());
    /// ```
    pub fn parse(format: &str, shell: Option<&str>) -> Result<Self> {
        match format.to_lowercase().as_str() {
            "export" => {
                let shell = match shell {
                    Some(name) => ShellType::from_string(name)?,
                    None => ShellType::detect(),
                };
                Ok(Self::Export(shell))
            }
            "json" => Ok(Self::Json),
            "dotenv" | "env" => Ok(Self::Dotenv),
            "human" => Ok(Self::Human),
            _ => Err(Error::Validation {
                field: "format".to_string(),
                message: format!(
                    "unknown output format '{format}': supported formats are dotenv, json, export, human"
                ),
            }),
        }
    }

    /// Create a formatter for this output format.
    #[must_use]
    pub fn create_formatter(&self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Export(shell) => Box::new(ExportFormatter::new(*shell)),
            Self::Json => Box::new(JsonFormatter),
            Self::Dotenv => Box::new(DotenvFormatter),
            Self::Human => Box::new(HumanFormatter),
        }
    }
}
