//! Output formatter implementations.

use crate::context::EnvMap;
use crate::{Error, Result};

use super::{OutputFormatter, ShellType};

/// Validates that a string is a valid shell variable name.
///
/// Valid names must:
/// - Start with a letter or underscore
/// - Contain only letters, digits, and underscores
fn is_valid_env_var_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if !first.is_ascii_alphabetic() && first != '_' {
        return false;
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Formatter for shell-specific export statements.
pub struct ExportFormatter {
    shell: ShellType,
}

impl ExportFormatter {
    /// Create a new export formatter for `shell`.
    #[must_use]
    pub const fn new(shell: ShellType) -> Self {
        Self { shell }
    }
}

impl OutputFormatter for ExportFormatter {
    fn format(&self, vars: &EnvMap) -> Result<String> {
        let mut exports = Vec::with_capacity(vars.len());

        for (name, value) in vars {
            if !is_valid_env_var_name(name) {
                return Err(Error::Validation {
                    field: "environment_variable".to_string(),
                    message: format!(
                        "invalid environment variable name '{name}': must contain only alphanumeric characters and underscores, and start with a letter or underscore"
                    ),
                });
            }
            exports.push(self.shell.format_export(name, value));
        }

        Ok(exports.join("\n"))
    }
}

/// Formatter for JSON output.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, vars: &EnvMap) -> Result<String> {
        Ok(serde_json::to_string_pretty(vars)?)
    }
}

/// Formatter for dotenv (.env file) format.
///
/// The output reads back to the same map through
/// [`dotenv::parse`](crate::dotenv::parse) with two exceptions. A literal
/// backslash followed by `n` reads back as a newline. Every line break is
/// written as `\n`, so a `\r\n` pair or a lone `\r` also reads back as a
/// single newline; the parser splits lines on `\r` and offers no escape
/// that would keep it.
pub struct DotenvFormatter;

impl DotenvFormatter {
    /// Render a single value so that the parser reproduces it.
    fn quote(value: &str) -> String {
        let needs_quotes = value.is_empty()
            || value.trim() != value
            || value.contains(['\n', '\r'])
            || value.starts_with(['"', '\'', '\u{feff}']);

        if needs_quotes {
            format!("\"{}\"", value.replace("\r\n", "\\n").replace(['\n', '\r'], "\\n"))
        } else {
            value.to_string()
        }
    }
}

impl OutputFormatter for DotenvFormatter {
    fn format(&self, vars: &EnvMap) -> Result<String> {
        Ok(vars
            .iter()
            .map(|(name, value)| format!("{name}={}", Self::quote(value)))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Formatter for human-readable output.
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format(&self, vars: &EnvMap) -> Result<String> {
        if vars.is_empty() {
            return Ok("No variables set.".to_string());
        }

        let width = vars.keys().map(String::len).max().unwrap_or(0);
        let mut lines = vec!["Variables:".to_string()];
        for (name, value) in vars {
            lines.push(format!("  {name:<width$}  {}", value.escape_debug()));
        }

        Ok(lines.join("\n"))
    }
}
