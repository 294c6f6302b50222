//! Shell detection and export formatting.

use crate::context::{EnvMap, EnvSource, ProcessEnv};
use crate::{Error, Result};

/// Supported shell types for export formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    /// Bourne Again Shell (bash).
    Bash,
    /// Z Shell (zsh).
    Zsh,
    /// Friendly Interactive Shell (fish).
    Fish,
    /// `PowerShell`.
    PowerShell,
}

impl ShellType {
    /// Detect the current shell from the process environment.
    ///
    /// See [`ShellType::detect_from`] for the rules.
    #[must_use]
    pub fn detect() -> Self {
        Self::detect_from(&ProcessEnv.snapshot())
    }

    /// Detect a shell from a set of environment variables.
    ///
    /// Detection precedence:
    /// 1. `ZSH_VERSION` - indicates zsh
    /// 2. `FISH_VERSION` - indicates fish
    /// 3. `PSModulePath` - indicates `PowerShell`
    /// 4. `SHELL` environment variable (path like `/bin/bash`)
    /// 5. Default to bash if unable to determine
    #[must_use]
    pub fn detect_from(vars: &EnvMap) -> Self {
        if vars.contains_key("ZSH_VERSION") {
            return Self::Zsh;
        }
        if vars.contains_key("FISH_VERSION") {
            return Self::Fish;
        }
        if vars.contains_key("PSModulePath") {
            return Self::PowerShell;
        }

        match vars.get("SHELL") {
            Some(shell) if shell.contains("zsh") => Self::Zsh,
            Some(shell) if shell.contains("fish") => Self::Fish,
            Some(shell) if shell.contains("pwsh") || shell.contains("powershell") => {
                Self::PowerShell
            }
            _ => Self::Bash,
        }
    }

    /// Parse a shell type from a string.
    ///
    /// Accepts "bash", "sh", "zsh", "fish", "powershell", "pwsh" and "ps"
    /// (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the shell name is not recognized.
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bash" | "sh" => Ok(Self::Bash),
            "zsh" => Ok(Self::Zsh),
            "fish" => Ok(Self::Fish),
            "powershell" | "pwsh" | "ps" => Ok(Self::PowerShell),
            _ => Err(Error::Validation {
                field: "shell".to_string(),
                message: format!(
                    "unknown shell type '{s}': supported shells are bash, zsh, fish, powershell"
                ),
            }),
        }
    }

    /// Format an export statement for this shell type.
    ///
    /// Values are quoted so that the shell assigns them verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use layerenv::output::ShellType;
    ///
    /// assert_eq!(ShellType::Bash.format_export("PORT", "5000"), "export PORT='5000'");
    /// assert_eq!(ShellType::Bash.format_export("MSG", "it's"), "export MSG='it'\\''s'");
    /// assert_eq!(ShellType::Fish.format_export("PORT", "5000"), "set -gx PORT '5000'");
    /// assert_eq!(ShellType::PowerShell.format_export("PORT", "5000"), "$env:PORT='5000'");
    /// ```
    #[must_use]
    pub fn format_export(&self, var: &str, value: &str) -> String {
        match self {
            Self::Bash | Self::Zsh => format!("export {var}='{}'", value.replace('\'', r"'\''")),
            Self::Fish => format!(
                "set -gx {var} '{}'",
                value.replace('\\', r"\\").replace('\'', r"\'")
            ),
            Self::PowerShell => format!("$env:{var}='{}'", value.replace('\'', "''")),
        }
    }
}
