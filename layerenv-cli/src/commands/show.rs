//! Show command implementation.
//!
//! This module implements the `show` command, which prints the merged
//! environment in one of several formats.

use crate::error::CliError;
use crate::utils::{load_environment, GlobalOptions};
use clap::{Args, ValueEnum};
use layerenv::output::{OutputFormat, ShellType};

/// Print the merged environment.
#[derive(Args)]
pub struct ShowCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "dotenv",
        env = "LAYERENV_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: ShowFormat,

    /// Shell dialect for export format (detected when omitted)
    #[arg(long, value_enum, ignore_case = true)]
    pub shell: Option<ShellArg>,
}

/// Output format for the show command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ShowFormat {
    /// KEY=VALUE lines that read back as a .env file
    Dotenv,
    /// JSON object
    Json,
    /// Shell export statements
    Export,
    /// Aligned, human-readable listing
    Human,
}

/// Shell accepted by `--shell`.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ShellArg {
    /// bash
    Bash,
    /// zsh
    Zsh,
    /// fish
    Fish,
    /// PowerShell
    Powershell,
}

impl From<ShellArg> for ShellType {
    fn from(shell: ShellArg) -> Self {
        match shell {
            ShellArg::Bash => ShellType::Bash,
            ShellArg::Zsh => ShellType::Zsh,
            ShellArg::Fish => ShellType::Fish,
            ShellArg::Powershell => ShellType::PowerShell,
        }
    }
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Merge all layers
        let (_ctx, env) = load_environment(global)?;

        // 2. Pick the formatter
        let format = match self.format {
            ShowFormat::Dotenv => OutputFormat::Dotenv,
            ShowFormat::Json => OutputFormat::Json,
            ShowFormat::Human => OutputFormat::Human,
            ShowFormat::Export => {
                OutputFormat::Export(self.shell.map_or_else(ShellType::detect, ShellType::from))
            }
        };

        // 3. Output to stdout
        let output = format.create_formatter().format(env.snapshot().as_map())?;
        if !output.is_empty() {
            println!("{output}");
        }

        Ok(())
    }
}
