//! Shell completion generation command.
//!
//! The script goes to stdout, or to `--output` when given. Unless `--quiet`
//! is set, a short note on where to install it is written to stderr.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

/// Binary name installed by this package
const BIN_NAME: &str = "layerenv";

/// Where each shell looks for a completion script, and any extra step.
const INSTALL_HINTS: &[(Shell, &str, Option<&str>)] = &[
    (
        Shell::Bash,
        "~/.local/share/bash-completion/completions/layerenv",
        Some("or add `eval \"$(layerenv completions bash)\"` to ~/.bashrc"),
    ),
    (
        Shell::Zsh,
        "~/.zsh/completions/_layerenv",
        Some("the directory must be listed in $fpath"),
    ),
    (Shell::Fish, "~/.config/fish/completions/layerenv.fish", None),
    (
        Shell::PowerShell,
        "$PROFILE",
        Some("append with `layerenv completions powershell >> $PROFILE`"),
    ),
];

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script to this file instead of stdout
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        match &self.output {
            Some(path) => {
                let mut file = File::create(path)?;
                generate(self.shell, &mut cmd, BIN_NAME, &mut file);
                file.flush()?;
                if !global.quiet {
                    eprintln!("Wrote {} completions to {}", self.shell, path.display());
                }
            }
            None => {
                if !global.quiet {
                    write_hint(&mut io::stderr(), self.shell)?;
                }
                generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
            }
        }

        Ok(())
    }
}

/// Write the installation note for `shell` as shell comments.
fn write_hint(out: &mut impl Write, shell: Shell) -> io::Result<()> {
    writeln!(out, "# Generating {shell} completion script")?;
    if let Some((_, target, extra)) = INSTALL_HINTS.iter().find(|(s, _, _)| *s == shell) {
        writeln!(out, "# Save it to {target}")?;
        if let Some(extra) = extra {
            writeln!(out, "# ({extra})")?;
        }
    }
    writeln!(out)
}
