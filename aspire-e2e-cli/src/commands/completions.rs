//! Shell completion generation command.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary.
const BIN_NAME: &str = "aspire-e2e";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    ///
    /// The script goes to stdout; installation hints go to stderr unless
    /// `--quiet` is set.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        for line in install_hint(self.shell) {
            global.logger.status(&format!("# {line}"));
        }

        let mut cmd = Cli::command();
        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}

/// How to enable the generated script, per shell.
fn install_hint(shell: Shell) -> Vec<String> {
    let install = match shell {
        Shell::Bash => format!(
            "{BIN_NAME} completions bash > ~/.local/share/bash-completion/completions/{BIN_NAME}"
        ),
        Shell::Zsh => format!("{BIN_NAME} completions zsh > ~/.zsh/completions/_{BIN_NAME}"),
        Shell::Fish => format!(
            "{BIN_NAME} completions fish > ~/.config/fish/completions/{BIN_NAME}.fish"
        ),
        Shell::PowerShell => {
            format!("{BIN_NAME} completions powershell | Out-String | Invoke-Expression")
        }
        _ => return Vec::new(),
    };
    vec!["To enable completions, run:".to_string(), format!("  {install}")]
}
