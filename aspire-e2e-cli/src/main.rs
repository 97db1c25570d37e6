//! Main entry point for the aspire-e2e CLI.
//!
//! Reads resolved resource settings for test hosts and edits the global
//! configuration layer:
//! - `list`, `get-mode`, `get-project-path`, `get-config`: read the
//!   effective configuration
//! - `update`, `remove`, `toggle-mode`, `import`, `clear`: edit resources
//! - `override`: manage read-time override rules

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let logger = aspire_e2e::init_logger(cli.verbose, cli.quiet);
    logger.install();

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        config_path: cli.config_path,
        working_dir: cli.working_dir,
        logger,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::GetMode(cmd) => cmd.execute(&global),
        cli::Command::GetProjectPath(cmd) => cmd.execute(&global),
        cli::Command::GetConfig(cmd) => cmd.execute(&global),
        cli::Command::Update(cmd) => cmd.execute(&global),
        cli::Command::Remove(cmd) => cmd.execute(&global),
        cli::Command::ToggleMode(cmd) => cmd.execute(&global),
        cli::Command::Import(cmd) => cmd.execute(&global),
        cli::Command::Clear(cmd) => cmd.execute(&global),
        cli::Command::Override(cmd) => cmd.execute(&global),
        cli::Command::ShowPaths(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            global.logger.error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    }
}
