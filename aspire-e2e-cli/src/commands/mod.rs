//! CLI command implementations.
//!
//! Read commands go through the resolved view of both layers:
//! - `list`: List resources
//! - `get_mode`, `get_project_path`, `get_config`: Print one value
//! - `show_paths`: Show configuration file locations
//!
//! Write commands edit the global layer only:
//! - `update`, `remove`, `toggle_mode`, `import`, `clear`: Edit resources
//! - `override_cmd`: Edit override rules

pub mod clear;
pub mod completions;
pub mod get_config;
pub mod get_mode;
pub mod get_project_path;
pub mod import;
pub mod list;
pub mod override_cmd;
pub mod remove;
pub mod show_paths;
pub mod toggle_mode;
pub mod update;

pub use clear::ClearCommand;
pub use completions::CompletionsCommand;
pub use get_config::GetConfigCommand;
pub use get_mode::GetModeCommand;
pub use get_project_path::GetProjectPathCommand;
pub use import::ImportCommand;
pub use list::ListCommand;
pub use override_cmd::OverrideCommand;
pub use remove::RemoveCommand;
pub use show_paths::ShowPathsCommand;
pub use toggle_mode::ToggleModeCommand;
pub use update::UpdateCommand;
