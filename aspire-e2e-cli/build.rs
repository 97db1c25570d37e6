//! Build script for aspire-e2e-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this structure synchronized with src/cli.rs.
fn build_cli() -> Command {
    Command::new("aspire-e2e")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage shared e2e resource configuration")
        .long_about(
            "Resolve Project/Container settings for e2e test resources from a global \
             and a repository-local configuration layer, with read-time overrides",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config-path")
                .long("config-path")
                .help("Override the global configuration file path")
                .value_name("PATH")
                .global(true)
                .env("ASPIRE_E2E_CONFIG_PATH"),
        )
        .arg(
            Arg::new("working-dir")
                .long("working-dir")
                .help("Directory to start the local configuration search from")
                .value_name("DIR")
                .global(true),
        )
        .subcommands(vec![
            Command::new("list")
                .about("List resources")
                .long_about("List effective resources, or stored global ones with --raw"),
            Command::new("get-mode")
                .about("Print the effective mode of a resource")
                .long_about("Print Project or Container; exits 1 if the resource is unknown"),
            Command::new("get-project-path")
                .about("Print the project path of a resource")
                .long_about("Print the project path; exits 1 if absent"),
            Command::new("get-config")
                .about("Print one configuration value of a resource")
                .long_about("Print one field of the effective entry; exits 1 if absent"),
            Command::new("update")
                .about("Create or edit a resource in the global configuration"),
            Command::new("remove").about("Remove a resource from the global configuration"),
            Command::new("toggle-mode")
                .about("Switch a resource between Project and Container mode"),
            Command::new("import")
                .about("Import resources from another configuration file")
                .long_about("Replace, merge into (--merge) or keep (--skip-existing) existing entries"),
            Command::new("clear").about("Reset the global configuration to an empty document"),
            Command::new("override")
                .about("Manage override rules")
                .subcommands(vec![
                    Command::new("set").about("Pin a field for every resource"),
                    Command::new("remove").about("Remove a field pin"),
                    Command::new("set-registry").about("Rewrite one image registry to another"),
                    Command::new("remove-registry").about("Remove a registry rewrite"),
                    Command::new("set-image").about("Rewrite one image[:tag] to another"),
                    Command::new("remove-image").about("Remove an image rewrite"),
                    Command::new("list").about("Show the override rules in effect (global merged with local)"),
                    Command::new("clear").about("Remove all override rules"),
                ]),
            Command::new("show-paths").about("Show the configuration file locations"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("aspire-e2e.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
