//! Dashboard Preferences - CLI entry point
//!
//! Inspects and exercises the dashboard preferences store: print the
//! configured starting snapshot, list allowed values, apply assignments
//! through a live store, and manage the configuration file.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
use commands::*;

#[cfg(test)]
mod cli_tests;

/// Dashboard preferences tool
#[derive(Parser)]
#[command(name = "dashprefs")]
#[command(version, about = "Dashboard display preferences")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

/// Available subcommands for the dashprefs CLI
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print the preferences a new store starts with
    Show {
        /// Path to configuration file (defaults to XDG config path)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Toml)]
        format: OutputFormat,
    },
    /// List every preference with its allowed values and default
    Options,
    /// Apply KEY=VALUE assignments in order and print the resulting snapshot
    Apply {
        /// Path to configuration file (defaults to XDG config path)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Toml)]
        format: OutputFormat,

        /// Assignments such as `density=compact` or `activeTab=stocks`
        #[arg(required = true, value_name = "KEY=VALUE")]
        assignments: Vec<String>,
    },
    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration management actions
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing config (keeps the old file as config.toml.backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate {
        /// Path to configuration file (defaults to XDG config path)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show { config, format } => run_show_command(config.as_deref(), format),
        Commands::Options => run_options_command(),
        Commands::Apply {
            config,
            format,
            assignments,
        } => run_apply_command(config.as_deref(), format, &assignments),
        Commands::Config { action } => match action {
            ConfigAction::Init { force } => run_config_init_command(force),
            ConfigAction::Path => run_config_path_command(),
            ConfigAction::Validate { config } => run_config_validate_command(config.as_deref()),
        },
    }
}
