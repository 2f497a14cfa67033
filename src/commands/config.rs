//! Configuration file command implementations.

use dashboard_prefs::config::loader::ConfigLoader;
use dashboard_prefs::config::schema::LogLevel;
use dashboard_prefs::config::{default, xdg};
use dashboard_prefs::logging;
use std::path::Path;
use std::process::ExitCode;

/// Writes the commented default configuration file.
pub(crate) fn run_config_init_command(force: bool) -> ExitCode {
    logging::init(LogLevel::default());
    match default::create_default_config(force) {
        Ok(path) => {
            println!("Created configuration at {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Config error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints the default configuration path.
pub(crate) fn run_config_path_command() -> ExitCode {
    println!("{}", xdg::config_path().display());
    ExitCode::SUCCESS
}

/// Loads and checks a configuration file, printing the parsed result.
pub(crate) fn run_config_validate_command(config_path: Option<&Path>) -> ExitCode {
    logging::init(LogLevel::default());
    match ConfigLoader::load(config_path) {
        Ok(config) => {
            println!("Configuration is valid");
            println!("{config:#?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Config error: {e}");
            ExitCode::FAILURE
        }
    }
}
