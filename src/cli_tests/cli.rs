//! CLI argument parsing tests.

use crate::commands::OutputFormat;
use crate::{Cli, Commands, ConfigAction};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[test]
fn verify_cli() {
    Cli::command().debug_assert();
}

#[test]
fn test_show_defaults_to_toml() {
    let cli = Cli::try_parse_from(["dashprefs", "show"]).unwrap();
    match cli.command {
        Commands::Show { config, format } => {
            assert!(config.is_none());
            assert_eq!(format, OutputFormat::Toml);
        }
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_show_json_with_config() {
    let cli = Cli::try_parse_from([
        "dashprefs",
        "show",
        "--format",
        "json",
        "--config",
        "/tmp/prefs.toml",
    ])
    .unwrap();
    match cli.command {
        Commands::Show { config, format } => {
            assert_eq!(config, Some(PathBuf::from("/tmp/prefs.toml")));
            assert_eq!(format, OutputFormat::Json);
        }
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_unknown_format_rejected() {
    let result = Cli::try_parse_from(["dashprefs", "show", "--format", "yaml"]);
    assert!(result.is_err());
}

#[test]
fn test_apply_requires_assignments() {
    let result = Cli::try_parse_from(["dashprefs", "apply"]);
    assert!(result.is_err());
}

#[test]
fn test_apply_keeps_assignment_order() {
    let cli =
        Cli::try_parse_from(["dashprefs", "apply", "density=spacious", "density=compact"]).unwrap();
    match cli.command {
        Commands::Apply { assignments, .. } => {
            assert_eq!(assignments, vec!["density=spacious", "density=compact"]);
        }
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_options_subcommand_exists() {
    let cli = Cli::try_parse_from(["dashprefs", "options"]).unwrap();
    assert!(matches!(cli.command, Commands::Options));
}

#[test]
fn test_config_init_force_flag() {
    let cli = Cli::try_parse_from(["dashprefs", "config", "init", "--force"]).unwrap();
    match cli.command {
        Commands::Config {
            action: ConfigAction::Init { force },
        } => assert!(force),
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_config_init_force_default_false() {
    let cli = Cli::try_parse_from(["dashprefs", "config", "init"]).unwrap();
    match cli.command {
        Commands::Config {
            action: ConfigAction::Init { force },
        } => assert!(!force),
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_config_path_and_validate_parse() {
    assert!(Cli::try_parse_from(["dashprefs", "config", "path"]).is_ok());

    let cli = Cli::try_parse_from(["dashprefs", "config", "validate", "--config", "x.toml"])
        .unwrap();
    match cli.command {
        Commands::Config {
            action: ConfigAction::Validate { config },
        } => assert_eq!(config, Some(PathBuf::from("x.toml"))),
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_config_without_action_fails() {
    assert!(Cli::try_parse_from(["dashprefs", "config"]).is_err());
}

#[test]
fn test_config_init_help_names_backup_file() {
    let mut cmd = Cli::command();
    let init = cmd
        .find_subcommand_mut("config")
        .and_then(|config| config.find_subcommand_mut("init"))
        .expect("config init subcommand");
    let help = init.render_help().to_string();
    assert!(help.contains("config.toml.backup"), "help was: {help}");
}
