//! CLI argument parsing tests.

use clap::Parser;
use reqstate::cli::{Cli, Command};

#[test]
fn test_cli_parses_serve_defaults() {
    let cli = Cli::parse_from(["reqstate", "serve", "--port", "4000"]);

    assert!(!cli.json);
    assert!(cli.log_level.is_none());
    match cli.command {
        Command::Serve { addr, port } => {
            assert_eq!(addr.to_string(), "127.0.0.1");
            assert_eq!(port, 4000);
        }
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn test_cli_parses_call_subcommand() {
    let cli = Cli::parse_from([
        "reqstate",
        "call",
        "getFieldsInvalid",
        "--base-url",
        "http://127.0.0.1:4000",
    ]);

    match cli.command {
        Command::Call { endpoint, base_url } => {
            assert_eq!(endpoint, "getFieldsInvalid");
            assert_eq!(base_url, "http://127.0.0.1:4000");
        }
        _ => panic!("Expected Call command"),
    }
}

#[test]
fn test_cli_parses_list_with_global_flags() {
    let cli = Cli::parse_from([
        "reqstate",
        "list",
        "--call-all",
        "--json",
        "--log-level",
        "debug",
        "--base-url",
        "http://localhost:3000",
    ]);

    assert!(cli.json);
    assert_eq!(cli.log_level.as_deref(), Some("debug"));
    match cli.command {
        Command::List { call_all, .. } => assert!(call_all),
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_requires_endpoint_for_call() {
    assert!(Cli::try_parse_from(["reqstate", "call"]).is_err());
}

#[test]
fn test_cli_rejects_invalid_addr() {
    assert!(Cli::try_parse_from(["reqstate", "serve", "--addr", "not-an-ip"]).is_err());
}
