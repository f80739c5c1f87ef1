//! Unit tests for CLI commands

use std::fs;

use crate::cli::{run, Cli, Commands};
use clap::Parser;

#[test]
fn test_routes_command_parses() {
    let cli = Cli::try_parse_from(["segrouter", "routes", "--config", "routes.yaml"]).unwrap();
    match cli.command {
        Commands::Routes { config } => assert_eq!(config.to_string_lossy(), "routes.yaml"),
        other => panic!("Expected Routes command, got {other:?}"),
    }
}

#[test]
fn test_resolve_defaults_to_get() {
    let cli =
        Cli::try_parse_from(["segrouter", "resolve", "-c", "routes.yaml", "/user/42"]).unwrap();
    match cli.command {
        Commands::Resolve { method, path, .. } => {
            assert_eq!(method, "GET");
            assert_eq!(path, "/user/42");
        }
        other => panic!("Expected Resolve command, got {other:?}"),
    }
}

#[test]
fn test_resolve_requires_path() {
    assert!(Cli::try_parse_from(["segrouter", "resolve", "-c", "routes.yaml"]).is_err());
}

#[test]
fn test_serve_flags() {
    let cli = Cli::try_parse_from([
        "segrouter",
        "serve",
        "--config",
        "routes.toml",
        "--addr",
        "127.0.0.1:9090",
        "--workers",
        "2",
    ])
    .unwrap();
    match cli.command {
        Commands::Serve {
            config,
            addr,
            workers,
        } => {
            assert_eq!(config.to_string_lossy(), "routes.toml");
            assert_eq!(addr.as_deref(), Some("127.0.0.1:9090"));
            assert_eq!(workers, Some(2));
        }
        other => panic!("Expected Serve command, got {other:?}"),
    }
}

#[test]
fn test_resolve_command_hit_and_miss() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routes.yaml");
    fs::write(
        &path,
        "routes:\n  - method: GET\n    path: /user/:id\n    handler: get_user\n",
    )
    .unwrap();

    let hit = Cli::try_parse_from([
        "segrouter",
        "resolve",
        "-c",
        path.to_str().unwrap(),
        "/user/42",
    ])
    .unwrap();
    run(hit).unwrap();

    let miss = Cli::try_parse_from([
        "segrouter",
        "resolve",
        "-c",
        path.to_str().unwrap(),
        "-m",
        "post",
        "/user/42",
    ])
    .unwrap();
    let err = run(miss).unwrap_err();
    assert!(err.to_string().contains("no route for POST /user/42"));
}

#[test]
fn test_conflicting_table_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routes.json");
    fs::write(
        &path,
        r#"{"routes": [
            {"method": "GET", "path": "/user/:id", "handler": "a"},
            {"method": "GET", "path": "/USER/:name", "handler": "b"}
        ]}"#,
    )
    .unwrap();

    let cli = Cli::try_parse_from(["segrouter", "routes", "-c", path.to_str().unwrap()]).unwrap();
    let err = run(cli).unwrap_err();
    assert!(format!("{err:#}").contains("route conflict"));
}
