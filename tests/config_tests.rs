//! Integration tests for route-table loading
//!
//! The same table written as YAML, TOML and JSON must produce the same service.

use std::fs;
use std::path::PathBuf;

use segrouter::config::{ConfigFormat, RouteTableConfig, RuntimeConfig};
use serde_json::json;
use tempfile::TempDir;

mod common;
use common::routes::ZOO_YAML;

fn write_table(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_zoo_table_from_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_table(&dir, "zoo.yaml", ZOO_YAML);

    let config = RouteTableConfig::load(&path).unwrap();
    assert_eq!(config.methods.len(), 8);
    assert_eq!(config.routes.len(), 10);
    assert_eq!(config.groups[0].prefix, "/api/v1");

    let service = config.build_service().unwrap();
    let res = service.handle("PATCH", "/zoo/animals/12");
    assert_eq!(res.status, 200);
    assert_eq!(res.body["handler"], "patch_animal");
    assert_eq!(res.body["params"], json!({"id": "12"}));
    assert!(res.header("x-request-id").is_some());

    let res = service.handle("GET", "/api/v1/users/u1/posts/p2");
    assert_eq!(res.body["handler"], "get_post");
    assert_eq!(res.body["params"], json!({"user_id": "u1", "post_id": "p2"}));

    assert_eq!(service.handle("HEAD", "/zoo/health").body["handler"], "health_check");
    assert_eq!(service.handle("GET", "/zoo/health").status, 404);
}

#[test]
fn test_same_table_in_every_format() {
    let yaml = r#"
middleware: [request_id]
routes:
  - method: GET
    path: /user/:id
    handler: get_user
groups:
  - prefix: /admin
    routes:
      - method: DELETE
        path: /user/:id
        handler: delete_user
"#;
    let toml = r#"
middleware = ["request_id"]

[[routes]]
method = "GET"
path = "/user/:id"
handler = "get_user"

[[groups]]
prefix = "/admin"

[[groups.routes]]
method = "DELETE"
path = "/user/:id"
handler = "delete_user"
"#;
    let json = r#"{
  "middleware": ["request_id"],
  "routes": [{"method": "GET", "path": "/user/:id", "handler": "get_user"}],
  "groups": [{
    "prefix": "/admin",
    "routes": [{"method": "DELETE", "path": "/user/:id", "handler": "delete_user"}]
  }]
}"#;

    let from_yaml = RouteTableConfig::parse(yaml, ConfigFormat::Yaml).unwrap();
    let from_toml = RouteTableConfig::parse(toml, ConfigFormat::Toml).unwrap();
    let from_json = RouteTableConfig::parse(json, ConfigFormat::Json).unwrap();
    assert_eq!(from_yaml, from_toml);
    assert_eq!(from_yaml, from_json);
    assert_eq!(from_yaml.methods, ["GET", "POST", "PUT", "DELETE"]);

    let service = from_toml.build_service().unwrap();
    assert_eq!(
        service.handle("delete", "/admin/user/5").body["handler"],
        "delete_user"
    );
}

#[test]
fn test_format_from_extension() {
    let cases = [
        ("routes.yaml", Some(ConfigFormat::Yaml)),
        ("routes.YML", Some(ConfigFormat::Yaml)),
        ("routes.toml", Some(ConfigFormat::Toml)),
        ("routes.json", Some(ConfigFormat::Json)),
        ("routes.ini", None),
        ("routes", None),
    ];
    for (name, expected) in cases {
        let got = ConfigFormat::from_path(std::path::Path::new(name)).ok();
        assert_eq!(got, expected, "{name}");
    }
}

#[test]
fn test_unknown_middleware_is_rejected() {
    let config = RouteTableConfig::parse(
        "middleware: [request_id, rate_limit]\n",
        ConfigFormat::Yaml,
    )
    .unwrap();
    let err = config.build_service().unwrap_err();
    assert!(err.to_string().contains("unknown middleware 'rate_limit'"));
}

#[test]
fn test_conflicting_routes_abort_build() {
    let config = RouteTableConfig::parse(
        r#"
routes:
  - { method: GET, path: "/user/:id", handler: a }
  - { method: get, path: "/User/:name", handler: b }
"#,
        ConfigFormat::Yaml,
    )
    .unwrap();
    let err = config.build_service().unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("failed to register get /User/:name"));
    assert!(message.contains("route conflict"));
}

#[test]
fn test_route_on_missing_method_aborts_build() {
    let config = RouteTableConfig::parse(
        r#"{"methods": ["GET"], "routes": [{"method": "POST", "path": "/x", "handler": "h"}]}"#,
        ConfigFormat::Json,
    )
    .unwrap();
    let err = config.build_service().unwrap_err();
    assert!(format!("{err:#}").contains("method not supported: POST"));
}

#[test]
fn test_load_reports_path_on_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_table(&dir, "broken.json", "{ not json");
    let err = RouteTableConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("broken.json"));

    let missing = dir.path().join("missing.yaml");
    assert!(RouteTableConfig::load(&missing).is_err());
}

#[test]
fn test_runtime_config_defaults() {
    let defaults = RuntimeConfig::default();
    assert_eq!(defaults.addr, "0.0.0.0:8080");
    assert_eq!(defaults.workers, 4);
}
