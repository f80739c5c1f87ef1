//! # Configuration Module
//!
//! Two sources of configuration:
//!
//! - **Route tables** ([`RouteTableConfig`]) read from a YAML, TOML or JSON file. They
//!   list the methods to build trees for, the global middleware, and the routes (bound
//!   to [`echo_handler`](crate::echo::echo_handler)).
//! - **Runtime settings** ([`RuntimeConfig`]) read from environment variables.
//!
//! ## Route table example
//!
//! ```yaml
//! methods: [GET, POST, PUT, DELETE]
//! middleware: [request_id, tracing]
//! routes:
//!   - method: GET
//!     path: /user/:id
//!     handler: get_user
//! groups:
//!   - prefix: /api/v1
//!     routes:
//!       - method: POST
//!         path: /orders
//!         handler: create_order
//! ```
//!
//! ## Environment Variables
//!
//! - `SEGR_ADDR` - listen address for `segrouter serve` (default `0.0.0.0:8080`)
//! - `SEGR_WORKERS` - HTTP worker threads (default `4`)

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::dispatcher::DEFAULT_METHODS;
use crate::echo::echo_handler;
use crate::middleware;
use crate::server::AppService;

/// One route entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub method: String,
    pub path: String,
    pub handler: String,
}

/// Routes sharing a prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub prefix: String,
    #[serde(default)]
    pub middleware: Vec<String>,
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// Route table file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteTableConfig {
    /// Methods to build trees for
    pub methods: Vec<String>,
    /// Global middleware by name, applied to every route below
    pub middleware: Vec<String>,
    pub routes: Vec<RouteConfig>,
    pub groups: Vec<GroupConfig>,
}

impl Default for RouteTableConfig {
    fn default() -> Self {
        Self {
            methods: DEFAULT_METHODS.iter().map(|m| (*m).to_string()).collect(),
            middleware: Vec::new(),
            routes: Vec::new(),
            groups: Vec::new(),
        }
    }
}

/// File formats a route table can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns an error for a missing or unknown extension.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml" | "yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => bail!("unsupported route table format: {}", path.display()),
        }
    }
}

impl RouteTableConfig {
    /// Load a route table, choosing the parser by file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let format = ConfigFormat::from_path(path)?;
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read route table {}", path.display()))?;
        Self::parse(&contents, format)
            .with_context(|| format!("failed to parse route table {}", path.display()))
    }

    /// Parse a route table from a string.
    ///
    /// # Errors
    ///
    /// Returns the underlying parser error.
    pub fn parse(contents: &str, format: ConfigFormat) -> anyhow::Result<Self> {
        let config = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(contents)?,
            ConfigFormat::Toml => toml::from_str(contents)?,
            ConfigFormat::Json => serde_json::from_str(contents)?,
        };
        Ok(config)
    }

    /// Build an [`AppService`] with every route bound to an echo handler.
    ///
    /// Global middleware is registered first so it applies to every route. Groups are
    /// registered after the top-level routes.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown middleware name, a route on a method that is not
    /// in `methods`, or conflicting routes.
    pub fn build_service(&self) -> anyhow::Result<AppService> {
        let mut service = AppService::with_methods(&self.methods);

        service.use_middleware(resolve_middleware(&self.middleware)?);

        for route in &self.routes {
            service
                .register_route(&route.method, &route.path, [echo_handler(&route.handler)])
                .with_context(|| format!("failed to register {} {}", route.method, route.path))?;
        }

        for group_config in &self.groups {
            let mut group = service.group(&group_config.prefix);
            group.use_middleware(resolve_middleware(&group_config.middleware)?);
            for route in &group_config.routes {
                group
                    .register_route(&route.method, &route.path, [echo_handler(&route.handler)])
                    .with_context(|| {
                        format!(
                            "failed to register {} {}{}",
                            route.method, group_config.prefix, route.path
                        )
                    })?;
            }
        }

        Ok(service)
    }
}

fn resolve_middleware(names: &[String]) -> anyhow::Result<Vec<crate::server::ControllerHandler>> {
    names
        .iter()
        .map(|name| {
            middleware::by_name(name).with_context(|| {
                format!(
                    "unknown middleware '{name}' (expected one of {:?})",
                    middleware::BUILTIN_MIDDLEWARE
                )
            })
        })
        .collect()
}

/// Runtime settings loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Listen address (default: `0.0.0.0:8080`)
    pub addr: String,
    /// HTTP worker threads (default: 4)
    pub workers: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
            workers: 4,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables, falling back to defaults for
    /// unset or unparsable values.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let addr = env::var("SEGR_ADDR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.addr);
        let workers = env::var("SEGR_WORKERS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .filter(|w: &usize| *w > 0)
            .unwrap_or(defaults.workers);
        Self { addr, workers }
    }
}
