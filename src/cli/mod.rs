//! # CLI Module
//!
//! Command-line front end for route tables.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! Load a route table and print every registered route, one `METHOD PATTERN` per line:
//!
//! ```bash
//! segrouter routes --config routes.yaml
//! ```
//!
//! ### `resolve`
//!
//! Resolve a single request against a route table and print the matched pattern and
//! path parameters. Exits non-zero when nothing matches:
//!
//! ```bash
//! segrouter resolve --config routes.yaml --method GET /user/42
//! ```
//!
//! ### `serve`
//!
//! Serve a route table over HTTP. Every route answers with an echo of what the router
//! saw (handler name, method, path, parameters):
//!
//! ```bash
//! segrouter serve --config routes.yaml --addr 127.0.0.1:8080 --workers 8
//! ```
//!
//! `--addr` and `--workers` fall back to `SEGR_ADDR` and `SEGR_WORKERS`. A route table
//! with conflicting routes is rejected before anything is served.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run, run_cli, Cli, Commands};
