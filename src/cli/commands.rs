use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::{RouteTableConfig, RuntimeConfig};
use crate::logging;
use crate::server::HttpServer;

/// Command-line interface for segrouter
#[derive(Debug, Parser)]
#[command(name = "segrouter")]
#[command(about = "Segmented-trie HTTP router", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print every route in a route table
    Routes {
        /// Route table file (YAML, TOML or JSON)
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Resolve one request against a route table
    Resolve {
        /// Route table file (YAML, TOML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// HTTP method (case-insensitive)
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path, e.g. /user/42
        path: String,
    },
    /// Serve a route table over HTTP using echo handlers
    Serve {
        /// Route table file (YAML, TOML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Address and port to bind the server to
        #[arg(long, env = "SEGR_ADDR")]
        addr: Option<String>,

        /// Number of HTTP worker threads
        #[arg(long, env = "SEGR_WORKERS")]
        workers: Option<usize>,
    },
}

/// Parse process arguments, install logging and run the selected command.
///
/// # Errors
///
/// See [`run`]. Also fails if logging cannot be initialized.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging()?;
    run(cli)
}

/// Execute a parsed command.
///
/// # Errors
///
/// Returns an error if:
/// - The route table cannot be read or parsed
/// - A route conflicts with an earlier one, or names an unknown middleware
/// - `resolve` finds no matching route
/// - The server fails to bind
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Routes { config } => {
            let service = load_service(&config)?;
            for (method, pattern) in service.dispatcher().routes() {
                println!("{method:<7} {pattern}");
            }
            Ok(())
        }
        Commands::Resolve {
            config,
            method,
            path,
        } => {
            let service = load_service(&config)?;
            let Some(route_match) = service.dispatcher().resolve(&method, &path) else {
                bail!("no route for {} {}", method.to_uppercase(), path);
            };
            println!("{} {}", method.to_uppercase(), route_match.pattern());
            let mut params: Vec<_> = route_match.path_params.iter().collect();
            params.sort();
            for (name, value) in params {
                println!("  {name} = {value}");
            }
            Ok(())
        }
        Commands::Serve {
            config,
            addr,
            workers,
        } => {
            let service = load_service(&config)?;
            let runtime = RuntimeConfig::from_env();
            let addr = addr.unwrap_or(runtime.addr);
            let workers = workers.unwrap_or(runtime.workers);

            service.dispatcher().log_routes();
            let handle = HttpServer(Arc::new(service))
                .start(&addr, workers)
                .with_context(|| format!("failed to bind {addr}"))?;
            info!(addr = %handle.addr(), "Serving {}", config.display());
            handle
                .join()
                .map_err(|_| anyhow!("HTTP worker panicked"))?;
            Ok(())
        }
    }
}

fn load_service(path: &std::path::Path) -> anyhow::Result<crate::server::AppService> {
    RouteTableConfig::load(path)?.build_service()
}
