//! # segrouter
//!
//! **segrouter** is an HTTP request router built on a segmented trie: one tree per HTTP
//! method, one node per `/`-separated path segment.
//!
//! ## Overview
//!
//! Route patterns mix literal segments (`/user`, matched case-insensitively) and
//! wildcard segments (`/:id`, which bind whatever the request has at that position).
//! Resolving a request yields the handler chain registered for the matching pattern,
//! with the process-wide middleware in front of it, plus the wildcard bindings.
//!
//! ## Architecture
//!
//! - **[`router`]** - The segmented trie: insertion with conflict detection, matching
//!   with backtracking, and parameter extraction through parent links
//! - **[`dispatcher`]** - Per-method tries and the global middleware snapshot
//! - **[`server`]** - Request context, handler chains, route groups and an HTTP front end
//! - **[`middleware`]** - Built-in chain handlers (request ids, tracing)
//! - **[`config`]** - Route tables from YAML/TOML/JSON and runtime settings
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `segrouter` binary
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Server as HttpServer<br/>(tiny_http)
//!     participant Service as AppService
//!     participant Dispatcher as Dispatcher
//!     participant Trie as Trie (per method)
//!     participant Chain as Handler chain
//!
//!     Client->>Server: GET /user/42?x=1
//!     Server->>Server: Strip query, read x-request-id
//!     Server->>Service: handle_with_id("GET", "/user/42")
//!     Service->>Dispatcher: resolve("GET", "/user/42")
//!     Dispatcher->>Trie: find_node("/user/42")
//!     Trie->>Trie: Walk segments: first registered match, with backtracking
//!
//!     alt No Route Match
//!         Service-->>Client: 404 NOT FOUND ROUTER
//!     end
//!
//!     Trie-->>Dispatcher: terminal node
//!     Dispatcher->>Trie: extract_params(node, path)
//!     Dispatcher-->>Service: RouteMatch (handlers, {id: "42"})
//!     Service->>Chain: ctx.next()
//!     Chain->>Chain: middleware → ... → route handler
//!
//!     alt Handler Error
//!         Service-->>Client: 500 INNER ERROR
//!     end
//!
//!     Service-->>Server: HandlerResponse
//!     Server-->>Client: HTTP Response
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use segrouter::dispatcher::Dispatcher;
//!
//! let mut dispatcher: Dispatcher<&str> = Dispatcher::new();
//! dispatcher.use_middleware(["auth"]);
//! dispatcher.get("/user/:id", ["get_user"]).unwrap();
//! dispatcher.get("/user/info", ["user_info"]).unwrap();
//!
//! let m = dispatcher.resolve("GET", "/USER/42").unwrap();
//! assert_eq!(&*m.handlers, &["auth", "get_user"]);
//! assert_eq!(m.get_path_param("id"), Some("42"));
//! ```
//!
//! ## Binary
//!
//! ```bash
//! segrouter routes  --config routes.yaml
//! segrouter resolve --config routes.yaml --method GET /user/42
//! segrouter serve   --config routes.yaml --addr 127.0.0.1:8080
//! ```

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod echo;
pub mod error;
pub mod ids;
pub mod logging;
pub mod middleware;
pub mod router;
pub mod server;

pub use config::{RouteTableConfig, RuntimeConfig};
pub use dispatcher::{Dispatcher, RouteMatch};
pub use error::RouteError;
pub use router::Trie;
