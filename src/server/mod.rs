//! # Server Module
//!
//! The request pipeline around the dispatcher.
//!
//! - [`Context`] carries one request through its handler chain. Handlers call
//!   [`Context::next`] to continue, or return without calling it to stop the chain.
//! - [`AppService`] owns the route table and turns `(method, path)` into a
//!   [`HandlerResponse`]: `404` when nothing matches, `500` when the chain fails.
//! - [`Group`] registers routes under a common prefix.
//! - [`HttpServer`] exposes an `AppService` over HTTP with a small thread pool.
//!
//! ```rust
//! use segrouter::server::{handler, AppService};
//!
//! let mut service = AppService::new();
//! service
//!     .get(
//!         "/user/:id",
//!         [handler(|ctx| {
//!             let id = ctx.param("id").unwrap_or_default().to_string();
//!             ctx.json(&serde_json::json!({ "id": id }))
//!         })],
//!     )
//!     .unwrap();
//!
//! let res = service.handle("GET", "/user/42");
//! assert_eq!(res.status, 200);
//! assert_eq!(res.body["id"], "42");
//! assert_eq!(service.handle("GET", "/nope").status, 404);
//! ```

mod context;
mod group;
pub mod http_server;
pub mod response;
mod service;

pub use context::{handler, Context, ControllerHandler};
pub use group::Group;
pub use http_server::{HttpServer, ServerHandle};
pub use response::HandlerResponse;
pub use service::AppService;
