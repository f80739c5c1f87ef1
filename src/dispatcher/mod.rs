//! # Dispatcher Module
//!
//! The dispatcher owns one [`Trie`](crate::router::Trie) per HTTP method and turns an
//! inbound `(method, path)` into the handler chain to run and the path parameters it
//! should see.
//!
//! ## Overview
//!
//! - Route tables are built once at startup through [`Dispatcher::register_route`] or the
//!   `get` / `post` / `put` / `delete` shorthands.
//! - Global middleware registered with [`Dispatcher::use_middleware`] is copied in front
//!   of every route registered *afterwards*. Routes registered earlier keep the chain they
//!   were built with.
//! - [`Dispatcher::resolve`] uppercases the method, picks its tree, matches the path and
//!   extracts the wildcard bindings.
//!
//! ## Handler Registration
//!
//! ```rust
//! use segrouter::dispatcher::Dispatcher;
//!
//! let mut dispatcher: Dispatcher<&str> = Dispatcher::new();
//! dispatcher.use_middleware(["log"]);
//! dispatcher.get("/user/:id", ["get_user"]).unwrap();
//!
//! let m = dispatcher.resolve("get", "/user/42").unwrap();
//! assert_eq!(&*m.handlers, &["log", "get_user"]);
//! assert_eq!(m.get_path_param("id"), Some("42"));
//!
//! assert!(dispatcher.resolve("PATCH", "/user/42").is_none());
//! ```
//!
//! ## Error Handling
//!
//! Registration returns [`RouteError`](crate::error::RouteError) values. The dispatcher
//! never exits the process itself; the bootstrap decides that a conflicting route table
//! is fatal. Resolution has no error path: misses are `None`.

mod core;

pub use core::{Dispatcher, RouteMatch, DEFAULT_METHODS};
