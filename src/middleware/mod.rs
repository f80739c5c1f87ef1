//! Built-in chain handlers.
//!
//! Middleware here is just a [`ControllerHandler`](crate::server::ControllerHandler)
//! that does some work around a call to [`Context::next`](crate::server::Context::next).
//! Register them globally with `AppService::use_middleware` or on a group.

mod request_id;
mod trace;

pub use request_id::{request_id_middleware, REQUEST_ID_HEADER};
pub use trace::tracing_middleware;

use crate::server::ControllerHandler;

/// Names accepted in route-table config files.
pub const BUILTIN_MIDDLEWARE: [&str; 2] = ["request_id", "tracing"];

/// Look up a built-in middleware by its config name.
#[must_use]
pub fn by_name(name: &str) -> Option<ControllerHandler> {
    match name {
        "request_id" => Some(request_id_middleware()),
        "tracing" => Some(tracing_middleware()),
        _ => None,
    }
}
