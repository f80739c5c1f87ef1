use serde_json::json;

use crate::server::{handler, ControllerHandler};

/// Handler that answers with what the router saw: handler name, method, path, params.
///
/// Routes loaded from a config file are bound to this, so a route table can be served
/// and poked at before any real handler exists.
#[must_use]
pub fn echo_handler(name: &str) -> ControllerHandler {
    let name = name.to_string();
    handler(move |ctx| {
        let body = json!({
            "handler": name,
            "method": ctx.method(),
            "path": ctx.path(),
            "params": ctx.params(),
            "request_id": ctx.request_id(),
        });
        ctx.json(&body)?;
        ctx.next()
    })
}
