use std::time::Instant;

use tracing::{error, info, info_span};

use crate::server::{handler, ControllerHandler};

/// Run the rest of the chain inside a `request` span and log status and latency.
#[must_use]
pub fn tracing_middleware() -> ControllerHandler {
    handler(|ctx| {
        let span = info_span!(
            "request",
            method = %ctx.method(),
            path = %ctx.path(),
            request_id = %ctx.request_id()
        );
        let _guard = span.enter();

        let start = Instant::now();
        let result = ctx.next();
        let latency_us = start.elapsed().as_micros();

        match &result {
            Ok(()) => info!(
                status = ctx.response().status,
                latency_us,
                "Request completed"
            ),
            Err(err) => error!(error = %err, latency_us, "Request failed"),
        }
        result
    })
}
