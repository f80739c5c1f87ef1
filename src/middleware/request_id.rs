pub use crate::ids::REQUEST_ID_HEADER;
use crate::server::{handler, ControllerHandler};

/// Stamp `x-request-id` on the response, then continue the chain.
#[must_use]
pub fn request_id_middleware() -> ControllerHandler {
    handler(|ctx| {
        let id = ctx.request_id().to_string();
        ctx.set_header(REQUEST_ID_HEADER, id);
        ctx.next()
    })
}
