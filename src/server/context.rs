//! Per-request context and the cooperative handler chain.
//!
//! A chain is a slice of [`ControllerHandler`]s. The service starts it with
//! [`Context::next`]; each handler decides whether to continue by calling `next` again.
//! A handler that returns without calling `next` ends the chain there, and an error
//! returned anywhere propagates back out through every handler that is still waiting on
//! its own `next` call.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use super::response::HandlerResponse;
use crate::ids::RequestId;

/// Entry of a handler chain. Middleware and route handlers share this type.
pub type ControllerHandler = Arc<dyn Fn(&mut Context) -> anyhow::Result<()> + Send + Sync>;

/// Wrap a closure as a [`ControllerHandler`].
pub fn handler<F>(f: F) -> ControllerHandler
where
    F: Fn(&mut Context) -> anyhow::Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// State for one request travelling through its handler chain.
pub struct Context {
    request_id: RequestId,
    method: String,
    path: String,
    params: HashMap<String, String>,
    handlers: Arc<[ControllerHandler]>,
    index: usize,
    response: HandlerResponse,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("request_id", &self.request_id)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("params", &self.params)
            .field("handlers", &self.handlers.len())
            .field("index", &self.index)
            .field("response", &self.response)
            .finish()
    }
}

impl Context {
    #[must_use]
    pub fn new(method: &str, path: &str) -> Self {
        Self::with_request_id(method, path, RequestId::new())
    }

    #[must_use]
    pub fn with_request_id(method: &str, path: &str, request_id: RequestId) -> Self {
        Self {
            request_id,
            method: method.to_ascii_uppercase(),
            path: path.to_string(),
            params: HashMap::new(),
            handlers: Arc::from(Vec::new()),
            index: 0,
            response: HandlerResponse::default(),
        }
    }

    pub(crate) fn set_handlers(&mut self, handlers: Arc<[ControllerHandler]>) {
        self.handlers = handlers;
        self.index = 0;
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }

    /// Run the next handler in the chain. Does nothing once the chain is exhausted.
    ///
    /// # Errors
    ///
    /// Whatever the next handler (or anything it calls `next` on) returns.
    pub fn next(&mut self) -> anyhow::Result<()> {
        let Some(next) = self.handlers.get(self.index).map(Arc::clone) else {
            return Ok(());
        };
        self.index += 1;
        next(self)
    }

    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Uppercased request method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path parameter bound by a `:name` segment.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub fn set_status(&mut self, status: u16) -> &mut Self {
        self.response.status = status;
        self
    }

    pub fn set_header(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.response.set_header(name, value);
        self
    }

    /// Serialize `body` as the JSON response body.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(&mut self, body: &T) -> anyhow::Result<()> {
        self.response.body = serde_json::to_value(body)?;
        Ok(())
    }

    /// Plain string body, sent as a JSON string.
    pub fn text(&mut self, body: impl Into<String>) {
        self.response.body = serde_json::Value::String(body.into());
    }

    #[must_use]
    pub fn response(&self) -> &HandlerResponse {
        &self.response
    }

    #[must_use]
    pub fn into_response(self) -> HandlerResponse {
        self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_walks_chain_once() {
        let mut ctx = Context::new("get", "/x");
        assert_eq!(ctx.method(), "GET");
        ctx.set_handlers(Arc::from(vec![
            handler(|ctx| {
                ctx.text("first");
                ctx.next()
            }),
            handler(|ctx| {
                ctx.set_status(202);
                Ok(())
            }),
        ]));

        ctx.next().unwrap();
        assert_eq!(ctx.response().status, 202);
        assert_eq!(ctx.response().body, serde_json::json!("first"));

        // exhausted chain is a no-op
        ctx.next().unwrap();
        assert_eq!(ctx.into_response().status, 202);
    }

    #[test]
    fn test_set_header_replaces() {
        let mut ctx = Context::new("GET", "/");
        ctx.set_header("X-Trace", "a").set_header("x-trace", "b");
        assert_eq!(ctx.response().headers.len(), 1);
        assert_eq!(ctx.response().header("X-TRACE"), Some("b"));
    }
}
