use tracing::{error, info_span};

use super::context::{Context, ControllerHandler};
use super::group::Group;
use super::response::HandlerResponse;
use crate::dispatcher::Dispatcher;
use crate::error::RouteError;
use crate::ids::RequestId;

/// Application service: the route table plus the request entry point.
///
/// Build it mutably at startup, then share it (`Arc<AppService>`) with whatever serves
/// requests. [`AppService::handle`] only needs `&self`.
#[derive(Debug, Default)]
pub struct AppService {
    dispatcher: Dispatcher<ControllerHandler>,
}

impl AppService {
    /// Service with trees for `GET`, `POST`, `PUT` and `DELETE`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dispatcher: Dispatcher::new(),
        }
    }

    /// Service with one tree per given method.
    #[must_use]
    pub fn with_methods<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            dispatcher: Dispatcher::with_methods(methods),
        }
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher<ControllerHandler> {
        &self.dispatcher
    }

    /// Append global middleware for routes registered from now on.
    pub fn use_middleware<I>(&mut self, handlers: I)
    where
        I: IntoIterator<Item = ControllerHandler>,
    {
        self.dispatcher.use_middleware(handlers);
    }

    /// # Errors
    ///
    /// See [`Dispatcher::register_route`].
    pub fn register_route<I>(
        &mut self,
        method: &str,
        path: &str,
        handlers: I,
    ) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = ControllerHandler>,
    {
        self.dispatcher.register_route(method, path, handlers)
    }

    /// # Errors
    ///
    /// See [`Dispatcher::register_route`].
    pub fn get<I>(&mut self, path: &str, handlers: I) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = ControllerHandler>,
    {
        self.dispatcher.get(path, handlers)
    }

    /// # Errors
    ///
    /// See [`Dispatcher::register_route`].
    pub fn post<I>(&mut self, path: &str, handlers: I) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = ControllerHandler>,
    {
        self.dispatcher.post(path, handlers)
    }

    /// # Errors
    ///
    /// See [`Dispatcher::register_route`].
    pub fn put<I>(&mut self, path: &str, handlers: I) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = ControllerHandler>,
    {
        self.dispatcher.put(path, handlers)
    }

    /// # Errors
    ///
    /// See [`Dispatcher::register_route`].
    pub fn delete<I>(&mut self, path: &str, handlers: I) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = ControllerHandler>,
    {
        self.dispatcher.delete(path, handlers)
    }

    /// Start a route group under `prefix`.
    pub fn group(&mut self, prefix: &str) -> Group<'_> {
        Group::new(self, prefix)
    }

    /// Resolve and run a request with a fresh request id.
    #[must_use]
    pub fn handle(&self, method: &str, path: &str) -> HandlerResponse {
        self.handle_with_id(method, path, RequestId::new())
    }

    /// Resolve and run a request.
    ///
    /// - no route for `(method, path)` → `404 "NOT FOUND ROUTER"`
    /// - the chain returns an error → `500 "INNER ERROR"`
    /// - otherwise whatever the chain wrote (default `200` with an empty body)
    #[must_use]
    pub fn handle_with_id(
        &self,
        method: &str,
        path: &str,
        request_id: RequestId,
    ) -> HandlerResponse {
        let Some(route_match) = self.dispatcher.resolve(method, path) else {
            return HandlerResponse::not_found();
        };

        let mut ctx = Context::with_request_id(method, path, request_id);
        ctx.set_handlers(route_match.handlers);
        ctx.set_params(route_match.path_params);

        let span = info_span!(
            "dispatch",
            method = %ctx.method(),
            path = %path,
            request_id = %request_id
        );
        let _guard = span.enter();

        if let Err(err) = ctx.next() {
            error!(error = %err, "Handler chain failed");
            return HandlerResponse::internal_error();
        }

        ctx.into_response()
    }
}
