use super::context::ControllerHandler;
use super::service::AppService;
use crate::error::RouteError;

/// Route group: registers routes under a shared path prefix.
///
/// The router itself knows nothing about groups; a group only concatenates
/// `prefix + path` and puts its own middleware in front of the route handlers before
/// calling [`AppService::register_route`]. Global middleware is still prepended by the
/// dispatcher, so the final chain is global → group → route.
pub struct Group<'a> {
    service: &'a mut AppService,
    prefix: String,
    middlewares: Vec<ControllerHandler>,
}

impl<'a> Group<'a> {
    pub(crate) fn new(service: &'a mut AppService, prefix: &str) -> Self {
        Self {
            service,
            prefix: prefix.to_string(),
            middlewares: Vec::new(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Middleware for routes registered through this group from now on.
    pub fn use_middleware<I>(&mut self, handlers: I)
    where
        I: IntoIterator<Item = ControllerHandler>,
    {
        self.middlewares.extend(handlers);
    }

    /// # Errors
    ///
    /// See [`crate::dispatcher::Dispatcher::register_route`].
    pub fn register_route<I>(
        &mut self,
        method: &str,
        path: &str,
        handlers: I,
    ) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = ControllerHandler>,
    {
        let full_path = format!("{}{}", self.prefix, path);
        let mut chain = self.middlewares.clone();
        chain.extend(handlers);
        self.service.register_route(method, &full_path, chain)
    }

    /// # Errors
    ///
    /// See [`crate::dispatcher::Dispatcher::register_route`].
    pub fn get<I>(&mut self, path: &str, handlers: I) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = ControllerHandler>,
    {
        self.register_route("GET", path, handlers)
    }

    /// # Errors
    ///
    /// See [`crate::dispatcher::Dispatcher::register_route`].
    pub fn post<I>(&mut self, path: &str, handlers: I) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = ControllerHandler>,
    {
        self.register_route("POST", path, handlers)
    }

    /// # Errors
    ///
    /// See [`crate::dispatcher::Dispatcher::register_route`].
    pub fn put<I>(&mut self, path: &str, handlers: I) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = ControllerHandler>,
    {
        self.register_route("PUT", path, handlers)
    }

    /// # Errors
    ///
    /// See [`crate::dispatcher::Dispatcher::register_route`].
    pub fn delete<I>(&mut self, path: &str, handlers: I) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = ControllerHandler>,
    {
        self.register_route("DELETE", path, handlers)
    }

    /// Nested group: prefixes and group middleware accumulate.
    pub fn group(&mut self, prefix: &str) -> Group<'_> {
        Group {
            service: &mut *self.service,
            prefix: format!("{}{}", self.prefix, prefix),
            middlewares: self.middlewares.clone(),
        }
    }
}
