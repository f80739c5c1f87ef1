//! Dispatcher core: one trie per method, middleware snapshots, request resolution.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::RouteError;
use crate::router::{NodeRef, Trie};

/// Methods every dispatcher gets a tree for unless told otherwise.
pub const DEFAULT_METHODS: [&str; 4] = ["GET", "POST", "PUT", "DELETE"];

/// Result of resolving a request against the route table.
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    /// Terminal node the path resolved to
    pub node: NodeRef<'a, H>,
    /// Middleware snapshot followed by the route's own handlers
    pub handlers: Arc<[H]>,
    /// Wildcard bindings (e.g. `/user/:id` + `/user/42` → `{"id": "42"}`)
    pub path_params: HashMap<String, String>,
}

impl<H> RouteMatch<'_, H> {
    /// Get a path parameter by name
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }

    /// Route pattern that matched, as stored (literals uppercased)
    #[must_use]
    pub fn pattern(&self) -> String {
        self.node.pattern()
    }
}

/// Per-method route tables plus the process-wide middleware list.
///
/// Registration takes `&mut self` and happens at startup. Once built, the dispatcher is
/// only read, and [`Dispatcher::resolve`] can be called from any number of threads
/// through a shared reference (`H: Sync`).
pub struct Dispatcher<H> {
    trees: HashMap<String, Trie<H>>,
    middlewares: Vec<H>,
}

impl<H: Clone> Default for Dispatcher<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> std::fmt::Debug for Dispatcher<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("trees", &self.trees)
            .field("middlewares", &self.middlewares.len())
            .finish()
    }
}

impl<H: Clone> Dispatcher<H> {
    /// Dispatcher with trees for `GET`, `POST`, `PUT` and `DELETE`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_methods(DEFAULT_METHODS)
    }

    /// Dispatcher with one tree per given method. Names are uppercased.
    #[must_use]
    pub fn with_methods<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let trees = methods
            .into_iter()
            .map(|m| (m.as_ref().to_ascii_uppercase(), Trie::new()))
            .collect();
        Self {
            trees,
            middlewares: Vec::new(),
        }
    }

    /// Supported methods, sorted.
    #[must_use]
    pub fn methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.trees.keys().map(String::as_str).collect();
        methods.sort_unstable();
        methods
    }

    /// Append global middleware.
    ///
    /// Only routes registered after this call see the new entries; the list is copied
    /// into each route when it is registered.
    pub fn use_middleware<I>(&mut self, handlers: I)
    where
        I: IntoIterator<Item = H>,
    {
        self.middlewares.extend(handlers);
    }

    /// Current middleware list.
    #[must_use]
    pub fn middlewares(&self) -> &[H] {
        &self.middlewares
    }

    /// Register `path` on `method` with the current middleware prepended to `handlers`.
    ///
    /// # Errors
    ///
    /// - [`RouteError::MethodNotSupported`] if there is no tree for `method`
    /// - [`RouteError::RouteConflict`] if the path clashes with an existing route
    /// - [`RouteError::EmptyHandlers`] if both the middleware and `handlers` are empty
    /// - [`RouteError::TooManySegments`] if the path is deeper than the trie allows
    ///
    /// All of these are startup configuration errors; callers are expected to abort.
    pub fn register_route<I>(
        &mut self,
        method: &str,
        path: &str,
        handlers: I,
    ) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = H>,
    {
        let method = method.to_ascii_uppercase();
        let Some(tree) = self.trees.get_mut(&method) else {
            return Err(RouteError::MethodNotSupported { method });
        };

        let mut chain = self.middlewares.clone();
        chain.extend(handlers);
        let chain_len = chain.len();

        tree.add_route(path, chain)?;

        info!(
            method = %method,
            path = %path,
            handlers = chain_len,
            middlewares = self.middlewares.len(),
            "Route registered"
        );
        Ok(())
    }

    /// Register a `GET` route.
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::register_route`].
    pub fn get<I>(&mut self, path: &str, handlers: I) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = H>,
    {
        self.register_route("GET", path, handlers)
    }

    /// Register a `POST` route.
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::register_route`].
    pub fn post<I>(&mut self, path: &str, handlers: I) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = H>,
    {
        self.register_route("POST", path, handlers)
    }

    /// Register a `PUT` route.
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::register_route`].
    pub fn put<I>(&mut self, path: &str, handlers: I) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = H>,
    {
        self.register_route("PUT", path, handlers)
    }

    /// Register a `DELETE` route.
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::register_route`].
    pub fn delete<I>(&mut self, path: &str, handlers: I) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = H>,
    {
        self.register_route("DELETE", path, handlers)
    }
}

impl<H> Dispatcher<H> {
    /// Tree for `method` (case-insensitive).
    #[must_use]
    pub fn tree(&self, method: &str) -> Option<&Trie<H>> {
        self.trees.get(&method.to_ascii_uppercase())
    }

    /// Handler chain for a request, without parameter extraction.
    #[must_use]
    pub fn find_handlers(&self, method: &str, path: &str) -> Option<Arc<[H]>> {
        self.tree(method)?.find_handlers(path)
    }

    /// Resolve a request to its node, handler chain and path parameters.
    ///
    /// An unknown method and an unmatched path both return `None`; the caller turns
    /// that into a 404.
    #[must_use]
    pub fn resolve(&self, method: &str, path: &str) -> Option<RouteMatch<'_, H>> {
        debug!(method = %method, path = %path, "Route match attempt");

        let match_start = Instant::now();

        let Some(tree) = self.tree(method) else {
            warn!(method = %method, path = %path, "No tree for method");
            return None;
        };

        let Some(node) = tree.find_node(path) else {
            warn!(
                method = %method,
                path = %path,
                duration_us = match_start.elapsed().as_micros(),
                "No route matched"
            );
            return None;
        };

        let path_params = node.extract_params(path);
        let match_duration = match_start.elapsed();

        if match_duration > Duration::from_millis(1) {
            warn!(
                method = %method,
                path = %path,
                path_params = ?path_params,
                duration_us = match_duration.as_micros(),
                "Slow route matching detected"
            );
        } else {
            debug!(
                method = %method,
                path = %path,
                path_params = ?path_params,
                duration_us = match_duration.as_micros(),
                "Route matched"
            );
        }

        Some(RouteMatch {
            node,
            handlers: node.handlers(),
            path_params,
        })
    }

    /// All registered routes as `(method, pattern)` pairs, methods sorted.
    #[must_use]
    pub fn routes(&self) -> Vec<(String, String)> {
        let mut methods: Vec<&String> = self.trees.keys().collect();
        methods.sort_unstable();
        methods
            .into_iter()
            .flat_map(|method| {
                self.trees[method]
                    .routes()
                    .into_iter()
                    .map(move |pattern| (method.clone(), pattern))
            })
            .collect()
    }

    /// Log a summary of the route table, the way a service does once at startup.
    pub fn log_routes(&self) {
        let routes = self.routes();
        let routes_summary: Vec<String> = routes
            .iter()
            .take(10)
            .map(|(method, pattern)| format!("{method} {pattern}"))
            .collect();
        info!(
            routes_count = routes.len(),
            routes_summary = ?routes_summary,
            routing_algorithm = "segment_trie",
            "Routing table loaded"
        );
    }
}
