//! Registration-time errors.
//!
//! Resolution never fails with an error: an unknown method or an unmatched path is
//! reported as `None` so the request pipeline can answer 404. Only building the route
//! table can go wrong, and a bootstrap that gets a [`RouteError`] is expected to abort
//! startup rather than serve a partial table.

use thiserror::Error;

/// Error returned while registering routes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A route with the same shape already exists in the method tree.
    #[error("route conflict: {path}")]
    RouteConflict {
        /// The path that was being registered
        path: String,
    },
    /// No tree exists for the requested method.
    #[error("method not supported: {method}")]
    MethodNotSupported {
        /// The (uppercased) method name
        method: String,
    },
    /// The route would end up with an empty handler chain.
    #[error("route {path} registered without handlers")]
    EmptyHandlers {
        /// The path that was being registered
        path: String,
    },
    /// The path has more segments than a route may have.
    #[error("route {path} has {segments} segments (limit {limit})")]
    TooManySegments {
        /// The path that was being registered
        path: String,
        /// Segments in `path`, counting the leading empty one
        segments: usize,
        /// [`MAX_SEGMENTS`](crate::router::MAX_SEGMENTS)
        limit: usize,
    },
}

impl RouteError {
    /// The path involved in the error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            RouteError::RouteConflict { path }
            | RouteError::EmptyHandlers { path }
            | RouteError::TooManySegments { path, .. } => Some(path),
            RouteError::MethodNotSupported { .. } => None,
        }
    }
}
