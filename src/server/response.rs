use http::StatusCode;
use serde::Serialize;
use serde_json::Value;

/// Body sent when no route matches.
pub const NOT_FOUND_BODY: &str = "NOT FOUND ROUTER";
/// Body sent when the handler chain returns an error.
pub const INTERNAL_ERROR_BODY: &str = "INNER ERROR";

/// Response produced by a handler chain.
///
/// Bodies are always JSON; a plain string is sent as a JSON string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlerResponse {
    /// HTTP status code (200, 404, 500, etc.)
    pub status: u16,
    /// Extra response headers, in insertion order
    pub headers: Vec<(String, String)>,
    /// JSON body
    pub body: Value,
}

impl Default for HandlerResponse {
    fn default() -> Self {
        Self::new(StatusCode::OK.as_u16(), Value::Null)
    }
}

impl HandlerResponse {
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body,
        }
    }

    /// `404` with the router's not-found body.
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND.as_u16(),
            Value::String(NOT_FOUND_BODY.to_string()),
        )
    }

    /// `500` with the generic error body.
    #[must_use]
    pub fn internal_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            Value::String(INTERNAL_ERROR_BODY.to_string()),
        )
    }

    /// Set a header, replacing an existing one with the same name (case-insensitive).
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value,
            None => self.headers.push((name.to_string(), value)),
        }
    }

    /// Header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Serialized body. `Null` becomes an empty body.
    #[must_use]
    pub fn body_string(&self) -> String {
        match &self.body {
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}
