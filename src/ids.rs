//! Request identifiers.
//!
//! Ids are ULIDs: sortable by creation time and printable as 26 Crockford base32
//! characters. A client may supply its own through `x-request-id`; anything that does
//! not parse as a ULID is ignored and a fresh id is minted.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use ulid::Ulid;

/// Header a request id is read from and echoed back on.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request identifier carried by [`Context`](crate::server::Context).
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RequestId(Ulid);

impl RequestId {
    /// Mint a fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Id sent by the client in [`REQUEST_ID_HEADER`], if present and valid.
    ///
    /// Header names compare case-insensitively; the first matching header wins.
    pub fn from_headers<'a, I>(headers: I) -> Option<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        headers
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(REQUEST_ID_HEADER))
            .and_then(|(_, value)| value.trim().parse().ok())
    }

    /// Milliseconds since the Unix epoch at which the id was minted.
    #[must_use]
    pub fn timestamp_ms(&self) -> u64 {
        self.0.timestamp_ms()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RequestId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s).map(Self)
    }
}

// Serialized as its string form so it reads the same in JSON bodies and logs.
impl Serialize for RequestId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_ignores_case() {
        let id = RequestId::new();
        let value = id.to_string();
        let headers = [("Host", "x"), ("X-Request-ID", value.as_str())];
        assert_eq!(RequestId::from_headers(headers), Some(id));
    }

    #[test]
    fn test_invalid_or_missing_header() {
        assert_eq!(RequestId::from_headers([("x-request-id", "not-a-ulid")]), None);
        assert_eq!(RequestId::from_headers([("accept", "*/*")]), None);
    }

    #[test]
    fn test_ids_are_time_ordered() {
        let first = RequestId::new();
        let second = RequestId::new();
        assert!(second.timestamp_ms() >= first.timestamp_ms());
        assert_eq!(first.to_string().len(), 26);
    }
}
