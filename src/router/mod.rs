//! # Router Module
//!
//! Path matching for segrouter. Each HTTP method owns one [`Trie`]: a prefix tree keyed
//! by slash-delimited path segments.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Storing routes segment by segment, with uppercased literals and `:name` wildcards
//! - Detecting conflicting registrations
//! - Resolving a request path to the terminal node holding the handler chain
//! - Recovering wildcard bindings from a matched node
//!
//! ## Example
//!
//! ```rust
//! use segrouter::router::Trie;
//!
//! let mut trie: Trie<&str> = Trie::new();
//! trie.add_route("/user/:id", vec!["get_user"]).unwrap();
//!
//! let node = trie.find_node("/user/42").unwrap();
//! assert_eq!(&*node.handlers(), &["get_user"]);
//! assert_eq!(node.extract_params("/user/42")["id"], "42");
//! ```
//!
//! ## Performance
//!
//! Lookup cost follows the depth of the request path, not the number of routes: each
//! level only inspects the children of the node reached so far. Wildcards can force a
//! backtrack when a subtree fails to match further down.

mod trie;
#[cfg(test)]
mod performance_tests;

pub use trie::{is_wild_segment, NodeId, NodeRef, Trie, MAX_SEGMENTS, WILDCARD_MARKER};
