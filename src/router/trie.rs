//! Segmented trie for one HTTP method.
//!
//! Paths are split on `/` and every token becomes one trie level. The leading empty
//! token produced by the initial `/` is stored as a node of its own, so `/a/b` is the
//! segment sequence `["", "a", "b"]` hanging below the root.
//!
//! ## Segments
//!
//! - **Literal** segments are stored uppercased and matched case-insensitively.
//! - **Wildcard** segments start with [`WILDCARD_MARKER`] (`:id`), are stored verbatim and
//!   match any single token, binding the token to the name after the marker.
//!
//! ## Matching
//!
//! Lookup walks the tree one segment at a time. At each level the candidates are every
//! wildcard child plus the literal child equal to the segment, tried in the order the
//! children were inserted. The first candidate whose subtree matches the rest of the path
//! wins; there is no literal-over-wildcard preference. With overlapping routes such as
//! `/user/:id` and `/user/info`, whichever was registered first answers `/user/info`.
//!
//! ## Conflicts
//!
//! Two routes conflict when they have the same shape. `/user/:id` and `/user/:name`
//! conflict, `/user/:id` and `/user/info` do not, even though the wildcard would also
//! match `info`.
//!
//! ## Storage
//!
//! Nodes live in an arena owned by the [`Trie`]. Children are kept as [`NodeId`] indices
//! in insertion order and each node keeps the index of its parent. The parent link is
//! only read after a successful match, to walk back up and recover parameter values.
//! Ownership is strictly top-down, so there are no reference cycles.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::RouteError;

/// Prefix that marks a segment as a named wildcard.
pub const WILDCARD_MARKER: char = ':';

/// Most segments a route may have, counting the empty one before the leading `/`.
///
/// Matching recurses once per trie level, so this also bounds lookup stack depth.
pub const MAX_SEGMENTS: usize = 256;

/// Index of a node inside its [`Trie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Returns `true` if the segment is a wildcard (`:name`).
#[inline]
#[must_use]
pub fn is_wild_segment(segment: &str) -> bool {
    segment.starts_with(WILDCARD_MARKER)
}

/// Uppercase literals; wildcards are kept as written.
fn normalize_segment(segment: &str) -> String {
    if is_wild_segment(segment) {
        segment.to_string()
    } else {
        segment.to_uppercase()
    }
}

/// Compare a stored (already uppercased) literal against a raw request segment.
#[inline]
fn literal_matches(stored: &str, segment: &str) -> bool {
    stored
        .chars()
        .eq(segment.chars().flat_map(char::to_uppercase))
}

struct Node<H> {
    segment: String,
    /// `Some` iff a route ends here.
    handlers: Option<Arc<[H]>>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl<H> Node<H> {
    fn new(segment: String, parent: Option<NodeId>) -> Self {
        Self {
            segment,
            handlers: None,
            children: Vec::new(),
            parent,
        }
    }

    fn is_terminal(&self) -> bool {
        self.handlers.is_some()
    }
}

/// Prefix tree over path segments for a single HTTP method.
///
/// Built once at startup with [`Trie::add_route`]; after that every lookup is a
/// read-only walk over `&self`, so a fully built trie can be shared across threads.
pub struct Trie<H> {
    nodes: Vec<Node<H>>,
}

impl<H> Default for Trie<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for Trie<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie")
            .field("nodes", &self.nodes.len())
            .field("routes", &self.routes())
            .finish()
    }
}

impl<H> Trie<H> {
    /// Create a trie holding only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(String::new(), None)],
        }
    }

    /// Register `path` with its handler chain.
    ///
    /// # Errors
    ///
    /// - [`RouteError::RouteConflict`] if a route with the same shape is already
    ///   registered: the same literals (ignoring case) and a wildcard, of any name,
    ///   in the same positions. The tree is left untouched.
    /// - [`RouteError::EmptyHandlers`] if `handlers` is empty.
    /// - [`RouteError::TooManySegments`] if `path` splits into more than
    ///   [`MAX_SEGMENTS`] segments.
    pub fn add_route(&mut self, path: &str, handlers: Vec<H>) -> Result<(), RouteError> {
        if handlers.is_empty() {
            return Err(RouteError::EmptyHandlers {
                path: path.to_string(),
            });
        }

        let segment_count = path.split('/').count();
        if segment_count > MAX_SEGMENTS {
            warn!(segments = segment_count, "Route rejected: too many segments");
            return Err(RouteError::TooManySegments {
                path: path.to_string(),
                segments: segment_count,
                limit: MAX_SEGMENTS,
            });
        }

        let segments: Vec<String> = path.split('/').map(normalize_segment).collect();

        if self.find_same_shape(&segments).is_some() {
            warn!(path = %path, "Route conflict");
            return Err(RouteError::RouteConflict {
                path: path.to_string(),
            });
        }

        let mut current = NodeId::ROOT;
        for segment in segments {
            current = match self.find_child(current, &segment) {
                Some(child) => child,
                None => self.push_child(current, segment),
            };
        }

        let node = &mut self.nodes[current.0];
        if node.is_terminal() {
            // A terminal node is never overwritten.
            return Err(RouteError::RouteConflict {
                path: path.to_string(),
            });
        }
        node.handlers = Some(handlers.into());

        debug!(path = %path, nodes = self.nodes.len(), "Route inserted");
        Ok(())
    }

    /// Handler chain of the route matching `path`.
    #[must_use]
    pub fn find_handlers(&self, path: &str) -> Option<Arc<[H]>> {
        self.find_node(path).map(|node| node.handlers())
    }

    /// Terminal node matching `path`.
    #[must_use]
    pub fn find_node(&self, path: &str) -> Option<NodeRef<'_, H>> {
        self.match_node(NodeId::ROOT, path)
            .map(|id| NodeRef { trie: self, id })
    }

    /// Recover wildcard bindings for a node returned by [`Trie::find_node`].
    ///
    /// Walks from `node` towards the root in lock-step with the segments of `path`
    /// read from the tail, stopping at the first node with an empty segment. Bound
    /// values keep the case they had in `path`. If the same name appears twice on the
    /// route, the binding closest to the root wins.
    #[must_use]
    pub fn extract_params(&self, node: NodeId, path: &str) -> HashMap<String, String> {
        let mut params = HashMap::new();
        let mut current = Some(node);

        for value in path.rsplit('/') {
            let Some(id) = current else {
                break;
            };
            let Some(node) = self.nodes.get(id.0) else {
                break;
            };
            if node.segment.is_empty() {
                break;
            }
            if let Some(name) = node.segment.strip_prefix(WILDCARD_MARKER) {
                params.insert(name.to_string(), value.to_string());
            }
            current = node.parent;
        }

        params
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_terminal()).count()
    }

    /// `true` if no route has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered route patterns, depth-first in insertion order.
    ///
    /// Literal segments come back uppercased, the way they are stored.
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if node.is_terminal() {
                out.push(self.pattern(id));
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    fn pattern(&self, id: NodeId) -> String {
        let mut segments = Vec::new();
        let mut current = id;
        while let Some(parent) = self.nodes[current.0].parent {
            segments.push(self.nodes[current.0].segment.as_str());
            current = parent;
        }
        segments.reverse();
        segments.join("/")
    }

    fn find_child(&self, id: NodeId, segment: &str) -> Option<NodeId> {
        self.nodes[id.0]
            .children
            .iter()
            .copied()
            .find(|child| self.nodes[child.0].segment == segment)
    }

    fn push_child(&mut self, parent: NodeId, segment: String) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(segment, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Terminal node with the same shape as `segments`: equal literals, and a wildcard
    /// (any name) wherever `segments` has one.
    ///
    /// Several wildcard children can share a shape position (`:id` and `:name` below
    /// the same node), so this is a depth-first search with an explicit stack.
    fn find_same_shape(&self, segments: &[String]) -> Option<NodeId> {
        let mut stack = vec![(NodeId::ROOT, 0)];
        while let Some((id, depth)) = stack.pop() {
            let Some(segment) = segments.get(depth) else {
                if self.nodes[id.0].is_terminal() {
                    return Some(id);
                }
                continue;
            };

            let wild = is_wild_segment(segment);
            let same_shape = self.nodes[id.0].children.iter().copied().filter(|child| {
                let stored = self.nodes[child.0].segment.as_str();
                if wild {
                    is_wild_segment(stored)
                } else {
                    stored == segment.as_str()
                }
            });
            stack.extend(same_shape.map(|child| (child, depth + 1)));
        }
        None
    }

    fn match_node(&self, id: NodeId, path: &str) -> Option<NodeId> {
        let (segment, rest) = match path.split_once('/') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };

        let wild_query = is_wild_segment(segment);
        let mut candidates = self.nodes[id.0].children.iter().copied().filter(|child| {
            let stored = self.nodes[child.0].segment.as_str();
            wild_query || is_wild_segment(stored) || literal_matches(stored, segment)
        });

        match rest {
            None => candidates.find(|child| self.nodes[child.0].is_terminal()),
            Some(rest) => candidates.find_map(|child| self.match_node(child, rest)),
        }
    }
}

/// Borrowed view of a matched node.
pub struct NodeRef<'a, H> {
    trie: &'a Trie<H>,
    id: NodeId,
}

impl<H> Clone for NodeRef<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for NodeRef<'_, H> {}

impl<H> fmt::Debug for NodeRef<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("segment", &self.segment())
            .field("terminal", &self.is_terminal())
            .finish()
    }
}

impl<'a, H> NodeRef<'a, H> {
    fn node(&self) -> &'a Node<H> {
        &self.trie.nodes[self.id.0]
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Stored segment: uppercased literal or verbatim wildcard.
    #[must_use]
    pub fn segment(&self) -> &'a str {
        &self.node().segment
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.node().is_terminal()
    }

    /// Handler chain bound to this node; empty for non-terminal nodes.
    #[must_use]
    pub fn handlers(&self) -> Arc<[H]> {
        match &self.node().handlers {
            Some(handlers) => Arc::clone(handlers),
            None => Arc::from(Vec::new()),
        }
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeRef<'a, H>> {
        self.node().parent.map(|id| NodeRef {
            trie: self.trie,
            id,
        })
    }

    /// Route pattern ending at this node, e.g. `/USER/:id`.
    #[must_use]
    pub fn pattern(&self) -> String {
        self.trie.pattern(self.id)
    }

    /// Shorthand for [`Trie::extract_params`] on this node.
    #[must_use]
    pub fn extract_params(&self, path: &str) -> HashMap<String, String> {
        self.trie.extract_params(self.id, path)
    }
}
