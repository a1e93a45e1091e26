//! Canonical router tree.
//!
//! Host routers expose their structure in different shapes depending on the framework and
//! its version. Everything is normalized into a [`RouterTree`] before the walker runs: an
//! arena of nodes addressed by [`NodeId`], where each node is a router (an ordered child
//! list), a leaf route, a mount binding a router to a path prefix, or plain middleware.
//!
//! Handlers live in a separate table addressed by [`HandlerId`]. Structural metadata is
//! attached to handlers through a side-table rather than stored on the handler itself.
//!
//! Node identity is the arena index, so a router mounted from two parents, or a cycle
//! through mounts, is expressed simply by reusing a `NodeId`.
//!
//! # Example
//!
//! ```
//! use openapi_from_router::router::{HttpMethod, RouterTree};
//!
//! let mut tree = RouterTree::new();
//! let root = tree.root();
//! let list_users = tree.handler("listUsers");
//! tree.add_route(root, "/users", HttpMethod::Get, &[list_users]);
//!
//! let api = tree.router();
//! let list_items = tree.handler("listItems");
//! tree.add_route(api, "/items", HttpMethod::Get, &[list_items]);
//! tree.mount(root, "/api/v1", api);
//! ```

pub mod host;
pub mod mount;

use crate::metadata::RouteMetadata;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub use mount::extract_mount_path;

/// HTTP methods a leaf route can register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET method
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP PATCH method
    Patch,
    /// HTTP DELETE method
    Delete,
    /// HTTP HEAD method
    Head,
    /// HTTP OPTIONS method
    Options,
    /// HTTP TRACE method
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Trace,
    ];

    /// Upper-case method name
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Lower-case method name, as used for OpenAPI path item keys
    pub fn as_lower(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
            HttpMethod::Trace => "trace",
        }
    }

    /// Parse a method name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a node in a [`RouterTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Identity of a handler in a [`RouterTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(usize);

/// A callable registered somewhere in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handler {
    /// Function name as reported by the host, or `"<anonymous>"`
    pub name: String,
}

/// One node of the tree
#[derive(Debug, Clone)]
pub enum Node {
    /// Ordered list of children; the only node kind the walker descends into
    Router(RouterNode),
    /// Terminal route bound to a path
    Route(LeafRoute),
    /// Binds a router to a path prefix
    Mount(RouterMount),
    /// Handler that neither serves a route nor nests a router
    Middleware(HandlerId),
}

#[derive(Debug, Clone, Default)]
pub struct RouterNode {
    pub children: Vec<NodeId>,
}

/// A path with one or more methods, each served by a handler chain.
#[derive(Debug, Clone)]
pub struct LeafRoute {
    pub path: String,
    /// Registered methods in registration order
    pub methods: Vec<HttpMethod>,
    /// Handler chain; entries with `method: None` apply to every method
    pub stack: Vec<RouteLayer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteLayer {
    pub method: Option<HttpMethod>,
    pub handler: HandlerId,
}

/// A router mounted under a prefix.
///
/// Hosts report the prefix either as a literal string or only as the compiled match
/// pattern; see [`extract_mount_path`].
#[derive(Debug, Clone)]
pub struct RouterMount {
    pub path: Option<String>,
    pub pattern: Option<MountPattern>,
    pub target: NodeId,
}

/// A compiled mount pattern and the names of its capture groups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountPattern {
    pub source: String,
    pub keys: Vec<String>,
}

impl LeafRoute {
    /// The handler that actually serves `method`: the last layer in the chain that
    /// applies to it.
    pub fn terminal_handler(&self, method: HttpMethod) -> Option<HandlerId> {
        self.layers_for(method).last().map(|layer| layer.handler)
    }

    /// Handlers that run before the terminal handler for `method`.
    pub fn pre_handlers(&self, method: HttpMethod) -> Vec<HandlerId> {
        let layers: Vec<&RouteLayer> = self.layers_for(method).collect();
        match layers.split_last() {
            Some((_, rest)) => rest.iter().map(|layer| layer.handler).collect(),
            None => Vec::new(),
        }
    }

    fn layers_for(&self, method: HttpMethod) -> impl Iterator<Item = &RouteLayer> {
        self.stack
            .iter()
            .filter(move |layer| layer.method.map_or(true, |m| m == method))
    }
}

/// Arena-backed router tree with a handler table and a structural-metadata side-table.
#[derive(Debug, Clone)]
pub struct RouterTree {
    nodes: Vec<Node>,
    handlers: Vec<Handler>,
    annotations: HashMap<HandlerId, RouteMetadata>,
    root: NodeId,
}

impl RouterTree {
    /// Create a tree holding an empty root router
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::Router(RouterNode::default())],
            handlers: Vec::new(),
            annotations: HashMap::new(),
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn handler_info(&self, id: HandlerId) -> Option<&Handler> {
        self.handlers.get(id.0)
    }

    /// Name of a handler, or `"<anonymous>"` for unknown ids
    pub fn handler_name(&self, id: HandlerId) -> &str {
        self.handler_info(id)
            .map(|h| h.name.as_str())
            .unwrap_or("<anonymous>")
    }

    /// Structural metadata attached to a handler
    pub fn annotation(&self, id: HandlerId) -> Option<&RouteMetadata> {
        self.annotations.get(&id)
    }

    /// Register a new handler
    pub fn handler(&mut self, name: impl Into<String>) -> HandlerId {
        let id = HandlerId(self.handlers.len());
        self.handlers.push(Handler { name: name.into() });
        id
    }

    /// Attach structural metadata to a handler, replacing any previous value
    pub fn annotate(&mut self, handler: HandlerId, metadata: RouteMetadata) {
        debug!("Annotating handler {}", self.handler_name(handler));
        self.annotations.insert(handler, metadata);
    }

    /// Create a detached router; attach it with [`RouterTree::mount`]
    pub fn router(&mut self) -> NodeId {
        self.push(Node::Router(RouterNode::default()))
    }

    /// Register `handlers` for `method` at `path` as a new leaf under `parent`.
    ///
    /// The last handler is the terminal one; earlier handlers are route-level middleware.
    pub fn add_route(
        &mut self,
        parent: NodeId,
        path: impl Into<String>,
        method: HttpMethod,
        handlers: &[HandlerId],
    ) -> NodeId {
        let route = self.push(Node::Route(LeafRoute {
            path: path.into(),
            methods: Vec::new(),
            stack: Vec::new(),
        }));
        self.add_method(route, method, handlers);
        self.attach(parent, route);
        route
    }

    /// Register another method on an existing leaf route.
    pub fn add_method(&mut self, route: NodeId, method: HttpMethod, handlers: &[HandlerId]) {
        if let Some(Node::Route(leaf)) = self.nodes.get_mut(route.0) {
            if !leaf.methods.contains(&method) {
                leaf.methods.push(method);
            }
            leaf.stack.extend(handlers.iter().map(|&handler| RouteLayer {
                method: Some(method),
                handler,
            }));
        } else {
            debug!("Ignoring add_method on non-route node {:?}", route);
        }
    }

    /// Mount `target` under `parent` at a literal prefix
    pub fn mount(&mut self, parent: NodeId, path: impl Into<String>, target: NodeId) -> NodeId {
        let mount = self.push(Node::Mount(RouterMount {
            path: Some(path.into()),
            pattern: None,
            target,
        }));
        self.attach(parent, mount);
        mount
    }

    /// Mount `target` under `parent`, knowing only the compiled match pattern
    pub fn mount_pattern(
        &mut self,
        parent: NodeId,
        pattern: MountPattern,
        target: NodeId,
    ) -> NodeId {
        let mount = self.push(Node::Mount(RouterMount {
            path: None,
            pattern: Some(pattern),
            target,
        }));
        self.attach(parent, mount);
        mount
    }

    /// Register router-level middleware under `parent`
    pub fn middleware(&mut self, parent: NodeId, handler: HandlerId) -> NodeId {
        let node = self.push(Node::Middleware(handler));
        self.attach(parent, node);
        node
    }

    /// Append an existing node to a router's child list
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        match self.nodes.get_mut(parent.0) {
            Some(Node::Router(router)) => router.children.push(child),
            _ => debug!("Ignoring attach to non-router node {:?}", parent),
        }
    }

    pub(crate) fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }
}

impl Default for RouterTree {
    fn default() -> Self {
        Self::new()
    }
}
