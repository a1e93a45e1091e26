//! Normalizing host-router dumps into a [`RouterTree`].
//!
//! A dump is the JSON rendition of a running application's router, as produced by a small
//! introspection hook inside the host application. Two top-level shapes are known:
//!
//! - legacy: `{"_router": {"stack": [...]}}`
//! - current: `{"router": {"stack": [...]}}`
//!
//! A bare router object (`{"stack": [...]}`) is accepted as well. Each stack entry is a
//! layer:
//!
//! ```json
//! { "route": { "path": "/users", "methods": {"get": true},
//!              "stack": [{"method": "get", "name": "listUsers",
//!                         "handle": {"name": "listUsers", "openapi": {"summary": "..."}}}] } }
//! { "name": "router", "path": "/api", "handle": {"stack": [...]} }
//! { "name": "router", "regexp": "^\\/api\\/?(?=\\/|$)", "keys": [], "handle": {"$ref": "shared"} }
//! { "name": "jsonParser" }
//! ```
//!
//! `{"$ref": name}` points into a top-level `routers` table so one router can be mounted
//! from several parents, including itself.
//!
//! Conversion is tolerant: anything that does not have the expected shape is skipped and
//! the rest of the tree is still converted.

use super::{
    HandlerId, HttpMethod, LeafRoute, MountPattern, Node, NodeId, RouteLayer, RouterMount,
    RouterTree,
};
use crate::metadata::RouteMetadata;
use log::debug;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Property of a handler object carrying structural metadata
pub const METADATA_PROPERTY: &str = "openapi";

/// Builds a canonical tree from a host-router dump.
///
/// Returns `None` when the value exposes no usable child list under any known shape.
pub fn from_value(value: &Value) -> Option<RouterTree> {
    let stack = root_stack(value)?;
    let routers = value
        .get("routers")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let mut converter = Converter {
        tree: RouterTree::new(),
        routers,
        resolved: HashMap::new(),
    };
    let root = converter.tree.root();
    converter.fill_router(root, stack);

    debug!(
        "Converted host router dump into {} nodes",
        converter.tree.node_count()
    );
    Some(converter.tree)
}

/// Probe the known shapes for the root child list
fn root_stack(value: &Value) -> Option<&Vec<Value>> {
    let object = value.as_object()?;
    ["_router", "router"]
        .iter()
        .find_map(|key| object.get(*key).and_then(stack_of))
        .or_else(|| stack_of(value))
}

fn stack_of(value: &Value) -> Option<&Vec<Value>> {
    value.get("stack").and_then(Value::as_array)
}

struct Converter {
    tree: RouterTree,
    routers: Map<String, Value>,
    resolved: HashMap<String, NodeId>,
}

impl Converter {
    fn fill_router(&mut self, router: NodeId, stack: &[Value]) {
        for layer in stack {
            if let Some(child) = self.convert_layer(layer) {
                self.tree.attach(router, child);
            }
        }
    }

    fn convert_layer(&mut self, layer: &Value) -> Option<NodeId> {
        let Some(object) = layer.as_object() else {
            debug!("Skipping non-object layer");
            return None;
        };

        if let Some(route) = object.get("route") {
            return self.convert_route(route);
        }

        if let Some(handle) = object.get("handle") {
            if let Some(target) = self.resolve_router(handle) {
                let mount = RouterMount {
                    path: object.get("path").and_then(Value::as_str).map(str::to_string),
                    pattern: pattern_of(object),
                    target,
                };
                return Some(self.tree.push(Node::Mount(mount)));
            }
        }

        let handler = self.handler_from(object, object.get("handle"));
        Some(self.tree.push(Node::Middleware(handler)))
    }

    fn convert_route(&mut self, route: &Value) -> Option<NodeId> {
        let Some(path) = route.get("path").and_then(Value::as_str) else {
            debug!("Skipping route without a string path");
            return None;
        };

        let methods = methods_of(route.get("methods"));
        let mut stack = Vec::new();
        for entry in route.get("stack").and_then(Value::as_array).into_iter().flatten() {
            let Some(object) = entry.as_object() else {
                continue;
            };
            let method = object
                .get("method")
                .and_then(Value::as_str)
                .and_then(HttpMethod::parse);
            let handler = self.handler_from(object, object.get("handle"));
            stack.push(RouteLayer { method, handler });
        }

        Some(self.tree.push(Node::Route(LeafRoute {
            path: path.to_string(),
            methods,
            stack,
        })))
    }

    /// A mount handle is either an inline router or a reference into `routers`
    fn resolve_router(&mut self, handle: &Value) -> Option<NodeId> {
        if let Some(name) = handle.get("$ref").and_then(Value::as_str) {
            if let Some(&id) = self.resolved.get(name) {
                return Some(id);
            }
            let definition = self.routers.get(name).cloned()?;
            let stack = stack_of(&definition)?;
            let id = self.tree.router();
            // Registered before filling so self-references resolve to the same node.
            self.resolved.insert(name.to_string(), id);
            self.fill_router(id, stack);
            return Some(id);
        }

        let stack = stack_of(handle)?;
        let id = self.tree.router();
        self.fill_router(id, stack);
        Some(id)
    }

    fn handler_from(&mut self, layer: &Map<String, Value>, handle: Option<&Value>) -> HandlerId {
        let name = handle
            .and_then(|h| h.get("name"))
            .or_else(|| layer.get("name"))
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .unwrap_or("<anonymous>");
        let handler = self.tree.handler(name);

        if let Some(raw) = handle.and_then(|h| h.get(METADATA_PROPERTY)) {
            match serde_json::from_value::<RouteMetadata>(raw.clone()) {
                Ok(metadata) => self.tree.annotate(handler, metadata),
                Err(e) => debug!("Ignoring malformed metadata on handler {}: {}", name, e),
            }
        }

        handler
    }
}

/// `methods` is either `{"get": true, "post": false}` or `["get", "post"]`
fn methods_of(value: Option<&Value>) -> Vec<HttpMethod> {
    let mut methods = Vec::new();
    let mut push = |name: &str| {
        if let Some(method) = HttpMethod::parse(name) {
            if !methods.contains(&method) {
                methods.push(method);
            }
        }
    };

    match value {
        Some(Value::Object(map)) => {
            for (name, enabled) in map {
                if enabled.as_bool().unwrap_or(false) {
                    push(name);
                }
            }
        }
        Some(Value::Array(items)) => {
            for name in items.iter().filter_map(Value::as_str) {
                push(name);
            }
        }
        _ => {}
    }

    methods
}

/// Compiled pattern from `regexp`, with capture names from `keys`
fn pattern_of(layer: &Map<String, Value>) -> Option<MountPattern> {
    let source = layer.get("regexp")?.as_str()?.to_string();
    let keys = layer
        .get("keys")
        .and_then(Value::as_array)
        .map(|keys| {
            keys.iter()
                .filter_map(|k| k.get("name").and_then(Value::as_str).or_else(|| k.as_str()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    Some(MountPattern { source, keys })
}
