//! Route discovery over a [`RouterTree`].
//!
//! The walker descends from the root router through mounts, accumulating path prefixes,
//! and emits one [`RouteRecord`] per (leaf route, method). Each record carries the merge of
//! the terminal handler's structural annotation with documentation metadata matched by
//! method and path.
//!
//! # Example
//!
//! ```
//! use openapi_from_router::router::{HttpMethod, RouterTree};
//! use openapi_from_router::walker::RouteWalker;
//!
//! let mut tree = RouterTree::new();
//! let root = tree.root();
//! let api = tree.router();
//! let list = tree.handler("listItems");
//! tree.add_route(api, "/items", HttpMethod::Get, &[list]);
//! tree.mount(root, "/api/v1", api);
//!
//! let mut walker = RouteWalker::new();
//! let routes = walker.discover(Some(&tree));
//! assert_eq!(routes[0].path, "/api/v1/items");
//! ```

use crate::adapter::AdapterRegistry;
use crate::metadata::{merge_metadata, ParameterDescriptor, RouteMetadata};
use crate::path;
use crate::router::{
    extract_mount_path, host, HandlerId, HttpMethod, LeafRoute, Node, NodeId, RouterTree,
};
use log::{debug, info};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::PoisonError;

/// Opt-in discovery features. None of them changes which routes are found.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    /// Match documentation metadata from the configured source
    pub parse_docs: bool,
    /// Fill parameters from `:name` path markers
    pub extract_parameters: bool,
    /// Record the middleware chain in front of each route
    pub analyze_middleware: bool,
    pub generate_operation_ids: bool,
    /// Tags added to every route; enrichment is on when non-empty
    pub custom_tags: Vec<String>,
}

impl DiscoveryOptions {
    /// Whether any enrichment flag is set
    pub fn enriches(&self) -> bool {
        self.extract_parameters
            || self.analyze_middleware
            || self.generate_operation_ids
            || !self.custom_tags.is_empty()
    }
}

/// Documentation metadata parsed from outside the router tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocEntry {
    pub method: Option<String>,
    pub path: Option<String>,
    pub metadata: RouteMetadata,
}

/// Source of documentation metadata, parsed once per discovery call.
pub trait DocumentationSource {
    fn parse(&self) -> Vec<DocEntry>;
}

impl DocumentationSource for Vec<DocEntry> {
    fn parse(&self) -> Vec<DocEntry> {
        self.clone()
    }
}

/// A discovered (method, path) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub method: HttpMethod,
    /// Normalized full path, prefixes included
    pub path: String,
    /// Terminal handler serving the route
    pub handler: HandlerId,
    /// Merged structural and documentation metadata
    pub metadata: Option<RouteMetadata>,
}

/// A [`RouteRecord`] plus the results of the enabled enrichment passes.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRoute {
    pub route: RouteRecord,
    pub operation_id: Option<String>,
    /// Names of router-level middleware and route-level pre-handlers, outermost first
    pub middleware: Vec<String>,
    pub parameters: Vec<ParameterDescriptor>,
    pub tags: BTreeSet<String>,
    /// Whether documentation metadata matched this route
    pub documented: bool,
}

impl EnrichedRoute {
    /// Folds extracted parameters and tags back into the record's metadata.
    pub fn to_route_record(&self) -> RouteRecord {
        let mut record = self.route.clone();
        if self.parameters.is_empty() && self.tags.is_empty() {
            return record;
        }

        let mut metadata = record.metadata.take().unwrap_or_default();
        if !self.parameters.is_empty() {
            metadata.parameters = Some(self.parameters.clone());
        }
        if !self.tags.is_empty() {
            metadata.tags = Some(self.tags.clone());
        }
        record.metadata = Some(metadata);
        record
    }
}

/// Depth-first route discovery.
pub struct RouteWalker {
    options: DiscoveryOptions,
    doc_source: Option<Box<dyn DocumentationSource>>,
    /// Explicit registry; `None` consults [`AdapterRegistry::global`]
    adapters: Option<AdapterRegistry>,
    routes: Vec<RouteRecord>,
    enriched: Vec<EnrichedRoute>,
    visited: HashSet<(NodeId, String)>,
    active: HashSet<NodeId>,
    doc_index: HashMap<String, RouteMetadata>,
}

impl RouteWalker {
    /// Walker with default options, converting schemas through the global adapter registry
    pub fn new() -> Self {
        Self::with_options(DiscoveryOptions::default())
    }

    pub fn with_options(options: DiscoveryOptions) -> Self {
        Self {
            options,
            doc_source: None,
            adapters: None,
            routes: Vec::new(),
            enriched: Vec::new(),
            visited: HashSet::new(),
            active: HashSet::new(),
            doc_index: HashMap::new(),
        }
    }

    /// Documentation source consulted when `parse_docs` is set
    pub fn with_doc_source(mut self, source: Box<dyn DocumentationSource>) -> Self {
        self.doc_source = Some(source);
        self
    }

    /// Convert embedded schemas with `adapters` instead of the global registry
    pub fn with_adapters(mut self, adapters: AdapterRegistry) -> Self {
        self.adapters = Some(adapters);
        self
    }

    pub fn options(&self) -> &DiscoveryOptions {
        &self.options
    }

    /// Discovers all routes of `tree`.
    ///
    /// A missing tree yields an empty list. Per-call state is reset first, so repeated
    /// calls never accumulate.
    pub fn discover(&mut self, tree: Option<&RouterTree>) -> Vec<RouteRecord> {
        self.reset();

        let Some(tree) = tree else {
            debug!("No router tree supplied");
            return Vec::new();
        };

        self.build_doc_index();

        let root = tree.root();
        self.active.insert(root);
        self.walk(tree, root, "", &[]);
        self.active.remove(&root);

        info!("Discovered {} routes", self.routes.len());
        self.routes.clone()
    }

    /// Discovers routes from a host-router dump. Values of unknown shape yield no routes.
    pub fn discover_value(&mut self, value: &Value) -> Vec<RouteRecord> {
        let tree = host::from_value(value);
        self.discover(tree.as_ref())
    }

    /// Routes from the last discovery call
    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes
    }

    /// Enriched routes from the last discovery call; empty unless an enrichment flag is set
    pub fn enriched_routes(&self) -> &[EnrichedRoute] {
        &self.enriched
    }

    fn reset(&mut self) {
        self.routes.clear();
        self.enriched.clear();
        self.visited.clear();
        self.active.clear();
        self.doc_index.clear();
    }

    fn build_doc_index(&mut self) {
        if !self.options.parse_docs {
            return;
        }
        let Some(source) = &self.doc_source else {
            debug!("Documentation parsing enabled without a source");
            return;
        };

        for entry in source.parse() {
            match (entry.method, entry.path) {
                (Some(method), Some(path)) => {
                    self.doc_index.insert(doc_key(&method, &path), entry.metadata);
                }
                _ => debug!("Skipping documentation entry without method and path"),
            }
        }
        debug!("Indexed {} documentation entries", self.doc_index.len());
    }

    fn walk(&mut self, tree: &RouterTree, router: NodeId, prefix: &str, inherited: &[HandlerId]) {
        let Some(Node::Router(node)) = tree.node(router) else {
            return;
        };

        let mut chain = inherited.to_vec();
        for &child in &node.children {
            if !self.visited.insert((child, prefix.to_string())) {
                debug!("Already visited {:?} under '{}'", child, prefix);
                continue;
            }

            match tree.node(child) {
                Some(Node::Route(leaf)) => self.visit_leaf(tree, leaf, prefix, &chain),
                Some(Node::Mount(mount)) => {
                    let target = mount.target;
                    if self.active.contains(&target) {
                        debug!("Skipping cyclic mount of {:?} under '{}'", target, prefix);
                        continue;
                    }
                    let nested = path::join(prefix, &extract_mount_path(mount));
                    self.active.insert(target);
                    self.walk(tree, target, &nested, &chain);
                    self.active.remove(&target);
                }
                Some(Node::Middleware(handler)) => chain.push(*handler),
                Some(Node::Router(_)) => debug!("Ignoring router attached without a mount"),
                None => debug!("Dangling node reference {:?}", child),
            }
        }
    }

    fn visit_leaf(&mut self, tree: &RouterTree, leaf: &LeafRoute, prefix: &str, chain: &[HandlerId]) {
        let full_path = path::join(prefix, &leaf.path);

        for &method in &leaf.methods {
            let Some(handler) = leaf.terminal_handler(method) else {
                debug!("No handler for {} {}", method, full_path);
                continue;
            };

            let structural = tree
                .annotation(handler)
                .cloned()
                .map(|metadata| self.convert_schemas(metadata));
            let documentation = self.doc_index.get(&doc_key(method.as_str(), &full_path)).cloned();
            let documented = documentation.is_some();

            let record = RouteRecord {
                method,
                path: full_path.clone(),
                handler,
                metadata: merge_metadata(structural, documentation),
            };

            if self.options.enriches() {
                let mut middleware: Vec<HandlerId> = chain.to_vec();
                middleware.extend(leaf.pre_handlers(method));
                let enriched = self.enrich(tree, &record, &middleware, documented);
                self.enriched.push(enriched);
            }
            self.routes.push(record);
        }
    }

    fn enrich(
        &self,
        tree: &RouterTree,
        record: &RouteRecord,
        middleware: &[HandlerId],
        documented: bool,
    ) -> EnrichedRoute {
        let metadata = record.metadata.as_ref();

        let declared = metadata.and_then(|m| m.parameters.clone());
        let scanned = self
            .options
            .extract_parameters
            .then(|| path::path_parameters(&record.path));
        let parameters = declared
            .filter(|p| !p.is_empty())
            .or(scanned)
            .unwrap_or_default();

        let mut tags: BTreeSet<String> = metadata
            .and_then(|m| m.tags.clone())
            .unwrap_or_default();
        tags.extend(self.options.custom_tags.iter().cloned());

        let middleware = if self.options.analyze_middleware {
            middleware
                .iter()
                .map(|&handler| tree.handler_name(handler).to_string())
                .collect()
        } else {
            Vec::new()
        };

        EnrichedRoute {
            route: record.clone(),
            operation_id: self
                .options
                .generate_operation_ids
                .then(|| path::operation_id(record.method, &record.path)),
            middleware,
            parameters,
            tags,
            documented,
        }
    }

    /// Replace every embedded schema an adapter recognizes with its JSON Schema form
    fn convert_schemas(&self, mut metadata: RouteMetadata) -> RouteMetadata {
        let global;
        let adapters = match &self.adapters {
            Some(adapters) => adapters,
            None => {
                global = AdapterRegistry::global()
                    .read()
                    .unwrap_or_else(PoisonError::into_inner);
                &*global
            }
        };

        for schema in metadata.schemas_mut() {
            if let Some(converted) = adapters.detect_and_convert(schema) {
                *schema = converted;
            }
        }
        metadata
    }
}

impl Default for RouteWalker {
    fn default() -> Self {
        Self::new()
    }
}

/// Documentation index key: `UPPER(method):normalized-path`
fn doc_key(method: &str, route_path: &str) -> String {
    format!(
        "{}:{}",
        method.trim().to_ascii_uppercase(),
        path::normalize(route_path)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::SchemaAdapter;
    use crate::metadata::{MediaType, ParameterLocation, RequestBody, Response};
    use crate::router::MountPattern;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn paths(routes: &[RouteRecord]) -> Vec<(HttpMethod, String)> {
        routes.iter().map(|r| (r.method, r.path.clone())).collect()
    }

    fn sample_app() -> RouterTree {
        let mut tree = RouterTree::new();
        let root = tree.root();
        let list = tree.handler("listUsers");
        let create = tree.handler("createUser");
        tree.add_route(root, "/users", HttpMethod::Get, &[list]);
        tree.add_route(root, "/users", HttpMethod::Post, &[create]);

        let api = tree.router();
        let items = tree.handler("listItems");
        tree.add_route(api, "/items", HttpMethod::Get, &[items]);
        tree.mount(root, "/api/v1", api);
        tree
    }

    #[test]
    fn test_missing_or_malformed_input_yields_nothing() {
        let mut walker = RouteWalker::new();
        assert!(walker.routes().is_empty());
        assert!(walker.discover(None).is_empty());
        assert!(walker.discover_value(&Value::Null).is_empty());
        assert!(walker.discover_value(&json!({})).is_empty());
        assert!(walker.discover_value(&json!("router")).is_empty());
        assert!(walker.discover_value(&json!({ "router": { "stack": null } })).is_empty());
    }

    #[test]
    fn test_end_to_end_discovery() {
        let tree = sample_app();
        let routes = RouteWalker::new().discover(Some(&tree));

        assert_eq!(
            paths(&routes),
            vec![
                (HttpMethod::Get, "/users".to_string()),
                (HttpMethod::Post, "/users".to_string()),
                (HttpMethod::Get, "/api/v1/items".to_string()),
            ]
        );
        assert_eq!(tree.handler_name(routes[2].handler), "listItems");
        assert!(routes.iter().all(|r| r.metadata.is_none()));
    }

    #[test]
    fn test_five_level_prefix_accumulation() {
        let mut tree = RouterTree::new();
        let mut parent = tree.root();
        for level in 1..=5 {
            let child = tree.router();
            tree.mount(parent, format!("/level{}", level), child);
            parent = child;
        }
        let handler = tree.handler("endpoint");
        tree.add_route(parent, "/endpoint", HttpMethod::Get, &[handler]);

        let routes = RouteWalker::new().discover(Some(&tree));

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].path, "/level1/level2/level3/level4/level5/endpoint");
    }

    #[test]
    fn test_method_fan_out() {
        let mut tree = RouterTree::new();
        let root = tree.root();
        let methods = [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
        ];
        let first = tree.handler("get");
        let route = tree.add_route(root, "/resource", methods[0], &[first]);
        for method in &methods[1..] {
            let handler = tree.handler(method.as_lower());
            tree.add_method(route, *method, &[handler]);
        }

        let routes = RouteWalker::new().discover(Some(&tree));

        assert_eq!(routes.len(), 5);
        assert!(routes.iter().all(|r| r.path == "/resource"));
        let found: Vec<HttpMethod> = routes.iter().map(|r| r.method).collect();
        assert_eq!(found, methods.to_vec());
    }

    #[test]
    fn test_shared_router_is_discovered_once_per_mount() {
        let mut tree = RouterTree::new();
        let root = tree.root();
        let shared = tree.router();
        let health = tree.handler("health");
        tree.add_route(shared, "/health", HttpMethod::Get, &[health]);
        tree.mount(root, "/a", shared);
        tree.mount(root, "/b", shared);
        tree.mount(root, "/a", shared);

        let routes = RouteWalker::new().discover(Some(&tree));

        assert_eq!(
            paths(&routes),
            vec![
                (HttpMethod::Get, "/a/health".to_string()),
                (HttpMethod::Get, "/b/health".to_string()),
            ]
        );
    }

    #[test]
    fn test_cyclic_mount_terminates() {
        let mut tree = RouterTree::new();
        let root = tree.root();
        let a = tree.router();
        let b = tree.router();
        let handler = tree.handler("ping");
        tree.add_route(b, "/ping", HttpMethod::Get, &[handler]);
        tree.mount(root, "/a", a);
        tree.mount(a, "/b", b);
        tree.mount(b, "/a", a);
        tree.mount(b, "/root", root);

        let routes = RouteWalker::new().discover(Some(&tree));

        assert_eq!(paths(&routes), vec![(HttpMethod::Get, "/a/b/ping".to_string())]);
    }

    #[test]
    fn test_pattern_mount_prefix() {
        let mut tree = RouterTree::new();
        let root = tree.root();
        let users = tree.router();
        let handler = tree.handler("listPosts");
        tree.add_route(users, "/posts", HttpMethod::Get, &[handler]);
        tree.mount_pattern(
            root,
            MountPattern {
                source: "^\\/users\\/(?:([^\\/]+?))\\/?(?=\\/|$)".to_string(),
                keys: vec!["userId".to_string()],
            },
            users,
        );

        let routes = RouteWalker::new().discover(Some(&tree));

        assert_eq!(routes[0].path, "/users/:userId/posts");
    }

    #[test]
    fn test_repeated_discovery_does_not_accumulate() {
        let tree = sample_app();
        let mut walker = RouteWalker::new();
        let first = walker.discover(Some(&tree));
        let second = walker.discover(Some(&tree));

        assert_eq!(first, second);
        assert_eq!(walker.routes().len(), 3);

        walker.discover(None);
        assert!(walker.routes().is_empty());
    }

    #[test]
    fn test_documentation_merges_with_structural_metadata() {
        let mut tree = RouterTree::new();
        let root = tree.root();
        let handler = tree.handler("getUser");
        tree.annotate(
            handler,
            RouteMetadata {
                summary: Some("From annotation".to_string()),
                tags: Some(["users".to_string()].into()),
                ..Default::default()
            },
        );
        tree.add_route(root, "/users/:id/", HttpMethod::Get, &[handler]);

        let docs = vec![
            DocEntry {
                method: Some("get".to_string()),
                path: Some("/users//:id".to_string()),
                metadata: RouteMetadata {
                    summary: Some("From docs".to_string()),
                    tags: Some(["accounts".to_string()].into()),
                    ..Default::default()
                },
            },
            DocEntry {
                method: None,
                path: Some("/users/:id".to_string()),
                metadata: RouteMetadata::default(),
            },
        ];

        let options = DiscoveryOptions {
            parse_docs: true,
            ..Default::default()
        };
        let mut walker = RouteWalker::with_options(options).with_doc_source(Box::new(docs.clone()));
        let routes = walker.discover(Some(&tree));

        let metadata = routes[0].metadata.clone().unwrap();
        assert_eq!(metadata.summary.as_deref(), Some("From docs"));
        assert_eq!(
            metadata.tags,
            Some(["accounts".to_string(), "users".to_string()].into())
        );

        let mut without_docs = RouteWalker::new().with_doc_source(Box::new(docs));
        let routes = without_docs.discover(Some(&tree));
        assert_eq!(
            routes[0].metadata.as_ref().and_then(|m| m.summary.as_deref()),
            Some("From annotation")
        );
    }

    struct MoneyAdapter;

    impl SchemaAdapter for MoneyAdapter {
        fn name(&self) -> &str {
            "walker-money"
        }

        fn detect(&self, schema: &Value) -> bool {
            schema.get("x-walker-money").is_some()
        }

        fn convert(&self, _schema: &Value) -> crate::error::Result<Value> {
            Ok(json!({ "type": "string", "pattern": "^[0-9]+\\.[0-9]{2}$" }))
        }
    }

    #[test]
    fn test_global_adapters_apply_by_default() {
        let mut tree = RouterTree::new();
        let root = tree.root();
        let handler = tree.handler("charge");
        let mut content = BTreeMap::new();
        content.insert(
            "application/json".to_string(),
            MediaType {
                schema: Some(json!({ "x-walker-money": true })),
            },
        );
        tree.annotate(
            handler,
            RouteMetadata {
                request_body: Some(RequestBody {
                    description: None,
                    required: true,
                    content,
                }),
                ..Default::default()
            },
        );
        tree.add_route(root, "/charges", HttpMethod::Post, &[handler]);

        let schema_of = |routes: &[RouteRecord]| {
            routes[0]
                .metadata
                .as_ref()
                .and_then(|m| m.request_body.as_ref())
                .and_then(|b| b.content["application/json"].schema.clone())
        };

        AdapterRegistry::global()
            .write()
            .unwrap()
            .register(Box::new(MoneyAdapter));
        let converted = schema_of(&RouteWalker::new().discover(Some(&tree)));
        let local = schema_of(
            &RouteWalker::new()
                .with_adapters(AdapterRegistry::new())
                .discover(Some(&tree)),
        );
        AdapterRegistry::global().write().unwrap().unregister("walker-money");

        assert_eq!(converted.unwrap()["type"], "string");
        assert_eq!(local, Some(json!({ "x-walker-money": true })));
    }

    #[test]
    fn test_structural_schemas_are_converted() {
        let mut tree = RouterTree::new();
        let root = tree.root();
        let handler = tree.handler("createUser");
        let mut content = BTreeMap::new();
        content.insert(
            "application/json".to_string(),
            MediaType {
                schema: Some(json!({
                    "_def": { "typeName": "ZodObject", "shape": {
                        "name": { "_def": { "typeName": "ZodString" } }
                    } }
                })),
            },
        );
        tree.annotate(
            handler,
            RouteMetadata {
                request_body: Some(RequestBody {
                    description: None,
                    required: true,
                    content,
                }),
                responses: Some([("201".to_string(), Response::new("Created"))].into()),
                ..Default::default()
            },
        );
        tree.add_route(root, "/users", HttpMethod::Post, &[handler]);

        let routes = RouteWalker::new().discover(Some(&tree));
        let body = routes[0]
            .metadata
            .as_ref()
            .and_then(|m| m.request_body.as_ref())
            .unwrap();

        assert_eq!(
            body.content["application/json"].schema,
            Some(json!({
                "type": "object",
                "properties": { "name": { "type": "string" } },
                "required": ["name"]
            }))
        );

        let mut bare = RouteWalker::new().with_adapters(AdapterRegistry::empty());
        let routes = bare.discover(Some(&tree));
        let body = routes[0]
            .metadata
            .as_ref()
            .and_then(|m| m.request_body.as_ref())
            .unwrap();
        assert!(body.content["application/json"].schema.as_ref().unwrap().get("_def").is_some());
    }

    #[test]
    fn test_enrichment() {
        let mut tree = RouterTree::new();
        let root = tree.root();
        let logger = tree.handler("logger");
        tree.middleware(root, logger);

        let api = tree.router();
        let auth = tree.handler("auth");
        tree.middleware(api, auth);
        let validate = tree.handler("validate");
        let get_post = tree.handler("getPost");
        tree.annotate(
            get_post,
            RouteMetadata {
                parameters: Some(vec![ParameterDescriptor::new(
                    "expand",
                    ParameterLocation::Query,
                    false,
                )]),
                ..Default::default()
            },
        );
        tree.add_route(api, "/posts/:postId", HttpMethod::Get, &[validate, get_post]);
        tree.mount(root, "/users/:userId", api);

        let late = tree.handler("late");
        tree.middleware(root, late);

        let options = DiscoveryOptions {
            extract_parameters: true,
            analyze_middleware: true,
            generate_operation_ids: true,
            custom_tags: vec!["public".to_string()],
            ..Default::default()
        };
        let mut walker = RouteWalker::with_options(options);
        walker.discover(Some(&tree));

        let enriched = &walker.enriched_routes()[0];
        assert_eq!(enriched.operation_id.as_deref(), Some("get_users_userId_posts_postId"));
        assert_eq!(enriched.middleware, vec!["logger", "auth", "validate"]);
        let names: Vec<&str> = enriched.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["expand"]);
        assert_eq!(enriched.tags, ["public".to_string()].into());
        assert!(!enriched.documented);

        let folded = enriched.to_route_record();
        let metadata = folded.metadata.unwrap();
        assert_eq!(metadata.parameters.map(|p| p.len()), Some(1));
        assert_eq!(metadata.tags, Some(["public".to_string()].into()));
    }

    #[test]
    fn test_path_scan_only_fills_undeclared_parameters() {
        let mut tree = RouterTree::new();
        let root = tree.root();
        let declared = tree.handler("getPost");
        tree.annotate(
            declared,
            RouteMetadata {
                parameters: Some(vec![ParameterDescriptor::new(
                    "expand",
                    ParameterLocation::Query,
                    false,
                )]),
                ..Default::default()
            },
        );
        tree.add_route(root, "/posts/:postId", HttpMethod::Get, &[declared]);
        let bare = tree.handler("getComment");
        tree.add_route(root, "/comments/:commentId", HttpMethod::Get, &[bare]);

        let options = DiscoveryOptions {
            extract_parameters: true,
            ..Default::default()
        };
        let mut walker = RouteWalker::with_options(options);
        walker.discover(Some(&tree));

        let names = |route: &EnrichedRoute| -> Vec<String> {
            route.parameters.iter().map(|p| p.name.clone()).collect()
        };
        let enriched = walker.enriched_routes();
        assert_eq!(names(&enriched[0]), vec!["expand"]);
        assert_eq!(names(&enriched[1]), vec!["commentId"]);
        assert_eq!(enriched[1].parameters[0].location, ParameterLocation::Path);
    }

    #[test]
    fn test_no_enrichment_without_flags() {
        let tree = sample_app();
        let mut walker = RouteWalker::new();
        walker.discover(Some(&tree));
        assert!(walker.enriched_routes().is_empty());
    }
}
