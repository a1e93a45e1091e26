//! Assembling the OpenAPI document from discovered routes.

use crate::config::{ConfigUpdate, GeneratorConfig, Info, Server};
use crate::metadata::{ParameterDescriptor, RequestBody, Response};
use crate::path;
use crate::router::HttpMethod;
use crate::walker::RouteRecord;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Description of the response every operation without documented responses gets
pub const DEFAULT_RESPONSE_DESCRIPTION: &str = "Successful response";

/// OpenAPI document builder.
///
/// Holds the configuration and the last generated document. Generation is a pure function
/// of the configuration and the route list.
#[derive(Debug, Clone)]
pub struct OpenApiBuilder {
    config: GeneratorConfig,
    cached: Option<OpenApiDocument>,
}

/// Complete OpenAPI document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version
    pub openapi: String,
    /// API info
    pub info: Info,
    pub servers: Vec<Server>,
    /// API paths
    pub paths: BTreeMap<String, PathItem>,
    pub components: Components,
    /// Top-level tag catalog
    pub tags: Vec<Tag>,
}

/// OpenAPI PathItem object - represents all operations for a single path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
}

/// OpenAPI Operation object - represents a single API operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub operation_id: String,
    pub tags: Vec<String>,
    /// Parameters (path, query, header, cookie)
    pub parameters: Vec<ParameterDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Status code -> response
    pub responses: BTreeMap<String, Response>,
}

/// OpenAPI Components object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    pub schemas: BTreeMap<String, Value>,
    pub security_schemes: BTreeMap<String, Value>,
}

/// OpenAPI Tag object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PathItem {
    /// Operation registered for `method`
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }

    /// Set the operation for `method`, replacing any previous one
    pub fn set(&mut self, method: HttpMethod, operation: Operation) {
        let slot = match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Patch => &mut self.patch,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Head => &mut self.head,
            HttpMethod::Options => &mut self.options,
            HttpMethod::Trace => &mut self.trace,
        };
        if slot.is_some() {
            debug!("Replacing earlier {} operation", method);
        }
        *slot = Some(operation);
    }

    /// Registered operations in method order
    pub fn operations(&self) -> Vec<(HttpMethod, &Operation)> {
        HttpMethod::ALL
            .into_iter()
            .filter_map(|method| self.operation(method).map(|op| (method, op)))
            .collect()
    }
}

impl OpenApiBuilder {
    /// Create a new OpenApiBuilder for a configuration
    pub fn new(config: GeneratorConfig) -> Self {
        debug!("Initializing OpenApiBuilder");
        Self {
            config,
            cached: None,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Builds the document for `routes` and caches it.
    ///
    /// Routes are grouped by path, then method. A later route with the same path and
    /// method replaces an earlier one.
    pub fn generate(&mut self, routes: &[RouteRecord]) -> OpenApiDocument {
        let mut paths: BTreeMap<String, PathItem> = BTreeMap::new();

        for route in routes {
            debug!("Adding route: {} {}", route.method, route.path);
            let key = if self.config.path_templates {
                path::to_openapi_template(&route.path)
            } else {
                route.path.clone()
            };
            paths
                .entry(key)
                .or_default()
                .set(route.method, Self::build_operation(route));
        }

        let config = &self.config;
        let document = OpenApiDocument {
            openapi: config.spec_version.clone(),
            info: config.info.clone(),
            servers: config.servers.clone().unwrap_or_default(),
            paths,
            components: Components {
                schemas: config
                    .components
                    .as_ref()
                    .and_then(|c| c.schemas.clone())
                    .unwrap_or_default(),
                security_schemes: config.security_schemes.clone().unwrap_or_default(),
            },
            tags: Vec::new(),
        };

        info!(
            "Built OpenAPI document with {} paths from {} routes",
            document.paths.len(),
            routes.len()
        );
        self.cached = Some(document.clone());
        document
    }

    /// Document from the last `generate` call, unless the configuration changed since
    pub fn cached_spec(&self) -> Option<&OpenApiDocument> {
        self.cached.as_ref()
    }

    /// Shallow-merge `update` into the configuration and drop the cached document
    pub fn update_config(&mut self, update: ConfigUpdate) {
        self.config.apply(update);
        self.cached = None;
    }

    fn build_operation(route: &RouteRecord) -> Operation {
        let metadata = route.metadata.clone().unwrap_or_default();

        let parameters = metadata
            .parameters
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| path::path_parameters(&route.path));

        let responses = metadata
            .responses
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| {
                let mut responses = BTreeMap::new();
                responses.insert(
                    "200".to_string(),
                    Response::new(DEFAULT_RESPONSE_DESCRIPTION),
                );
                responses
            });

        Operation {
            summary: metadata
                .summary
                .unwrap_or_else(|| format!("{} {}", route.method, route.path)),
            description: metadata.description,
            operation_id: path::operation_id(route.method, &route.path),
            tags: metadata
                .tags
                .map(|tags| tags.into_iter().collect())
                .unwrap_or_default(),
            parameters,
            request_body: metadata.request_body,
            responses,
        }
    }
}

impl Default for OpenApiBuilder {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}
