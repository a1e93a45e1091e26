//! Route documentation payloads.
//!
//! A [`RouteMetadata`] value can come from two places: a structural annotation attached to
//! a handler in the router tree, or a documentation comment parsed from source. The
//! [`merge`] module combines both into one record. The same types are reused by the
//! generated OpenAPI document, so they serialize with OpenAPI field names.

pub mod merge;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

pub use merge::merge_metadata;

/// Documentation payload for one route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tag set; duplicates collapse on insertion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ParameterDescriptor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Status code -> response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<BTreeMap<String, Response>>,
}

/// OpenAPI Parameter object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Parameter name
    pub name: String,
    /// Parameter location (path, query, header, cookie)
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether the parameter is required
    #[serde(default)]
    pub required: bool,
    /// JSON-Schema-shaped parameter schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    /// Parameter description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The location where a parameter value is read from in an HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Path parameter embedded in the URL (e.g., `/users/:id`)
    Path,
    /// Query string parameter (e.g., `?page=1&limit=10`)
    Query,
    /// HTTP header parameter
    Header,
    /// Cookie parameter
    Cookie,
}

/// OpenAPI RequestBody object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Request body description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the request body is required
    #[serde(default)]
    pub required: bool,
    /// Content types and their schemas
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
}

/// OpenAPI MediaType object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    /// Schema for this media type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

/// OpenAPI Response object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Response description
    #[serde(default)]
    pub description: String,
    /// Response content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<BTreeMap<String, MediaType>>,
}

impl ParameterLocation {
    /// Parse a location name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "cookie" => Some(ParameterLocation::Cookie),
            _ => None,
        }
    }
}

impl ParameterDescriptor {
    /// Create a new ParameterDescriptor without schema or description
    pub fn new(name: impl Into<String>, location: ParameterLocation, required: bool) -> Self {
        Self {
            name: name.into(),
            location,
            required,
            schema: None,
            description: None,
        }
    }

    /// Key under which parameters are deduplicated
    pub fn key(&self) -> (&str, ParameterLocation) {
        (self.name.as_str(), self.location)
    }
}

impl Response {
    /// Create a response with a description and no content
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            content: None,
        }
    }
}

impl RouteMetadata {
    /// Visit every embedded schema value (parameters, request body, response content).
    pub fn schemas_mut(&mut self) -> Vec<&mut Value> {
        let mut schemas = Vec::new();
        if let Some(parameters) = &mut self.parameters {
            schemas.extend(parameters.iter_mut().filter_map(|p| p.schema.as_mut()));
        }
        if let Some(body) = &mut self.request_body {
            schemas.extend(body.content.values_mut().filter_map(|m| m.schema.as_mut()));
        }
        if let Some(responses) = &mut self.responses {
            for response in responses.values_mut() {
                if let Some(content) = &mut response.content {
                    schemas.extend(content.values_mut().filter_map(|m| m.schema.as_mut()));
                }
            }
        }
        schemas
    }
}
