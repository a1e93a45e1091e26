//! Structural checks and statistics for OpenAPI documents.
//!
//! Both work on untyped JSON values so that documents produced elsewhere can be checked
//! as well as generated ones.

use crate::path;
use crate::router::HttpMethod;
use log::debug;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

/// One problem found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// JSON-pointer-like location, e.g. `paths./users.get.responses`
    pub location: String,
    pub message: String,
}

/// Outcome of [`validate_document`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// Counts over a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStats {
    pub paths: usize,
    pub operations: usize,
    /// Upper-case method -> operation count
    pub operations_by_method: BTreeMap<String, usize>,
    /// Distinct tag names, from operations and the top-level catalog
    pub tags: usize,
    pub schemas: usize,
}

impl ValidationReport {
    /// Whether the document has no errors; warnings do not count
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            location: location.into(),
            message: message.into(),
        });
    }

    fn warning(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            location: location.into(),
            message: message.into(),
        });
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

impl fmt::Display for DocumentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Paths: {}", self.paths)?;
        writeln!(f, "Operations: {}", self.operations)?;
        for (method, count) in &self.operations_by_method {
            writeln!(f, "  {}: {}", method, count)?;
        }
        writeln!(f, "Tags: {}", self.tags)?;
        write!(f, "Schemas: {}", self.schemas)
    }
}

/// Checks the parts of an OpenAPI 3.x document the generator relies on.
pub fn validate_document(document: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();

    match document.get("openapi").and_then(Value::as_str) {
        Some(version) if version.starts_with("3.") => {}
        Some(version) => report.error("openapi", format!("unsupported version '{}'", version)),
        None => report.error("openapi", "missing OpenAPI version"),
    }

    for field in ["title", "version"] {
        if document
            .get("info")
            .and_then(|info| info.get(field))
            .and_then(Value::as_str)
            .is_none()
        {
            report.error(format!("info.{}", field), "missing required field");
        }
    }

    let Some(paths) = document.get("paths").and_then(Value::as_object) else {
        report.error("paths", "missing or not an object");
        return report;
    };

    let mut operation_ids = HashSet::new();
    for (route_path, item) in paths {
        if !route_path.starts_with('/') {
            report.error(format!("paths.{}", route_path), "path must start with '/'");
        }
        check_path_item(route_path, item, &mut operation_ids, &mut report);
    }

    debug!(
        "Validation finished with {} errors and {} warnings",
        report.errors.len(),
        report.warnings.len()
    );
    report
}

fn check_path_item(
    route_path: &str,
    item: &Value,
    operation_ids: &mut HashSet<String>,
    report: &mut ValidationReport,
) {
    let shared = item
        .as_object()
        .map(declared_path_parameters)
        .unwrap_or_default();

    for (method, operation) in operations(item) {
        let location = format!("paths.{}.{}", route_path, method.as_lower());

        let has_responses = operation
            .get("responses")
            .and_then(Value::as_object)
            .is_some_and(|responses| !responses.is_empty());
        if !has_responses {
            report.error(format!("{}.responses", location), "operation has no responses");
        }

        if let Some(id) = operation.get("operationId").and_then(Value::as_str) {
            if !operation_ids.insert(id.to_string()) {
                report.error(
                    format!("{}.operationId", location),
                    format!("duplicate operationId '{}'", id),
                );
            }
        }

        let mut declared = declared_path_parameters(operation);
        declared.extend(shared.iter().cloned());
        for name in path::parameter_names(&path::from_openapi_template(route_path)) {
            if !declared.contains(&name) {
                report.warning(
                    format!("{}.parameters", location),
                    format!("path parameter '{}' is not declared", name),
                );
            }
        }
    }
}

/// Names of `in: path` parameters declared on an operation or path item
fn declared_path_parameters(node: &Map<String, Value>) -> BTreeSet<String> {
    node.get("parameters")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|p| p.get("in").and_then(Value::as_str) == Some("path"))
        .filter_map(|p| p.get("name").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

fn operations(item: &Value) -> Vec<(HttpMethod, &Map<String, Value>)> {
    HttpMethod::ALL
        .into_iter()
        .filter_map(|method| {
            item.get(method.as_lower())
                .and_then(Value::as_object)
                .map(|operation| (method, operation))
        })
        .collect()
}

/// Counts paths, operations per method, distinct tags and component schemas.
pub fn document_stats(document: &Value) -> DocumentStats {
    let mut stats = DocumentStats::default();
    let mut tags = BTreeSet::new();

    if let Some(paths) = document.get("paths").and_then(Value::as_object) {
        stats.paths = paths.len();
        for item in paths.values() {
            for (method, operation) in operations(item) {
                stats.operations += 1;
                *stats
                    .operations_by_method
                    .entry(method.as_str().to_string())
                    .or_insert(0) += 1;
                tags.extend(
                    operation
                        .get("tags")
                        .and_then(Value::as_array)
                        .into_iter()
                        .flatten()
                        .filter_map(Value::as_str)
                        .map(str::to_string),
                );
            }
        }
    }

    tags.extend(
        document
            .get("tags")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|t| t.get("name").and_then(Value::as_str))
            .map(str::to_string),
    );
    stats.tags = tags.len();

    stats.schemas = document
        .get("components")
        .and_then(|c| c.get("schemas"))
        .and_then(Value::as_object)
        .map_or(0, Map::len);

    stats
}
