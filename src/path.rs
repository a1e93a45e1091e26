//! Path helpers shared by the walker and the assembler.

use crate::metadata::{ParameterDescriptor, ParameterLocation};
use crate::router::HttpMethod;
use serde_json::json;

/// Normalizes a route path.
///
/// Collapses runs of `/`, strips one trailing `/` and maps an empty or slash-only path to
/// the root `/`. Normalization is idempotent.
///
/// # Example
///
/// ```
/// use openapi_from_router::path::normalize;
///
/// assert_eq!(normalize("/api//v1/"), "/api/v1");
/// assert_eq!(normalize(""), "/");
/// ```
pub fn normalize(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len());
    let mut previous_slash = false;

    for c in path.chars() {
        if c == '/' {
            if !previous_slash {
                normalized.push(c);
            }
            previous_slash = true;
        } else {
            normalized.push(c);
            previous_slash = false;
        }
    }

    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    if normalized.is_empty() {
        normalized.push('/');
    }

    normalized
}

/// Joins a prefix and a path, then normalizes the result.
pub fn join(prefix: &str, path: &str) -> String {
    normalize(&format!("{}{}", prefix, path))
}

/// Names of the `:name` parameter markers in `path`, left to right.
///
/// An optional-segment marker (`:id?`) yields the bare name.
pub fn parameter_names(path: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut chars = path.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if c != ':' {
            continue;
        }
        let mut name = String::new();
        while let Some(&(_, next)) = chars.peek() {
            if is_name_char(next) {
                name.push(next);
                chars.next();
            } else {
                break;
            }
        }
        if !name.is_empty() {
            names.push(name);
        }
    }

    names
}

/// One required string path parameter per `:name` marker in `path`.
pub fn path_parameters(path: &str) -> Vec<ParameterDescriptor> {
    parameter_names(path)
        .into_iter()
        .map(|name| {
            let mut param = ParameterDescriptor::new(name, ParameterLocation::Path, true);
            param.schema = Some(json!({ "type": "string" }));
            param
        })
        .collect()
}

/// Stable operation identifier for a method and path.
///
/// Non-alphanumeric characters are stripped from each segment, empty segments dropped, and
/// the rest joined with `_` behind the lower-cased method. A path without segments maps to
/// `root`: `GET /users/:id` gives `get_users_id`, `GET /` gives `get_root`.
pub fn operation_id(method: HttpMethod, path: &str) -> String {
    let segments: Vec<String> = path
        .split('/')
        .map(|segment| {
            segment
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
        })
        .filter(|segment| !segment.is_empty())
        .collect();

    let suffix = if segments.is_empty() {
        "root".to_string()
    } else {
        segments.join("_")
    };

    format!("{}_{}", method.as_lower(), suffix)
}

/// Convert `:param` markers to OpenAPI `{param}` templates.
///
/// Every marker is rewritten, including several inside one segment (`:from-:to`). An
/// optional marker's `?` is dropped.
pub fn to_openapi_template(path: &str) -> String {
    let mut converted = String::with_capacity(path.len() + 2);
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        if c != ':' {
            converted.push(c);
            continue;
        }
        let mut name = String::new();
        while let Some(&next) = chars.peek() {
            if is_name_char(next) {
                name.push(next);
                chars.next();
            } else {
                break;
            }
        }
        if name.is_empty() {
            converted.push(':');
            continue;
        }
        if chars.peek() == Some(&'?') {
            chars.next();
        }
        converted.push('{');
        converted.push_str(&name);
        converted.push('}');
    }

    converted
}

/// Convert `{param}` templates to `:param` markers
pub fn from_openapi_template(path: &str) -> String {
    let mut converted = String::with_capacity(path.len());
    let mut rest = path;

    while let Some(open) = rest.find('{') {
        converted.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if close > 0 && after[..close].chars().all(is_name_char) => {
                converted.push(':');
                converted.push_str(&after[..close]);
                rest = &after[close + 1..];
            }
            _ => {
                converted.push('{');
                rest = after;
            }
        }
    }
    converted.push_str(rest);

    converted
}

/// Characters allowed in a `:name` marker
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
