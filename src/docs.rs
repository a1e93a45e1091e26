//! Documentation metadata from `///` comments on handler functions.
//!
//! A doc block becomes a [`DocEntry`] when it contains an `@route` tag:
//!
//! ```text
//! /// Fetch one user
//! ///
//! /// Looks the user up by id.
//! ///
//! /// @route GET /users/{id}
//! /// @tag users
//! /// @param id path required integer - User id
//! /// @param expand query - Related objects to inline
//! /// @response 200 - The user
//! /// @response 404 - No such user
//! async fn get_user() {}
//! ```
//!
//! Untagged lines before the first tag give the summary (first line) and the description
//! (the rest). `@summary` and `@description` override them.

use crate::metadata::{
    MediaType, ParameterDescriptor, ParameterLocation, RequestBody, Response, RouteMetadata,
};
use crate::path;
use crate::router::HttpMethod;
use crate::scanner::SourceScanner;
use crate::walker::{DocEntry, DocumentationSource};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use syn::visit::Visit;
use syn::{Attribute, Expr, Lit, Meta};

/// Parses doc comments of every `.rs` file under a directory.
pub struct DocCommentParser {
    scanner: SourceScanner,
}

impl DocCommentParser {
    pub fn new(root: PathBuf) -> Self {
        Self {
            scanner: SourceScanner::new(root),
        }
    }

    /// Skip files and directories with this exact name
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.scanner = self.scanner.ignore(name);
        self
    }

    /// Entries documented in one file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid Rust.
    pub fn parse_file(path: &Path) -> Result<Vec<DocEntry>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Self::parse_source(&content)
            .with_context(|| format!("Failed to parse Rust syntax in file: {}", path.display()))
    }

    /// Entries documented in Rust source text.
    pub fn parse_source(source: &str) -> syn::Result<Vec<DocEntry>> {
        let syntax_tree = syn::parse_file(source)?;
        let mut visitor = DocVisitor::default();
        visitor.visit_file(&syntax_tree);
        Ok(visitor.entries)
    }
}

impl DocumentationSource for DocCommentParser {
    fn parse(&self) -> Vec<DocEntry> {
        let scan = match self.scanner.scan() {
            Ok(scan) => scan,
            Err(e) => {
                warn!("Skipping documentation scan: {}", e);
                return Vec::new();
            }
        };

        let mut entries = Vec::new();
        for file in &scan.files {
            match Self::parse_file(file) {
                Ok(found) => {
                    debug!("{} documented routes in {}", found.len(), file.display());
                    entries.extend(found);
                }
                Err(e) => warn!("{:#}", e),
            }
        }

        info!(
            "Parsed {} documented routes from {} files under {}",
            entries.len(),
            scan.files.len(),
            self.scanner.root().display()
        );
        entries
    }
}

/// Collects entries from free functions, impl methods and trait methods
#[derive(Default)]
struct DocVisitor {
    entries: Vec<DocEntry>,
}

impl DocVisitor {
    fn collect(&mut self, name: &syn::Ident, attrs: &[Attribute]) {
        let lines = doc_lines(attrs);
        if let Some(entry) = parse_doc_block(&lines) {
            debug!("Found documented route on {}", name);
            self.entries.push(entry);
        }
    }
}

impl<'ast> Visit<'ast> for DocVisitor {
    fn visit_item_fn(&mut self, node: &'ast syn::ItemFn) {
        self.collect(&node.sig.ident, &node.attrs);
        syn::visit::visit_item_fn(self, node);
    }

    fn visit_impl_item_fn(&mut self, node: &'ast syn::ImplItemFn) {
        self.collect(&node.sig.ident, &node.attrs);
        syn::visit::visit_impl_item_fn(self, node);
    }

    fn visit_trait_item_fn(&mut self, node: &'ast syn::TraitItemFn) {
        self.collect(&node.sig.ident, &node.attrs);
        syn::visit::visit_trait_item_fn(self, node);
    }
}

/// Text of the `#[doc = "..."]` attributes, one entry per line
fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    let mut lines = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident("doc")) {
        let Meta::NameValue(name_value) = &attr.meta else {
            continue;
        };
        if let Expr::Lit(expr_lit) = &name_value.value {
            if let Lit::Str(text) = &expr_lit.lit {
                lines.extend(text.value().lines().map(|l| l.trim().to_string()));
            }
        }
    }
    lines
}

/// Builds an entry from a doc block; `None` unless it carries a valid `@route`.
fn parse_doc_block(lines: &[String]) -> Option<DocEntry> {
    let first_tag = lines
        .iter()
        .position(|l| l.starts_with('@'))
        .unwrap_or(lines.len());
    let prose: Vec<&str> = lines[..first_tag]
        .iter()
        .map(String::as_str)
        .filter(|l| !l.is_empty())
        .collect();

    let mut route = None;
    let mut metadata = RouteMetadata {
        summary: prose.first().map(|s| s.to_string()),
        description: (prose.len() > 1).then(|| prose[1..].join("\n")),
        ..Default::default()
    };
    let mut tags = BTreeSet::new();
    let mut parameters = Vec::new();
    let mut content = BTreeMap::new();
    let mut body_required = false;
    let mut body_description = None;
    let mut responses = BTreeMap::new();

    for line in &lines[first_tag..] {
        let Some(tagged) = line.strip_prefix('@') else {
            continue;
        };
        let (tag, rest) = tagged.split_once(char::is_whitespace).unwrap_or((tagged, ""));
        let rest = rest.trim();

        match tag {
            "route" => route = parse_route(rest),
            "summary" => metadata.summary = non_empty(rest),
            "description" => metadata.description = non_empty(rest),
            "tag" => tags.extend(
                rest.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
            ),
            "param" => {
                if let Some(param) = parse_param(rest) {
                    parameters.push(param);
                }
            }
            "body" => {
                let (words, description) = split_description(rest);
                let Some(media_type) = words.first() else {
                    debug!("Ignoring @body without a media type");
                    continue;
                };
                content.insert(media_type.to_string(), MediaType::default());
                body_required |= words.contains(&"required");
                body_description = description.or(body_description);
            }
            "response" => {
                let (words, description) = split_description(rest);
                let Some(code) = words.first() else {
                    debug!("Ignoring @response without a status code");
                    continue;
                };
                let description = description.unwrap_or_else(|| format!("{} response", code));
                responses.insert(code.to_string(), Response::new(description));
            }
            other => debug!("Ignoring unknown doc tag @{}", other),
        }
    }

    let (method, route_path) = route?;
    metadata.tags = (!tags.is_empty()).then_some(tags);
    metadata.parameters = (!parameters.is_empty()).then_some(parameters);
    metadata.responses = (!responses.is_empty()).then_some(responses);
    if !content.is_empty() {
        metadata.request_body = Some(RequestBody {
            description: body_description,
            required: body_required,
            content,
        });
    }

    Some(DocEntry {
        method: Some(method.as_str().to_string()),
        path: Some(route_path),
        metadata,
    })
}

/// `GET /users/{id}` -> (GET, `/users/:id`)
fn parse_route(rest: &str) -> Option<(HttpMethod, String)> {
    let mut words = rest.split_whitespace();
    let method = words.next().and_then(HttpMethod::parse);
    let route_path = words.next();
    match (method, route_path) {
        (Some(method), Some(route_path)) => Some((
            method,
            path::normalize(&path::from_openapi_template(route_path)),
        )),
        _ => {
            debug!("Ignoring malformed @route '{}'", rest);
            None
        }
    }
}

/// `name location [required] [type] [- description]`
fn parse_param(rest: &str) -> Option<ParameterDescriptor> {
    let (words, description) = split_description(rest);
    let (name, location) = match words.as_slice() {
        [name, location, ..] => (*name, ParameterLocation::parse(location)?),
        _ => {
            debug!("Ignoring malformed @param '{}'", rest);
            return None;
        }
    };

    let flags = &words[2..];
    let required = location == ParameterLocation::Path || flags.contains(&"required");
    let schema_type = flags
        .iter()
        .find(|w| **w != "required")
        .copied()
        .unwrap_or("string");

    let mut param = ParameterDescriptor::new(name, location, required);
    param.schema = Some(json!({ "type": schema_type }));
    param.description = description;
    Some(param)
}

/// Splits `words - description` at the first standalone `-`. A trailing bare `-` leaves
/// the description empty.
fn split_description(rest: &str) -> (Vec<&str>, Option<String>) {
    let rest = rest.trim();
    let (words, description) = match rest.split_once(" - ") {
        Some(split) => split,
        None if rest == "-" => ("", ""),
        None => rest
            .strip_prefix("- ")
            .map(|description| ("", description))
            .or_else(|| rest.strip_suffix(" -").map(|words| (words, "")))
            .unwrap_or((rest, "")),
    };
    (words.split_whitespace().collect(), non_empty(description))
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
