//! OpenAPI generation from a web application's router tree.
//!
//! A running application exports its router as a JSON dump. This library normalizes the
//! dump into a canonical tree, walks it to discover every (method, path) pair, merges the
//! metadata attached to handlers with metadata parsed from doc comments, and assembles an
//! OpenAPI 3.x document.
//!
//! # Architecture
//!
//! 1. [`router`] - Canonical router tree, host-dump normalization and mount prefixes
//! 2. [`walker`] - Route discovery with prefix accumulation and cycle detection
//! 3. [`metadata`] - Route metadata and the structural/documentation merge
//! 4. [`adapter`] - Validation-library schema descriptions converted to JSON Schema
//! 5. [`docs`] - Documentation metadata from `///` comments
//! 6. [`openapi_builder`] - Assembles the OpenAPI document
//! 7. [`serializer`] - YAML/JSON output and document loading
//! 8. [`validator`] - Structural checks and statistics for documents
//!
//! # Example Usage
//!
//! ```
//! use openapi_from_router::{
//!     config::GeneratorConfig,
//!     openapi_builder::OpenApiBuilder,
//!     serializer::serialize_json,
//!     walker::RouteWalker,
//! };
//! use serde_json::json;
//!
//! let dump = json!({ "router": { "stack": [
//!     { "route": { "path": "/users", "methods": { "get": true },
//!                  "stack": [{ "method": "get", "handle": { "name": "listUsers" } }] } }
//! ] } });
//!
//! let routes = RouteWalker::new().discover_value(&dump);
//! let document = OpenApiBuilder::new(GeneratorConfig::default()).generate(&routes);
//! let json = serialize_json(&document).unwrap();
//! assert!(json.contains("get_users"));
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod adapter;
pub mod cli;
pub mod config;
pub mod docs;
pub mod error;
pub mod metadata;
pub mod openapi_builder;
pub mod path;
pub mod router;
pub mod scanner;
pub mod serializer;
pub mod validator;
pub mod walker;
