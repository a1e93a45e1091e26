//! Reading and writing documents as YAML or JSON.
//!
//! Generated documents are written with [`serialize_yaml`] or [`serialize_json`]. Router
//! dumps and existing OpenAPI documents are read back as untyped JSON values with
//! [`load_document`], whatever their on-disk format.

use crate::error::Error;
use crate::openapi_builder::OpenApiDocument;
use anyhow::{Context, Result};
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Serializes an OpenAPI document to YAML format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_yaml(doc: &OpenApiDocument) -> Result<String> {
    debug!("Serializing OpenAPI document to YAML");
    serde_yaml::to_string(doc).context("Failed to serialize OpenAPI document to YAML")
}

/// Serializes an OpenAPI document to JSON format with pretty printing.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_json(doc: &OpenApiDocument) -> Result<String> {
    debug!("Serializing OpenAPI document to JSON");
    serde_json::to_string_pretty(doc).context("Failed to serialize OpenAPI document to JSON")
}

/// Writes string content to a file, creating parent directories as needed.
///
/// # Arguments
///
/// * `content` - The string content to write
/// * `path` - The file path to write to
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Reads a JSON or YAML file into an untyped value.
///
/// `.yaml` and `.yml` files are parsed as YAML; anything else as JSON.
///
/// # Errors
///
/// Returns [`Error::IoError`] if the file cannot be read and [`Error::InvalidDocument`] if
/// it does not parse.
pub fn load_document(path: &Path) -> crate::error::Result<Value> {
    debug!("Loading document from {}", path.display());
    let content = fs::read_to_string(path)?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let parsed = if is_yaml {
        serde_yaml::from_str::<Value>(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str::<Value>(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| Error::InvalidDocument {
        file: path.to_path_buf(),
        message,
    })
}
