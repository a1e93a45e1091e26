//! Generator configuration.
//!
//! Loaded from a JSON or YAML file and adjusted by command-line overrides:
//!
//! ```yaml
//! info:
//!   title: Accounts API
//!   version: 2.1.0
//! specVersion: 3.1.0
//! servers:
//!   - url: https://api.example.com
//! pathTemplates: true
//! ```

use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Document-level settings the assembler copies into the generated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    #[serde(default)]
    pub info: Info,
    /// `openapi` field of the generated document
    #[serde(default = "default_spec_version")]
    pub spec_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_schemes: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<ComponentsConfig>,
    /// Rewrite `:name` path markers as `{name}` templates in the document
    #[serde(default)]
    pub path_templates: bool,
}

/// OpenAPI Info object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title
    #[serde(default = "default_title")]
    pub title: String,
    /// API version
    #[serde(default = "default_version")]
    pub version: String,
    /// API description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// OpenAPI Server object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Reusable components declared up front
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schemas: Option<BTreeMap<String, Value>>,
}

/// Partial configuration; every present field replaces the held one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigUpdate {
    pub info: Option<Info>,
    pub spec_version: Option<String>,
    pub servers: Option<Vec<Server>>,
    pub security_schemes: Option<BTreeMap<String, Value>>,
    pub components: Option<ComponentsConfig>,
    pub path_templates: Option<bool>,
}

fn default_spec_version() -> String {
    "3.1.0".to_string()
}

fn default_title() -> String {
    "Generated API".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

impl Default for Info {
    fn default() -> Self {
        Self {
            title: default_title(),
            version: default_version(),
            description: None,
            contact: None,
            license: None,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            info: Info::default(),
            spec_version: default_spec_version(),
            servers: None,
            security_schemes: None,
            components: None,
            path_templates: false,
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration file.
    ///
    /// The format follows the extension: `.json`, `.yaml` or `.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unsupported extension, or does
    /// not parse.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            _ => Err(Error::InvalidArgument(format!(
                "Unsupported configuration format: {}",
                path.display()
            ))),
        }
    }

    /// Shallow merge of `update` into this configuration
    pub fn apply(&mut self, update: ConfigUpdate) {
        if let Some(info) = update.info {
            self.info = info;
        }
        if let Some(spec_version) = update.spec_version {
            self.spec_version = spec_version;
        }
        if let Some(servers) = update.servers {
            self.servers = Some(servers);
        }
        if let Some(schemes) = update.security_schemes {
            self.security_schemes = Some(schemes);
        }
        if let Some(components) = update.components {
            self.components = Some(components);
        }
        if let Some(path_templates) = update.path_templates {
            self.path_templates = path_templates;
        }
    }
}
