//! Yup `describe()` output.
//!
//! ```json
//! { "type": "object", "tests": [],
//!   "fields": { "name": { "type": "string", "optional": false,
//!                         "tests": [{ "name": "min", "params": { "min": 2 } }] } } }
//! ```

use super::{schema_object, SchemaAdapter};
use crate::error::{Error, Result};
use serde_json::{Map, Value};

pub struct YupAdapter;

impl SchemaAdapter for YupAdapter {
    fn name(&self) -> &str {
        "yup"
    }

    fn detect(&self, schema: &Value) -> bool {
        schema.get("type").is_some_and(Value::is_string)
            && schema.get("tests").is_some_and(Value::is_array)
    }

    fn convert(&self, schema: &Value) -> Result<Value> {
        if !self.detect(schema) {
            return Err(Error::AdapterMismatch {
                adapter: self.name().to_string(),
            });
        }
        Ok(convert_description(schema))
    }
}

fn convert_description(description: &Value) -> Value {
    let yup_type = description.get("type").and_then(Value::as_str).unwrap_or("mixed");

    let mut schema = match yup_type {
        "string" => schema_object(Some("string")),
        "number" => {
            let integer = has_test(description, "integer");
            schema_object(Some(if integer { "integer" } else { "number" }))
        }
        "boolean" => schema_object(Some("boolean")),
        "date" => {
            let mut s = schema_object(Some("string"));
            s.insert("format".to_string(), Value::from("date-time"));
            s
        }
        "object" => object_schema(description),
        "array" => {
            let mut s = schema_object(Some("array"));
            if let Some(inner) = description.get("innerType").filter(|v| v.is_object()) {
                s.insert("items".to_string(), convert_description(inner));
            }
            s
        }
        _ => Map::new(),
    };

    for test in description
        .get("tests")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
    {
        apply_test(yup_type, test, &mut schema);
    }

    if let Some(values) = description
        .get("oneOf")
        .and_then(Value::as_array)
        .filter(|values| !values.is_empty())
    {
        schema.insert("enum".to_string(), Value::Array(values.clone()));
    }
    if let Some(label) = description.get("label").filter(|v| v.is_string()) {
        schema.insert("title".to_string(), label.clone());
    }
    if let Some(text) = description.get("meta").and_then(|m| m.get("description")) {
        schema.insert("description".to_string(), text.clone());
    }
    if let Some(default) = description.get("default").filter(|v| !v.is_null()) {
        schema.insert("default".to_string(), default.clone());
    }
    if description.get("nullable").and_then(Value::as_bool) == Some(true) {
        if let Some(Value::String(t)) = schema.get("type").cloned() {
            schema.insert(
                "type".to_string(),
                Value::Array(vec![Value::String(t), Value::from("null")]),
            );
        }
    }

    Value::Object(schema)
}

fn object_schema(description: &Value) -> Map<String, Value> {
    let mut schema = schema_object(Some("object"));
    let Some(fields) = description.get("fields").and_then(Value::as_object) else {
        return schema;
    };

    let mut properties = Map::new();
    let mut required = Vec::new();
    for (name, child) in fields {
        properties.insert(name.clone(), convert_description(child));
        if is_required(child) {
            required.push(Value::String(name.clone()));
        }
    }

    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }
    schema
}

/// Yup 1.x reports `optional: false`; older versions only add a `required` test
fn is_required(description: &Value) -> bool {
    description.get("optional").and_then(Value::as_bool) == Some(false)
        || has_test(description, "required")
}

fn apply_test(yup_type: &str, test: &Value, schema: &mut Map<String, Value>) {
    let Some(name) = test.get("name").and_then(Value::as_str) else {
        return;
    };
    let param = |key: &str| test.get("params").and_then(|p| p.get(key)).cloned();

    let (key, value) = match (yup_type, name) {
        ("string", "min") => ("minLength", param("min")),
        ("string", "max") => ("maxLength", param("max")),
        ("string", "email") => ("format", Some(Value::from("email"))),
        ("string", "url") => ("format", Some(Value::from("uri"))),
        ("string", "uuid") => ("format", Some(Value::from("uuid"))),
        ("string", "matches") => ("pattern", param("regex")),
        ("number", "min") => ("minimum", param("min")),
        ("number", "max") => ("maximum", param("max")),
        ("array", "min") => ("minItems", param("min")),
        ("array", "max") => ("maxItems", param("max")),
        _ => return,
    };
    if let Some(value) = value {
        schema.insert(key.to_string(), value);
    }
}

fn has_test(description: &Value, name: &str) -> bool {
    description
        .get("tests")
        .and_then(Value::as_array)
        .is_some_and(|tests| {
            tests
                .iter()
                .any(|t| t.get("name").and_then(Value::as_str) == Some(name))
        })
}
