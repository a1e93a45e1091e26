//! Joi `describe()` output.
//!
//! ```json
//! { "type": "object",
//!   "keys": { "email": { "type": "string",
//!                        "flags": { "presence": "required" },
//!                        "rules": [{ "name": "email" }] } } }
//! ```

use super::{schema_object, SchemaAdapter};
use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Markers that distinguish a Joi description from a bare JSON Schema
const MARKERS: [&str; 5] = ["keys", "flags", "rules", "allow", "matches"];

pub struct JoiAdapter;

impl SchemaAdapter for JoiAdapter {
    fn name(&self) -> &str {
        "joi"
    }

    fn detect(&self, schema: &Value) -> bool {
        let Some(object) = schema.as_object() else {
            return false;
        };
        object.get("type").is_some_and(Value::is_string)
            && (MARKERS.iter().any(|m| object.contains_key(*m))
                || object.get("items").is_some_and(Value::is_array))
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
    let joi_type = description.get("type").and_then(Value::as_str).unwrap_or("any");
    let flags = description.get("flags");

    let mut schema = match joi_type {
        "string" => schema_object(Some("string")),
        "number" => {
            let integer = rule(description, "integer").is_some();
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
            if let Some(item) = description
                .get("items")
                .and_then(Value::as_array)
                .and_then(|items| items.first())
            {
                s.insert("items".to_string(), convert_description(item));
            }
            s
        }
        "alternatives" => {
            let mut s = Map::new();
            let options: Vec<Value> = description
                .get("matches")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
                .filter_map(|m| m.get("schema"))
                .map(convert_description)
                .collect();
            s.insert("anyOf".to_string(), Value::Array(options));
            s
        }
        _ => Map::new(),
    };

    apply_rules(joi_type, description, &mut schema);

    if flags.and_then(|f| f.get("only")).and_then(Value::as_bool) == Some(true) {
        if let Some(allowed) = description.get("allow").and_then(Value::as_array) {
            schema.insert("enum".to_string(), Value::Array(allowed.clone()));
        }
    }
    if let Some(text) = flags.and_then(|f| f.get("description")) {
        schema.insert("description".to_string(), text.clone());
    }
    if let Some(label) = flags.and_then(|f| f.get("label")) {
        schema.insert("title".to_string(), label.clone());
    }
    if let Some(default) = flags.and_then(|f| f.get("default")) {
        schema.insert("default".to_string(), default.clone());
    }

    Value::Object(schema)
}

fn object_schema(description: &Value) -> Map<String, Value> {
    let mut schema = schema_object(Some("object"));
    let Some(keys) = description.get("keys").and_then(Value::as_object) else {
        return schema;
    };

    let mut properties = Map::new();
    let mut required = Vec::new();
    for (name, child) in keys {
        properties.insert(name.clone(), convert_description(child));
        let presence = child
            .get("flags")
            .and_then(|f| f.get("presence"))
            .and_then(Value::as_str);
        if presence == Some("required") {
            required.push(Value::String(name.clone()));
        }
    }

    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }
    schema
}

fn apply_rules(joi_type: &str, description: &Value, schema: &mut Map<String, Value>) {
    let rules = description.get("rules").and_then(Value::as_array);
    for rule in rules.into_iter().flatten() {
        let Some(name) = rule.get("name").and_then(Value::as_str) else {
            continue;
        };
        let args = rule.get("args");
        let limit = args.and_then(|a| a.get("limit")).cloned();

        if (joi_type, name) == ("string", "length") {
            if let Some(limit) = limit {
                schema.insert("minLength".to_string(), limit.clone());
                schema.insert("maxLength".to_string(), limit);
            }
            continue;
        }

        let (key, value) = match (joi_type, name) {
            ("string", "min") => ("minLength", limit),
            ("string", "max") => ("maxLength", limit),
            ("string", "email") => ("format", Some(Value::from("email"))),
            ("string", "uri") => ("format", Some(Value::from("uri"))),
            ("string", "guid") => ("format", Some(Value::from("uuid"))),
            ("string", "isoDate") => ("format", Some(Value::from("date-time"))),
            ("string", "pattern") => (
                "pattern",
                args.and_then(|a| a.get("regex")).cloned(),
            ),
            ("number", "min") => ("minimum", limit),
            ("number", "max") => ("maximum", limit),
            ("number", "greater") => ("exclusiveMinimum", limit),
            ("number", "less") => ("exclusiveMaximum", limit),
            ("array", "min") => ("minItems", limit),
            ("array", "max") => ("maxItems", limit),
            _ => continue,
        };
        if let Some(value) = value {
            schema.insert(key.to_string(), value);
        }
    }
}

fn rule<'a>(description: &'a Value, name: &str) -> Option<&'a Value> {
    description
        .get("rules")
        .and_then(Value::as_array)?
        .iter()
        .find(|r| r.get("name").and_then(Value::as_str) == Some(name))
}
