//! Serialized Zod schemas.
//!
//! A Zod schema serializes as its `_def` tree. Every node carries a `typeName`; children
//! hang off `shape`, `type`, `innerType`, `options` or `valueType` depending on the kind.
//!
//! ```json
//! { "_def": { "typeName": "ZodObject",
//!             "shape": { "id": { "_def": { "typeName": "ZodString",
//!                                          "checks": [{ "kind": "uuid" }] } } } } }
//! ```

use super::{schema_object, SchemaAdapter};
use crate::error::{Error, Result};
use serde_json::{Map, Value};

pub struct ZodAdapter;

impl SchemaAdapter for ZodAdapter {
    fn name(&self) -> &str {
        "zod"
    }

    fn detect(&self, schema: &Value) -> bool {
        type_name(schema).is_some_and(|name| name.starts_with("Zod"))
    }

    fn convert(&self, schema: &Value) -> Result<Value> {
        if !self.detect(schema) {
            return Err(Error::AdapterMismatch {
                adapter: self.name().to_string(),
            });
        }
        Ok(convert_node(schema))
    }
}

fn type_name(schema: &Value) -> Option<&str> {
    schema
        .get("_def")
        .and_then(|def| def.get("typeName"))
        .and_then(Value::as_str)
}

fn convert_node(node: &Value) -> Value {
    let Some(def) = node.get("_def") else {
        return Value::Object(Map::new());
    };
    let child = |key: &str| def.get(key).map(convert_node);

    let mut schema = match type_name(node).unwrap_or_default() {
        "ZodString" => {
            let mut s = schema_object(Some("string"));
            apply_string_checks(def, &mut s);
            s
        }
        "ZodNumber" => number_schema(def),
        "ZodBigInt" => schema_object(Some("integer")),
        "ZodBoolean" => schema_object(Some("boolean")),
        "ZodDate" => {
            let mut s = schema_object(Some("string"));
            s.insert("format".to_string(), Value::from("date-time"));
            s
        }
        "ZodArray" => {
            let mut s = schema_object(Some("array"));
            if let Some(items) = child("type") {
                s.insert("items".to_string(), items);
            }
            for (key, target) in [("minLength", "minItems"), ("maxLength", "maxItems")] {
                if let Some(value) = def.get(key).and_then(|v| v.get("value")) {
                    s.insert(target.to_string(), value.clone());
                }
            }
            s
        }
        "ZodObject" => object_schema(def),
        "ZodOptional" | "ZodEffects" | "ZodBranded" | "ZodReadonly" => {
            let inner = child("innerType").or_else(|| child("schema"));
            into_map(inner)
        }
        "ZodNullable" => nullable(into_map(child("innerType"))),
        "ZodDefault" => {
            let mut s = into_map(child("innerType"));
            if let Some(default) = def.get("defaultValue") {
                s.insert("default".to_string(), default.clone());
            }
            s
        }
        "ZodEnum" => {
            let mut s = schema_object(Some("string"));
            if let Some(values) = def.get("values").and_then(Value::as_array) {
                s.insert("enum".to_string(), Value::Array(values.clone()));
            }
            s
        }
        "ZodNativeEnum" => {
            let mut s = Map::new();
            if let Some(values) = def.get("values").and_then(Value::as_object) {
                let values: Vec<Value> = values.values().cloned().collect();
                s.insert("enum".to_string(), Value::Array(values));
            }
            s
        }
        "ZodLiteral" => {
            let mut s = Map::new();
            if let Some(value) = def.get("value") {
                s.insert("const".to_string(), value.clone());
            }
            s
        }
        "ZodUnion" | "ZodDiscriminatedUnion" => {
            let options: Vec<Value> = def
                .get("options")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
                .map(convert_node)
                .collect();
            let mut s = Map::new();
            s.insert("anyOf".to_string(), Value::Array(options));
            s
        }
        "ZodRecord" => {
            let mut s = schema_object(Some("object"));
            if let Some(values) = child("valueType") {
                s.insert("additionalProperties".to_string(), values);
            }
            s
        }
        _ => Map::new(),
    };

    if let Some(description) = def.get("description").filter(|v| v.is_string()) {
        schema.insert("description".to_string(), description.clone());
    }
    Value::Object(schema)
}

fn object_schema(def: &Value) -> Map<String, Value> {
    let mut schema = schema_object(Some("object"));
    let Some(shape) = def.get("shape").and_then(Value::as_object) else {
        return schema;
    };

    let mut properties = Map::new();
    let mut required = Vec::new();
    for (name, field) in shape {
        properties.insert(name.clone(), convert_node(field));
        if !matches!(type_name(field), Some("ZodOptional") | Some("ZodDefault")) {
            required.push(Value::String(name.clone()));
        }
    }

    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }
    schema
}

fn number_schema(def: &Value) -> Map<String, Value> {
    let is_int = checks(def).any(|(kind, _)| kind == "int");
    let mut schema = schema_object(Some(if is_int { "integer" } else { "number" }));
    for (kind, check) in checks(def) {
        let key = match kind {
            "min" => "minimum",
            "max" => "maximum",
            _ => continue,
        };
        if let Some(value) = check.get("value") {
            schema.insert(key.to_string(), value.clone());
        }
    }
    schema
}

fn apply_string_checks(def: &Value, schema: &mut Map<String, Value>) {
    for (kind, check) in checks(def) {
        let (key, value) = match kind {
            "min" => ("minLength", check.get("value").cloned()),
            "max" => ("maxLength", check.get("value").cloned()),
            "email" => ("format", Some(Value::from("email"))),
            "url" => ("format", Some(Value::from("uri"))),
            "uuid" => ("format", Some(Value::from("uuid"))),
            "datetime" => ("format", Some(Value::from("date-time"))),
            "regex" => ("pattern", check.get("regex").cloned()),
            _ => continue,
        };
        if let Some(value) = value {
            schema.insert(key.to_string(), value);
        }
    }
}

fn checks(def: &Value) -> impl Iterator<Item = (&str, &Value)> {
    def.get("checks")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|check| Some((check.get("kind")?.as_str()?, check)))
}

fn into_map(value: Option<Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Widens a single `type` with `null`, otherwise wraps the schema in `anyOf`
fn nullable(mut schema: Map<String, Value>) -> Map<String, Value> {
    if let Some(Value::String(t)) = schema.get("type").cloned() {
        schema.insert(
            "type".to_string(),
            Value::Array(vec![Value::String(t), Value::from("null")]),
        );
        return schema;
    }

    let mut wrapped = Map::new();
    wrapped.insert(
        "anyOf".to_string(),
        Value::Array(vec![
            Value::Object(schema),
            Value::Object(schema_object(Some("null"))),
        ]),
    );
    wrapped
}
