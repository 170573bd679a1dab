//! Type-safe schema generation for Gemini structured outputs.
//!
//! Uses the `schemars` crate to automatically generate JSON schemas from Rust
//! types, then rewrites the output into the schema dialect Gemini's
//! `responseSchema` field accepts.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use gemini_client::StructuredOutput;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Entry {
//!     name: String,
//!     definition: String,
//! }
//!
//! // Gemini-compatible schema for a list of entries
//! let schema = <Vec<Entry>>::gemini_schema();
//! ```

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;

/// Trait for types that can be used as Gemini structured output.
///
/// Automatically implemented for any type that implements
/// `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate a Gemini-compatible JSON schema for this type.
    ///
    /// Gemini's `responseSchema` accepts an OpenAPI-style subset:
    /// 1. No `$ref` references; every schema must be fully inlined
    /// 2. No `$schema`, `definitions`, `title`, or `additionalProperties` keys
    /// 3. `required` should list every property so no field is omitted
    ///
    /// This method transforms the schemars output to meet these requirements.
    fn gemini_schema() -> serde_json::Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        // Require every declared property before inlining so the fix reaches
        // definitions too
        fix_object_schemas(&mut value);

        inline_refs(&mut value);

        if let serde_json::Value::Object(map) = &mut value {
            map.remove("definitions");
            map.remove("$schema");
        }

        strip_unsupported_keys(&mut value);

        value
    }

    /// Get the schema name for this type.
    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

// Blanket implementation for all types that satisfy the bounds
impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Ensure every object schema lists all of its properties as required.
fn fix_object_schemas(value: &mut serde_json::Value) {
    if let serde_json::Value::Object(map) = value {
        if map.get("type") == Some(&serde_json::Value::String("object".to_string())) {
            if let Some(serde_json::Value::Object(props)) = map.get("properties") {
                let all_keys: Vec<serde_json::Value> = props
                    .keys()
                    .map(|k| serde_json::Value::String(k.clone()))
                    .collect();
                map.insert("required".to_string(), serde_json::Value::Array(all_keys));
            }
        }

        for (_, v) in map.iter_mut() {
            fix_object_schemas(v);
        }
    } else if let serde_json::Value::Array(arr) = value {
        for item in arr.iter_mut() {
            fix_object_schemas(item);
        }
    }
}

/// Inline all $ref references by replacing them with the actual schema
/// from definitions.
fn inline_refs(value: &mut serde_json::Value) {
    let definitions = if let serde_json::Value::Object(map) = value {
        map.get("definitions").cloned()
    } else {
        None
    };

    if let Some(defs) = definitions {
        inline_refs_recursive(value, &defs);
    }
}

/// Recursively inline $ref references.
fn inline_refs_recursive(value: &mut serde_json::Value, definitions: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if let Some(serde_json::Value::String(ref_path)) = map.get("$ref").cloned() {
                // Parse ref like "#/definitions/NameRecord"
                if ref_path.starts_with("#/definitions/") {
                    let type_name = ref_path.trim_start_matches("#/definitions/");
                    if let Some(def) = definitions.get(type_name) {
                        *value = def.clone();
                        // The inlined definition may itself contain refs
                        inline_refs_recursive(value, definitions);
                        return;
                    }
                }
            }

            for (_, v) in map.iter_mut() {
                inline_refs_recursive(v, definitions);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs_recursive(item, definitions);
            }
        }
        _ => {}
    }
}

/// Remove schema keys the Gemini dialect rejects.
fn strip_unsupported_keys(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.remove("additionalProperties");
            map.remove("title");
            map.remove("format");

            for (_, v) in map.iter_mut() {
                strip_unsupported_keys(v);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                strip_unsupported_keys(item);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    struct TestEntry {
        name: String,
        definition: String,
        references: Vec<String>,
    }

    #[test]
    fn test_list_schema_is_inlined_array() {
        let schema = <Vec<TestEntry>>::gemini_schema();
        let obj = schema.as_object().unwrap();

        assert_eq!(
            obj.get("type"),
            Some(&serde_json::Value::String("array".to_string()))
        );
        assert!(
            !obj.contains_key("definitions"),
            "refs should be inlined, got: {}",
            schema
        );

        let items = obj.get("items").unwrap().as_object().unwrap();
        assert!(!items.contains_key("$ref"), "items should be inlined");
        assert_eq!(
            items.get("type"),
            Some(&serde_json::Value::String("object".to_string()))
        );
    }

    #[test]
    fn test_all_properties_required() {
        let schema = <Vec<TestEntry>>::gemini_schema();
        let items = schema["items"].as_object().unwrap();

        let required: Vec<&str> = items["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();

        assert!(required.contains(&"name"));
        assert!(required.contains(&"definition"));
        assert!(required.contains(&"references"));
    }

    #[test]
    fn test_unsupported_keys_stripped() {
        let schema = <Vec<TestEntry>>::gemini_schema();
        let text = serde_json::to_string(&schema).unwrap();

        assert!(!text.contains("$schema"));
        assert!(!text.contains("additionalProperties"));
        assert!(!text.contains("\"title\""));
    }
}
