//! Specification builder
//!
//! Assembles a full single-view Vega-Lite specification from a raw attribute
//! dictionary, formatting each property, dropping empty values, and
//! serializing to JSON text. Composite (layered, faceted, concatenated)
//! specifications are not supported.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::warn;

use crate::properties::{format, SINGLE_VIEW, TOP_LEVEL};

/// Vega-Lite v5 schema URI, used unless the attributes override it.
pub const DEFAULT_SCHEMA_URI: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Build the JSON text of a specification from raw attributes.
///
/// Top-level properties are formatted first, then the single-view
/// properties, each defaulting to the empty string when absent. Falsy
/// formatted values (empty string, empty array, empty object, false, null)
/// are omitted so the renderer falls back to its own defaults. Returns the
/// empty string if serialization fails; the caller treats that as "nothing
/// to render".
pub fn build_specification(attributes: &serde_json::Map<String, Value>) -> String {
    let empty = Value::String(String::new());
    let mut specification: IndexMap<&'static str, Value> = IndexMap::new();

    specification.insert(
        "$schema",
        attributes
            .get("$schema")
            .cloned()
            .unwrap_or_else(|| Value::String(DEFAULT_SCHEMA_URI.to_string())),
    );

    for property in TOP_LEVEL.iter().chain(SINGLE_VIEW.iter()) {
        let raw = attributes.get(property.key()).unwrap_or(&empty);
        specification.insert(property.key(), format(*property, raw));
    }

    specification.retain(|_, value| !is_falsy(value));

    match serde_json::to_string(&specification) {
        Ok(json) => json,
        Err(error) => {
            warn!(%error, "failed to serialize specification");
            String::new()
        }
    }
}

/// Raw JSON override, the expert escape hatch.
///
/// The text is passed to the renderer verbatim apart from stripping literal
/// newline sequences; no parsing or schema validation is applied.
pub fn render_override(json: &str) -> String {
    json.replace("\r\n", "").replace('\n', "")
}

/// A value the builder omits from the serialized specification.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
        Value::Number(_) => false,
    }
}
