//! Per-property value formatters
//!
//! Every specification property has a formatter that normalizes raw editor
//! input into a value legal for that property. Formatters are total: illegal
//! input degrades to the documented default or to an empty value that the
//! builder later drops, never to an error.

use serde_json::Value;
use tracing::debug;

use crate::value::{stringify, TypedValue, TYPE_TITLE_PARAMS};

/// Allowed values for `autosize`; the first entry is the default.
pub const AUTOSIZE_VALUES: [&str; 3] = ["pad", "fit", "none"];

/// Allowed values for `mark`; the first entry is the default.
pub const MARK_VALUES: [&str; 10] = [
    "bar", "circle", "square", "tick", "line", "area", "point", "rule", "geoshape", "text",
];

/// Encoding channels legal in a single-view specification.
const ENCODING_CHANNELS: [&str; 19] = [
    "x", "y", "x2", "y2", "theta", "radius", "longitude", "latitude", "color", "opacity", "size",
    "shape", "text", "tooltip", "detail", "order", "row", "column", "facet",
];

/// Allowed encoding field types; the default is `nominal`.
const FIELD_TYPES: [&str; 5] = ["quantitative", "ordinal", "nominal", "temporal", "geojson"];

/// A property of a single-view chart specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Background,
    Padding,
    Autosize,
    Config,
    Name,
    Description,
    Title,
    Data,
    Transform,
    Params,
    Mark,
    Encoding,
    Width,
    Height,
    View,
    Projection,
    Usermeta,
}

/// Top-level properties, in the order they appear in the output.
pub const TOP_LEVEL: [Property; 10] = [
    Property::Background,
    Property::Padding,
    Property::Autosize,
    Property::Config,
    Property::Name,
    Property::Description,
    Property::Title,
    Property::Data,
    Property::Transform,
    Property::Params,
];

/// Properties valid only on a single-view specification.
pub const SINGLE_VIEW: [Property; 6] = [
    Property::Mark,
    Property::Encoding,
    Property::Width,
    Property::Height,
    Property::View,
    Property::Projection,
];

impl Property {
    /// Key used for this property in attribute input and JSON output
    pub fn key(&self) -> &'static str {
        match self {
            Property::Background => "background",
            Property::Padding => "padding",
            Property::Autosize => "autosize",
            Property::Config => "config",
            Property::Name => "name",
            Property::Description => "description",
            Property::Title => "title",
            Property::Data => "data",
            Property::Transform => "transform",
            Property::Params => "params",
            Property::Mark => "mark",
            Property::Encoding => "encoding",
            Property::Width => "width",
            Property::Height => "height",
            Property::View => "view",
            Property::Projection => "projection",
            Property::Usermeta => "usermeta",
        }
    }
}

/// Format a raw attribute value for the given property.
///
/// Pure and total: the result is always a value legal for the property, with
/// unknown or malformed input coerced to the documented default. An empty
/// result means the property should be omitted from the specification.
pub fn format(property: Property, raw: &Value) -> Value {
    match property {
        Property::Autosize => format_enum(property, raw, &AUTOSIZE_VALUES),
        Property::Mark => format_enum(property, raw, &MARK_VALUES),
        Property::Background => format_background(raw),
        Property::Padding => format_padding(raw),
        Property::Title => format_title(raw),
        Property::Name | Property::Description | Property::Width | Property::Height => {
            Value::String(stringify(raw))
        }
        Property::Params => format_collection(raw, format_parameter),
        Property::Transform => format_collection(raw, format_transform),
        Property::Data => format_data(raw),
        Property::Encoding => format_encoding(raw),
        // Placeholder contract: these format to empty and drop out of the
        // built specification.
        Property::Config | Property::View | Property::Projection | Property::Usermeta => {
            Value::String(String::new())
        }
    }
}

/// Pass a legal enum value through, otherwise fall back to the default.
fn format_enum(property: Property, raw: &Value, allowed: &[&str]) -> Value {
    match raw.as_str() {
        Some(s) if allowed.contains(&s) => Value::String(s.to_string()),
        _ => {
            if !matches!(raw, Value::String(s) if s.is_empty()) {
                debug!(property = property.key(), ?raw, default = allowed[0], "coercing value to default");
            }
            Value::String(allowed[0].to_string())
        }
    }
}

/// Background accepts an expression or a color; an empty color falls back to
/// white.
fn format_background(raw: &Value) -> Value {
    match TypedValue::parse(raw) {
        TypedValue::Expression(expr) => Value::String(format_expression(&expr)),
        TypedValue::Color(color) => Value::String(format_color(&color)),
        TypedValue::Plain(value) | TypedValue::Parameter(value) => {
            Value::String(format_color(&stringify(&value)))
        }
    }
}

/// Padding accepts an expression, a per-side object, or a uniform scalar.
fn format_padding(raw: &Value) -> Value {
    match TypedValue::parse(raw) {
        TypedValue::Expression(expr) => Value::String(format_expression(&expr)),
        TypedValue::Plain(Value::Object(sides)) => Value::String(
            serde_json::to_string(&sides).unwrap_or_default(),
        ),
        TypedValue::Plain(value) | TypedValue::Parameter(value) => {
            Value::String(stringify(&value))
        }
        TypedValue::Color(color) => Value::String(color),
    }
}

/// Title accepts structured title parameters or plain text.
fn format_title(raw: &Value) -> Value {
    if let Some(obj) = raw.as_object() {
        if obj.get("type").and_then(Value::as_str) == Some(TYPE_TITLE_PARAMS) {
            return obj.get("value").cloned().unwrap_or_default();
        }
        let value = obj
            .get("value")
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()));
        return format_text(&value);
    }

    format_text(raw)
}

/// Text is a string or an array of strings, one per line.
fn format_text(value: &Value) -> Value {
    match value {
        Value::Array(lines) => Value::Array(
            lines
                .iter()
                .map(|line| Value::String(stringify(line)))
                .collect(),
        ),
        other => Value::String(stringify(other)),
    }
}

/// String form of an expression wrapper, e.g. `{expr: "width / 2"}`.
fn format_expression(expr: &str) -> String {
    format!("{{expr: \"{}\"}}", expr)
}

/// Color string, defaulting to white when empty.
fn format_color(color: &str) -> String {
    if color.is_empty() {
        "white".to_string()
    } else {
        color.to_string()
    }
}

/// Run each element of a collection through its type-level formatter,
/// preserving order. Non-array input is returned unchanged so that the
/// default empty string drops out of the built specification.
fn format_collection(raw: &Value, element: fn(&Value) -> Value) -> Value {
    match raw {
        Value::Array(items) => Value::Array(items.iter().map(element).collect()),
        other => other.clone(),
    }
}

/// Parameter elements pass through unchanged; the editor emits them in the
/// shape the renderer consumes.
fn format_parameter(value: &Value) -> Value {
    value.clone()
}

/// Transform elements pass through unchanged, as with parameters.
fn format_transform(value: &Value) -> Value {
    value.clone()
}

/// Data is a reference to inline values, a URL, or a named dataset.
fn format_data(raw: &Value) -> Value {
    match raw {
        Value::Object(obj)
            if obj.contains_key("values")
                || obj.contains_key("url")
                || obj.contains_key("name") =>
        {
            raw.clone()
        }
        Value::String(url) if !url.is_empty() => {
            serde_json::json!({ "url": url })
        }
        other => {
            if !matches!(other, Value::String(s) if s.is_empty()) {
                debug!(?other, "dropping unrecognized data reference");
            }
            Value::String(String::new())
        }
    }
}

/// Encoding maps visual channels to field definitions. Unknown channels are
/// dropped; a field definition's `type` is coerced into the legal set.
fn format_encoding(raw: &Value) -> Value {
    let Some(channels) = raw.as_object() else {
        return Value::String(String::new());
    };

    let mut encoding = serde_json::Map::new();
    for (channel, definition) in channels {
        if !ENCODING_CHANNELS.contains(&channel.as_str()) {
            debug!(channel, "dropping unknown encoding channel");
            continue;
        }
        encoding.insert(channel.clone(), format_field_definition(definition));
    }

    Value::Object(encoding)
}

fn format_field_definition(definition: &Value) -> Value {
    let Some(obj) = definition.as_object() else {
        return definition.clone();
    };

    let mut formatted = obj.clone();
    if let Some(field_type) = obj.get("type") {
        let coerced = match field_type.as_str() {
            Some(t) if FIELD_TYPES.contains(&t) => t.to_string(),
            _ => {
                debug!(?field_type, "coercing encoding field type to nominal");
                "nominal".to_string()
            }
        };
        formatted.insert("type".to_string(), Value::String(coerced));
    }

    Value::Object(formatted)
}
