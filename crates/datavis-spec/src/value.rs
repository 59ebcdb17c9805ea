//! Typed property values
//!
//! Several specification properties (background, padding, title) accept
//! either a plain literal or a tagged form such as a color or a runtime
//! expression. The editor sends these as `{ "type": ..., "value": ... }`
//! objects; untagged input is treated as a plain literal.

use serde_json::Value;

/// Tag for a CSS color value
pub const TYPE_COLOR: &str = "color";
/// Tag for a Vega expression evaluated by the renderer
pub const TYPE_EXPRESSION: &str = "expression";
/// Tag for a reference to a named parameter
pub const TYPE_PARAMETER: &str = "parameter";
/// Tag for structured title parameters
pub const TYPE_TITLE_PARAMS: &str = "title-params";

/// A property value together with its declared kind
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// Untagged literal, formatted by the property's own rules
    Plain(Value),
    /// CSS color string
    Color(String),
    /// Vega expression string
    Expression(String),
    /// Reference to a named parameter
    Parameter(Value),
}

impl TypedValue {
    /// Parse the wire shape `{ "type": <kind>, "value": <v> }`.
    ///
    /// Input that is not an object carrying a recognized `type` tag becomes
    /// `Plain`. A tagged object with no `value` key defaults to the empty
    /// string, matching the editor's behavior for cleared fields.
    pub fn parse(raw: &Value) -> Self {
        let Some(obj) = raw.as_object() else {
            return TypedValue::Plain(raw.clone());
        };

        let value = obj
            .get("value")
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()));

        match obj.get("type").and_then(Value::as_str) {
            Some(TYPE_COLOR) => TypedValue::Color(stringify(&value)),
            Some(TYPE_EXPRESSION) => TypedValue::Expression(stringify(&value)),
            Some(TYPE_PARAMETER) => TypedValue::Parameter(value),
            _ => TypedValue::Plain(value),
        }
    }
}

/// Coerce a JSON value to its string form.
///
/// Strings pass through unquoted, scalars use their display form, null is
/// empty, and structured values fall back to compact JSON text.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
