//! Embed container contract and chart instance registry
//!
//! The renderer finds each chart through data attributes on its container
//! element: `data-datavis` names the render target, `data-config` names the
//! sibling JSON script element holding the built specification, and the
//! optional `data-min-width` / `data-max-width` carry the breakpoint bounds.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::breakpoint::Breakpoint;

/// Container attributes for one embedded chart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbedContainer {
    chart_id: String,
    breakpoint: Breakpoint,
    width: Option<i64>,
    height: Option<i64>,
}

impl EmbedContainer {
    /// Create a container for the chart with the given id. An empty id
    /// yields an empty container that renders nothing.
    pub fn new(chart_id: impl Into<String>) -> Self {
        Self {
            chart_id: chart_id.into(),
            ..Self::default()
        }
    }

    /// Attach the variant's display window.
    pub fn with_breakpoint(mut self, breakpoint: Breakpoint) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    /// Pick up width/height hints from the built specification so the
    /// container can be sized before the renderer loads, minimizing layout
    /// shift. Non-numeric dimensions are ignored.
    pub fn with_size_hint(mut self, spec_json: &str) -> Self {
        if let Ok(Value::Object(spec)) = serde_json::from_str(spec_json) {
            self.width = spec.get("width").and_then(numeric_pixels);
            self.height = spec.get("height").and_then(numeric_pixels);
        }
        self
    }

    /// Id of the render target element
    pub fn datavis_id(&self) -> String {
        format!("{}-datavis", self.chart_id)
    }

    /// Id of the JSON script element holding the specification
    pub fn config_id(&self) -> String {
        format!("{}-config", self.chart_id)
    }

    /// Ordered attribute pairs for the container element.
    ///
    /// Empty when no chart id is set: a block without an identifier renders
    /// nothing. Zero-valued bounds are omitted, matching the attribute
    /// semantics of the page renderer.
    pub fn attributes(&self) -> Vec<(String, String)> {
        if self.chart_id.is_empty() {
            debug!("embed container without chart id renders nothing");
            return Vec::new();
        }

        let mut attributes = vec![
            ("data-datavis".to_string(), self.datavis_id()),
            ("data-config".to_string(), self.config_id()),
        ];

        if let Some(min) = self.breakpoint.min_width.filter(|w| *w > 0) {
            attributes.push(("data-min-width".to_string(), min.to_string()));
        }
        if let Some(max) = self.breakpoint.max_width.filter(|w| *w > 0) {
            attributes.push(("data-max-width".to_string(), max.to_string()));
        }

        attributes
    }

    /// Inline style for the render target, e.g. `width:400px;height:300px`.
    /// Empty when no dimensions are known.
    pub fn inline_style(&self) -> String {
        let mut parts = Vec::new();
        if let Some(width) = self.width {
            parts.push(format!("width:{}px", width));
        }
        if let Some(height) = self.height {
            parts.push(format!("height:{}px", height));
        }
        parts.join(";")
    }
}

/// Dimensions come out of the builder as strings; accept bare numbers too.
fn numeric_pixels(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_f64().map(|f| f as i64),
        Value::String(s) => s.parse::<f64>().ok().map(|f| f as i64),
        _ => None,
    }
}

/// A mounted chart as the rendering collaborator sees it
#[derive(Debug, Clone, PartialEq)]
pub struct ChartHandle {
    pub chart_id: String,
    pub spec_json: String,
    pub breakpoint: Breakpoint,
}

/// Registry of currently mounted charts, owned by the rendering
/// collaborator and rebuilt on page load or resize. Iteration follows
/// registration order; registering an id again replaces the handle.
#[derive(Debug, Clone, Default)]
pub struct ChartRegistry {
    instances: IndexMap<String, ChartHandle>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a chart handle, replacing any previous handle with the same
    /// id.
    pub fn register(&mut self, handle: ChartHandle) {
        self.instances.insert(handle.chart_id.clone(), handle);
    }

    pub fn get(&self, chart_id: &str) -> Option<&ChartHandle> {
        self.instances.get(chart_id)
    }

    pub fn remove(&mut self, chart_id: &str) -> Option<ChartHandle> {
        self.instances.shift_remove(chart_id)
    }

    /// Drop all handles, e.g. before re-scanning the page.
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Handles in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ChartHandle> {
        self.instances.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_attribute_names() {
        let attributes = EmbedContainer::new("chart-7").attributes();
        assert_eq!(
            attributes,
            vec![
                ("data-datavis".to_string(), "chart-7-datavis".to_string()),
                ("data-config".to_string(), "chart-7-config".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_chart_id_renders_nothing() {
        assert!(EmbedContainer::new("").attributes().is_empty());
    }

    #[test]
    fn test_breakpoint_attributes() {
        let container = EmbedContainer::new("chart-7").with_breakpoint(Breakpoint {
            min_width: Some(600),
            max_width: Some(899),
        });
        let attributes = container.attributes();
        assert!(attributes.contains(&("data-min-width".to_string(), "600".to_string())));
        assert!(attributes.contains(&("data-max-width".to_string(), "899".to_string())));

        // The default variant carries no lower bound.
        let default = EmbedContainer::new("chart-7").with_breakpoint(Breakpoint {
            min_width: None,
            max_width: Some(599),
        });
        let attributes = default.attributes();
        assert!(!attributes.iter().any(|(name, _)| name == "data-min-width"));
        assert!(attributes.contains(&("data-max-width".to_string(), "599".to_string())));
    }

    #[test]
    fn test_size_hint_from_spec_json() {
        let container = EmbedContainer::new("chart-7")
            .with_size_hint(r#"{"width":"400","height":300,"mark":"bar"}"#);
        assert_eq!(container.inline_style(), "width:400px;height:300px");

        let no_hint = EmbedContainer::new("chart-7").with_size_hint(r#"{"width":"wide"}"#);
        assert_eq!(no_hint.inline_style(), "");
    }

    #[test]
    fn test_registry_replace_and_order() {
        let mut registry = ChartRegistry::new();
        for id in ["a", "b", "c"] {
            registry.register(ChartHandle {
                chart_id: id.to_string(),
                spec_json: String::new(),
                breakpoint: Breakpoint::default(),
            });
        }
        assert_eq!(registry.len(), 3);

        registry.register(ChartHandle {
            chart_id: "b".to_string(),
            spec_json: "{}".to_string(),
            breakpoint: Breakpoint::default(),
        });
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("b").unwrap().spec_json, "{}");

        let order: Vec<&str> = registry.iter().map(|h| h.chart_id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_registry_remove_and_clear() {
        let mut registry = ChartRegistry::new();
        registry.register(ChartHandle {
            chart_id: "a".to_string(),
            spec_json: String::new(),
            breakpoint: Breakpoint::default(),
        });

        assert!(registry.remove("a").is_some());
        assert!(registry.remove("a").is_none());
        assert!(registry.is_empty());

        registry.register(ChartHandle {
            chart_id: "a".to_string(),
            spec_json: String::new(),
            breakpoint: Breakpoint::default(),
        });
        registry.clear();
        assert!(registry.is_empty());
    }
}
