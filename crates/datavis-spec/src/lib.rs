//! Vega-Lite specification assembly for datavis blocks
//!
//! This crate builds a single-view Vega-Lite specification from the raw
//! attribute dictionary supplied by the block editor. Each property has its
//! own formatter that normalizes the raw input into a legal value, and the
//! builder merges the formatted properties into sparse JSON output.

pub mod builder;
pub mod properties;
pub mod value;

// Re-export commonly used items
pub use builder::{build_specification, render_override, DEFAULT_SCHEMA_URI};
pub use properties::{format, Property, AUTOSIZE_VALUES, MARK_VALUES};
pub use value::TypedValue;
