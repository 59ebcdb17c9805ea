//! Embed-time contracts for datavis blocks
//!
//! Computes the responsive display window for each chart variant and builds
//! the container attributes the external renderer consumes. Rendering
//! itself is delegated to the embedding library.

pub mod breakpoint;
pub mod container;

use thiserror::Error;

// Re-exports
pub use breakpoint::{compute_breakpoint, validate_breakpoints, Breakpoint};
pub use container::{ChartHandle, ChartRegistry, EmbedContainer};

/// Errors that can occur at the embed seam
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EmbedError {
    #[error("duplicate breakpoint width: {0}")]
    DuplicateWidth(u32),
}
