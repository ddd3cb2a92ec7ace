#![forbid(unsafe_code)]

//! Core: geometry primitives shared by the layout solver and the constraint
//! language, plus the logging shim.

pub mod geometry;
pub mod logging;

pub use geometry::{Bounds, Insets, LayoutConstraints, LayoutSize};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace};
