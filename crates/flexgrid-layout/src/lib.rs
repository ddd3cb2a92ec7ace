#![forbid(unsafe_code)]

//! Constraint-based grid/flow layout.
//!
//! Entities are abstract rectangles with a preferred size. A
//! [`FlexGridLayout`] assigns them to grid cells, sizes columns and rows,
//! hands out extra space by grow weight, applies docking and groups, and
//! writes final geometry back through each entity's callback.
//!
//! # Example
//!
//! ```
//! use flexgrid_core::LayoutConstraints;
//! use flexgrid_layout::{EntityConstraints, EntityHandle, FlexGridLayout};
//!
//! let mut layout = FlexGridLayout::new();
//! layout.set_wrap(Some(2)).set_gap(4.0, 4.0);
//!
//! let a = EntityHandle::new(40.0, 20.0);
//! let b = EntityHandle::new(60.0, 20.0);
//! let c = EntityHandle::new(40.0, 20.0);
//! layout
//!     .add_entity(&a, None)
//!     .add_entity(&b, None)
//!     .add_entity(&c, EntityConstraints::new());
//!
//! let size = layout.perform_layout(LayoutConstraints::UNBOUNDED);
//! assert_eq!(layout.grid_size(), (2, 2));
//! assert_eq!(size.width, 40.0 + 4.0 + 60.0);
//! assert_eq!(c.y(), 24.0);
//! ```

pub mod config;
pub mod constraint;
mod debug;
pub mod entity;
pub mod layout;
mod solve;

pub use config::{DEFAULT_GAP, FillAxes, GridConfig, MAX_GRID_TRACKS};
pub use constraint::{
    AbsolutePosition, Alignment, BorderSide, DEFAULT_GROW, DEFAULT_PRIORITY, DEFAULT_SHRINK,
    EntityConstraints, FlowDirection, HideMode, SPAN_TO_END, SizeConstraint, SizeKind,
};
pub use entity::{DEFAULT_PREFERRED_SIZE, EntityHandle, LayoutEntity, UpdateCallback};
pub use layout::{EntityInfo, EntityKey, FlexGridLayout};

pub use flexgrid_core::{Bounds, Insets, LayoutConstraints, LayoutSize};
