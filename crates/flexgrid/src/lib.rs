#![forbid(unsafe_code)]

//! flexgrid public facade crate.
//!
//! Re-exports the geometry, solver and constraint-language types from the
//! internal crates and offers a prelude for everyday use.
//!
//! ```
//! use flexgrid::prelude::*;
//!
//! let mut layout = parse_layout_constraints("wrap 2, gap 10, insets 5").unwrap();
//! let ok = EntityHandle::named("ok", 60.0, 20.0);
//! let cancel = EntityHandle::named("cancel", 80.0, 20.0);
//! layout.add_entity(&ok, parse_entity_constraints("sg buttons").unwrap());
//! layout.add_entity(&cancel, parse_entity_constraints("sg buttons").unwrap());
//!
//! let size = layout.perform_layout(LayoutConstraints::UNBOUNDED);
//! assert_eq!(ok.width(), 80.0);
//! assert_eq!(size, LayoutSize::new(5.0 + 80.0 + 10.0 + 80.0 + 5.0, 30.0));
//! ```

// --- Geometry re-exports ---------------------------------------------------

pub use flexgrid_core::{Bounds, Insets, LayoutConstraints, LayoutSize};

// --- Solver re-exports -----------------------------------------------------

pub use flexgrid_layout::{
    AbsolutePosition, Alignment, BorderSide, EntityConstraints, EntityHandle, EntityInfo,
    EntityKey, FillAxes, FlexGridLayout, FlowDirection, GridConfig, HideMode, LayoutEntity,
    SPAN_TO_END, SizeConstraint, SizeKind, UpdateCallback,
};

// --- Constraint language re-exports ----------------------------------------

pub use flexgrid_dsl::{
    CacheStats, ConstraintCache, ConstraintParseError, Result, TableStats,
    apply_container_configuration,
    apply_entity_constraints, apply_layout_constraints, parse_container_configuration_string,
    parse_entity_constraints, parse_entity_constraints_string, parse_layout_constraints,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Alignment, BorderSide, Bounds, ConstraintCache, ConstraintParseError, EntityConstraints,
        EntityHandle, FlexGridLayout, Insets, LayoutConstraints, LayoutSize, SizeConstraint,
        parse_entity_constraints, parse_layout_constraints,
    };

    pub use crate::{core, dsl, layout};
}

pub use flexgrid_core as core;
pub use flexgrid_dsl as dsl;
pub use flexgrid_layout as layout;
