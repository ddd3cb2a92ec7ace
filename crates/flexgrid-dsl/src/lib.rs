#![forbid(unsafe_code)]

//! Constraint strings for flexgrid layouts.
//!
//! Two grammars read the same comma-separated shape:
//!
//! - the strict parser ([`parse_layout_constraints`],
//!   [`parse_entity_constraints`]) rejects anything it does not understand
//!   with a [`ConstraintParseError`];
//! - the lenient parser ([`parse_container_configuration_string`],
//!   [`parse_entity_constraints_string`]) skips what it cannot read.
//!
//! [`ConstraintCache`] memoizes the lenient parser.
//!
//! # Example
//!
//! ```
//! use flexgrid_dsl::{parse_entity_constraints, parse_layout_constraints};
//! use flexgrid_layout::{EntityHandle, LayoutConstraints};
//!
//! let mut layout = parse_layout_constraints("wrap 2, gap 0, insets 10").unwrap();
//! let a = EntityHandle::new(50.0, 20.0);
//! let b = EntityHandle::new(30.0, 20.0);
//! layout.add_entity(&a, parse_entity_constraints("left, top").unwrap());
//! layout.add_entity(&b, parse_entity_constraints("left, top").unwrap());
//!
//! layout.perform_layout(LayoutConstraints::UNBOUNDED);
//! assert_eq!((a.x(), a.y()), (10.0, 10.0));
//! assert_eq!(b.x(), 60.0);
//! ```

pub mod cache;
pub mod error;
pub mod lenient;
pub mod strict;
mod token;

pub use cache::{CacheStats, ConstraintCache, TableStats};
pub use error::{ConstraintParseError, Result};
pub use lenient::{
    ConfigOption, apply_container_configuration, parse_container_configuration_string,
    parse_entity_constraints_string,
};
pub use strict::{
    apply_entity_constraints, apply_layout_constraints, parse_entity_constraints,
    parse_layout_constraints,
};
