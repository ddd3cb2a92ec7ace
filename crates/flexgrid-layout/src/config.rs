#![forbid(unsafe_code)]

//! Container-level configuration.

use bitflags::bitflags;
use flexgrid_core::Insets;

use crate::constraint::{Alignment, FlowDirection, HideMode};

/// Gap used when none is given.
pub const DEFAULT_GAP: f32 = 5.0;

/// Most columns (or rows) a grid may have. Larger wraps, cells and skips are
/// clamped to it.
pub const MAX_GRID_TRACKS: usize = 4096;

bitflags! {
    /// Axes on which the container fills its available space.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FillAxes: u8 {
        const HORIZONTAL = 0b01;
        const VERTICAL   = 0b10;
    }
}

/// Everything a container says about its own layout.
///
/// Read it back with [`FlexGridLayout::config`](crate::FlexGridLayout::config)
/// or apply one wholesale with
/// [`FlexGridLayout::with_config`](crate::FlexGridLayout::with_config).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    pub horizontal_gap: f32,
    pub vertical_gap: f32,
    /// Cells per row (or per column in vertical flow) before wrapping.
    pub wrap: Option<usize>,
    pub fill: FillAxes,
    pub insets: Insets,
    pub flow_direction: FlowDirection,
    pub debug: bool,
    pub no_grid: bool,
    pub horizontal_align: Alignment,
    pub vertical_align: Alignment,
    pub hide_mode: HideMode,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl GridConfig {
    /// Gap 5, no wrap, no fill, horizontal flow, Fill/Fill alignment.
    pub const DEFAULT: Self = Self {
        horizontal_gap: DEFAULT_GAP,
        vertical_gap: DEFAULT_GAP,
        wrap: None,
        fill: FillAxes::empty(),
        insets: Insets::ZERO,
        flow_direction: FlowDirection::Horizontal,
        debug: false,
        no_grid: false,
        horizontal_align: Alignment::Fill,
        vertical_align: Alignment::Fill,
        hide_mode: HideMode::Default,
    };

    #[must_use]
    pub const fn with_gap(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_gap = horizontal;
        self.vertical_gap = vertical;
        self
    }

    /// `0` disables wrapping.
    #[must_use]
    pub const fn with_wrap(mut self, columns: usize) -> Self {
        self.wrap = if columns == 0 { None } else { Some(columns) };
        self
    }

    #[must_use]
    pub const fn with_fill(mut self, fill: FillAxes) -> Self {
        self.fill = fill;
        self
    }

    #[must_use]
    pub const fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    #[must_use]
    pub const fn with_flow_direction(mut self, flow: FlowDirection) -> Self {
        self.flow_direction = flow;
        self
    }

    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub const fn with_no_grid(mut self, no_grid: bool) -> Self {
        self.no_grid = no_grid;
        self
    }

    #[must_use]
    pub const fn with_alignment(mut self, horizontal: Alignment, vertical: Alignment) -> Self {
        self.horizontal_align = horizontal;
        self.vertical_align = vertical;
        self
    }

    #[must_use]
    pub const fn with_hide_mode(mut self, mode: HideMode) -> Self {
        self.hide_mode = mode;
        self
    }

    /// Flow is vertical. `Default` counts as horizontal.
    pub fn is_vertical_flow(&self) -> bool {
        self.flow_direction == FlowDirection::Vertical
    }
}
