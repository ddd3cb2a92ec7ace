#![forbid(unsafe_code)]

//! Per-entity constraint model.
//!
//! [`SizeConstraint`] is the leaf value type; [`EntityConstraints`] bundles
//! every directive one entity can carry into a layout pass. Setters return
//! `&mut Self` so a bundle can be configured in one expression:
//!
//! ```
//! use flexgrid_layout::{Alignment, EntityConstraints, SizeConstraint};
//!
//! let mut c = EntityConstraints::new();
//! c.set_width(SizeConstraint::fixed(120.0))
//!     .set_grow_x(1.0)
//!     .set_horizontal_align(Alignment::Fill);
//! assert_eq!(c.width().resolve(400.0, 0.0), 120.0);
//! ```

use flexgrid_core::Insets;

/// Span value meaning "to the end of the row/column".
pub const SPAN_TO_END: usize = 999;

/// Default grow weight used by bare `grow`/`push` directives.
pub const DEFAULT_GROW: f32 = 100.0;

/// Default shrink weight.
pub const DEFAULT_SHRINK: f32 = 100.0;

/// Default grow and shrink priority.
pub const DEFAULT_PRIORITY: i32 = 100;

/// How a [`SizeConstraint`] resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeKind {
    /// Always the stored value.
    Fixed,
    /// Preferred value clamped into `[min, max]`.
    Range,
    /// Percentage of the container dimension.
    Percentage,
    /// Whatever the content reports.
    #[default]
    Content,
}

/// A size directive on one axis.
///
/// `min <= preferred <= max` is not checked at construction. Resolution
/// applies `max` first and `min` last, so inverted bounds resolve to `min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeConstraint {
    kind: SizeKind,
    min: f32,
    preferred: f32,
    max: f32,
}

impl Default for SizeConstraint {
    fn default() -> Self {
        Self::content()
    }
}

impl SizeConstraint {
    /// Exact size; `min == preferred == max`.
    pub const fn fixed(size: f32) -> Self {
        Self {
            kind: SizeKind::Fixed,
            min: size,
            preferred: size,
            max: size,
        }
    }

    /// Min/preferred/max range.
    pub const fn range(min: f32, preferred: f32, max: f32) -> Self {
        Self {
            kind: SizeKind::Range,
            min,
            preferred,
            max,
        }
    }

    /// Percentage (0..100) of the container dimension.
    pub const fn percentage(percent: f32) -> Self {
        Self {
            kind: SizeKind::Percentage,
            min: 0.0,
            preferred: percent,
            max: f32::INFINITY,
        }
    }

    /// Size from content.
    pub const fn content() -> Self {
        Self {
            kind: SizeKind::Content,
            min: 0.0,
            preferred: 0.0,
            max: f32::INFINITY,
        }
    }

    #[inline]
    pub const fn kind(&self) -> SizeKind {
        self.kind
    }

    #[inline]
    pub const fn min(&self) -> f32 {
        self.min
    }

    #[inline]
    pub const fn preferred(&self) -> f32 {
        self.preferred
    }

    #[inline]
    pub const fn max(&self) -> f32 {
        self.max
    }

    /// `true` for [`SizeKind::Content`].
    #[inline]
    pub const fn is_content(&self) -> bool {
        matches!(self.kind, SizeKind::Content)
    }

    /// Resolve against a container dimension and a content-reported size.
    pub fn resolve(&self, container_size: f32, content_size: f32) -> f32 {
        match self.kind {
            SizeKind::Fixed => self.preferred,
            SizeKind::Range => self.preferred.min(self.max).max(self.min),
            SizeKind::Percentage => container_size * (self.preferred / 100.0),
            SizeKind::Content => content_size,
        }
    }
}

/// Placement of an entity inside its cell on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Left/top.
    Start,
    #[default]
    Center,
    /// Right/bottom.
    End,
    /// Stretch to the cell.
    Fill,
    /// Text baseline. Recognized by the parser but not positioned.
    Baseline,
}

impl Alignment {
    /// Offset of an item of `used` extent inside `available` extent.
    pub fn offset(self, available: f32, used: f32) -> f32 {
        match self {
            Alignment::Center => (available - used) / 2.0,
            Alignment::End => available - used,
            Alignment::Start | Alignment::Fill | Alignment::Baseline => 0.0,
        }
    }
}

/// Direction in which the grid cursor advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlowDirection {
    /// Inherit from the container.
    #[default]
    Default,
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}

/// Container border an entity is docked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderSide {
    #[default]
    None,
    Top,
    Bottom,
    Left,
    Right,
}

impl BorderSide {
    /// Docked entities never occupy grid cells.
    #[inline]
    pub const fn is_docked(self) -> bool {
        !matches!(self, BorderSide::None)
    }
}

/// Whether an invisible entity keeps its space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HideMode {
    /// Invisible entities are laid out as if visible.
    #[default]
    Default,
    /// Invisible entities are left out of the pass entirely.
    Exclude,
}

impl HideMode {
    /// Numeric code used by the constraint language (`0` or `3`).
    pub const fn code(self) -> u8 {
        match self {
            HideMode::Default => 0,
            HideMode::Exclude => 3,
        }
    }

    /// Inverse of [`HideMode::code`].
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(HideMode::Default),
            3 => Some(HideMode::Exclude),
            _ => None,
        }
    }
}

/// Absolute placement that bypasses the grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AbsolutePosition {
    pub x: f32,
    pub y: f32,
    /// Right edge; when set the width becomes `x2 - x`.
    pub x2: Option<f32>,
    /// Bottom edge; when set the height becomes `y2 - y`.
    pub y2: Option<f32>,
}

/// Every layout directive one entity can carry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityConstraints {
    width: SizeConstraint,
    height: SizeConstraint,
    min_width: SizeConstraint,
    max_width: SizeConstraint,
    min_height: SizeConstraint,
    max_height: SizeConstraint,

    horizontal_align: Alignment,
    vertical_align: Alignment,

    span_x: usize,
    span_y: usize,
    grow_x: f32,
    grow_y: f32,
    grow_priority_x: i32,
    grow_priority_y: i32,
    shrink_x: f32,
    shrink_y: f32,
    shrink_priority_x: i32,
    shrink_priority_y: i32,

    wrap: bool,
    newline: bool,
    skip: usize,
    split: usize,
    cell_flow: FlowDirection,
    cell: Option<(usize, usize)>,

    margin: Insets,
    gap: Insets,
    padding: Insets,

    size_group: Option<String>,
    end_group: Option<String>,
    component_id: Option<String>,

    border_side: BorderSide,
    absolute: Option<AbsolutePosition>,
    hide_mode: HideMode,
}

impl Default for EntityConstraints {
    fn default() -> Self {
        Self {
            width: SizeConstraint::content(),
            height: SizeConstraint::content(),
            min_width: SizeConstraint::content(),
            max_width: SizeConstraint::content(),
            min_height: SizeConstraint::content(),
            max_height: SizeConstraint::content(),
            horizontal_align: Alignment::Center,
            vertical_align: Alignment::Center,
            span_x: 1,
            span_y: 1,
            grow_x: 0.0,
            grow_y: 0.0,
            grow_priority_x: DEFAULT_PRIORITY,
            grow_priority_y: DEFAULT_PRIORITY,
            shrink_x: DEFAULT_SHRINK,
            shrink_y: DEFAULT_SHRINK,
            shrink_priority_x: DEFAULT_PRIORITY,
            shrink_priority_y: DEFAULT_PRIORITY,
            wrap: false,
            newline: false,
            skip: 0,
            split: 0,
            cell_flow: FlowDirection::Default,
            cell: None,
            margin: Insets::ZERO,
            gap: Insets::ZERO,
            padding: Insets::ZERO,
            size_group: None,
            end_group: None,
            component_id: None,
            border_side: BorderSide::None,
            absolute: None,
            hide_mode: HideMode::Default,
        }
    }
}

fn non_empty(name: impl Into<String>) -> Option<String> {
    let name = name.into();
    if name.is_empty() { None } else { Some(name) }
}

impl EntityConstraints {
    /// Defaults: span 1×1, no growth, shrink 100, centered, hide mode Default.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Sizing ---

    pub fn width(&self) -> SizeConstraint {
        self.width
    }

    pub fn height(&self) -> SizeConstraint {
        self.height
    }

    pub fn min_width(&self) -> SizeConstraint {
        self.min_width
    }

    pub fn max_width(&self) -> SizeConstraint {
        self.max_width
    }

    pub fn min_height(&self) -> SizeConstraint {
        self.min_height
    }

    pub fn max_height(&self) -> SizeConstraint {
        self.max_height
    }

    pub fn set_width(&mut self, width: SizeConstraint) -> &mut Self {
        self.width = width;
        self
    }

    pub fn set_height(&mut self, height: SizeConstraint) -> &mut Self {
        self.height = height;
        self
    }

    pub fn set_min_width(&mut self, min_width: SizeConstraint) -> &mut Self {
        self.min_width = min_width;
        self
    }

    pub fn set_max_width(&mut self, max_width: SizeConstraint) -> &mut Self {
        self.max_width = max_width;
        self
    }

    pub fn set_min_height(&mut self, min_height: SizeConstraint) -> &mut Self {
        self.min_height = min_height;
        self
    }

    pub fn set_max_height(&mut self, max_height: SizeConstraint) -> &mut Self {
        self.max_height = max_height;
        self
    }

    // --- Alignment ---

    pub fn horizontal_align(&self) -> Alignment {
        self.horizontal_align
    }

    pub fn vertical_align(&self) -> Alignment {
        self.vertical_align
    }

    pub fn set_horizontal_align(&mut self, align: Alignment) -> &mut Self {
        self.horizontal_align = align;
        self
    }

    pub fn set_vertical_align(&mut self, align: Alignment) -> &mut Self {
        self.vertical_align = align;
        self
    }

    /// Set both axes at once.
    pub fn set_align(&mut self, horizontal: Alignment, vertical: Alignment) -> &mut Self {
        self.horizontal_align = horizontal;
        self.vertical_align = vertical;
        self
    }

    // --- Spans, growth, shrink ---

    pub fn span_x(&self) -> usize {
        self.span_x
    }

    pub fn span_y(&self) -> usize {
        self.span_y
    }

    /// Spans below one are raised to one.
    pub fn set_span_x(&mut self, span: usize) -> &mut Self {
        self.span_x = span.max(1);
        self
    }

    /// Spans below one are raised to one.
    pub fn set_span_y(&mut self, span: usize) -> &mut Self {
        self.span_y = span.max(1);
        self
    }

    pub fn grow_x(&self) -> f32 {
        self.grow_x
    }

    pub fn grow_y(&self) -> f32 {
        self.grow_y
    }

    pub fn set_grow_x(&mut self, grow: f32) -> &mut Self {
        self.grow_x = grow;
        self
    }

    pub fn set_grow_y(&mut self, grow: f32) -> &mut Self {
        self.grow_y = grow;
        self
    }

    pub fn grow_priority_x(&self) -> i32 {
        self.grow_priority_x
    }

    pub fn grow_priority_y(&self) -> i32 {
        self.grow_priority_y
    }

    pub fn set_grow_priority_x(&mut self, priority: i32) -> &mut Self {
        self.grow_priority_x = priority;
        self
    }

    pub fn set_grow_priority_y(&mut self, priority: i32) -> &mut Self {
        self.grow_priority_y = priority;
        self
    }

    pub fn shrink_x(&self) -> f32 {
        self.shrink_x
    }

    pub fn shrink_y(&self) -> f32 {
        self.shrink_y
    }

    pub fn set_shrink_x(&mut self, shrink: f32) -> &mut Self {
        self.shrink_x = shrink;
        self
    }

    pub fn set_shrink_y(&mut self, shrink: f32) -> &mut Self {
        self.shrink_y = shrink;
        self
    }

    pub fn shrink_priority_x(&self) -> i32 {
        self.shrink_priority_x
    }

    pub fn shrink_priority_y(&self) -> i32 {
        self.shrink_priority_y
    }

    pub fn set_shrink_priority_x(&mut self, priority: i32) -> &mut Self {
        self.shrink_priority_x = priority;
        self
    }

    pub fn set_shrink_priority_y(&mut self, priority: i32) -> &mut Self {
        self.shrink_priority_y = priority;
        self
    }

    // --- Flow ---

    /// Start a new row (or column in vertical flow) after this entity.
    pub fn wrap(&self) -> bool {
        self.wrap
    }

    /// Start a new row (or column in vertical flow) before this entity.
    pub fn newline(&self) -> bool {
        self.newline
    }

    pub fn skip(&self) -> usize {
        self.skip
    }

    pub fn split(&self) -> usize {
        self.split
    }

    pub fn cell_flow(&self) -> FlowDirection {
        self.cell_flow
    }

    pub fn set_wrap(&mut self, wrap: bool) -> &mut Self {
        self.wrap = wrap;
        self
    }

    pub fn set_newline(&mut self, newline: bool) -> &mut Self {
        self.newline = newline;
        self
    }

    pub fn set_skip(&mut self, skip: usize) -> &mut Self {
        self.skip = skip;
        self
    }

    pub fn set_split(&mut self, split: usize) -> &mut Self {
        self.split = split;
        self
    }

    pub fn set_cell_flow(&mut self, flow: FlowDirection) -> &mut Self {
        self.cell_flow = flow;
        self
    }

    /// Explicit `(column, row)`; `None` lets the flow cursor decide.
    pub fn cell(&self) -> Option<(usize, usize)> {
        self.cell
    }

    pub fn set_cell(&mut self, column: usize, row: usize) -> &mut Self {
        self.cell = Some((column, row));
        self
    }

    pub fn clear_cell(&mut self) -> &mut Self {
        self.cell = None;
        self
    }

    // --- Spacing ---

    pub fn margin(&self) -> Insets {
        self.margin
    }

    pub fn gap(&self) -> Insets {
        self.gap
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn set_margin(&mut self, margin: Insets) -> &mut Self {
        self.margin = margin;
        self
    }

    pub fn set_gap(&mut self, gap: Insets) -> &mut Self {
        self.gap = gap;
        self
    }

    pub fn set_padding(&mut self, padding: Insets) -> &mut Self {
        self.padding = padding;
        self
    }

    // --- Grouping ---

    pub fn size_group(&self) -> Option<&str> {
        self.size_group.as_deref()
    }

    pub fn end_group(&self) -> Option<&str> {
        self.end_group.as_deref()
    }

    pub fn component_id(&self) -> Option<&str> {
        self.component_id.as_deref()
    }

    /// An empty name clears the group.
    pub fn set_size_group(&mut self, group: impl Into<String>) -> &mut Self {
        self.size_group = non_empty(group);
        self
    }

    /// An empty name clears the group.
    pub fn set_end_group(&mut self, group: impl Into<String>) -> &mut Self {
        self.end_group = non_empty(group);
        self
    }

    /// An empty id clears the id.
    pub fn set_component_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.component_id = non_empty(id);
        self
    }

    // --- Positioning modes ---

    pub fn border_side(&self) -> BorderSide {
        self.border_side
    }

    pub fn set_border_side(&mut self, side: BorderSide) -> &mut Self {
        self.border_side = side;
        self
    }

    pub fn absolute(&self) -> Option<AbsolutePosition> {
        self.absolute
    }

    pub fn set_absolute(&mut self, position: AbsolutePosition) -> &mut Self {
        self.absolute = Some(position);
        self
    }

    pub fn clear_absolute(&mut self) -> &mut Self {
        self.absolute = None;
        self
    }

    pub fn hide_mode(&self) -> HideMode {
        self.hide_mode
    }

    pub fn set_hide_mode(&mut self, mode: HideMode) -> &mut Self {
        self.hide_mode = mode;
        self
    }

    /// Neither docked nor absolutely positioned.
    pub fn occupies_cell(&self) -> bool {
        !self.border_side.is_docked() && self.absolute.is_none()
    }
}
