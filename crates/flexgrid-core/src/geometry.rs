#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are logical units in `f32`. The solver never rounds; hosts that
//! draw on an integer grid round on their side of the boundary.

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutSize {
    pub width: f32,
    pub height: f32,
}

impl LayoutSize {
    /// Zero-sized value.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions are non-negative.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width >= 0.0 && self.height >= 0.0
    }

    /// Elementwise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }
}

impl From<(f32, f32)> for LayoutSize {
    fn from((width, height): (f32, f32)) -> Self {
        Self::new(width, height)
    }
}

/// Min/max bounds passed from a parent down to a child.
///
/// `max_*` defaults to `f32::INFINITY` (unbounded), `min_*` to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConstraints {
    pub min_width: f32,
    pub min_height: f32,
    pub max_width: f32,
    pub max_height: f32,
}

impl Default for LayoutConstraints {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl LayoutConstraints {
    /// No minimum, no maximum.
    pub const UNBOUNDED: Self = Self {
        min_width: 0.0,
        min_height: 0.0,
        max_width: f32::INFINITY,
        max_height: f32::INFINITY,
    };

    /// Create constraints with explicit bounds on both axes.
    #[inline]
    pub const fn new(min_width: f32, min_height: f32, max_width: f32, max_height: f32) -> Self {
        Self {
            min_width,
            min_height,
            max_width,
            max_height,
        }
    }

    /// Upper bounds only; minimums are zero.
    #[inline]
    pub const fn bounded(max_width: f32, max_height: f32) -> Self {
        Self::new(0.0, 0.0, max_width, max_height)
    }

    /// Tight constraints: `min == max` on both axes.
    #[inline]
    pub const fn tight(width: f32, height: f32) -> Self {
        Self::new(width, height, width, height)
    }

    /// Set both maximums.
    #[must_use]
    pub const fn with_max(mut self, max_width: f32, max_height: f32) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }

    /// Set both minimums.
    #[must_use]
    pub const fn with_min(mut self, min_width: f32, min_height: f32) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    /// Bounds are non-negative and `max >= min` on each axis.
    pub fn is_valid(&self) -> bool {
        self.max_width >= self.min_width
            && self.max_height >= self.min_height
            && self.max_width >= 0.0
            && self.max_height >= 0.0
            && self.min_width >= 0.0
            && self.min_height >= 0.0
    }

    /// Clamp a size into these bounds.
    ///
    /// The maximum is applied before the minimum, so when the bounds are
    /// inverted the minimum wins.
    pub fn constrain(&self, size: LayoutSize) -> LayoutSize {
        LayoutSize::new(
            size.width.min(self.max_width).max(self.min_width),
            size.height.min(self.max_height).max(self.min_height),
        )
    }
}

/// Insets for margins, padding and container borders.
///
/// Positional order follows the constraint language: top, left, bottom,
/// right.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Insets {
    /// No insets.
    pub const ZERO: Self = Self::all(0.0);

    /// Same value on every side.
    pub const fn all(val: f32) -> Self {
        Self {
            top: val,
            left: val,
            bottom: val,
            right: val,
        }
    }

    /// Vertical value on top/bottom, horizontal on left/right.
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            left: horizontal,
            bottom: vertical,
            right: horizontal,
        }
    }

    /// Create insets with specific values.
    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub fn horizontal_total(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub fn vertical_total(&self) -> f32 {
        self.top + self.bottom
    }
}

impl From<f32> for Insets {
    fn from(val: f32) -> Self {
        Self::all(val)
    }
}

impl From<(f32, f32, f32, f32)> for Insets {
    fn from((top, left, bottom, right): (f32, f32, f32, f32)) -> Self {
        Self::new(top, left, bottom, right)
    }
}

/// Position plus size of a laid-out rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Create new bounds.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Size component.
    #[inline]
    pub const fn size(&self) -> LayoutSize {
        LayoutSize::new(self.width, self.height)
    }

    /// Shrink by `insets` on every side.
    pub fn inset(&self, insets: Insets) -> Bounds {
        Bounds {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: self.width - insets.horizontal_total(),
            height: self.height - insets.vertical_total(),
        }
    }

    /// Grow by `insets` on every side.
    pub fn outset(&self, insets: Insets) -> Bounds {
        Bounds {
            x: self.x - insets.left,
            y: self.y - insets.top,
            width: self.width + insets.horizontal_total(),
            height: self.height + insets.vertical_total(),
        }
    }
}
