//! Integer screen-space rectangles.
//!
//! Coordinates follow the window: (0, 0) is the top-left corner, x grows right
//! and y grows down.

/// An axis-aligned rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle of the given size whose centre is `(center_x, center_y)`.
    pub fn from_center(center_x: i32, center_y: i32, width: i32, height: i32) -> Self {
        Self::new(center_x - width / 2, center_y - height / 2, width, height)
    }

    /// Creates a rectangle whose bottom-left corner is `(left, bottom)`.
    pub fn from_bottom_left(left: i32, bottom: i32, width: i32, height: i32) -> Self {
        Self::new(left, bottom - height, width, height)
    }

    /// Creates a rectangle whose left edge is `left` and whose vertical centre is `center_y`.
    pub fn from_mid_left(left: i32, center_y: i32, width: i32, height: i32) -> Self {
        Self::new(left, center_y - height / 2, width, height)
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Vertical centre.
    pub fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }
}
