//! Point-space geometry primitives used by the layout engine.
//!
//! All values are in layout points (`f64`). Rectangles are origin + size with the
//! origin at the top-left corner and y growing downwards.

/// Width and height in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// Zero-sized extent.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Create a rectangle from origin and extent.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at `(x, y)` with the given size.
    pub const fn from_origin_size(x: f64, y: f64, size: Size) -> Self {
        Self::new(x, y, size.width, size.height)
    }

    /// Left edge.
    pub fn min_x(&self) -> f64 {
        self.x
    }

    /// Right edge.
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge.
    pub fn min_y(&self) -> f64 {
        self.y
    }

    /// Bottom edge.
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Extent of this rectangle.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// True when either dimension is zero (or negative).
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Bit-level equality, used where layouts must be reproduced exactly.
    pub fn bit_eq(&self, other: &Rect) -> bool {
        self.x.to_bits() == other.x.to_bits()
            && self.y.to_bits() == other.y.to_bits()
            && self.width.to_bits() == other.width.to_bits()
            && self.height.to_bits() == other.height.to_bits()
    }
}

/// Insets from each edge of a container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    /// Inset from the top edge.
    pub top: f64,
    /// Inset from the left edge.
    pub left: f64,
    /// Inset from the bottom edge.
    pub bottom: f64,
    /// Inset from the right edge.
    pub right: f64,
}

impl EdgeInsets {
    /// The same inset on all four edges.
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            left: value,
            bottom: value,
            right: value,
        }
    }

    /// Sum of left and right insets.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let rect = Rect::new(16.0, 20.0, 36.0, 40.0);
        assert_eq!(rect.min_x(), 16.0);
        assert_eq!(rect.max_x(), 52.0);
        assert_eq!(rect.min_y(), 20.0);
        assert_eq!(rect.max_y(), 60.0);
    }

    #[test]
    fn zero_rect_is_empty() {
        assert!(Rect::ZERO.is_empty());
        assert!(Rect::new(0.0, 0.0, 10.0, 0.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 10.0, 1.0).is_empty());
    }

    #[test]
    fn bit_eq_distinguishes_negative_zero() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(-0.0, 0.0, 1.0, 1.0);
        assert_eq!(a, b, "PartialEq treats 0.0 == -0.0");
        assert!(!a.bit_eq(&b));
        assert!(a.bit_eq(&a));
    }

    #[test]
    fn uniform_insets() {
        let insets = EdgeInsets::uniform(16.0);
        assert_eq!(insets.top, 16.0);
        assert_eq!(insets.bottom, 16.0);
        assert_eq!(insets.horizontal(), 32.0);
    }

    #[test]
    fn from_origin_size_keeps_extent() {
        let rect = Rect::from_origin_size(4.0, 8.0, Size::new(84.0, 16.0));
        assert_eq!(rect.size(), Size::new(84.0, 16.0));
        assert_eq!(rect.max_x(), 88.0);
    }
}
