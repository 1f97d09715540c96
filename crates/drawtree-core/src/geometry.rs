//! Geometric primitives for node placement.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height of a node box
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! drawtree uses the same coordinate system as draw.io:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Layout engines produce node *centers*; the draw.io document expects the
//! top-left corner of each shape, see [`Bounds::min_point`].

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use drawtree_core::geometry::Point;
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x(), 10.0);
/// assert_eq!(p.y(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Converts a point and size into a bounds rectangle
    ///
    /// The point is treated as the center of the bounds.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Represents the dimensions of a node box
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    ///
    /// # Examples
    ///
    /// ```
    /// # use drawtree_core::geometry::{Bounds, Point, Size};
    /// let bounds = Bounds::new_from_center(Point::new(100.0, 50.0), Size::new(160.0, 60.0));
    /// assert_eq!(bounds.min_x(), 20.0);
    /// assert_eq!(bounds.min_y(), 20.0);
    /// ```
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Merges two bounds to create a larger bounds that contains both.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_bounds_from_center() {
        let bounds = Point::new(80.0, 30.0).to_bounds(Size::new(160.0, 60.0));

        assert_approx_eq!(f32, bounds.min_x(), 0.0);
        assert_approx_eq!(f32, bounds.min_y(), 0.0);
        assert_approx_eq!(f32, bounds.max_x(), 160.0);
        assert_approx_eq!(f32, bounds.max_y(), 60.0);
        assert_eq!(bounds.min_point(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_bounds_merge() {
        let a = Point::new(0.0, 0.0).to_bounds(Size::new(10.0, 10.0));
        let b = Point::new(100.0, 50.0).to_bounds(Size::new(20.0, 20.0));

        let merged = a.merge(&b);
        assert_approx_eq!(f32, merged.min_x(), -5.0);
        assert_approx_eq!(f32, merged.min_y(), -5.0);
        assert_approx_eq!(f32, merged.width(), 115.0);
        assert_approx_eq!(f32, merged.height(), 65.0);
    }

    #[test]
    fn test_size_max() {
        let size = Size::new(10.0, 40.0).max(Size::new(30.0, 20.0));
        assert_eq!(size, Size::new(30.0, 40.0));
    }

    proptest! {
        #[test]
        fn prop_center_bounds_keep_size(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            w in 1.0f32..500.0,
            h in 1.0f32..500.0,
        ) {
            let bounds = Point::new(x, y).to_bounds(Size::new(w, h));
            prop_assert!((bounds.width() - w).abs() < 1e-3);
            prop_assert!((bounds.height() - h).abs() < 1e-3);

            let top_left = bounds.min_point();
            prop_assert!((top_left.x() - (x - w / 2.0)).abs() < 1e-3);
            prop_assert!((top_left.y() - (y - h / 2.0)).abs() < 1e-3);
        }
    }
}
