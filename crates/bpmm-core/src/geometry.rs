//! Geometric primitives for element placement and hit testing.
//!
//! This module provides the geometric types used by BPMM elements to track
//! where they sit on the host canvas, how large their frame is, and which
//! region a pointer landed on.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in host canvas space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! The host canvas uses a screen-style coordinate system:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! Element positions are the top-left corner of the element, not its center.

/// A 2D point in host canvas coordinate space.
///
/// Points use `f64` coordinates, the same precision documents are written
/// with, and provide the small amount of vector math the interaction engine
/// needs (offsets and translations).
///
/// # Examples
///
/// ```
/// # use bpmm_core::geometry::Point;
/// let pointer = Point::new(150.0, 90.0);
/// let origin = Point::new(100.0, 50.0);
///
/// // Pointer position relative to the element origin
/// let offset = pointer.sub_point(origin);
/// assert_eq!(offset.x(), 50.0);
/// assert_eq!(offset.y(), 40.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Adds another point to this point, returning a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bpmm_core::geometry::Point;
    /// let position = Point::new(100.0, 50.0);
    /// let delta = Point::new(10.0, -5.0);
    ///
    /// let moved = position.add_point(delta);
    /// assert_eq!(moved.x(), 110.0);
    /// assert_eq!(moved.y(), 45.0);
    /// ```
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns a square size with the same extent on both axes
    pub fn square(extent: f64) -> Self {
        Self {
            width: extent,
            height: extent,
        }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f64) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f64 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f64 {
        self.min_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Returns true if the point lies inside the bounds.
    ///
    /// The minimum edges are inclusive and the maximum edges exclusive, so two
    /// bounds sharing an edge never both claim a point on it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bpmm_core::geometry::{Bounds, Point, Size};
    /// let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
    ///
    /// assert!(bounds.contains(Point::new(0.0, 0.0)));
    /// assert!(bounds.contains(Point::new(9.5, 9.5)));
    /// assert!(!bounds.contains(Point::new(10.0, 5.0)));
    /// ```
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x && point.x < self.max_x && point.y >= self.min_y && point.y < self.max_y
    }
}
