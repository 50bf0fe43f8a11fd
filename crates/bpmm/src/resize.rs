//! Element geometry and the corner-handle resize engine.
//!
//! [`Geometry`] owns an element's position in host space and the size of its
//! frame. Resizing is driven by corner-handle drag deltas; each axis is
//! clamped on its own so that neither dimension ever falls to or below
//! [`MIN_SIZE`].

use log::trace;

use bpmm_core::geometry::{Point, Size};

use crate::layout::{Corner, FrameLayout, MIN_SIZE};

/// Position and frame size of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    position: Point,
    size: Size,
}

impl Geometry {
    /// Creates geometry at the given host position with the given frame size.
    pub fn new(position: Point, size: Size) -> Self {
        Self { position, size }
    }

    /// Top-left corner of the element in host coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Frame size, excluding the anchor strip.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Layout of the frame and anchor strip for the current size.
    pub fn layout(&self) -> FrameLayout {
        FrameLayout::new(self.size)
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Replaces the frame size, raising each axis to at least [`MIN_SIZE`].
    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size.max(Size::square(MIN_SIZE));
    }

    /// Applies a corner-handle drag delta.
    ///
    /// Left corners shrink width by `delta.x`, right corners grow it; top
    /// corners shrink height by `delta.y`, bottom corners grow it. An axis
    /// whose candidate extent would not stay above [`MIN_SIZE`] ignores its
    /// delta for this call while the other axis still applies. Leading
    /// (left, top) axes also move the position by the applied delta so the
    /// opposite corner stays put.
    ///
    /// Returns the delta that was actually applied per axis.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bpmm::resize::Geometry;
    /// # use bpmm::layout::Corner;
    /// # use bpmm::geometry::{Point, Size};
    /// let mut geometry = Geometry::new(Point::new(0.0, 0.0), Size::new(200.0, 200.0));
    ///
    /// let applied = geometry.resize(Corner::TopLeft, Point::new(20.0, 150.0));
    ///
    /// // Width shrinks, height would drop to 50 and is left alone.
    /// assert_eq!(applied, Point::new(20.0, 0.0));
    /// assert_eq!(geometry.size(), Size::new(180.0, 200.0));
    /// assert_eq!(geometry.position(), Point::new(20.0, 0.0));
    /// ```
    pub fn resize(&mut self, corner: Corner, delta: Point) -> Point {
        let width = self.size.width();
        let height = self.size.height();

        let candidate_width = if corner.is_left() {
            width - delta.x()
        } else {
            width + delta.x()
        };
        let candidate_height = if corner.is_top() {
            height - delta.y()
        } else {
            height + delta.y()
        };

        let x_change = if candidate_width > MIN_SIZE {
            delta.x()
        } else {
            0.0
        };
        let y_change = if candidate_height > MIN_SIZE {
            delta.y()
        } else {
            0.0
        };

        let mut position = self.position;
        let new_width = if corner.is_left() {
            position = position.with_x(position.x() + x_change);
            width - x_change
        } else {
            width + x_change
        };
        let new_height = if corner.is_top() {
            position = position.with_y(position.y() + y_change);
            height - y_change
        } else {
            height + y_change
        };

        self.position = position;
        self.size = Size::new(new_width, new_height);

        let applied = Point::new(x_change, y_change);
        if applied != delta {
            trace!(
                corner:?,
                requested_x = delta.x(),
                requested_y = delta.y(),
                applied_x = x_change,
                applied_y = y_change;
                "Resize delta clamped at minimum size"
            );
        }
        applied
    }
}
