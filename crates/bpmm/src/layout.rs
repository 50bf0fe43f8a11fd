//! Frame layout and hit testing.
//!
//! An element's control area is split into two parts:
//!
//! ```text
//!  ┌──┬──────────────────┬──┐┌─┐
//!  │TL│                  │TR││A│  <- association anchor (square, top aligned)
//!  ├──┘                  └──┤└─┘
//!  │        content         │
//!  ├──┐                  ┌──┤
//!  │BL│                  │BR│
//!  └──┴──────────────────┴──┘
//!  |<------- frame -------->|
//!  |<---------- control ------->|
//! ```
//!
//! The frame takes [`FRAME_RATIO`] of the control and carries the four
//! corner resize handles; the anchor strip takes the remaining
//! [`ANCHOR_RATIO`] of the control width on the trailing edge and is used
//! only to start associations. The split is fixed for every element.

use bpmm_core::geometry::{Bounds, Point, Size};

/// Minimum frame extent on either axis.
pub const MIN_SIZE: f64 = 100.0;

/// Share of the control occupied by the frame.
pub const FRAME_RATIO: f64 = 0.93;

/// Share of the control width occupied by the anchor strip.
pub const ANCHOR_RATIO: f64 = 0.07;

/// Edge length of a corner resize handle.
pub const HANDLE_SIZE: f64 = 10.0;

/// One of the four frame corners carrying a resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Returns every corner in handle order.
    pub fn all() -> [Corner; 4] {
        [
            Corner::TopLeft,
            Corner::TopRight,
            Corner::BottomLeft,
            Corner::BottomRight,
        ]
    }

    /// True when the corner sits on the left (leading) edge.
    pub fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    /// True when the corner sits on the top (leading) edge.
    pub fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

/// Part of an element a pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    /// The content-bearing frame; presses here start a move drag.
    Frame,
    /// A corner resize handle.
    ResizeHandle(Corner),
    /// The association anchor strip.
    Anchor,
}

/// Element-local layout derived from the frame size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLayout {
    frame: Size,
}

impl FrameLayout {
    /// Creates a layout for a frame of the given size.
    pub fn new(frame: Size) -> Self {
        Self { frame }
    }

    /// Derives the frame from a full control (rendered) size.
    pub fn from_control_size(control: Size) -> Self {
        Self {
            frame: control.scale(FRAME_RATIO),
        }
    }

    /// Returns the frame size.
    pub fn frame_size(&self) -> Size {
        self.frame
    }

    /// Returns the full control size, frame plus anchor strip.
    pub fn control_size(&self) -> Size {
        self.frame.scale(1.0 / FRAME_RATIO)
    }

    /// Frame bounds in element-local coordinates.
    pub fn frame_bounds(&self) -> Bounds {
        Bounds::new_from_top_left(Point::default(), self.frame)
    }

    /// Anchor strip bounds in element-local coordinates.
    pub fn anchor_bounds(&self) -> Bounds {
        let side = self.control_size().width() * ANCHOR_RATIO;
        Bounds::new_from_top_left(Point::new(self.frame.width(), 0.0), Size::square(side))
    }

    /// Bounds of a corner resize handle in element-local coordinates.
    pub fn handle_bounds(&self, corner: Corner) -> Bounds {
        let x = if corner.is_left() {
            0.0
        } else {
            self.frame.width() - HANDLE_SIZE
        };
        let y = if corner.is_top() {
            0.0
        } else {
            self.frame.height() - HANDLE_SIZE
        };
        Bounds::new_from_top_left(Point::new(x, y), Size::square(HANDLE_SIZE))
    }

    /// Maps an element-local point to the region it hits.
    ///
    /// Handles take precedence over the frame they sit on.
    pub fn hit_test(&self, local: Point) -> Option<HitRegion> {
        if self.anchor_bounds().contains(local) {
            return Some(HitRegion::Anchor);
        }
        if let Some(corner) = Corner::all()
            .into_iter()
            .find(|&corner| self.handle_bounds(corner).contains(local))
        {
            return Some(HitRegion::ResizeHandle(corner));
        }
        self.frame_bounds()
            .contains(local)
            .then_some(HitRegion::Frame)
    }
}
