//! Pointer interaction state machine.
//!
//! One pointer stream drives three gestures on an element:
//!
//! - **Move**: press on the frame, move, release. The element captures the
//!   pointer on press so every later event of the gesture comes back to it.
//! - **Resize**: press on a corner handle, move, release. Moves become
//!   handle deltas for the resize engine.
//! - **Association**: a press on the anchor strip starts an association; a
//!   release on an element that never saw the matching press ends one.
//!
//! ```text
//!            press(frame)              move / Moved
//!   Idle ───────────────────► Dragging ◄──────────┐
//!    ▲ │                        │  └──────────────┘
//!    │ │ release / AssociationEnded
//!    │ └──┐                     │ release or capture lost / MoveEnded
//!    └────┘◄────────────────────┘
//! ```
//!
//! Every event an element consumes is marked handled.

use log::{debug, trace};

use bpmm_core::geometry::Point;

use crate::{
    Element,
    layout::{Corner, HitRegion},
    notification::{Notification, PointerEvent, PointerId},
};

/// Transient gesture state of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum InteractionState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Moving the element with a captured pointer.
    Dragging {
        pointer: PointerId,
        /// Press position relative to the element origin.
        anchor_offset: Point,
    },
    /// Dragging a corner handle with a captured pointer.
    Resizing {
        pointer: PointerId,
        corner: Corner,
        /// Handle position the next move is measured from.
        last: Point,
    },
}

impl InteractionState {
    /// Pointer currently captured by the gesture, if any.
    pub fn captured_pointer(&self) -> Option<PointerId> {
        match *self {
            InteractionState::Idle => None,
            InteractionState::Dragging { pointer, .. } | InteractionState::Resizing { pointer, .. } => {
                Some(pointer)
            }
        }
    }
}

/// Kind of pointer input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Pressed,
    Moved,
    Released,
}

impl Element {
    /// True between a press on the frame and the matching release or capture loss.
    pub fn is_dragging(&self) -> bool {
        matches!(self.interaction, InteractionState::Dragging { .. })
    }

    /// Current gesture state.
    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    /// Pointer this element has captured, if any.
    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.interaction.captured_pointer()
    }

    /// Offset of the press position from the element origin during a drag.
    pub fn drag_anchor_offset(&self) -> Option<Point> {
        match self.interaction {
            InteractionState::Dragging { anchor_offset, .. } => Some(anchor_offset),
            _ => None,
        }
    }

    /// Maps a host-space point to the part of this element under it.
    pub fn hit_test(&self, point: Point) -> Option<HitRegion> {
        self.layout().hit_test(point.sub_point(self.position()))
    }

    /// Routes a host pointer event to the matching handler.
    ///
    /// Events from the captured pointer always go to the active gesture.
    /// Other events are routed by hit region; events that miss the element
    /// are left unhandled.
    pub fn dispatch_pointer(&mut self, action: PointerAction, event: &mut PointerEvent) {
        if self.captured_pointer() == Some(event.pointer()) {
            match (self.interaction, action) {
                (InteractionState::Resizing { .. }, PointerAction::Moved) => {
                    self.on_handle_moved(event)
                }
                (InteractionState::Resizing { .. }, PointerAction::Released) => {
                    self.on_handle_released(event)
                }
                (_, PointerAction::Pressed) => self.on_frame_pressed(event),
                (_, PointerAction::Moved) => self.on_frame_moved(event),
                (_, PointerAction::Released) => self.on_frame_released(event),
            }
            return;
        }

        let Some(region) = self.hit_test(event.position()) else {
            return;
        };
        match (region, action) {
            (HitRegion::Anchor, PointerAction::Pressed) => self.on_anchor_pressed(event),
            (HitRegion::ResizeHandle(corner), PointerAction::Pressed) => {
                self.on_handle_pressed(corner, event)
            }
            (_, PointerAction::Pressed) => self.on_frame_pressed(event),
            (_, PointerAction::Moved) => self.on_frame_moved(event),
            (_, PointerAction::Released) => self.on_frame_released(event),
        }
    }

    /// Press on the frame: starts a move drag and captures the pointer.
    ///
    /// A press from another pointer while a gesture is active is consumed
    /// without effect.
    pub fn on_frame_pressed(&mut self, event: &mut PointerEvent) {
        if self.interaction == InteractionState::Idle {
            let anchor_offset = event.position().sub_point(self.position());
            self.interaction = InteractionState::Dragging {
                pointer: event.pointer(),
                anchor_offset,
            };
            debug!(
                id:% = self.id(),
                offset_x = anchor_offset.x(),
                offset_y = anchor_offset.y();
                "Drag started"
            );
        }
        event.mark_handled();
    }

    /// Pointer moved over the frame: follows the pointer while dragging.
    pub fn on_frame_moved(&mut self, event: &mut PointerEvent) {
        event.mark_handled();
        match self.interaction {
            InteractionState::Dragging {
                pointer,
                anchor_offset,
            } if pointer == event.pointer() => {
                let position = event.position().sub_point(anchor_offset);
                self.set_position(position);
                trace!(id:% = self.id(), x = position.x(), y = position.y(); "Element moved");
                self.emit(Notification::Moved(*event));
            }
            _ => {}
        }
    }

    /// Pointer released over the frame.
    ///
    /// Ends a drag by the same pointer. A release without a preceding press
    /// on this element ends a pending association instead.
    pub fn on_frame_released(&mut self, event: &mut PointerEvent) {
        match self.interaction {
            InteractionState::Dragging { pointer, .. } if pointer == event.pointer() => {
                event.mark_handled();
                self.end_drag(event, "Drag ended");
            }
            InteractionState::Idle => {
                event.mark_handled();
                debug!(id:% = self.id(); "Association ended");
                self.emit(Notification::AssociationEnded);
            }
            _ => event.mark_handled(),
        }
    }

    /// The host revoked pointer capture; an active drag ends as if released.
    pub fn on_capture_lost(&mut self, event: &mut PointerEvent) {
        match self.interaction {
            InteractionState::Dragging { pointer, .. } if pointer == event.pointer() => {
                self.end_drag(event, "Drag ended by capture loss");
            }
            InteractionState::Resizing { pointer, .. } if pointer == event.pointer() => {
                self.interaction = InteractionState::Idle;
            }
            _ => {}
        }
        event.mark_handled();
    }

    /// Press on the anchor strip: starts an association.
    ///
    /// Neither captures the pointer nor changes the drag state.
    pub fn on_anchor_pressed(&mut self, event: &mut PointerEvent) {
        debug!(id:% = self.id(); "Association started");
        event.mark_handled();
        self.emit(Notification::AssociationStarted(*event));
    }

    /// Press on a corner handle: starts a resize and captures the pointer.
    pub fn on_handle_pressed(&mut self, corner: Corner, event: &mut PointerEvent) {
        if self.interaction == InteractionState::Idle {
            self.interaction = InteractionState::Resizing {
                pointer: event.pointer(),
                corner,
                last: event.position(),
            };
        }
        event.mark_handled();
    }

    /// Applies a handle drag delta directly, for hosts that track handle drags themselves.
    ///
    /// Returns the delta actually applied per axis.
    pub fn on_handle_dragged(&mut self, corner: Corner, delta: Point) -> Point {
        self.geometry_mut().resize(corner, delta)
    }

    fn on_handle_moved(&mut self, event: &mut PointerEvent) {
        if let InteractionState::Resizing {
            pointer,
            corner,
            last,
        } = self.interaction
        {
            // Only the applied part moves the handle; a clamped axis keeps
            // its handle where it was.
            let applied = self.on_handle_dragged(corner, event.position().sub_point(last));
            self.interaction = InteractionState::Resizing {
                pointer,
                corner,
                last: last.add_point(applied),
            };
        }
        event.mark_handled();
    }

    fn on_handle_released(&mut self, event: &mut PointerEvent) {
        self.interaction = InteractionState::Idle;
        debug!(
            id:% = self.id(),
            width = self.size().width(),
            height = self.size().height();
            "Resize ended"
        );
        event.mark_handled();
    }

    fn end_drag(&mut self, event: &PointerEvent, message: &str) {
        self.interaction = InteractionState::Idle;
        debug!(id:% = self.id(), reason = message; "Capture released");
        self.emit(Notification::MoveEnded(*event));
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use bpmm_core::{category::Category, geometry::Size};

    use super::*;

    type Recorded = Rc<RefCell<Vec<Notification>>>;

    fn element_with_recorder() -> (Element, Recorded) {
        let mut element = Element::new(Category::Goal);
        element.set_position(Point::new(100.0, 100.0));
        let recorded: Recorded = Rc::default();
        let sink = Rc::clone(&recorded);
        element.subscribe(move |_, notification| sink.borrow_mut().push(notification.clone()));
        (element, recorded)
    }

    fn event(x: f64, y: f64) -> PointerEvent {
        PointerEvent::new(PointerId(1), Point::new(x, y))
    }

    fn count(recorded: &Recorded, predicate: impl Fn(&Notification) -> bool) -> usize {
        recorded.borrow().iter().filter(|n| predicate(n)).count()
    }

    #[test]
    fn test_press_move_release_notifications() {
        let (mut element, recorded) = element_with_recorder();

        element.on_frame_pressed(&mut event(150.0, 150.0));
        assert!(element.is_dragging());
        assert_eq!(element.drag_anchor_offset(), Some(Point::new(50.0, 50.0)));

        element.on_frame_moved(&mut event(160.0, 170.0));
        element.on_frame_moved(&mut event(200.0, 210.0));
        element.on_frame_moved(&mut event(250.0, 150.0));
        element.on_frame_released(&mut event(250.0, 150.0));

        assert_eq!(count(&recorded, |n| matches!(n, Notification::Moved(_))), 3);
        assert_eq!(count(&recorded, |n| matches!(n, Notification::MoveEnded(_))), 1);
        assert_eq!(count(&recorded, |n| *n == Notification::AssociationEnded), 0);
        assert!(!element.is_dragging());
        assert_eq!(element.position(), Point::new(200.0, 100.0));
    }

    #[test]
    fn test_release_without_press_ends_association() {
        let (mut element, recorded) = element_with_recorder();

        let mut release = event(150.0, 150.0);
        element.on_frame_released(&mut release);

        assert!(release.is_handled());
        assert_eq!(*recorded.borrow(), vec![Notification::AssociationEnded]);
    }

    #[test]
    fn test_move_while_idle_is_handled_without_effect() {
        let (mut element, recorded) = element_with_recorder();

        let mut moved = event(300.0, 300.0);
        element.on_frame_moved(&mut moved);

        assert!(moved.is_handled());
        assert!(recorded.borrow().is_empty());
        assert_eq!(element.position(), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_anchor_press_keeps_drag_state() {
        let (mut element, recorded) = element_with_recorder();

        let mut press = event(290.0, 105.0);
        element.on_anchor_pressed(&mut press);

        assert!(press.is_handled());
        assert!(!element.is_dragging());
        assert_eq!(element.captured_pointer(), None);
        assert_eq!(*recorded.borrow(), vec![Notification::AssociationStarted(press)]);
    }

    #[test]
    fn test_anchor_press_during_drag_keeps_dragging() {
        let (mut element, recorded) = element_with_recorder();

        element.on_frame_pressed(&mut event(150.0, 150.0));
        element.on_anchor_pressed(&mut PointerEvent::new(PointerId(2), Point::new(290.0, 105.0)));

        assert!(element.is_dragging());
        assert_eq!(
            count(&recorded, |n| matches!(n, Notification::AssociationStarted(_))),
            1
        );
    }

    #[test]
    fn test_capture_lost_ends_drag() {
        let (mut element, recorded) = element_with_recorder();

        element.on_frame_pressed(&mut event(150.0, 150.0));
        element.on_capture_lost(&mut event(150.0, 150.0));

        assert!(!element.is_dragging());
        assert_eq!(count(&recorded, |n| matches!(n, Notification::MoveEnded(_))), 1);
    }

    #[test]
    fn test_second_pointer_cannot_steal_drag() {
        let (mut element, recorded) = element_with_recorder();

        element.on_frame_pressed(&mut event(150.0, 150.0));
        let mut other = PointerEvent::new(PointerId(7), Point::new(120.0, 120.0));
        element.on_frame_pressed(&mut other);
        element.on_frame_moved(&mut other);
        element.on_frame_released(&mut other);

        assert!(other.is_handled());
        assert!(element.is_dragging());
        assert_eq!(element.captured_pointer(), Some(PointerId(1)));
        assert!(recorded.borrow().is_empty());
    }

    #[test]
    fn test_dispatch_routes_by_region() {
        let (mut element, recorded) = element_with_recorder();

        // Anchor strip sits right of the 200 wide frame.
        let mut anchor_press = event(305.0, 105.0);
        element.dispatch_pointer(PointerAction::Pressed, &mut anchor_press);
        assert!(anchor_press.is_handled());
        assert!(!element.is_dragging());

        let mut frame_press = event(200.0, 200.0);
        element.dispatch_pointer(PointerAction::Pressed, &mut frame_press);
        assert!(element.is_dragging());

        // Captured pointer keeps routing to the drag even outside the element.
        element.dispatch_pointer(PointerAction::Moved, &mut event(1000.0, 1000.0));
        element.dispatch_pointer(PointerAction::Released, &mut event(1000.0, 1000.0));

        assert_eq!(element.position(), Point::new(900.0, 900.0));
        assert_eq!(
            count(&recorded, |n| matches!(n, Notification::AssociationStarted(_))),
            1
        );
        assert_eq!(count(&recorded, |n| matches!(n, Notification::MoveEnded(_))), 1);
    }

    #[test]
    fn test_dispatch_ignores_misses() {
        let (mut element, recorded) = element_with_recorder();

        let mut miss = event(10.0, 10.0);
        element.dispatch_pointer(PointerAction::Released, &mut miss);

        assert!(!miss.is_handled());
        assert!(recorded.borrow().is_empty());
    }

    #[test]
    fn test_dispatch_handle_drag_resizes() {
        let (mut element, recorded) = element_with_recorder();

        element.dispatch_pointer(PointerAction::Pressed, &mut event(295.0, 295.0));
        assert!(matches!(
            element.interaction(),
            InteractionState::Resizing {
                corner: Corner::BottomRight,
                ..
            }
        ));
        assert!(!element.is_dragging());

        element.dispatch_pointer(PointerAction::Moved, &mut event(305.0, 315.0));
        element.dispatch_pointer(PointerAction::Moved, &mut event(325.0, 325.0));
        element.dispatch_pointer(PointerAction::Released, &mut event(325.0, 325.0));

        assert_eq!(element.size(), Size::new(230.0, 230.0));
        assert_eq!(element.position(), Point::new(100.0, 100.0));
        assert_eq!(element.interaction(), InteractionState::Idle);
        assert!(recorded.borrow().is_empty());
    }

    #[test]
    fn test_handle_dragged_top_left() {
        let (mut element, _) = element_with_recorder();

        let applied = element.on_handle_dragged(Corner::TopLeft, Point::new(20.0, 30.0));

        assert_eq!(applied, Point::new(20.0, 30.0));
        assert_eq!(element.position(), Point::new(120.0, 130.0));
        assert_eq!(element.size(), Size::new(180.0, 170.0));
    }

    #[test]
    fn test_clamped_handle_stays_with_element() {
        let (mut element, _) = element_with_recorder();

        element.dispatch_pointer(PointerAction::Pressed, &mut event(295.0, 295.0));
        // Would shrink the width to 50; the width axis is discarded.
        element.dispatch_pointer(PointerAction::Moved, &mut event(145.0, 295.0));
        assert_eq!(element.size(), Size::new(200.0, 200.0));

        element.dispatch_pointer(PointerAction::Moved, &mut event(295.0, 295.0));
        assert_eq!(element.size(), Size::new(200.0, 200.0));

        element.dispatch_pointer(PointerAction::Moved, &mut event(305.0, 295.0));
        element.dispatch_pointer(PointerAction::Released, &mut event(305.0, 295.0));
        assert_eq!(element.size(), Size::new(210.0, 200.0));
    }

    #[test]
    fn test_capture_lost_ends_resize_quietly() {
        let (mut element, recorded) = element_with_recorder();

        element.dispatch_pointer(PointerAction::Pressed, &mut event(295.0, 295.0));
        element.dispatch_pointer(PointerAction::Moved, &mut event(305.0, 305.0));

        let mut lost = event(305.0, 305.0);
        element.on_capture_lost(&mut lost);

        assert!(lost.is_handled());
        assert_eq!(element.interaction(), InteractionState::Idle);
        assert_eq!(element.captured_pointer(), None);
        assert_eq!(element.size(), Size::new(210.0, 210.0));
        assert!(recorded.borrow().is_empty());

        // Later moves from the same pointer no longer resize.
        element.dispatch_pointer(PointerAction::Moved, &mut event(400.0, 400.0));
        assert_eq!(element.size(), Size::new(210.0, 210.0));
    }

    #[test]
    fn test_capture_lost_for_other_pointer_keeps_resizing() {
        let (mut element, _) = element_with_recorder();

        element.dispatch_pointer(PointerAction::Pressed, &mut event(295.0, 295.0));
        element.on_capture_lost(&mut PointerEvent::new(PointerId(9), Point::new(0.0, 0.0)));

        assert_eq!(element.captured_pointer(), Some(PointerId(1)));
    }

    #[test]
    fn test_second_pointer_cannot_disturb_resize() {
        let (mut element, recorded) = element_with_recorder();
        let other = |x, y| PointerEvent::new(PointerId(4), Point::new(x, y));

        element.dispatch_pointer(PointerAction::Pressed, &mut event(295.0, 295.0));

        let mut press = other(200.0, 200.0);
        element.dispatch_pointer(PointerAction::Pressed, &mut press);
        let mut handle_press = other(105.0, 105.0);
        element.dispatch_pointer(PointerAction::Pressed, &mut handle_press);
        let mut moved = other(250.0, 250.0);
        element.dispatch_pointer(PointerAction::Moved, &mut moved);
        let mut release = other(250.0, 250.0);
        element.dispatch_pointer(PointerAction::Released, &mut release);

        for handled in [press, handle_press, moved, release] {
            assert!(handled.is_handled());
        }
        assert!(matches!(
            element.interaction(),
            InteractionState::Resizing {
                pointer: PointerId(1),
                corner: Corner::BottomRight,
                ..
            }
        ));
        assert_eq!(element.position(), Point::new(100.0, 100.0));
        assert_eq!(element.size(), Size::new(200.0, 200.0));
        assert!(recorded.borrow().is_empty());

        element.dispatch_pointer(PointerAction::Moved, &mut event(305.0, 305.0));
        assert_eq!(element.size(), Size::new(210.0, 210.0));
    }
}
