//! Notifications an element sends up to its host.
//!
//! Hosts register listeners with [`Element::subscribe`](crate::Element::subscribe)
//! before feeding input to the element. Every listener receives the id of
//! the element that emitted the notification, so one closure can serve a
//! whole page of elements.

use std::fmt;

use bpmm_core::{geometry::Point, identifier::ElementId};

/// Identifies one physical pointer (mouse, pen, touch contact).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u32);

/// A pointer input event delivered by the host.
///
/// Positions are in host (parent canvas) coordinates. The element marks
/// every event it consumes as handled so the host can stop routing it to
/// siblings underneath.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pointer: PointerId,
    position: Point,
    handled: bool,
}

impl PointerEvent {
    /// Creates an unhandled event for `pointer` at the given host position.
    pub fn new(pointer: PointerId, position: Point) -> Self {
        Self {
            pointer,
            position,
            handled: false,
        }
    }

    /// The pointer that produced this event.
    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    /// Host-space position of the pointer.
    pub fn position(&self) -> Point {
        self.position
    }

    /// True once an element has consumed this event.
    pub fn is_handled(&self) -> bool {
        self.handled
    }

    pub(crate) fn mark_handled(&mut self) {
        self.handled = true;
    }
}

/// Notification emitted by an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// The element moved during a drag.
    Moved(PointerEvent),
    /// A move drag finished.
    MoveEnded(PointerEvent),
    /// An association drag starts at this element's anchor.
    AssociationStarted(PointerEvent),
    /// A pending association ends on this element.
    AssociationEnded,
    /// The user confirmed deleting this element.
    DeleteRequested,
}

/// Handle returned by `subscribe`, used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Box<dyn FnMut(ElementId, &Notification)>;

/// Ordered list of notification listeners.
#[derive(Default)]
pub(crate) struct Listeners {
    next: u64,
    entries: Vec<(Subscription, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Listener) -> Subscription {
        self.next += 1;
        let subscription = Subscription(self.next);
        self.entries.push((subscription, listener));
        subscription
    }

    pub(crate) fn remove(&mut self, subscription: Subscription) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != subscription);
        self.entries.len() != before
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn emit(&mut self, source: ElementId, notification: &Notification) {
        for (_, listener) in &mut self.entries {
            listener(source, notification);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
