//! BPMM - interaction and serialization engine for Business Process Modeling
//! Metamodel diagram elements.
//!
//! Every box on a BPMM diagram (Vision, Goal, Strategy, Note, ...) is an
//! [`Element`]. The engine handles what all of them share:
//!
//! - moving by dragging the frame ([`interaction`]),
//! - resizing from the four corner handles ([`resize`]),
//! - starting and ending associations ([`interaction`]),
//! - the two-step delete confirmation ([`prompt`]),
//! - converting to and from flat JSON fragments ([`document`]).
//!
//! The host canvas feeds pointer events in and listens for
//! [`Notification`]s coming out.
//!
//! # Examples
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! use bpmm::{Element, Notification, PointerEvent, PointerId};
//! use bpmm::{category::Category, geometry::Point};
//!
//! let mut goal = Element::new(Category::Goal);
//! let moves = Rc::new(RefCell::new(0));
//! let counter = Rc::clone(&moves);
//! goal.subscribe(move |_, notification| {
//!     if matches!(notification, Notification::Moved(_)) {
//!         *counter.borrow_mut() += 1;
//!     }
//! });
//!
//! let pointer = PointerId(1);
//! goal.on_frame_pressed(&mut PointerEvent::new(pointer, Point::new(20.0, 20.0)));
//! goal.on_frame_moved(&mut PointerEvent::new(pointer, Point::new(70.0, 45.0)));
//! goal.on_frame_released(&mut PointerEvent::new(pointer, Point::new(70.0, 45.0)));
//!
//! assert_eq!(goal.position(), Point::new(50.0, 25.0));
//! assert_eq!(*moves.borrow(), 1);
//! ```

pub mod config;
pub mod content;
pub mod document;
pub mod interaction;
pub mod layout;
pub mod notification;
pub mod prompt;
pub mod resize;

mod element;
mod error;

pub use bpmm_core::{category, geometry, identifier};

pub use document::{LoadedDocument, load_document, save_document};
pub use element::Element;
pub use error::BpmmError;
pub use notification::{Notification, PointerEvent, PointerId, Subscription};
