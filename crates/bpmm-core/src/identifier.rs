//! Element identity allocation.
//!
//! Every element on a diagram carries an [`ElementId`] handed out by a
//! monotonic counter. The counter is the only global state in the engine and
//! can be rewound with [`reset_ids`] before a document is loaded, so loading
//! the same document twice yields the same ids.
//!
//! # Thread Safety
//!
//! Elements live on the thread that delivers input events, so the counter
//! normally has a single writer. It is a lock-free atomic shared by the whole
//! process, which keeps ids unique even when elements are created on other
//! threads. Ids issued before a [`reset_ids`] may be issued again after it.

use std::{
    fmt,
    num::NonZeroU32,
    sync::atomic::{AtomicU32, Ordering},
};

use log::debug;

/// Highest id issued since the last reset.
static MAX_ID: AtomicU32 = AtomicU32::new(0);

/// Process-unique, positive element identifier.
///
/// # Examples
///
/// ```
/// use bpmm_core::identifier::{self, ElementId};
///
/// identifier::reset_ids();
/// let first = ElementId::next();
/// let second = ElementId::next();
///
/// assert_eq!(first.get(), 1);
/// assert!(second > first);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(NonZeroU32);

impl ElementId {
    /// Issues a fresh id strictly greater than every id issued since the last reset.
    pub fn next() -> Self {
        Self(next_id())
    }

    /// Returns the numeric value of the id.
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Returns a fresh id value and advances the counter.
///
/// # Panics
///
/// Panics if more than `u32::MAX` ids are issued without a reset.
pub fn next_id() -> NonZeroU32 {
    let next = MAX_ID
        .fetch_add(1, Ordering::Relaxed)
        .checked_add(1)
        .expect("Element id counter overflowed");
    NonZeroU32::new(next).expect("Incremented counter is never zero")
}

/// Rewinds the id counter to zero.
///
/// Call this before deserializing a whole document so the ids assigned to
/// its elements are reproducible across loads.
pub fn reset_ids() {
    let previous_max = MAX_ID.swap(0, Ordering::Relaxed);
    debug!(previous_max = previous_max; "Resetting element id counter");
}
