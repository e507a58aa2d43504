//! Schedulable slots.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Class, TimeInterval};

/// One period of one class that needs an outcome: a lesson or free.
///
/// Slots are the keys of a [`Routine`](super::Routine).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    /// Class the period belongs to.
    pub class: Class,
    /// When the period takes place.
    #[serde(flatten)]
    pub interval: TimeInterval,
}

impl Slot {
    /// Creates a new slot.
    pub fn new(class: impl Into<Class>, interval: TimeInterval) -> Self {
        Self {
            class: class.into(),
            interval,
        }
    }

    /// Weekday of the slot.
    #[inline]
    pub fn day(&self) -> u8 {
        self.interval.day()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.class, self.interval)
    }
}
