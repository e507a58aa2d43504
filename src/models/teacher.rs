//! Teacher model.
//!
//! A teacher is an identity ([`TeacherId`]) plus the weekly windows in
//! which they can teach. Availability is fixed at construction and read
//! by the admissibility rules during search.

use serde::{Deserialize, Serialize};

use super::{TeacherId, TimeInterval};

/// A teacher and their availability windows.
///
/// Teachers are compared through [`Teacher::id`]; the availability list is
/// descriptive and never part of identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier (the teacher's name).
    #[serde(rename = "name")]
    pub id: TeacherId,
    /// Windows in which the teacher can take a period.
    #[serde(default)]
    pub availability: Vec<TimeInterval>,
}

impl Teacher {
    /// Creates a teacher with no availability.
    pub fn new(id: impl Into<TeacherId>) -> Self {
        Self {
            id: id.into(),
            availability: Vec::new(),
        }
    }

    /// Adds an availability window.
    pub fn with_window(mut self, window: TimeInterval) -> Self {
        self.availability.push(window);
        self
    }

    /// Adds several availability windows.
    pub fn with_windows(mut self, windows: impl IntoIterator<Item = TimeInterval>) -> Self {
        self.availability.extend(windows);
        self
    }

    /// Whether some availability window fully contains `interval`.
    pub fn is_available(&self, interval: &TimeInterval) -> bool {
        self.availability.iter().any(|w| w.contains(interval))
    }
}
