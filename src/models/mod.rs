//! Timetabling domain models.
//!
//! Provides the value types describing a weekly timetabling problem and
//! the mutable [`Routine`] store that holds a (partial) solution.
//!
//! # Domain Mappings
//!
//! | u-timetable | School | College |
//! |-------------|--------|---------|
//! | Class | Grade/Section | Batch |
//! | Slot | Period | Lecture slot |
//! | DemandRecord | Subject allocation | Course load |
//! | Routine | Timetable | Routine |

mod demand;
mod interval;
mod names;
mod routine;
mod slot;
mod teacher;

pub use demand::DemandRecord;
pub use interval::{format_time, parse_time, TimeInterval, DAYS_PER_WEEK};
pub use names::{Class, Subject, TeacherId};
pub use routine::{Entry, Routine};
pub use slot::Slot;
pub use teacher::Teacher;
