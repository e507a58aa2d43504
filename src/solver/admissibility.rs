//! Admissibility rules for placing a demand record in a slot.
//!
//! Four independent checks gate every tentative assignment:
//!
//! 1. **Quota**: fewer than `periods_per_week` slots already hold the record.
//! 2. **Availability**: one of the teacher's windows contains the slot.
//! 3. **One per day**: the class has no lesson of this record that day.
//! 4. **No double booking**: the teacher is not booked at this interval.
//!
//! None of them mutate the routine, so they may be evaluated
//! speculatively and in any order.

use std::fmt;

use crate::models::{DemandRecord, Routine, Slot};

/// Reason a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The record already fills its weekly quota.
    QuotaReached,
    /// The teacher has no availability window covering the slot.
    TeacherUnavailable,
    /// The class already has this lesson on the slot's day.
    AlreadyTaughtToday,
    /// The teacher is booked at this interval in some class.
    TeacherDoubleBooked,
}

impl Rejection {
    /// All rejection kinds, in evaluation order.
    pub const ALL: [Rejection; 4] = [
        Rejection::QuotaReached,
        Rejection::TeacherUnavailable,
        Rejection::AlreadyTaughtToday,
        Rejection::TeacherDoubleBooked,
    ];

    /// Dense index, usable for counters.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rejection::QuotaReached => "quota reached",
            Rejection::TeacherUnavailable => "teacher unavailable",
            Rejection::AlreadyTaughtToday => "already taught today",
            Rejection::TeacherDoubleBooked => "teacher double-booked",
        };
        f.write_str(s)
    }
}

/// Checks whether `demand` may be placed in `slot`, naming the first
/// failing rule.
pub fn check(routine: &Routine, slot: &Slot, demand: &DemandRecord) -> Result<(), Rejection> {
    if routine.lesson_count(demand) >= demand.periods_per_week as usize {
        return Err(Rejection::QuotaReached);
    }
    if !demand.teacher.is_available(&slot.interval) {
        return Err(Rejection::TeacherUnavailable);
    }
    if routine.has_lesson_on_day(&slot.class, slot.day(), demand) {
        return Err(Rejection::AlreadyTaughtToday);
    }
    if routine
        .booked_intervals(demand.teacher_id())
        .contains(&slot.interval)
    {
        return Err(Rejection::TeacherDoubleBooked);
    }
    Ok(())
}

/// Whether `demand` may be placed in `slot` given the routine so far.
#[inline]
pub fn is_admissible(routine: &Routine, slot: &Slot, demand: &DemandRecord) -> bool {
    check(routine, slot, demand).is_ok()
}
