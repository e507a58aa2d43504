//! Terminal completion check.
//!
//! The admissibility rules only stop a record from exceeding its quota.
//! Once every slot is decided, this check verifies each quota was met
//! exactly and that the routine is not the degenerate all-free one.

use std::sync::Arc;

use crate::models::{DemandRecord, Routine};

/// Why a fully decided routine is not a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shortfall {
    /// Every slot was left free.
    NoLessons,
    /// A demand record got fewer periods than required.
    Underfilled {
        /// The record that fell short.
        demand: Arc<DemandRecord>,
        /// How many periods it received.
        assigned: usize,
    },
}

/// Verifies that every demand's quota is met exactly.
///
/// Returns the first shortfall in demand order.
pub fn completion_check(routine: &Routine, demands: &[Arc<DemandRecord>]) -> Result<(), Shortfall> {
    if routine.lessons().next().is_none() {
        return Err(Shortfall::NoLessons);
    }
    for demand in demands {
        let assigned = routine.lesson_count(demand);
        if assigned != demand.periods_per_week as usize {
            return Err(Shortfall::Underfilled {
                demand: demand.clone(),
                assigned,
            });
        }
    }
    Ok(())
}

/// Whether the routine satisfies every demand exactly.
#[inline]
pub fn is_complete(routine: &Routine, demands: &[Arc<DemandRecord>]) -> bool {
    completion_check(routine, demands).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entry, Slot, Teacher, TimeInterval};

    fn slots(n: u8) -> Vec<Slot> {
        (0..n)
            .map(|d| Slot::new("A", TimeInterval::parse(d, "07:00", "08:00").unwrap()))
            .collect()
    }

    #[test]
    fn test_all_free_is_not_complete() {
        let s = slots(2);
        let mut r = Routine::new(s.clone());
        for slot in &s {
            r.assign(slot, Entry::Free).unwrap();
        }
        assert_eq!(completion_check(&r, &[]), Err(Shortfall::NoLessons));
    }

    #[test]
    fn test_exact_quota_required() {
        let s = slots(3);
        let d = Arc::new(DemandRecord::new("A", Arc::new(Teacher::new("T")), "Math", 2));
        let mut r = Routine::new(s.clone());
        r.assign(&s[0], Entry::Lesson(d.clone())).unwrap();
        r.assign(&s[1], Entry::Free).unwrap();
        r.assign(&s[2], Entry::Free).unwrap();

        assert_eq!(
            completion_check(&r, &[d.clone()]),
            Err(Shortfall::Underfilled {
                demand: d.clone(),
                assigned: 1
            })
        );

        r.unassign(&s[1]).unwrap();
        r.assign(&s[1], Entry::Lesson(d.clone())).unwrap();
        assert!(is_complete(&r, &[d]));
    }
}
