//! Input validation for timetabling problems.
//!
//! Checks structural integrity of slots and demands before a search
//! starts. Detects:
//! - Duplicate slots
//! - Ambiguous demands (same class, teacher and subject listed twice)
//! - Zero weekly quotas
//! - Demands for classes that have no slots
//!
//! Infeasibility is not a validation concern: a well-formed problem that
//! cannot be satisfied is reported by the search.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::models::{Class, DemandRecord, Slot};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The same class/interval pair appears more than once.
    DuplicateSlot,
    /// Two demands cover the same class, teacher and subject.
    AmbiguousDemand,
    /// A demand requires zero periods.
    ZeroPeriods,
    /// A demand targets a class that has no slots.
    ClassWithoutSlots,
    /// Two teachers share a name.
    DuplicateTeacher,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the inputs of a timetabling problem.
///
/// Checks:
/// 1. No slot occurs twice
/// 2. No two demands share class, teacher and subject (whether or not
///    their quotas differ)
/// 3. Every demand requires at least one period
/// 4. Every demand's class has at least one slot
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(slots: &[Slot], demands: &[Arc<DemandRecord>]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut seen_slots = HashSet::new();
    let mut classes: HashSet<&Class> = HashSet::new();
    for slot in slots {
        if !seen_slots.insert(slot) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSlot,
                format!("Duplicate slot: {slot}"),
            ));
        }
        classes.insert(&slot.class);
    }

    for (i, demand) in demands.iter().enumerate() {
        if demand.periods_per_week == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroPeriods,
                format!(
                    "Demand '{demand}' for class '{}' requires zero periods",
                    demand.class
                ),
            ));
        }

        if !classes.contains(&demand.class) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ClassWithoutSlots,
                format!("Demand '{demand}' targets class '{}' with no slots", demand.class),
            ));
        }

        // Report each ambiguous pair once, at its second member.
        if demands[..i].iter().any(|earlier| earlier.same_lesson(demand)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::AmbiguousDemand,
                format!(
                    "Ambiguous demand: '{demand}' for class '{}' is listed more than once",
                    demand.class
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Teacher, TimeInterval};

    fn slot(class: &str, day: u8, start: &str, end: &str) -> Slot {
        Slot::new(class, TimeInterval::parse(day, start, end).unwrap())
    }

    fn demand(class: &str, teacher: &str, subject: &str, n: u32) -> Arc<DemandRecord> {
        Arc::new(DemandRecord::new(
            class,
            Arc::new(Teacher::new(teacher)),
            subject,
            n,
        ))
    }

    #[test]
    fn test_valid_input() {
        let slots = vec![slot("A", 0, "07:00", "08:00"), slot("A", 1, "07:00", "08:00")];
        let demands = vec![demand("A", "T1", "Math", 1), demand("A", "T2", "Art", 1)];
        assert!(validate_problem(&slots, &demands).is_ok());
    }

    #[test]
    fn test_duplicate_slot() {
        let slots = vec![slot("A", 0, "07:00", "08:00"), slot("A", 0, "07:00", "08:00")];
        let errors = validate_problem(&slots, &[]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateSlot);
    }

    #[test]
    fn test_same_interval_different_class_is_fine() {
        let slots = vec![slot("A", 0, "07:00", "08:00"), slot("B", 0, "07:00", "08:00")];
        assert!(validate_problem(&slots, &[]).is_ok());
    }

    #[test]
    fn test_ambiguous_demand() {
        let slots = vec![slot("A", 0, "07:00", "08:00")];
        let demands = vec![demand("A", "T1", "Math", 1), demand("A", "T1", "Math", 2)];
        let errors = validate_problem(&slots, &demands).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::AmbiguousDemand));
    }

    #[test]
    fn test_zero_periods() {
        let slots = vec![slot("A", 0, "07:00", "08:00")];
        let errors = validate_problem(&slots, &[demand("A", "T1", "Math", 0)]).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::ZeroPeriods));
    }

    #[test]
    fn test_class_without_slots() {
        let slots = vec![slot("A", 0, "07:00", "08:00")];
        let errors = validate_problem(&slots, &[demand("B", "T1", "Math", 1)]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::ClassWithoutSlots);
        assert!(errors[0].to_string().contains("'B'"));
    }

    #[test]
    fn test_multiple_errors() {
        let slots = vec![slot("A", 0, "07:00", "08:00"), slot("A", 0, "07:00", "08:00")];
        let demands = vec![demand("C", "T1", "Math", 0)];
        let errors = validate_problem(&slots, &demands).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
