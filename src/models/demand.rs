//! Demand records.
//!
//! A demand record says: this class needs this teacher to cover this
//! subject for exactly `periods_per_week` periods.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::{Class, Subject, Teacher, TeacherId};

/// A class/teacher/subject requirement with a weekly quota.
///
/// Equality is structural over class, teacher id, subject and quota.
/// The teacher's availability is not part of a record's identity.
#[derive(Debug, Clone)]
pub struct DemandRecord {
    /// Class that needs the lessons.
    pub class: Class,
    /// Teacher who gives them.
    pub teacher: Arc<Teacher>,
    /// Subject taught.
    pub subject: Subject,
    /// Exact number of periods required in the week.
    pub periods_per_week: u32,
}

impl DemandRecord {
    /// Creates a new demand record.
    pub fn new(
        class: impl Into<Class>,
        teacher: Arc<Teacher>,
        subject: impl Into<Subject>,
        periods_per_week: u32,
    ) -> Self {
        Self {
            class: class.into(),
            teacher,
            subject: subject.into(),
            periods_per_week,
        }
    }

    /// Id of the assigned teacher.
    #[inline]
    pub fn teacher_id(&self) -> &TeacherId {
        &self.teacher.id
    }

    /// Whether two records cover the same class, teacher and subject,
    /// regardless of quota.
    pub fn same_lesson(&self, other: &Self) -> bool {
        self.class == other.class
            && self.teacher.id == other.teacher.id
            && self.subject == other.subject
    }

    /// `"<teacher> - <subject>"`, the label shown in timetables.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for DemandRecord {
    fn eq(&self, other: &Self) -> bool {
        self.same_lesson(other) && self.periods_per_week == other.periods_per_week
    }
}

impl Eq for DemandRecord {}

impl Hash for DemandRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class.hash(state);
        self.teacher.id.hash(state);
        self.subject.hash(state);
        self.periods_per_week.hash(state);
    }
}

impl fmt::Display for DemandRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.teacher.id, self.subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeInterval;

    #[test]
    fn test_equality_ignores_availability() {
        let busy = Arc::new(
            Teacher::new("T1").with_window(TimeInterval::parse(0, "07:00", "09:00").unwrap()),
        );
        let free = Arc::new(Teacher::new("T1"));

        let a = DemandRecord::new("A", busy, "Math", 2);
        let b = DemandRecord::new("A", free, "Math", 2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_quota_is_part_of_identity() {
        let t = Arc::new(Teacher::new("T1"));
        let a = DemandRecord::new("A", t.clone(), "Math", 2);
        let b = DemandRecord::new("A", t, "Math", 3);
        assert_ne!(a, b);
        assert!(a.same_lesson(&b));
    }

    #[test]
    fn test_label() {
        let d = DemandRecord::new("A", Arc::new(Teacher::new("Teacher2")), "English", 2);
        assert_eq!(d.label(), "Teacher2 - English");
        assert_eq!(d.teacher_id().as_str(), "Teacher2");
    }
}
