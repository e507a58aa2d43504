//! Routine (timetable) store.
//!
//! A routine maps every slot of the problem to an outcome and keeps a
//! derived booking index from teacher to the intervals they currently
//! teach. The two are updated in lockstep by [`Routine::assign`] and
//! [`Routine::unassign`], the only mutation entry points.
//!
//! # Invariants
//! After every mutation:
//! 1. Each slot holding a lesson has its interval exactly once in that
//!    teacher's booking list.
//! 2. No booking exists without a lesson backing it.
//! 3. Only slots from the construction-time slot list are ever keys.

use std::collections::HashMap;
use std::sync::Arc;

use super::{Class, DemandRecord, Slot, TeacherId, TimeInterval};
use crate::error::{Result, TimetableError};

/// Outcome decided for a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// The class has a free period.
    Free,
    /// The slot is taught under this demand record.
    Lesson(Arc<DemandRecord>),
}

impl Entry {
    /// The demand record, if this is a lesson.
    pub fn demand(&self) -> Option<&Arc<DemandRecord>> {
        match self {
            Entry::Free => None,
            Entry::Lesson(d) => Some(d),
        }
    }

    /// Whether the slot was left free.
    pub fn is_free(&self) -> bool {
        matches!(self, Entry::Free)
    }
}

impl From<Option<Arc<DemandRecord>>> for Entry {
    fn from(demand: Option<Arc<DemandRecord>>) -> Self {
        demand.map_or(Entry::Free, Entry::Lesson)
    }
}

/// A complete or partial timetable.
#[derive(Debug, Clone)]
pub struct Routine {
    slots: Vec<Slot>,
    index: HashMap<Slot, usize>,
    values: Vec<Option<Entry>>,
    teacher_booking: HashMap<TeacherId, Vec<TimeInterval>>,
}

impl Routine {
    /// Creates an empty routine over the given slots.
    ///
    /// Slot order is kept for iteration. If a slot occurs twice only the
    /// first occurrence is addressable; problem validation rejects such
    /// input before a routine is built.
    pub fn new(slots: impl IntoIterator<Item = Slot>) -> Self {
        let slots: Vec<Slot> = slots.into_iter().collect();
        let mut index = HashMap::with_capacity(slots.len());
        for (i, slot) in slots.iter().enumerate() {
            index.entry(slot.clone()).or_insert(i);
        }
        let values = vec![None; slots.len()];
        Self {
            slots,
            index,
            values,
            teacher_booking: HashMap::new(),
        }
    }

    /// The slot list this routine was built over.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of slots (decided or not).
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots with a decided outcome.
    pub fn decided_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Whether every slot has an outcome.
    pub fn is_fully_decided(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Whether no slot has been decided.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Position of a slot in the slot list.
    pub fn position(&self, slot: &Slot) -> Option<usize> {
        self.index.get(slot).copied()
    }

    /// Sets the outcome of a slot.
    ///
    /// No admissibility check happens here. Lessons append the slot's
    /// interval to the teacher's bookings.
    pub fn assign(&mut self, slot: &Slot, entry: Entry) -> Result<()> {
        let i = self.require(slot)?;
        self.assign_at(i, entry);
        Ok(())
    }

    /// Clears the outcome of a slot, returning what was there.
    pub fn unassign(&mut self, slot: &Slot) -> Result<Option<Entry>> {
        let i = self.require(slot)?;
        Ok(self.unassign_at(i))
    }

    pub(crate) fn assign_at(&mut self, i: usize, entry: Entry) {
        debug_assert!(
            self.values[i].is_none(),
            "slot {} assigned twice without unassign",
            self.slots[i]
        );
        if let Entry::Lesson(demand) = &entry {
            self.teacher_booking
                .entry(demand.teacher_id().clone())
                .or_default()
                .push(self.slots[i].interval);
        }
        self.values[i] = Some(entry);
    }

    pub(crate) fn unassign_at(&mut self, i: usize) -> Option<Entry> {
        let previous = self.values[i].take();
        if let Some(Entry::Lesson(demand)) = &previous {
            let interval = self.slots[i].interval;
            let teacher = demand.teacher_id();
            let removed = match self.teacher_booking.get_mut(teacher) {
                Some(booked) => {
                    let pos = booked.iter().position(|b| *b == interval);
                    if let Some(pos) = pos {
                        booked.remove(pos);
                    }
                    if booked.is_empty() {
                        self.teacher_booking.remove(teacher);
                    }
                    pos.is_some()
                }
                None => false,
            };
            debug_assert!(removed, "booking for {teacher} at {interval} missing");
        }
        previous
    }

    /// Outcome of a slot, `None` if undecided or unknown.
    pub fn get(&self, slot: &Slot) -> Option<&Entry> {
        self.position(slot).and_then(|i| self.values[i].as_ref())
    }

    /// Intervals currently booked for a teacher.
    pub fn booked_intervals(&self, teacher: &TeacherId) -> &[TimeInterval] {
        self.teacher_booking
            .get(teacher)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the booking index holds nothing.
    pub fn has_no_bookings(&self) -> bool {
        self.teacher_booking.is_empty()
    }

    /// Decided slots with their outcomes, in slot-list order.
    pub fn entries(&self) -> impl Iterator<Item = (&Slot, &Entry)> {
        self.slots
            .iter()
            .zip(&self.values)
            .filter_map(|(slot, value)| value.as_ref().map(|v| (slot, v)))
    }

    /// Slots holding a lesson, in slot-list order.
    pub fn lessons(&self) -> impl Iterator<Item = (&Slot, &Arc<DemandRecord>)> {
        self.entries()
            .filter_map(|(slot, entry)| entry.demand().map(|d| (slot, d)))
    }

    /// Number of slots holding a record equal to `demand`.
    pub fn lesson_count(&self, demand: &DemandRecord) -> usize {
        self.lessons().filter(|(_, d)| d.as_ref() == demand).count()
    }

    /// Whether `class` already has a lesson equal to `demand` on `day`.
    pub fn has_lesson_on_day(&self, class: &Class, day: u8, demand: &DemandRecord) -> bool {
        self.lessons()
            .any(|(slot, d)| slot.day() == day && &slot.class == class && d.as_ref() == demand)
    }

    fn require(&self, slot: &Slot) -> Result<usize> {
        self.position(slot).ok_or_else(|| TimetableError::UnknownSlot {
            slot: slot.to_string(),
        })
    }
}
