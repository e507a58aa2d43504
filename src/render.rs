//! Presentation of finished routines.
//!
//! Two views over a [`Routine`]:
//! - [`console_table`]: one line per day, each decided slot as a cell
//! - [`export`]: per class, per day rows keyed by `"HH:MM-HH:MM"`,
//!   serialisable to JSON for a front-end grid
//!
//! Neither affects search; they only read the routine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Class, Entry, Routine, Slot};

/// Label printed for a free period in the console table.
const FREE_CELL: &str = "-";

/// Renders the routine grouped by day.
///
/// Each line is the day number followed by one
/// `"<teacher> - <subject> [<slot>]"` cell per decided slot of that day,
/// in slot-list order.
pub fn console_table(routine: &Routine) -> String {
    let mut by_day: BTreeMap<u8, Vec<(&Slot, &Entry)>> = BTreeMap::new();
    for (slot, entry) in routine.entries() {
        by_day.entry(slot.day()).or_default().push((slot, entry));
    }

    let mut lines = Vec::with_capacity(by_day.len());
    for (day, cells) in by_day {
        let mut line = format!("{day:<5} |");
        for (slot, entry) in cells {
            let label = match entry {
                Entry::Free => FREE_CELL.to_string(),
                Entry::Lesson(d) => d.label(),
            };
            line.push_str(&format!("{:<50}\t|", format!("{label} [{slot}]")));
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// One class's timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTimetable {
    /// Class name.
    pub class: Class,
    /// Rows in ascending day order.
    pub days: Vec<DayRow>,
    /// Column descriptors: `day`, then the first day's time ranges.
    pub headings: Vec<Heading>,
}

/// One day of a class timetable.
///
/// Serialises flat: `{"day": 0, "07:00-08:30": "Teacher1 - Math", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRow {
    /// Weekday.
    pub day: u8,
    /// Time range → lesson label, `""` when free.
    #[serde(flatten)]
    pub periods: BTreeMap<String, String>,
}

/// A grid column descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Field key in [`DayRow`].
    pub field: String,
    /// Display title.
    pub title: String,
}

impl Heading {
    fn new(key: &str) -> Self {
        Self {
            field: key.to_string(),
            title: key.to_string(),
        }
    }
}

/// Builds the per-class export, classes ordered by name.
pub fn export(routine: &Routine) -> Vec<ClassTimetable> {
    let mut grouped: BTreeMap<&Class, BTreeMap<u8, BTreeMap<String, String>>> = BTreeMap::new();
    for (slot, entry) in routine.entries() {
        let label = entry.demand().map(|d| d.label()).unwrap_or_default();
        grouped
            .entry(&slot.class)
            .or_default()
            .entry(slot.day())
            .or_default()
            .insert(slot.interval.range_label(), label);
    }

    grouped
        .into_iter()
        .map(|(class, days)| {
            let days: Vec<DayRow> = days
                .into_iter()
                .map(|(day, periods)| DayRow { day, periods })
                .collect();
            let mut headings = vec![Heading::new("day")];
            if let Some(first) = days.first() {
                headings.extend(first.periods.keys().map(|k| Heading::new(k)));
            }
            ClassTimetable {
                class: class.clone(),
                days,
                headings,
            }
        })
        .collect()
}

/// The export as pretty-printed JSON.
pub fn to_json_string(routine: &Routine) -> Result<String> {
    Ok(serde_json::to_string_pretty(&export(routine))?)
}
