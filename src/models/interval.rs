//! Day-scoped time intervals.
//!
//! A [`TimeInterval`] is a half-open range `[start, end)` on one day of the
//! week. Day 0 is Sunday and day 6 is Saturday.
//!
//! # Ordering
//! Intervals order by `(day, start, end)`, which is what grouping and
//! printing rely on for deterministic output.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// Number of days in the scheduling week.
pub const DAYS_PER_WEEK: u8 = 7;

/// A half-open time range on a single weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "IntervalRepr", into = "IntervalRepr")]
pub struct TimeInterval {
    day: u8,
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeInterval {
    /// Creates an interval, rejecting bad days and empty ranges.
    pub fn new(day: u8, start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if day >= DAYS_PER_WEEK {
            return Err(TimetableError::InvalidDay { day });
        }
        if start >= end {
            return Err(TimetableError::EmptyInterval {
                day,
                start: format_time(start),
                end: format_time(end),
            });
        }
        Ok(Self { day, start, end })
    }

    /// Parses an interval from `HH[:MM[:SS]]` strings.
    ///
    /// ```
    /// use u_timetable::models::TimeInterval;
    ///
    /// let first = TimeInterval::parse(0, "07:00", "08:30").unwrap();
    /// assert_eq!(first.range_label(), "07:00-08:30");
    /// assert!(TimeInterval::parse(0, "09:00", "08:00").is_err());
    /// ```
    pub fn parse(day: u8, start: &str, end: &str) -> Result<Self> {
        Self::new(day, parse_time(start)?, parse_time(end)?)
    }

    /// Weekday (0 = Sunday).
    #[inline]
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Inclusive start time.
    #[inline]
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// Exclusive end time.
    #[inline]
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Whether `other` lies entirely within this interval on the same day.
    pub fn contains(&self, other: &Self) -> bool {
        self.day == other.day && self.start <= other.start && self.end >= other.end
    }

    /// The same start/end on another day.
    pub fn on_day(&self, day: u8) -> Result<Self> {
        Self::new(day, self.start, self.end)
    }

    /// `"HH:MM-HH:MM"` label used as a column key in exports.
    pub fn range_label(&self) -> String {
        format!("{}-{}", format_time(self.start), format_time(self.end))
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Day: {} ({} - {})",
            self.day,
            format_time(self.start),
            format_time(self.end)
        )
    }
}

/// Parses `HH`, `HH:MM` or `HH:MM:SS`.
///
/// Every field is exactly two digits; signs and whitespace are rejected.
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    let invalid = || TimetableError::InvalidTime {
        value: value.to_string(),
    };
    let fields: Vec<&str> = value.split(':').collect();
    if fields.len() > 3
        || fields
            .iter()
            .any(|f| f.len() != 2 || !f.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(invalid());
    }
    let mut parts = [0u32; 3];
    for (part, field) in parts.iter_mut().zip(&fields) {
        *part = field.parse().map_err(|_| invalid())?;
    }
    NaiveTime::from_hms_opt(parts[0], parts[1], parts[2]).ok_or_else(invalid)
}

/// Formats as `HH:MM`, or `HH:MM:SS` when seconds are present.
pub fn format_time(time: NaiveTime) -> String {
    if time.second() == 0 {
        time.format("%H:%M").to_string()
    } else {
        time.format("%H:%M:%S").to_string()
    }
}

#[derive(Serialize, Deserialize)]
struct IntervalRepr {
    day: u8,
    start: String,
    end: String,
}

impl TryFrom<IntervalRepr> for TimeInterval {
    type Error = TimetableError;

    fn try_from(repr: IntervalRepr) -> Result<Self> {
        Self::parse(repr.day, &repr.start, &repr.end)
    }
}

impl From<TimeInterval> for IntervalRepr {
    fn from(interval: TimeInterval) -> Self {
        Self {
            day: interval.day,
            start: format_time(interval.start),
            end: format_time(interval.end),
        }
    }
}
