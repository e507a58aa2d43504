//! Problem configuration.
//!
//! A JSON document describing classes, the weekly period template,
//! teachers and demands. [`ProblemConfig::build_problem`] resolves teacher
//! references, expands the template into slots and validates the result.
//!
//! # Slot generation
//! When `slots` is given it is used verbatim. Otherwise slots are
//! generated class by class, then period by period, then day by day.
//! That order is the search order, so it shapes which routine is found.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TimetableError};
use crate::models::{Class, DemandRecord, Slot, Subject, Teacher, TeacherId, TimeInterval};
use crate::problem::Problem;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProblemConfig {
    /// Classes for which the weekly template is expanded.
    #[serde(default)]
    pub classes: Vec<Class>,
    /// Days the template covers (default: the whole week).
    #[serde(default = "whole_week")]
    pub days: Vec<u8>,
    /// Daily period template.
    #[serde(default)]
    pub periods: Vec<PeriodConfig>,
    /// Explicit slot list; overrides the template when present.
    #[serde(default)]
    pub slots: Option<Vec<Slot>>,
    /// Teachers and their availability.
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    /// Demands, in candidate order.
    #[serde(default)]
    pub demands: Vec<DemandConfig>,
}

/// A period of the daily template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodConfig {
    /// Start time (`HH:MM`).
    pub start: String,
    /// End time (`HH:MM`).
    pub end: String,
}

/// A demand referencing a teacher by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandConfig {
    /// Class that needs the lessons.
    pub class: Class,
    /// Name of the teacher.
    pub teacher: TeacherId,
    /// Subject taught.
    pub subject: Subject,
    /// Exact number of periods per week.
    pub periods_per_week: u32,
}

fn whole_week() -> Vec<u8> {
    (0..7).collect()
}

impl ProblemConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = text.len(), "loaded configuration");
        Self::from_json_str(&text)
    }

    /// Expands the slot list: explicit slots, or the weekly template.
    pub fn build_slots(&self) -> Result<Vec<Slot>> {
        if let Some(slots) = &self.slots {
            return Ok(slots.clone());
        }
        let mut slots = Vec::with_capacity(self.classes.len() * self.periods.len() * self.days.len());
        for class in &self.classes {
            for period in &self.periods {
                for &day in &self.days {
                    let interval = TimeInterval::parse(day, &period.start, &period.end)?;
                    slots.push(Slot::new(class.clone(), interval));
                }
            }
        }
        Ok(slots)
    }

    /// Resolves teacher names and builds demand records in order.
    pub fn build_demands(&self) -> Result<Vec<Arc<DemandRecord>>> {
        let mut teachers: HashMap<&TeacherId, Arc<Teacher>> = HashMap::new();
        let mut duplicates = Vec::new();
        for teacher in &self.teachers {
            if teachers
                .insert(&teacher.id, Arc::new(teacher.clone()))
                .is_some()
            {
                duplicates.push(ValidationError::new(
                    ValidationErrorKind::DuplicateTeacher,
                    format!("Duplicate teacher: {}", teacher.id),
                ));
            }
        }
        if !duplicates.is_empty() {
            return Err(TimetableError::Validation(duplicates));
        }

        self.demands
            .iter()
            .map(|d| {
                let teacher = teachers.get(&d.teacher).cloned().ok_or_else(|| {
                    TimetableError::UnknownTeacher {
                        class: d.class.to_string(),
                        teacher: d.teacher.to_string(),
                    }
                })?;
                Ok(Arc::new(DemandRecord::new(
                    d.class.clone(),
                    teacher,
                    d.subject.clone(),
                    d.periods_per_week,
                )))
            })
            .collect()
    }

    /// Builds and validates the problem.
    pub fn build_problem(&self) -> Result<Problem> {
        Problem::new(self.build_slots()?, self.build_demands()?)
    }
}
