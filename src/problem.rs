//! Validated problem input.

use std::sync::Arc;

use tracing::debug;

use crate::error::{Result, TimetableError};
use crate::models::{DemandRecord, Slot};
use crate::validation::validate_problem;

/// A validated timetabling problem: the ordered slots to fill and the
/// demands to satisfy.
///
/// Order matters: slots are decided in list order and candidates are
/// tried in demand order, so identical input always yields the same
/// routine.
#[derive(Debug, Clone)]
pub struct Problem {
    slots: Vec<Slot>,
    demands: Vec<Arc<DemandRecord>>,
}

impl Problem {
    /// Builds a problem, rejecting structurally invalid input.
    pub fn new(slots: Vec<Slot>, demands: Vec<Arc<DemandRecord>>) -> Result<Self> {
        validate_problem(&slots, &demands).map_err(TimetableError::Validation)?;
        debug!(
            slots = slots.len(),
            demands = demands.len(),
            "problem validated"
        );
        Ok(Self { slots, demands })
    }

    /// Slots in decision order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Demands in candidate order.
    pub fn demands(&self) -> &[Arc<DemandRecord>] {
        &self.demands
    }

    /// Total periods required across all demands.
    pub fn required_periods(&self) -> u64 {
        self.demands
            .iter()
            .map(|d| u64::from(d.periods_per_week))
            .sum()
    }
}
