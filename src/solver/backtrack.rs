//! Deterministic depth-first backtracking search.
//!
//! # Algorithm
//!
//! 1. Decide slots in problem order.
//! 2. For each slot, try the demands of the slot's class in problem order,
//!    then "leave free". A demand is tried only if it passes
//!    [`admissibility::check`](super::admissibility::check).
//! 3. Commit the candidate to the routine and move to the next slot.
//! 4. When every slot is decided, run the
//!    [completion check](super::completion::completion_check). On failure,
//!    or when a slot runs out of candidates, undo the parent's assignment
//!    and resume its candidate list.
//!
//! The search is driven by an explicit frame stack (one candidate cursor
//! per decided slot) instead of recursion, so deep problems cannot
//! overflow the call stack and limits can be checked at every step.
//! Exploration order is identical to the recursive formulation.
//!
//! # Complexity
//! Exponential in the number of slots in the worst case; the branching
//! factor is the number of demands of the slot's class plus one. There is
//! no memoisation, propagation or look-ahead.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use super::admissibility::{self, Rejection};
use super::completion::completion_check;
use crate::models::{DemandRecord, Entry, Routine, Slot};
use crate::problem::Problem;

/// Optional bounds on a search.
///
/// With no limit set the search runs to success or exhaustion.
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    /// Wall-clock budget measured from the start of the search.
    pub time_limit: Option<Duration>,
    /// Maximum number of tentative assignments. A routine completed by
    /// the last allowed assignment is still returned.
    pub max_nodes: Option<u64>,
    /// Flag another thread may set to stop the search.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl SearchLimits {
    /// No limits.
    pub fn none() -> Self {
        Self::default()
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the node budget.
    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Sets a cancellation flag.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn interrupted(&self, started: Instant) -> Option<AbortReason> {
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Some(AbortReason::Cancelled);
            }
        }
        if let Some(limit) = self.time_limit {
            if started.elapsed() >= limit {
                return Some(AbortReason::TimeLimit);
            }
        }
        None
    }

    /// Whether `nodes` assignments leave no room for another.
    fn node_budget_spent(&self, nodes: u64) -> bool {
        self.max_nodes.is_some_and(|max| nodes >= max)
    }
}

/// Why a search stopped before finishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The cancellation flag was set.
    Cancelled,
    /// The node budget ran out.
    NodeLimit,
    /// The time budget ran out.
    TimeLimit,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AbortReason::Cancelled => "cancelled",
            AbortReason::NodeLimit => "node limit reached",
            AbortReason::TimeLimit => "time limit reached",
        };
        f.write_str(s)
    }
}

/// Result of a search.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// Every slot is decided and every quota met exactly.
    Solved(Routine),
    /// The search space was exhausted.
    NoSolution,
    /// A limit stopped the search first.
    Aborted(AbortReason),
}

impl SearchOutcome {
    /// Whether a routine was found.
    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved(_))
    }

    /// The solved routine, if any.
    pub fn routine(&self) -> Option<&Routine> {
        match self {
            SearchOutcome::Solved(r) => Some(r),
            _ => None,
        }
    }

    /// Consumes the outcome, returning the solved routine, if any.
    pub fn into_routine(self) -> Option<Routine> {
        match self {
            SearchOutcome::Solved(r) => Some(r),
            _ => None,
        }
    }
}

/// Counters collected during a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Tentative assignments made (lessons and free periods).
    pub nodes: u64,
    /// Assignments undone.
    pub backtracks: u64,
    /// Fully decided routines checked for completion.
    pub completion_checks: u64,
    rejections: [u64; 4],
    /// Wall-clock duration of the search.
    pub elapsed: Duration,
}

impl SearchStats {
    /// How many candidates a given rule rejected.
    pub fn rejections(&self, kind: Rejection) -> u64 {
        self.rejections[kind.index()]
    }

    /// Candidates rejected by any rule.
    pub fn total_rejections(&self) -> u64 {
        self.rejections.iter().sum()
    }
}

/// Outcome plus statistics.
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// What the search produced.
    pub outcome: SearchOutcome,
    /// Counters for diagnostics.
    pub stats: SearchStats,
}

/// Backtracking timetable solver.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use u_timetable::models::{DemandRecord, Slot, Teacher, TimeInterval};
/// use u_timetable::{Problem, Solver};
///
/// let period = TimeInterval::parse(0, "07:00", "08:30").unwrap();
/// let teacher = Arc::new(
///     Teacher::new("Teacher1").with_window(TimeInterval::parse(0, "07:00", "15:00").unwrap()),
/// );
/// let problem = Problem::new(
///     vec![Slot::new("BCT-A", period)],
///     vec![Arc::new(DemandRecord::new("BCT-A", teacher, "Math", 1))],
/// )
/// .unwrap();
///
/// let report = Solver::new().solve(&problem);
/// let routine = report.outcome.routine().unwrap();
/// assert_eq!(routine.lessons().count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    limits: SearchLimits,
}

impl Solver {
    /// Creates a solver without limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets search limits.
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Searches for the first routine satisfying every demand.
    ///
    /// A fresh routine is built for each call; nothing is shared between
    /// searches.
    pub fn solve(&self, problem: &Problem) -> SearchReport {
        let started = Instant::now();
        info!(
            slots = problem.slots().len(),
            demands = problem.demands().len(),
            required_periods = problem.required_periods(),
            "starting timetable search"
        );

        let mut search = Search::new(problem);
        let outcome = search.run(&self.limits, started);
        search.stats.elapsed = started.elapsed();

        match &outcome {
            SearchOutcome::Solved(_) => debug!(stats = ?search.stats, "routine found"),
            SearchOutcome::NoSolution => debug!(stats = ?search.stats, "search exhausted"),
            SearchOutcome::Aborted(reason) => {
                debug!(%reason, stats = ?search.stats, "search aborted")
            }
        }
        info!(
            solved = outcome.is_solved(),
            nodes = search.stats.nodes,
            elapsed_ms = search.stats.elapsed.as_millis() as u64,
            "timetable search finished"
        );

        SearchReport {
            outcome,
            stats: search.stats,
        }
    }
}

/// Mutable state of one search.
struct Search<'a> {
    problem: &'a Problem,
    /// Demands applicable to each slot, in problem order.
    candidates: Vec<Vec<Arc<DemandRecord>>>,
    routine: Routine,
    /// One cursor per open frame: the next candidate index to try.
    /// A cursor equal to the candidate count means "free" is next.
    frames: Vec<usize>,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    fn new(problem: &'a Problem) -> Self {
        let candidates = problem
            .slots()
            .iter()
            .map(|slot| {
                problem
                    .demands()
                    .iter()
                    .filter(|d| d.class == slot.class)
                    .cloned()
                    .collect()
            })
            .collect();
        Self {
            problem,
            candidates,
            routine: Routine::new(problem.slots().iter().cloned()),
            frames: vec![0],
            stats: SearchStats::default(),
        }
    }

    fn run(&mut self, limits: &SearchLimits, started: Instant) -> SearchOutcome {
        let problem = self.problem;
        let depth = problem.slots().len();

        loop {
            if let Some(reason) = limits.interrupted(started) {
                return SearchOutcome::Aborted(reason);
            }

            let index = self.frames.len() - 1;

            if index == depth {
                self.stats.completion_checks += 1;
                match completion_check(&self.routine, problem.demands()) {
                    Ok(()) => {
                        let routine =
                            std::mem::replace(&mut self.routine, Routine::new(Vec::new()));
                        return SearchOutcome::Solved(routine);
                    }
                    Err(shortfall) => trace!(?shortfall, "completion check failed"),
                }
                if !self.backtrack() {
                    return SearchOutcome::NoSolution;
                }
                continue;
            }

            let slot = &problem.slots()[index];
            match self.next_candidate(index, slot) {
                Some((next_cursor, entry)) => {
                    if limits.node_budget_spent(self.stats.nodes) {
                        return SearchOutcome::Aborted(AbortReason::NodeLimit);
                    }
                    self.frames[index] = next_cursor;
                    self.routine.assign_at(index, entry);
                    self.stats.nodes += 1;
                    self.frames.push(0);
                }
                None => {
                    if !self.backtrack() {
                        return SearchOutcome::NoSolution;
                    }
                }
            }
        }
    }

    /// First admissible candidate at or after the frame's cursor.
    fn next_candidate(&mut self, index: usize, slot: &Slot) -> Option<(usize, Entry)> {
        let candidates = &self.candidates[index];
        for cursor in self.frames[index]..=candidates.len() {
            let Some(demand) = candidates.get(cursor) else {
                return Some((cursor + 1, Entry::Free));
            };
            match admissibility::check(&self.routine, slot, demand) {
                Ok(()) => return Some((cursor + 1, Entry::Lesson(demand.clone()))),
                Err(rejection) => self.stats.rejections[rejection.index()] += 1,
            }
        }
        None
    }

    /// Closes the current frame and undoes the parent's assignment.
    ///
    /// Returns false when the root frame is exhausted.
    fn backtrack(&mut self) -> bool {
        self.frames.pop();
        let Some(parent) = self.frames.len().checked_sub(1) else {
            return false;
        };
        self.routine.unassign_at(parent);
        self.stats.backtracks += 1;
        trace!(slot = parent, "backtrack");
        true
    }
}
