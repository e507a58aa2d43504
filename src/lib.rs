//! Weekly class timetabling.
//!
//! Assigns teachers to fixed weekly periods across classes so that every
//! teaching demand gets exactly its weekly quota, no teacher is in two
//! places at once, no class has the same lesson twice in a day, and every
//! lesson falls inside the teacher's availability.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `TimeInterval`, `Teacher`, `Slot`,
//!   `DemandRecord`, and the mutable `Routine` store with its booking index
//! - **`solver`**: Admissibility rules, completion check, and the
//!   deterministic backtracking `Solver`
//! - **`validation`**: Input integrity checks (duplicate slots, ambiguous demands)
//! - **`config`**: JSON problem configuration and weekly template expansion
//! - **`render`**: Console table and JSON export of a finished routine
//!
//! # Search semantics
//!
//! The solver returns the first feasible routine under a fixed order
//! (slots in input order, demands in input order, "free" last). It does
//! not optimise, enumerate alternatives, or relax constraints.
//! Infeasibility is a normal [`SearchOutcome::NoSolution`]; malformed input
//! is rejected earlier as a [`TimetableError`].
//!
//! # References
//!
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Schaerf (1999), "A Survey of Automated Timetabling"

pub mod config;
pub mod error;
pub mod models;
mod problem;
pub mod render;
pub mod solver;
pub mod validation;

pub use error::TimetableError;
pub use problem::Problem;
pub use solver::{SearchLimits, SearchOutcome, SearchReport, Solver};
