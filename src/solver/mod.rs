//! Constraint-satisfaction search for weekly routines.
//!
//! # Components
//! - [`admissibility`]: the four local rules gating each tentative placement
//! - [`completion`]: the exact-quota check run on fully decided routines
//! - [`Solver`]: the deterministic backtracking driver
//!
//! # Reference
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach",
//! Ch. 6.3 (Backtracking Search for CSPs)

pub mod admissibility;
mod backtrack;
pub mod completion;

pub use admissibility::{check, is_admissible, Rejection};
pub use backtrack::{AbortReason, SearchLimits, SearchOutcome, SearchReport, SearchStats, Solver};
pub use completion::{completion_check, is_complete, Shortfall};
