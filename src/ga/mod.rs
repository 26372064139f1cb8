//! GA-based roster optimization.
//!
//! # Encoding
//!
//! An individual is a [`DaySchedule`](crate::models::DaySchedule): a list
//! of trips. The list order is the crossover axis; otherwise it carries no
//! meaning.
//!
//! # Submodules
//!
//! - [`fitness`]: constraint-penalty evaluation
//! - [`operators`]: tail-swap crossover, driver-reassignment mutation
//! - [`population`]: stochastic day simulation building initial candidates
//! - [`runner`]: generational search loop

pub mod fitness;
pub mod operators;
pub mod population;
mod problem;
pub mod runner;

pub use fitness::{FitnessBreakdown, FitnessEvaluator};
pub use problem::{DayProblem, DriverPool, GaProblem};
pub use runner::{GaResult, GaRunner, GenerationStats, Scored};
