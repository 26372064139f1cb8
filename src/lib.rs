//! Weekly bus-driver roster optimization.
//!
//! Assigns drivers and vehicles to trips across a 7-day week so that enough
//! vehicles are on the road at every moment of the service day while
//! respecting driver working rules. Each weekday is optimized independently
//! by a genetic algorithm over candidate day schedules.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Weekday`, `DayHorizon`, `DriverId`,
//!   `DriverRotation`, `Trip`, `DaySchedule`, `DayRoster`, `WeeklyResult`
//! - **`config`**: Problem sizes, shift rules, penalty weights, GA parameters
//! - **`ga`**: Initial population builder, fitness evaluator, genetic
//!   operators and the generational search loop
//! - **`scheduler`**: Weekly orchestration and roster KPIs
//! - **`validation`**: Configuration checks run before any search
//!
//! # Example
//!
//! ```
//! use u_roster::config::{FleetProblem, GaConfig, ShiftRules};
//! use u_roster::models::Weekday;
//! use u_roster::scheduler::WeeklyScheduler;
//!
//! let scheduler = WeeklyScheduler::new(
//!     FleetProblem::new(5, 3, 4),
//!     ShiftRules::default(),
//!     GaConfig::default().with_population_size(6).with_generations(2).with_seed(1),
//! )
//! .unwrap();
//!
//! let week = scheduler.run();
//! let monday = week.day(Weekday::Monday).unwrap();
//! assert_eq!(monday.drivers, monday.schedule.drivers());
//! ```
//!
//! # References
//!
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization, and
//!   Machine Learning"
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"

pub mod config;
pub mod error;
pub mod ga;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::RosterError;
