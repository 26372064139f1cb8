//! Weekly orchestration and roster KPIs.
//!
//! # Algorithm
//!
//! `WeeklyScheduler` runs one independent genetic search per weekday with a
//! shared Flexible-driver rotation. Days may run on the rayon thread pool;
//! per-day seeds make both modes produce identical rosters.
//!
//! # KPI
//!
//! `RosterKpi` reports trip, vehicle and driver counts, duty minutes and
//! coverage next to the penalty breakdown.

mod kpi;
mod weekly;

pub use kpi::RosterKpi;
pub use weekly::WeeklyScheduler;
