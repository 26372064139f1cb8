//! Configuration validation.
//!
//! Checks the rostering input before any search begins. Detects:
//! - An empty fleet
//! - A zero-length or inverted service day, or a non-positive tick
//! - Probabilities outside `[0, 1]`
//! - Populations too small to select parents from
//! - Inconsistent shift, lunch or trip-length rules
//!
//! Driver counts are unsigned, so negative counts cannot be expressed.

use thiserror::Error;

use crate::config::{FleetProblem, GaConfig, ShiftRules};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No vehicles to schedule.
    EmptyFleet,
    /// Service day has no length.
    EmptyWorkDay,
    /// Tick length is not positive.
    InvalidTick,
    /// A probability is outside `[0, 1]`.
    InvalidRate,
    /// Population cannot produce two parents.
    PopulationTooSmall,
    /// Shift, lunch or rest rules are inconsistent.
    InvalidShift,
    /// Trip length can become non-positive.
    InvalidTrip,
    /// Load fraction outside `[0, 1]`.
    InvalidLoad,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a rostering configuration.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(
    problem: &FleetProblem,
    rules: &ShiftRules,
    config: &GaConfig,
) -> ValidationResult {
    let mut errors = Vec::new();
    day_errors(problem, rules, &mut errors);
    search_errors(config, &mut errors);
    into_result(errors)
}

/// Validates the fleet and day rules of a single-day problem.
pub fn validate_day(problem: &FleetProblem, rules: &ShiftRules) -> ValidationResult {
    let mut errors = Vec::new();
    day_errors(problem, rules, &mut errors);
    into_result(errors)
}

/// Validates the genetic search parameters.
pub fn validate_search(config: &GaConfig) -> ValidationResult {
    let mut errors = Vec::new();
    search_errors(config, &mut errors);
    into_result(errors)
}

fn into_result(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn search_errors(config: &GaConfig, errors: &mut Vec<ValidationError>) {
    for (name, rate) in [
        ("mutation_rate", config.mutation_rate),
        ("crossover_rate", config.crossover_rate),
    ] {
        if !(0.0..=1.0).contains(&rate) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRate,
                format!("{name} must be within [0, 1], got {rate}"),
            ));
        }
    }

    if config.population_size < 2 {
        errors.push(ValidationError::new(
            ValidationErrorKind::PopulationTooSmall,
            format!(
                "Population size must be at least 2, got {}",
                config.population_size
            ),
        ));
    }
}

fn day_errors(problem: &FleetProblem, rules: &ShiftRules, errors: &mut Vec<ValidationError>) {
    if problem.fleet_size == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyFleet,
            "Fleet size must be greater than zero",
        ));
    }

    let horizon = &rules.horizon;
    if horizon.end_min <= horizon.start_min {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyWorkDay,
            format!(
                "Service day is empty: start {} >= end {}",
                horizon.start_min, horizon.end_min
            ),
        ));
    }
    if horizon.tick_min <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTick,
            format!("Tick must be positive, got {}", horizon.tick_min),
        ));
    }

    for (name, load) in [("peak_load", rules.peak_load), ("normal_load", rules.normal_load)] {
        if !(0.0..=1.0).contains(&load) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidLoad,
                format!("{name} must be within [0, 1], got {load}"),
            ));
        }
    }

    if rules.regular_shift.end_min <= rules.regular_shift.start_min {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidShift,
            "Regular shift must end after it starts",
        ));
    }
    for (name, minutes) in [
        ("lunch_duration_min", rules.lunch_duration_min),
        ("lunch_recovery_min", rules.lunch_recovery_min),
        ("vehicle_turnaround_min", rules.vehicle_turnaround_min),
        ("flexible_rest_min", rules.flexible_rest_min),
        ("flexible_max_duty_min", rules.flexible_max_duty_min),
    ] {
        if minutes < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidShift,
                format!("{name} must not be negative, got {minutes}"),
            ));
        }
    }

    if rules.trip_jitter_min < 0 || rules.trip_duration_min - rules.trip_jitter_min <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTrip,
            format!(
                "Trip length {} ± {} must stay positive",
                rules.trip_duration_min, rules.trip_jitter_min
            ),
        ));
    }
}
