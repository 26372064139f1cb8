//! Crate error type.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors surfaced by the rostering API.
///
/// The search itself never fails; errors only arise from invalid input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterError {
    #[error("invalid configuration: {}", join_messages(.0))]
    InvalidConfiguration(Vec<ValidationError>),

    #[error("invalid driver id: {0:?}")]
    InvalidDriverId(String),

    #[error("weekday index out of range: {0}")]
    InvalidWeekday(usize),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
