//! Crate-level error types.

use thiserror::Error;

use crate::config::ConfigError;
use crate::generator::GenerateError;
use crate::travel::TravelError;
use crate::validation::ValidationError;

/// Errors that abort a scheduling request.
///
/// "No eligible staff" is never an error: such tasks stay open.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    #[error("invalid travel configuration: {0}")]
    Travel(#[from] TravelError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Generate(#[from] GenerateError),
}

impl ScheduleError {
    /// Validation errors carried by an `InvalidInput` error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidInput(errors) => errors,
            _ => &[],
        }
    }
}

impl From<Vec<ValidationError>> for ScheduleError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias for scheduling requests.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
