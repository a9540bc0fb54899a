//! Error types for solver operations.

use pf_core::error::PfError;
use pf_psychro::PsychroError;
use thiserror::Error;

/// Errors that can occur while building or solving the AHU balances.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Invalid parameter {field}: {what}")]
    InvalidParameter { field: &'static str, what: String },

    #[error("Singular system: {what}")]
    Singular { what: String },

    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Psychrometric error: {0}")]
    Psychro(#[from] PsychroError),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for PfError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::InvalidParameter { field, what } => PfError::InvalidArg {
                what: format!("{field}: {what}"),
            },
            SolverError::Singular { what } => PfError::Singular { what },
            SolverError::ProblemSetup { what } => PfError::InvalidArg { what },
            SolverError::ConvergenceFailed { what } => PfError::Convergence { what },
            SolverError::Psychro(err) => err.into(),
        }
    }
}
