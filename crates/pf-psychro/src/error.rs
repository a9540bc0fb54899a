//! Psychrometric property errors.

use pf_core::PfError;
use thiserror::Error;

/// Result type for psychrometric operations.
pub type PsychroResult<T> = Result<T, PsychroError>;

/// Errors that can occur during psychrometric property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PsychroError {
    /// Input outside the physical range the correlation is defined for.
    #[error("Value out of range for {what}: {value} (valid {min}..={max})")]
    OutOfRange {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Non-physical result (vapour pressure reaching total pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument (NaN, infinite, negative pressure).
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

impl From<PfError> for PsychroError {
    fn from(err: PfError) -> Self {
        match err {
            PfError::OutOfRange {
                what,
                value,
                min,
                max,
            } => PsychroError::OutOfRange {
                what,
                value,
                min,
                max,
            },
            PfError::NonFinite { what, .. } => PsychroError::InvalidArg { what },
            _ => PsychroError::InvalidArg {
                what: "psychrometric input",
            },
        }
    }
}

impl From<PsychroError> for PfError {
    fn from(err: PsychroError) -> Self {
        match err {
            PsychroError::OutOfRange {
                what,
                value,
                min,
                max,
            } => PfError::OutOfRange {
                what,
                value,
                min,
                max,
            },
            PsychroError::NonPhysical { what } => PfError::InvalidArg {
                what: format!("non-physical psychrometric value: {what}"),
            },
            PsychroError::InvalidArg { what } => PfError::InvalidArg {
                what: format!("psychrometric argument: {what}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PsychroError::OutOfRange {
            what: "temperature",
            value: 120.0,
            min: -40.0,
            max: 80.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("temperature"));
        assert!(msg.contains("120"));
    }

    #[test]
    fn range_error_round_trips_through_core() {
        let core_err = pf_core::ensure_in_range(1.5, 0.0, 1.0, "relative humidity").unwrap_err();
        let err: PsychroError = core_err.into();
        assert!(matches!(
            err,
            PsychroError::OutOfRange {
                what: "relative humidity",
                ..
            }
        ));
        let back: PfError = err.into();
        assert!(matches!(back, PfError::OutOfRange { .. }));
    }
}
