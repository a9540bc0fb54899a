use crate::PfError;

/// Floating point type used throughout the workspace
pub type Real = f64;

/// Check that `v` is finite.
pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PfError::NonFinite { what, value: v })
    }
}

/// Check that `v` is finite and inside the closed interval `[min, max]`.
pub fn ensure_in_range(v: Real, min: Real, max: Real, what: &'static str) -> Result<Real, PfError> {
    let v = ensure_finite(v, what)?;
    if v < min || v > max {
        return Err(PfError::OutOfRange {
            what,
            value: v,
            min,
            max,
        });
    }
    Ok(v)
}

/// Check that `v` is finite and not negative.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, PfError> {
    ensure_in_range(v, 0.0, Real::INFINITY, what)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn range_checks() {
        assert!(ensure_in_range(0.5, 0.0, 1.0, "beta").is_ok());
        assert!(ensure_in_range(1.0, 0.0, 1.0, "beta").is_ok());
        let err = ensure_in_range(1.2, 0.0, 1.0, "beta").unwrap_err();
        assert!(matches!(err, PfError::OutOfRange { what: "beta", .. }));
        assert!(ensure_non_negative(-1e-9, "m").is_err());
        assert!(ensure_non_negative(Real::INFINITY, "m").is_err());
        assert!(ensure_non_negative(0.0, "m").is_ok());
    }
}
