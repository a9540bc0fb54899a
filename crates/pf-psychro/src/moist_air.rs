//! Closed-form moist-air backend.
//!
//! Saturation pressure uses the correlation
//! `p_vs = exp(23.5771 − 4042.9 / (T − 37.58))` with `T` in kelvin; the
//! humidity ratio follows from ideal-gas mixing at the total pressure `p`:
//! `w = ε·φ·p_vs / (p − φ·p_vs)`, `ε = M_v / M_a = 0.621945`.

use crate::error::{PsychroError, PsychroResult};
use crate::model::Psychrometrics;
use pf_core::numeric::{ensure_finite, ensure_in_range};
use pf_core::units::constants::{P_ATM_PA, T0_K};
use pf_core::units::{Pressure, pa, pa_of};

/// Lowest temperature the correlation is used for [°C].
pub const THETA_MIN: f64 = -40.0;
/// Highest temperature the correlation is used for [°C].
pub const THETA_MAX: f64 = 80.0;
/// Relative humidity bounds [-].
pub const PHI_MIN: f64 = 0.0;
pub const PHI_MAX: f64 = 1.0;

/// Ratio of molar masses water vapour / dry air.
const EPSILON: f64 = 0.621_945;
const A: f64 = 23.5771;
const B: f64 = 4042.9;
const C: f64 = 37.58;

/// Moist air at a fixed total pressure.
#[derive(Clone, Debug, PartialEq)]
pub struct MoistAir {
    /// Total (barometric) pressure [Pa]
    pressure: f64,
}

impl Default for MoistAir {
    fn default() -> Self {
        Self {
            pressure: P_ATM_PA,
        }
    }
}

impl MoistAir {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moist air at a site pressure other than sea level.
    pub fn with_pressure(pressure: Pressure) -> PsychroResult<Self> {
        let p = ensure_finite(pa_of(pressure), "total pressure")?;
        if p <= 0.0 {
            return Err(PsychroError::InvalidArg {
                what: "total pressure must be positive",
            });
        }
        Ok(Self { pressure: p })
    }

    pub fn pressure(&self) -> Pressure {
        pa(self.pressure)
    }

    fn check_theta(theta: f64) -> PsychroResult<f64> {
        Ok(ensure_in_range(theta, THETA_MIN, THETA_MAX, "temperature")?)
    }

    fn check_phi(phi: f64) -> PsychroResult<f64> {
        Ok(ensure_in_range(phi, PHI_MIN, PHI_MAX, "relative humidity")?)
    }

    fn p_vs(theta: f64) -> f64 {
        (A - B / (theta + T0_K - C)).exp()
    }

    fn dp_vs(theta: f64) -> f64 {
        let t = theta + T0_K - C;
        Self::p_vs(theta) * B / (t * t)
    }
}

impl Psychrometrics for MoistAir {
    fn name(&self) -> &str {
        "moist-air"
    }

    fn saturation_pressure(&self, theta: f64) -> PsychroResult<f64> {
        let theta = Self::check_theta(theta)?;
        Ok(Self::p_vs(theta))
    }

    fn humidity_ratio(&self, theta: f64, phi: f64) -> PsychroResult<f64> {
        let theta = Self::check_theta(theta)?;
        let phi = Self::check_phi(phi)?;
        let pv = phi * Self::p_vs(theta);
        if pv >= self.pressure {
            return Err(PsychroError::NonPhysical {
                what: "vapour pressure reaches total pressure",
            });
        }
        Ok(EPSILON * pv / (self.pressure - pv))
    }

    fn saturation_slope(&self, theta: f64) -> PsychroResult<f64> {
        let theta = Self::check_theta(theta)?;
        let p_vs = Self::p_vs(theta);
        let gap = self.pressure - p_vs;
        if gap <= 0.0 {
            return Err(PsychroError::NonPhysical {
                what: "saturation pressure reaches total pressure",
            });
        }
        Ok(EPSILON * self.pressure * Self::dp_vs(theta) / (gap * gap))
    }

    fn relative_humidity(&self, theta: f64, w: f64) -> PsychroResult<f64> {
        let theta = Self::check_theta(theta)?;
        let w = ensure_finite(w, "humidity ratio")?;
        if w < 0.0 {
            return Err(PsychroError::OutOfRange {
                what: "humidity ratio",
                value: w,
                min: 0.0,
                max: f64::INFINITY,
            });
        }
        let pv = self.pressure * w / (EPSILON + w);
        Ok(pv / Self::p_vs(theta))
    }
}
