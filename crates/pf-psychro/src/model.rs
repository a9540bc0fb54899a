//! Psychrometric oracle trait and the moist-air state it reports.

use crate::error::PsychroResult;
use pf_core::units::{Temperature, degc};

/// Moist-air state at one point of the chart.
///
/// Carries both coordinates the solver works with (dry-bulb temperature and
/// humidity ratio) and the relative humidity derived from them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoistAirState {
    /// Dry-bulb temperature [°C]
    pub theta: f64,
    /// Humidity ratio [kg vapour / kg dry air]
    pub w: f64,
    /// Relative humidity [-]; may exceed 1 for points on a linearized
    /// saturation line (the coil s-point is not on the true curve).
    pub phi: f64,
}

impl MoistAirState {
    pub fn temperature(&self) -> Temperature {
        degc(self.theta)
    }

    pub fn summary(&self) -> String {
        format!(
            "θ={:.2}°C, w={:.5}kg/kg, φ={:.1}%",
            self.theta,
            self.w,
            self.phi * 100.0
        )
    }
}

/// Trait for psychrometric property models.
///
/// Implementations must be thread-safe (Send + Sync) so that parameter sweeps
/// can share one oracle across workers. Every method is a pure function of its
/// arguments. Inputs outside the model's valid range are reported as
/// [`PsychroError::OutOfRange`](crate::PsychroError::OutOfRange), never
/// clamped.
pub trait Psychrometrics: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Saturation pressure of water vapour [Pa] at `theta` [°C].
    fn saturation_pressure(&self, theta: f64) -> PsychroResult<f64>;

    /// Humidity ratio [kg/kg] at dry-bulb `theta` [°C] and relative humidity `phi` [-].
    fn humidity_ratio(&self, theta: f64, phi: f64) -> PsychroResult<f64>;

    /// Derivative of the saturation curve dw_sat/dθ [kg/(kg·K)] at `theta` [°C].
    fn saturation_slope(&self, theta: f64) -> PsychroResult<f64>;

    /// Relative humidity [-] of air at `theta` [°C] with humidity ratio `w`.
    ///
    /// Inverse of [`humidity_ratio`](Self::humidity_ratio) in `phi`.
    fn relative_humidity(&self, theta: f64, w: f64) -> PsychroResult<f64>;

    /// Humidity ratio at 100 % relative humidity.
    fn saturation_humidity_ratio(&self, theta: f64) -> PsychroResult<f64> {
        self.humidity_ratio(theta, 1.0)
    }

    /// Full state (θ, w, φ) from temperature and humidity ratio.
    fn state(&self, theta: f64, w: f64) -> PsychroResult<MoistAirState> {
        let phi = self.relative_humidity(theta, w)?;
        Ok(MoistAirState { theta, w, phi })
    }
}
