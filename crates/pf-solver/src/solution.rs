//! Solved state of the unit.

use crate::unknowns::{Point, Unknown};
use pf_core::units::{Power, Temperature, degc, watts};

/// Solution of the 16 balances, in column order.
#[derive(Clone, Debug, PartialEq)]
pub struct AhuSolution {
    x: [f64; Unknown::COUNT],
    /// Linearization temperature of the last linear solve [°C]
    pub theta_s0: f64,
    /// Number of linear solves performed
    pub iterations: usize,
    /// Largest dimensionless residual of the linear system
    pub max_scaled_residual: f64,
}

impl AhuSolution {
    pub(crate) fn new(
        x: [f64; Unknown::COUNT],
        theta_s0: f64,
        iterations: usize,
        max_scaled_residual: f64,
    ) -> Self {
        Self {
            x,
            theta_s0,
            iterations,
            max_scaled_residual,
        }
    }

    pub fn value(&self, unknown: Unknown) -> f64 {
        self.x[unknown.column()]
    }

    /// Dry-bulb temperature of a point [°C].
    pub fn theta(&self, point: Point) -> f64 {
        self.value(Unknown::theta(point))
    }

    /// Humidity ratio of a point [kg/kg].
    pub fn w(&self, point: Point) -> f64 {
        self.value(Unknown::w(point))
    }

    pub fn temperature(&self, point: Point) -> Temperature {
        degc(self.theta(point))
    }

    /// Heat flow of a heat-flow unknown; `None` for psychrometric unknowns.
    pub fn heat(&self, unknown: Unknown) -> Option<Power> {
        unknown.is_heat_flow().then(|| watts(self.value(unknown)))
    }

    pub fn coil_total_heat(&self) -> f64 {
        self.value(Unknown::QtCoolingCoil)
    }

    pub fn coil_sensible_heat(&self) -> f64 {
        self.value(Unknown::QsCoolingCoil)
    }

    pub fn coil_latent_heat(&self) -> f64 {
        self.value(Unknown::QlCoolingCoil)
    }

    pub fn reheat_heat(&self) -> f64 {
        self.value(Unknown::QsHeatingCoil)
    }

    pub fn zone_sensible_heat(&self) -> f64 {
        self.value(Unknown::QsZone)
    }

    pub fn zone_latent_heat(&self) -> f64 {
        self.value(Unknown::QlZone)
    }

    /// The ordered 16-value vector.
    pub fn as_slice(&self) -> &[f64] {
        &self.x
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.x.to_vec()
    }
}
