//! The air-handling unit: parameter ownership and solve entry points.

use crate::equations::{BalanceInputs, EquationSet};
use crate::error::{SolverError, SolverResult};
use crate::linear::solve_dense;
use crate::params::{DesignParameters, Field, Inputs, Parameters};
use crate::solution::AhuSolution;
use crate::unknowns::{Point, Unknown};
use pf_psychro::{MoistAir, MoistAirState, Psychrometrics};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Successive linearization configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearizationConfig {
    /// Initial linearization temperature [°C]
    pub theta_s0: f64,
    /// Stop when |θ1 − θs0| falls below this [K]
    pub tolerance: f64,
    /// Maximum number of linear solves
    pub max_iterations: usize,
}

impl Default for LinearizationConfig {
    fn default() -> Self {
        Self {
            theta_s0: 5.0,
            tolerance: 1e-3,
            max_iterations: 50,
        }
    }
}

/// Mixing box, cooling coil with by-pass, reheat coil, thermal zone and
/// building, with proportional indoor temperature and humidity control.
///
/// `design` is the configuration given at construction; `actual` is the
/// working copy every solve reads. Callers mutate `actual` between solves
/// through [`set`](Self::set); solving never modifies it.
#[derive(Clone)]
pub struct AirHandler {
    design: Parameters,
    actual: Parameters,
    psychro: Arc<dyn Psychrometrics>,
}

impl fmt::Debug for AirHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AirHandler")
            .field("design", &self.design)
            .field("actual", &self.actual)
            .field("psychro", &self.psychro.name())
            .finish()
    }
}

impl AirHandler {
    pub fn new(design: DesignParameters, inputs: Inputs) -> SolverResult<Self> {
        Self::with_psychrometrics(design, inputs, Arc::new(MoistAir::default()))
    }

    pub fn with_psychrometrics(
        design: DesignParameters,
        inputs: Inputs,
        psychro: Arc<dyn Psychrometrics>,
    ) -> SolverResult<Self> {
        Self::from_parameters(Parameters::new(design, inputs), psychro)
    }

    pub fn from_parameters(
        params: Parameters,
        psychro: Arc<dyn Psychrometrics>,
    ) -> SolverResult<Self> {
        params.validate()?;
        Ok(Self {
            design: params,
            actual: params,
            psychro,
        })
    }

    pub fn design(&self) -> &Parameters {
        &self.design
    }

    pub fn actual(&self) -> &Parameters {
        &self.actual
    }

    pub fn psychrometrics(&self) -> &dyn Psychrometrics {
        self.psychro.as_ref()
    }

    /// Overwrite one entry of the working parameters.
    pub fn set(&mut self, field: Field, value: f64) -> SolverResult<()> {
        self.actual.set(field, value)
    }

    /// Overwrite one entry of the working parameters by its position.
    pub fn set_index(&mut self, index: usize, value: f64) -> SolverResult<()> {
        let field = Field::from_index(index).ok_or_else(|| SolverError::ProblemSetup {
            what: format!("parameter index {index} out of range 0..{}", Field::COUNT),
        })?;
        self.set(field, value)
    }

    pub fn reset_to_design(&mut self) {
        self.actual = self.design;
    }

    /// Equation table for the working parameters linearized at `theta_s0`.
    pub fn equations(&self, theta_s0: f64) -> SolverResult<EquationSet> {
        let inputs = BalanceInputs::evaluate(&self.actual, theta_s0, self.psychro.as_ref())?;
        Ok(EquationSet::build(inputs))
    }

    /// Solve the 16 balances with the saturation curve linearized at `theta_s0` [°C].
    pub fn linear_solve(&self, theta_s0: f64) -> SolverResult<AhuSolution> {
        self.linear_solve_counted(theta_s0, 1)
    }

    fn linear_solve_counted(&self, theta_s0: f64, iterations: usize) -> SolverResult<AhuSolution> {
        if let Err(err) = check_degenerate(&self.actual) {
            warn!(%err, "refusing to solve degenerate configuration");
            return Err(err);
        }

        let set = self.equations(theta_s0)?;
        set.check_structure().inspect_err(|err| {
            warn!(%err, "equation table is structurally singular");
        })?;

        let (a, b) = set.assemble();
        let x = solve_dense(a, b).inspect_err(|err| {
            warn!(%err, theta_s0, "linear solve failed");
        })?;

        let mut values = [0.0; Unknown::COUNT];
        values.copy_from_slice(x.as_slice());
        let max_scaled_residual = set.max_scaled_residual(&values);
        debug!(
            theta_s0,
            theta_1 = values[Unknown::Theta1.column()],
            theta_4 = values[Unknown::Theta4.column()],
            max_scaled_residual,
            "linear solve"
        );
        Ok(AhuSolution::new(
            values,
            theta_s0,
            iterations,
            max_scaled_residual,
        ))
    }

    /// Successive linearization: re-linearize at the coil surface temperature
    /// until it stops moving, so that the s-point lies on the saturation curve.
    pub fn solve(&self, config: &LinearizationConfig) -> SolverResult<AhuSolution> {
        if config.max_iterations == 0 {
            return Err(SolverError::ProblemSetup {
                what: "max_iterations must be positive".to_string(),
            });
        }
        if !(config.tolerance > 0.0) {
            return Err(SolverError::ProblemSetup {
                what: "linearization tolerance must be positive".to_string(),
            });
        }

        let mut theta_s0 = config.theta_s0;
        let mut last_delta = f64::INFINITY;
        for iter in 1..=config.max_iterations {
            let solution = self.linear_solve_counted(theta_s0, iter)?;
            let theta_1 = solution.theta(Point::CoilSurface);
            last_delta = (theta_1 - theta_s0).abs();
            debug!(iter, theta_s0, theta_1, delta = last_delta, "linearization pass");
            if last_delta < config.tolerance {
                return Ok(solution);
            }
            theta_s0 = theta_1;
        }

        warn!(
            max_iterations = config.max_iterations,
            last_delta, "successive linearization did not converge"
        );
        Err(SolverError::ConvergenceFailed {
            what: format!(
                "coil surface temperature still moving by {last_delta:.3e} K after {} passes",
                config.max_iterations
            ),
        })
    }

    /// `w1 − w_sat(θ1)`: distance of the coil point from the true saturation curve.
    pub fn saturation_residual(&self, solution: &AhuSolution) -> SolverResult<f64> {
        let theta_1 = solution.theta(Point::CoilSurface);
        Ok(solution.w(Point::CoilSurface) - self.psychro.saturation_humidity_ratio(theta_1)?)
    }

    /// Moist-air state (θ, w, φ) of every point, in point order.
    pub fn point_states(&self, solution: &AhuSolution) -> SolverResult<Vec<MoistAirState>> {
        Point::ALL
            .into_iter()
            .map(|p| {
                self.psychro
                    .state(solution.theta(p), solution.w(p))
                    .map_err(SolverError::from)
            })
            .collect()
    }
}

/// Configurations for which the balances cannot have a unique solution.
fn check_degenerate(p: &Parameters) -> SolverResult<()> {
    if p.m == 0.0 {
        return Err(SolverError::Singular {
            what: "zero supply air flow (m = 0): air-side balances vanish".to_string(),
        });
    }
    if p.beta == 1.0 {
        return Err(SolverError::Singular {
            what: "full coil by-pass (β = 1): coil outlet point 1 is undetermined".to_string(),
        });
    }
    if p.k_theta == 0.0 && p.mo == 0.0 && p.mi == 0.0 && p.ua == 0.0 {
        return Err(SolverError::Singular {
            what: "indoor temperature not anchored (mo = mi = UA = 0, Kθ = 0)".to_string(),
        });
    }
    Ok(())
}
