//! Variable air volume operation: find the supply flow that delivers a
//! supply-air temperature set point.

use crate::air_handler::{AirHandler, LinearizationConfig};
use crate::error::{SolverError, SolverResult};
use crate::params::Field;
use crate::solution::AhuSolution;
use crate::unknowns::Point;
use tracing::{debug, info};

/// VAV search configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VavConfig {
    /// Supply air temperature set point θS [°C]
    pub theta_supply_sp: f64,
    /// Lower bound of the supply flow [kg/s]
    pub m_min: f64,
    /// Upper bound of the supply flow [kg/s]
    pub m_max: f64,
    /// Accept when |θ3 − θS| falls below this [K]
    pub tolerance: f64,
    /// Maximum number of bisection steps
    pub max_iterations: usize,
    /// Solver used at every evaluation
    pub linearization: LinearizationConfig,
}

impl VavConfig {
    pub fn new(theta_supply_sp: f64) -> Self {
        Self {
            theta_supply_sp,
            ..Self::default()
        }
    }
}

impl Default for VavConfig {
    fn default() -> Self {
        Self {
            theta_supply_sp: 18.0,
            m_min: 1e-3,
            m_max: 100.0,
            tolerance: 1e-6,
            max_iterations: 200,
            linearization: LinearizationConfig::default(),
        }
    }
}

/// Result of a VAV search.
#[derive(Clone, Debug)]
pub struct VavOutcome {
    /// Supply flow delivering the set point [kg/s]
    pub m: f64,
    pub solution: AhuSolution,
    /// Number of flow evaluations
    pub evaluations: usize,
}

#[derive(Clone)]
struct Probe {
    m: f64,
    error: f64,
    solution: AhuSolution,
}

impl AirHandler {
    /// Supply-temperature error `θ3(m) − θS` with `m` applied to a copy of `actual`.
    fn supply_error(&self, m: f64, cfg: &VavConfig) -> SolverResult<Probe> {
        let mut trial = self.clone();
        trial.set(Field::M, m)?;
        let solution = trial.solve(&cfg.linearization)?;
        let error = solution.theta(Point::Supply) - cfg.theta_supply_sp;
        debug!(m, error, "vav probe");
        Ok(Probe { m, error, solution })
    }

    /// Find the supply flow for which the supply air temperature equals
    /// `cfg.theta_supply_sp`, store it in `actual.m` and return the solution.
    ///
    /// The search starts from the current flow, widens geometrically (upwards
    /// first) until the set point is bracketed, then bisects.
    pub fn vav_mass_flow(&mut self, cfg: &VavConfig) -> SolverResult<VavOutcome> {
        if !(cfg.m_min > 0.0 && cfg.m_min < cfg.m_max && cfg.m_max.is_finite()) {
            return Err(SolverError::ProblemSetup {
                what: format!("invalid flow bounds [{}, {}]", cfg.m_min, cfg.m_max),
            });
        }
        if !(cfg.tolerance > 0.0) || cfg.max_iterations == 0 {
            return Err(SolverError::ProblemSetup {
                what: "VAV tolerance and max_iterations must be positive".to_string(),
            });
        }

        let m0 = self.actual().m.clamp(cfg.m_min, cfg.m_max);
        let start = self.supply_error(m0, cfg)?;
        let mut evaluations = 1;
        if start.error.abs() < cfg.tolerance {
            return self.accept(start, evaluations);
        }

        let (mut lo, mut hi) = match self.bracket(&start, cfg, &mut evaluations) {
            Some(pair) => pair,
            None => {
                return Err(SolverError::ConvergenceFailed {
                    what: format!(
                        "supply temperature set point {} °C not reachable for m in [{}, {}] kg/s",
                        cfg.theta_supply_sp, cfg.m_min, cfg.m_max
                    ),
                });
            }
        };

        for _ in 0..cfg.max_iterations {
            let mid = self.supply_error(0.5 * (lo.m + hi.m), cfg)?;
            evaluations += 1;
            if mid.error.abs() < cfg.tolerance {
                return self.accept(mid, evaluations);
            }
            if (hi.m - lo.m).abs() < f64::EPSILON * hi.m {
                return Err(SolverError::ConvergenceFailed {
                    what: format!(
                        "flow interval collapsed at m = {} kg/s with |θ3 − θS| = {:.3e} K",
                        mid.m,
                        mid.error.abs()
                    ),
                });
            }
            if mid.error.signum() == lo.error.signum() {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        Err(SolverError::ConvergenceFailed {
            what: format!(
                "VAV bisection did not reach {:.1e} K in {} steps",
                cfg.tolerance, cfg.max_iterations
            ),
        })
    }

    fn bracket(
        &self,
        start: &Probe,
        cfg: &VavConfig,
        evaluations: &mut usize,
    ) -> Option<(Probe, Probe)> {
        for factor in [2.0, 0.5] {
            let mut prev_error = start.error.abs();
            let mut m = start.m;
            loop {
                let next = (m * factor).clamp(cfg.m_min, cfg.m_max);
                if next == m {
                    break;
                }
                m = next;
                // Flows the model cannot evaluate end the search in this direction.
                let Ok(probe) = self.supply_error(m, cfg) else {
                    break;
                };
                *evaluations += 1;
                if probe.error.signum() != start.error.signum() {
                    return Some((start.clone(), probe));
                }
                if probe.error.abs() >= prev_error {
                    break;
                }
                prev_error = probe.error.abs();
            }
        }
        None
    }

    fn accept(&mut self, probe: Probe, evaluations: usize) -> SolverResult<VavOutcome> {
        self.set(Field::M, probe.m)?;
        info!(m = probe.m, evaluations, "VAV supply flow found");
        Ok(VavOutcome {
            m: probe.m,
            solution: probe.solution,
            evaluations,
        })
    }
}
