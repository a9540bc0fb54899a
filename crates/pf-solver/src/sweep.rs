//! Parameter sweeps: solve the unit for a series of values of one field.

use crate::air_handler::{AirHandler, LinearizationConfig};
use crate::error::SolverResult;
use crate::params::Field;
use crate::solution::AhuSolution;
use rayon::prelude::*;
use tracing::debug;

/// One point of a sweep. Failures stay local to their point.
#[derive(Debug)]
pub struct SweepPoint {
    pub value: f64,
    pub result: SolverResult<AhuSolution>,
}

/// `steps` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let dx = (end - start) / (steps - 1) as f64;
            (0..steps)
                .map(|i| if i == steps - 1 { end } else { start + dx * i as f64 })
                .collect()
        }
    }
}

/// Solve `handler` once per value of `field`, each on its own copy of the
/// working parameters. Results come back in the order of `values`.
pub fn sweep(
    handler: &AirHandler,
    field: Field,
    values: &[f64],
    config: &LinearizationConfig,
) -> Vec<SweepPoint> {
    debug!(%field, points = values.len(), "parameter sweep");
    values
        .par_iter()
        .map(|&value| {
            let mut trial = handler.clone();
            let result = trial.set(field, value).and_then(|_| trial.solve(config));
            SweepPoint { value, result }
        })
        .collect()
}
