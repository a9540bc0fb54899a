//! Equation table of the AHU balances.
//!
//! Each element contributes its equations as `Σ coeff·unknown = rhs` records
//! keyed by [`Unknown`], never by raw column index. The table is rebuilt for
//! every solve from the current parameters and the linearization temperature.

use crate::error::{SolverError, SolverResult};
use crate::params::Parameters;
use crate::unknowns::{Element, Unknown};
use nalgebra::{DMatrix, DVector};
use pf_core::units::constants::{C_AIR, L_VAPOR};
use pf_psychro::Psychrometrics;
use std::collections::HashSet;

/// Numeric inputs of the equation table: the parameter set plus the
/// psychrometric values it depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BalanceInputs {
    pub params: Parameters,
    /// Outdoor humidity ratio w(θo, φo)
    pub w_o: f64,
    /// Indoor humidity ratio set point w(θIsp, φIsp)
    pub w_i_sp: f64,
    /// Linearization temperature of the saturation curve [°C]
    pub theta_s0: f64,
    /// Saturation humidity ratio at θs0
    pub w_s0: f64,
    /// Saturation curve slope at θs0
    pub slope_s0: f64,
}

impl BalanceInputs {
    pub fn evaluate(
        params: &Parameters,
        theta_s0: f64,
        psychro: &dyn Psychrometrics,
    ) -> SolverResult<Self> {
        Ok(Self {
            params: *params,
            w_o: psychro.humidity_ratio(params.theta_o, params.phi_o)?,
            w_i_sp: psychro.humidity_ratio(params.theta_i_sp, params.phi_i_sp)?,
            theta_s0,
            w_s0: psychro.saturation_humidity_ratio(theta_s0)?,
            slope_s0: psychro.saturation_slope(theta_s0)?,
        })
    }
}

/// One linear equation `Σ coeff·unknown = rhs`.
#[derive(Clone, Debug, PartialEq)]
pub struct Equation {
    pub element: Element,
    pub name: &'static str,
    pub terms: Vec<(Unknown, f64)>,
    pub rhs: f64,
}

impl Equation {
    fn new(element: Element, name: &'static str) -> Self {
        Self {
            element,
            name,
            terms: Vec::with_capacity(4),
            rhs: 0.0,
        }
    }

    fn term(mut self, unknown: Unknown, coeff: f64) -> Self {
        self.terms.push((unknown, coeff));
        self
    }

    fn rhs(mut self, rhs: f64) -> Self {
        self.rhs = rhs;
        self
    }

    /// Coefficient of `unknown` (0 if it does not appear).
    pub fn coefficient(&self, unknown: Unknown) -> f64 {
        self.terms
            .iter()
            .filter(|(u, _)| *u == unknown)
            .map(|(_, c)| c)
            .sum()
    }

    /// `Σ coeff·x − rhs` for a full solution vector in column order.
    pub fn residual(&self, x: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(u, c)| c * x[u.column()])
            .sum::<f64>()
            - self.rhs
    }

    /// Magnitude of the terms, used to make residuals dimensionless.
    pub fn scale(&self, x: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(u, c)| (c * x[u.column()]).abs())
            .sum::<f64>()
            + self.rhs.abs()
    }

    pub fn is_degenerate(&self) -> bool {
        self.terms.iter().all(|(_, c)| *c == 0.0)
    }

    /// Human readable form, e.g. `MX1 sensible: +3.1e3·θ0 -2.1e3·θ4 = 5e3`.
    pub fn describe(&self) -> String {
        let lhs = self
            .terms
            .iter()
            .map(|(u, c)| format!("{c:+.6e}·{u}"))
            .collect::<Vec<_>>()
            .join(" ");
        format!("{} {}: {} = {:.6e}", self.element, self.name, lhs, self.rhs)
    }
}

/// Mixing of outdoor air `mo` with recirculated indoor air `m − mo` into point 0.
pub fn mixing_box_1(b: &BalanceInputs) -> Vec<Equation> {
    let p = &b.params;
    vec![
        Equation::new(Element::MixingBox1, "sensible")
            .term(Unknown::Theta0, p.m * C_AIR)
            .term(Unknown::Theta4, -(p.m - p.mo) * C_AIR)
            .rhs(p.mo * C_AIR * p.theta_o),
        Equation::new(Element::MixingBox1, "latent")
            .term(Unknown::W0, p.m * L_VAPOR)
            .term(Unknown::W4, -(p.m - p.mo) * L_VAPOR)
            .rhs(p.mo * L_VAPOR * b.w_o),
    ]
}

/// Cooling coil treating `(1 − β)m` from point 0 to point 1, with the
/// saturation curve replaced by its tangent at θs0.
pub fn cooling_coil(b: &BalanceInputs) -> Vec<Equation> {
    let p = &b.params;
    let through = (1.0 - p.beta) * p.m;
    vec![
        Equation::new(Element::CoolingCoil, "sensible")
            .term(Unknown::Theta0, through * C_AIR)
            .term(Unknown::Theta1, -through * C_AIR)
            .term(Unknown::QsCoolingCoil, 1.0),
        Equation::new(Element::CoolingCoil, "latent")
            .term(Unknown::W0, through * L_VAPOR)
            .term(Unknown::W1, -through * L_VAPOR)
            .term(Unknown::QlCoolingCoil, 1.0),
        Equation::new(Element::CoolingCoil, "saturation line")
            .term(Unknown::Theta1, b.slope_s0)
            .term(Unknown::W1, -1.0)
            .rhs(b.slope_s0 * b.theta_s0 - b.w_s0),
        Equation::new(Element::CoolingCoil, "total")
            .term(Unknown::QtCoolingCoil, -1.0)
            .term(Unknown::QsCoolingCoil, 1.0)
            .term(Unknown::QlCoolingCoil, 1.0),
    ]
}

/// Recombination of the by-passed stream (point 0) with the coil stream
/// (point 1) into point 2.
pub fn mixing_box_2(b: &BalanceInputs) -> Vec<Equation> {
    let p = &b.params;
    vec![
        Equation::new(Element::MixingBox2, "sensible")
            .term(Unknown::Theta0, p.beta * p.m * C_AIR)
            .term(Unknown::Theta1, (1.0 - p.beta) * p.m * C_AIR)
            .term(Unknown::Theta2, -p.m * C_AIR),
        Equation::new(Element::MixingBox2, "latent")
            .term(Unknown::W0, p.beta * p.m * L_VAPOR)
            .term(Unknown::W1, (1.0 - p.beta) * p.m * L_VAPOR)
            .term(Unknown::W2, -p.m * L_VAPOR),
    ]
}

/// Sensible-only reheat from point 2 to point 3.
pub fn heating_coil(b: &BalanceInputs) -> Vec<Equation> {
    let p = &b.params;
    vec![
        Equation::new(Element::HeatingCoil, "sensible")
            .term(Unknown::Theta2, p.m * C_AIR)
            .term(Unknown::Theta3, -p.m * C_AIR)
            .term(Unknown::QsHeatingCoil, 1.0),
        Equation::new(Element::HeatingCoil, "latent")
            .term(Unknown::W2, p.m * L_VAPOR)
            .term(Unknown::W3, -p.m * L_VAPOR),
    ]
}

/// Supply air (point 3) picks up the zone loads and leaves at point 4.
pub fn thermal_zone(b: &BalanceInputs) -> Vec<Equation> {
    let p = &b.params;
    vec![
        Equation::new(Element::ThermalZone, "sensible")
            .term(Unknown::Theta3, p.m * C_AIR)
            .term(Unknown::Theta4, -p.m * C_AIR)
            .term(Unknown::QsZone, 1.0),
        Equation::new(Element::ThermalZone, "latent")
            .term(Unknown::W3, p.m * L_VAPOR)
            .term(Unknown::W4, -p.m * L_VAPOR)
            .term(Unknown::QlZone, 1.0),
    ]
}

/// Envelope transmission, infiltration and auxiliary loads.
pub fn building(b: &BalanceInputs) -> Vec<Equation> {
    let p = &b.params;
    let g = p.ua + p.mi * C_AIR;
    vec![
        Equation::new(Element::Building, "sensible")
            .term(Unknown::Theta4, g)
            .term(Unknown::QsZone, 1.0)
            .rhs(g * p.theta_o + p.qsa),
        Equation::new(Element::Building, "latent")
            .term(Unknown::W4, p.mi * L_VAPOR)
            .term(Unknown::QlZone, 1.0)
            .rhs(p.mi * L_VAPOR * b.w_o + p.qla),
    ]
}

/// `Kθ·(θIsp − θ4) = Qt_CC`: the temperature controller drives the coil.
pub fn temperature_controller(b: &BalanceInputs) -> Vec<Equation> {
    let p = &b.params;
    vec![
        Equation::new(Element::TemperatureController, "proportional")
            .term(Unknown::Theta4, p.k_theta)
            .term(Unknown::QtCoolingCoil, 1.0)
            .rhs(p.k_theta * p.theta_i_sp),
    ]
}

/// `Kw·(wIsp − w4) = Qs_HC`: the humidity controller drives the reheat.
pub fn humidity_controller(b: &BalanceInputs) -> Vec<Equation> {
    let p = &b.params;
    vec![
        Equation::new(Element::HumidityController, "proportional")
            .term(Unknown::W4, p.k_w)
            .term(Unknown::QsHeatingCoil, 1.0)
            .rhs(p.k_w * b.w_i_sp),
    ]
}

/// Complete set of balances for one linearization point.
#[derive(Clone, Debug)]
pub struct EquationSet {
    pub inputs: BalanceInputs,
    pub equations: Vec<Equation>,
}

impl EquationSet {
    pub fn build(inputs: BalanceInputs) -> Self {
        let builders: [fn(&BalanceInputs) -> Vec<Equation>; 8] = [
            mixing_box_1,
            cooling_coil,
            mixing_box_2,
            heating_coil,
            thermal_zone,
            building,
            temperature_controller,
            humidity_controller,
        ];
        let equations = builders
            .iter()
            .flat_map(|element| element(&inputs))
            .collect();
        Self { inputs, equations }
    }

    pub fn len(&self) -> usize {
        self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    /// Equations contributed by one element.
    pub fn of(&self, element: Element) -> impl Iterator<Item = &Equation> {
        self.equations.iter().filter(move |eq| eq.element == element)
    }

    /// Structural checks run before factorization.
    ///
    /// Square system, finite coefficients, no empty equation, every unknown
    /// present with a nonzero coefficient somewhere.
    pub fn check_structure(&self) -> SolverResult<()> {
        if self.equations.len() != Unknown::COUNT {
            return Err(SolverError::ProblemSetup {
                what: format!(
                    "{} equations for {} unknowns",
                    self.equations.len(),
                    Unknown::COUNT
                ),
            });
        }

        let mut present = HashSet::with_capacity(Unknown::COUNT);
        for eq in &self.equations {
            for (u, c) in &eq.terms {
                if !c.is_finite() {
                    return Err(SolverError::ProblemSetup {
                        what: format!(
                            "non-finite coefficient of {u} in {} {}",
                            eq.element, eq.name
                        ),
                    });
                }
                if *c != 0.0 {
                    present.insert(*u);
                }
            }
            if !eq.rhs.is_finite() {
                return Err(SolverError::ProblemSetup {
                    what: format!("non-finite right-hand side in {} {}", eq.element, eq.name),
                });
            }
            if eq.is_degenerate() {
                return Err(SolverError::Singular {
                    what: format!("{} {} equation has no nonzero coefficient", eq.element, eq.name),
                });
            }
        }

        if let Some(missing) = Unknown::ALL.into_iter().find(|u| !present.contains(u)) {
            return Err(SolverError::Singular {
                what: format!("unknown {missing} does not appear in any equation"),
            });
        }
        Ok(())
    }

    /// Dense coefficient matrix and right-hand side in column order.
    pub fn assemble(&self) -> (DMatrix<f64>, DVector<f64>) {
        let n = Unknown::COUNT;
        let mut a = DMatrix::zeros(self.equations.len(), n);
        let mut b = DVector::zeros(self.equations.len());
        for (row, eq) in self.equations.iter().enumerate() {
            for (u, c) in &eq.terms {
                a[(row, u.column())] += c;
            }
            b[row] = eq.rhs;
        }
        (a, b)
    }

    pub fn residuals(&self, x: &[f64]) -> Vec<f64> {
        self.equations.iter().map(|eq| eq.residual(x)).collect()
    }

    /// Residuals divided by the magnitude of the terms of each equation.
    pub fn scaled_residuals(&self, x: &[f64]) -> Vec<f64> {
        self.equations
            .iter()
            .map(|eq| {
                let scale = eq.scale(x);
                if scale > 0.0 {
                    eq.residual(x) / scale
                } else {
                    0.0
                }
            })
            .collect()
    }

    pub fn max_scaled_residual(&self, x: &[f64]) -> f64 {
        self.scaled_residuals(x)
            .into_iter()
            .fold(0.0, |acc, r| acc.max(r.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{DesignParameters, Inputs};
    use pf_psychro::MoistAir;

    fn inputs() -> BalanceInputs {
        let params = Parameters::new(
            DesignParameters {
                m: 3.1,
                mo: 1.0,
                beta: 0.2,
                k_theta: 1e10,
                k_w: 0.0,
            },
            Inputs {
                theta_o: 5.0,
                phi_o: 0.5,
                theta_i_sp: 26.0,
                phi_i_sp: 0.5,
                mi: 1.35,
                ua: 675.0,
                qsa: 34_000.0,
                qla: 4_000.0,
            },
        );
        BalanceInputs::evaluate(&params, 10.0, &MoistAir::default()).unwrap()
    }

    #[test]
    fn table_has_one_block_per_element() {
        let set = EquationSet::build(inputs());
        assert_eq!(set.len(), Unknown::COUNT);
        for element in Element::ALL {
            assert_eq!(set.of(element).count(), element.equation_count());
        }
        set.check_structure().unwrap();
    }

    #[test]
    fn mixing_box_1_coefficients() {
        let eqs = mixing_box_1(&inputs());
        assert!((eqs[0].coefficient(Unknown::Theta0) - 3100.0).abs() < 1e-9);
        assert!((eqs[0].coefficient(Unknown::Theta4) + 2100.0).abs() < 1e-9);
        assert!((eqs[0].rhs - 5000.0).abs() < 1e-9);
        assert_eq!(eqs[1].coefficient(Unknown::Theta0), 0.0);
    }

    #[test]
    fn saturation_line_passes_through_tangent_point() {
        let b = inputs();
        let eq = &cooling_coil(&b)[2];
        // At θ1 = θs0 the line gives w1 = w_sat(θs0).
        let mut x = vec![0.0; Unknown::COUNT];
        x[Unknown::Theta1.column()] = b.theta_s0;
        x[Unknown::W1.column()] = b.w_s0;
        assert!(eq.residual(&x).abs() < 1e-15);
    }

    #[test]
    fn assemble_places_terms_by_unknown() {
        let set = EquationSet::build(inputs());
        let (a, b) = set.assemble();
        assert_eq!(a.shape(), (16, 16));
        // Building sensible row
        let row = set
            .equations
            .iter()
            .position(|eq| eq.element == Element::Building && eq.name == "sensible")
            .unwrap();
        assert!((a[(row, Unknown::Theta4.column())] - 2025.0).abs() < 1e-9);
        assert_eq!(a[(row, Unknown::QsZone.column())], 1.0);
        assert!((b[row] - (2025.0 * 5.0 + 34_000.0)).abs() < 1e-9);
    }

    #[test]
    fn zero_flow_makes_mixing_box_2_degenerate() {
        let mut b = inputs();
        b.params.m = 0.0;
        let set = EquationSet::build(b);
        let err = set.check_structure().unwrap_err();
        match err {
            SolverError::Singular { what } => assert!(what.contains("MX2"), "{what}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn describe_names_element_and_unknowns() {
        let eq = &temperature_controller(&inputs())[0];
        let text = eq.describe();
        assert!(text.starts_with("Kθ proportional"));
        assert!(text.contains("θ4"));
        assert!(text.contains("Qt_CC"));
    }
}
