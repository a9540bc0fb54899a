//! Parameter set of the air-handling unit.
//!
//! Thirteen scalars split into design parameters `(m, mo, β, Kθ, Kw)` and
//! inputs `(θo, φo, θIsp, φIsp, mi, UA, Qsa, Qla)`. Every scalar also has a
//! stable position (see [`Field::index`]) so callers that think in terms of
//! the positional 13-vector can still address it.

use crate::error::{SolverError, SolverResult};
use pf_core::numeric::{ensure_finite, ensure_in_range, ensure_non_negative};

/// Design parameters of the unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DesignParameters {
    /// Supply dry-air mass flow rate [kg/s]
    pub m: f64,
    /// Outdoor (fresh) air mass flow rate [kg/s]
    pub mo: f64,
    /// Cooling-coil by-pass fraction [-]
    pub beta: f64,
    /// Indoor temperature controller gain [W/K]
    pub k_theta: f64,
    /// Indoor humidity controller gain [W/(kg/kg)]; 0 disables humidity control
    pub k_w: f64,
}

/// Boundary conditions and building data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Inputs {
    /// Outdoor temperature [°C]
    pub theta_o: f64,
    /// Outdoor relative humidity [-]
    pub phi_o: f64,
    /// Indoor temperature set point [°C]
    pub theta_i_sp: f64,
    /// Indoor relative humidity set point [-]
    pub phi_i_sp: f64,
    /// Infiltration mass flow rate [kg/s]
    pub mi: f64,
    /// Building overall heat-transfer coefficient [W/K]
    pub ua: f64,
    /// Auxiliary sensible load [W]
    pub qsa: f64,
    /// Auxiliary latent load [W]
    pub qla: f64,
}

/// Complete parameter set used for one solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parameters {
    pub m: f64,
    pub mo: f64,
    pub beta: f64,
    pub k_theta: f64,
    pub k_w: f64,
    pub theta_o: f64,
    pub phi_o: f64,
    pub theta_i_sp: f64,
    pub phi_i_sp: f64,
    pub mi: f64,
    pub ua: f64,
    pub qsa: f64,
    pub qla: f64,
}

impl Parameters {
    pub fn new(design: DesignParameters, inputs: Inputs) -> Self {
        Self {
            m: design.m,
            mo: design.mo,
            beta: design.beta,
            k_theta: design.k_theta,
            k_w: design.k_w,
            theta_o: inputs.theta_o,
            phi_o: inputs.phi_o,
            theta_i_sp: inputs.theta_i_sp,
            phi_i_sp: inputs.phi_i_sp,
            mi: inputs.mi,
            ua: inputs.ua,
            qsa: inputs.qsa,
            qla: inputs.qla,
        }
    }

    pub fn design_parameters(&self) -> DesignParameters {
        DesignParameters {
            m: self.m,
            mo: self.mo,
            beta: self.beta,
            k_theta: self.k_theta,
            k_w: self.k_w,
        }
    }

    pub fn inputs(&self) -> Inputs {
        Inputs {
            theta_o: self.theta_o,
            phi_o: self.phi_o,
            theta_i_sp: self.theta_i_sp,
            phi_i_sp: self.phi_i_sp,
            mi: self.mi,
            ua: self.ua,
            qsa: self.qsa,
            qla: self.qla,
        }
    }

    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::M => self.m,
            Field::Mo => self.mo,
            Field::Beta => self.beta,
            Field::KTheta => self.k_theta,
            Field::KW => self.k_w,
            Field::ThetaO => self.theta_o,
            Field::PhiO => self.phi_o,
            Field::ThetaISp => self.theta_i_sp,
            Field::PhiISp => self.phi_i_sp,
            Field::Mi => self.mi,
            Field::Ua => self.ua,
            Field::Qsa => self.qsa,
            Field::Qla => self.qla,
        }
    }

    /// Validate `value` for `field` and store it.
    pub fn set(&mut self, field: Field, value: f64) -> SolverResult<()> {
        let value = field.validate(value)?;
        let slot = match field {
            Field::M => &mut self.m,
            Field::Mo => &mut self.mo,
            Field::Beta => &mut self.beta,
            Field::KTheta => &mut self.k_theta,
            Field::KW => &mut self.k_w,
            Field::ThetaO => &mut self.theta_o,
            Field::PhiO => &mut self.phi_o,
            Field::ThetaISp => &mut self.theta_i_sp,
            Field::PhiISp => &mut self.phi_i_sp,
            Field::Mi => &mut self.mi,
            Field::Ua => &mut self.ua,
            Field::Qsa => &mut self.qsa,
            Field::Qla => &mut self.qla,
        };
        *slot = value;
        Ok(())
    }

    /// Check every field against its admissible range.
    pub fn validate(&self) -> SolverResult<()> {
        for field in Field::ALL {
            field.validate(self.get(field))?;
        }
        Ok(())
    }

    /// Positional form `[m, mo, β, Kθ, Kw, θo, φo, θIsp, φIsp, mi, UA, Qsa, Qla]`.
    pub fn to_array(&self) -> [f64; Field::COUNT] {
        Field::ALL.map(|f| self.get(f))
    }

    pub fn from_array(values: [f64; Field::COUNT]) -> SolverResult<Self> {
        let mut params = Self::new(
            DesignParameters {
                m: 0.0,
                mo: 0.0,
                beta: 0.0,
                k_theta: 0.0,
                k_w: 0.0,
            },
            Inputs {
                theta_o: 0.0,
                phi_o: 0.0,
                theta_i_sp: 0.0,
                phi_i_sp: 0.0,
                mi: 0.0,
                ua: 0.0,
                qsa: 0.0,
                qla: 0.0,
            },
        );
        for (field, value) in Field::ALL.into_iter().zip(values) {
            params.set(field, value)?;
        }
        Ok(params)
    }
}

/// Name of one entry of the parameter set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    M,
    Mo,
    Beta,
    KTheta,
    KW,
    ThetaO,
    PhiO,
    ThetaISp,
    PhiISp,
    Mi,
    Ua,
    Qsa,
    Qla,
}

impl Field {
    pub const COUNT: usize = 13;

    /// All fields in positional order.
    pub const ALL: [Field; Field::COUNT] = [
        Field::M,
        Field::Mo,
        Field::Beta,
        Field::KTheta,
        Field::KW,
        Field::ThetaO,
        Field::PhiO,
        Field::ThetaISp,
        Field::PhiISp,
        Field::Mi,
        Field::Ua,
        Field::Qsa,
        Field::Qla,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Field> {
        Field::ALL.get(index).copied()
    }

    /// Snake-case name used in scenario files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Field::M => "m",
            Field::Mo => "mo",
            Field::Beta => "beta",
            Field::KTheta => "k_theta",
            Field::KW => "k_w",
            Field::ThetaO => "theta_o",
            Field::PhiO => "phi_o",
            Field::ThetaISp => "theta_i_sp",
            Field::PhiISp => "phi_i_sp",
            Field::Mi => "mi",
            Field::Ua => "ua",
            Field::Qsa => "qsa",
            Field::Qla => "qla",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn unit(self) -> &'static str {
        match self {
            Field::M | Field::Mo | Field::Mi => "kg/s",
            Field::Beta | Field::PhiO | Field::PhiISp => "-",
            Field::KTheta | Field::Ua => "W/K",
            Field::KW => "W/(kg/kg)",
            Field::ThetaO | Field::ThetaISp => "°C",
            Field::Qsa | Field::Qla => "W",
        }
    }

    /// Admissible range check for a single value.
    ///
    /// Temperatures are only required to be finite here; the psychrometric
    /// model reports them as out of range when they are evaluated.
    pub fn validate(self, value: f64) -> SolverResult<f64> {
        let name = self.name();
        let checked = match self {
            Field::M | Field::Mo | Field::Mi | Field::Ua | Field::KTheta | Field::KW => {
                ensure_non_negative(value, name)
            }
            Field::Beta | Field::PhiO | Field::PhiISp => ensure_in_range(value, 0.0, 1.0, name),
            Field::ThetaO | Field::ThetaISp | Field::Qsa | Field::Qla => ensure_finite(value, name),
        };
        checked.map_err(|err| SolverError::InvalidParameter {
            field: name,
            what: err.to_string(),
        })
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn winter() -> Parameters {
        Parameters::new(
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
        )
    }

    #[test]
    fn index_mapping_is_positional() {
        for (i, field) in Field::ALL.into_iter().enumerate() {
            assert_eq!(field.index(), i);
            assert_eq!(Field::from_index(i), Some(field));
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_index(13), None);
        assert_eq!(Field::from_name("alpha"), None);
    }

    #[test]
    fn array_round_trip() {
        let p = winter();
        let arr = p.to_array();
        assert_eq!(arr[0], 3.1);
        assert_eq!(arr[4], 0.0);
        assert_eq!(arr[12], 4_000.0);
        assert_eq!(Parameters::from_array(arr).unwrap(), p);
    }

    #[test]
    fn split_views_match() {
        let p = winter();
        assert_eq!(Parameters::new(p.design_parameters(), p.inputs()), p);
    }

    #[test]
    fn set_rejects_out_of_range() {
        let mut p = winter();
        assert!(p.set(Field::Beta, 1.5).is_err());
        assert!(p.set(Field::M, -0.1).is_err());
        assert!(p.set(Field::KW, f64::NAN).is_err());
        assert!(p.set(Field::PhiO, -0.01).is_err());
        assert_eq!(p, winter());

        p.set(Field::KW, 1e10).unwrap();
        assert_eq!(p.k_w, 1e10);
        p.set(Field::Qsa, -5_000.0).unwrap();
        assert_eq!(p.get(Field::Qsa), -5_000.0);
    }

    #[test]
    fn invalid_parameter_names_the_field() {
        let err = Field::Beta.validate(2.0).unwrap_err();
        match err {
            SolverError::InvalidParameter { field, .. } => assert_eq!(field, "beta"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
