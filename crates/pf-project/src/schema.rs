//! Scenario schema definitions.

use pf_solver::{DesignParameters, Inputs, LinearizationConfig, VavConfig};
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    pub parameters: ParametersDef,
    pub inputs: InputsDef,
    #[serde(default)]
    pub linearization: LinearizationDef,
    #[serde(default)]
    pub sweeps: Vec<SweepDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vav: Option<VavDef>,
}

/// Design parameters of the unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ParametersDef {
    /// Supply air mass flow [kg/s]
    pub m: f64,
    /// Outdoor air mass flow [kg/s]
    pub mo: f64,
    /// Coil by-pass factor [-]
    pub beta: f64,
    /// Indoor temperature controller gain [W/K]
    pub k_theta: f64,
    /// Indoor humidity controller gain [W/(kg/kg)]
    #[serde(default)]
    pub k_w: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InputsDef {
    pub theta_o: f64,
    pub phi_o: f64,
    pub theta_i_sp: f64,
    pub phi_i_sp: f64,
    pub mi: f64,
    pub ua: f64,
    pub qsa: f64,
    pub qla: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LinearizationDef {
    #[serde(default = "default_theta_s0")]
    pub theta_s0: f64,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_theta_s0() -> f64 {
    LinearizationConfig::default().theta_s0
}

fn default_tolerance() -> f64 {
    LinearizationConfig::default().tolerance
}

fn default_max_iterations() -> usize {
    LinearizationConfig::default().max_iterations
}

impl Default for LinearizationDef {
    fn default() -> Self {
        Self {
            theta_s0: default_theta_s0(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

/// A named series of values for one parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepDef {
    pub id: String,
    /// Parameter name, e.g. `theta_o`
    pub field: String,
    pub start: f64,
    pub end: f64,
    pub steps: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VavDef {
    /// Supply air temperature set point [°C]
    pub theta_supply_sp: f64,
    #[serde(default = "default_m_min")]
    pub m_min: f64,
    #[serde(default = "default_m_max")]
    pub m_max: f64,
}

fn default_m_min() -> f64 {
    VavConfig::default().m_min
}

fn default_m_max() -> f64 {
    VavConfig::default().m_max
}

impl From<ParametersDef> for DesignParameters {
    fn from(def: ParametersDef) -> Self {
        DesignParameters {
            m: def.m,
            mo: def.mo,
            beta: def.beta,
            k_theta: def.k_theta,
            k_w: def.k_w,
        }
    }
}

impl From<InputsDef> for Inputs {
    fn from(def: InputsDef) -> Self {
        Inputs {
            theta_o: def.theta_o,
            phi_o: def.phi_o,
            theta_i_sp: def.theta_i_sp,
            phi_i_sp: def.phi_i_sp,
            mi: def.mi,
            ua: def.ua,
            qsa: def.qsa,
            qla: def.qla,
        }
    }
}

impl From<LinearizationDef> for LinearizationConfig {
    fn from(def: LinearizationDef) -> Self {
        LinearizationConfig {
            theta_s0: def.theta_s0,
            tolerance: def.tolerance,
            max_iterations: def.max_iterations,
        }
    }
}

impl Scenario {
    pub fn design_parameters(&self) -> DesignParameters {
        self.parameters.into()
    }

    pub fn solver_inputs(&self) -> Inputs {
        self.inputs.into()
    }

    pub fn linearization_config(&self) -> LinearizationConfig {
        self.linearization.into()
    }

    /// VAV search settings, solving each probe with the scenario's linearization.
    pub fn vav_config(&self) -> Option<VavConfig> {
        self.vav.map(|def| VavConfig {
            theta_supply_sp: def.theta_supply_sp,
            m_min: def.m_min,
            m_max: def.m_max,
            linearization: self.linearization_config(),
            ..VavConfig::default()
        })
    }

    pub fn sweep(&self, id: &str) -> Option<&SweepDef> {
        self.sweeps.iter().find(|s| s.id == id)
    }
}
