//! Scenario validation logic.

use crate::schema::{LATEST_VERSION, LinearizationDef, Scenario, SweepDef, VavDef};
use pf_psychro::{THETA_MAX, THETA_MIN};
use pf_solver::{Field, Parameters};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version == 0 || scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    let params = Parameters::new(scenario.design_parameters(), scenario.solver_inputs());
    for field in Field::ALL {
        let value = params.get(field);
        if let Err(err) = field.validate(value) {
            return Err(invalid(field.name(), value, err.to_string()));
        }
    }
    for (name, value) in [
        ("inputs.theta_o", scenario.inputs.theta_o),
        ("inputs.theta_i_sp", scenario.inputs.theta_i_sp),
    ] {
        check_temperature(name, value)?;
    }

    validate_linearization(&scenario.linearization)?;

    let mut sweep_ids = HashSet::new();
    for sweep in &scenario.sweeps {
        if !sweep_ids.insert(sweep.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: sweep.id.clone(),
                context: "sweeps".to_string(),
            });
        }
        validate_sweep(sweep)?;
    }

    if let Some(vav) = &scenario.vav {
        validate_vav(vav)?;
    }

    Ok(())
}

fn check_temperature(name: &str, value: f64) -> Result<(), ValidationError> {
    if !(THETA_MIN..=THETA_MAX).contains(&value) {
        return Err(invalid(
            name,
            value,
            format!("must be within [{THETA_MIN}, {THETA_MAX}] °C"),
        ));
    }
    Ok(())
}

fn validate_linearization(lin: &LinearizationDef) -> Result<(), ValidationError> {
    check_temperature("linearization.theta_s0", lin.theta_s0)?;
    if !(lin.tolerance.is_finite() && lin.tolerance > 0.0) {
        return Err(invalid(
            "linearization.tolerance",
            lin.tolerance,
            "must be positive",
        ));
    }
    if lin.max_iterations == 0 {
        return Err(invalid(
            "linearization.max_iterations",
            lin.max_iterations,
            "must be at least 1",
        ));
    }
    Ok(())
}

fn validate_sweep(sweep: &SweepDef) -> Result<(), ValidationError> {
    let Some(field) = Field::from_name(&sweep.field) else {
        return Err(ValidationError::MissingReference {
            id: sweep.field.clone(),
            context: format!("sweep {} field", sweep.id),
        });
    };
    if !(sweep.start.is_finite() && sweep.end.is_finite()) {
        return Err(invalid(
            format!("sweeps.{}", sweep.id),
            format!("{}..{}", sweep.start, sweep.end),
            "bounds must be finite",
        ));
    }
    if sweep.steps == 0 {
        return Err(invalid(
            format!("sweeps.{}.steps", sweep.id),
            sweep.steps,
            "must be at least 1",
        ));
    }
    // Admissible intervals are convex: the end points cover the series.
    for value in [sweep.start, sweep.end] {
        if let Err(err) = field.validate(value) {
            return Err(invalid(
                format!("sweeps.{}", sweep.id),
                value,
                err.to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_vav(vav: &VavDef) -> Result<(), ValidationError> {
    check_temperature("vav.theta_supply_sp", vav.theta_supply_sp)?;
    if !(vav.m_min > 0.0 && vav.m_min < vav.m_max && vav.m_max.is_finite()) {
        return Err(invalid(
            "vav.m_min..m_max",
            format!("{}..{}", vav.m_min, vav.m_max),
            "need 0 < m_min < m_max",
        ));
    }
    Ok(())
}
