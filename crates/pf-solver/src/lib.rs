//! Steady-state psychrometric solver for an air-handling unit.
//!
//! The unit mixes outdoor and recirculated air, treats it in a cooling and
//! dehumidification coil with by-pass, reheats it and supplies it to one
//! thermal zone whose envelope exchanges heat and moisture with the outdoors.
//! Two proportional controllers close the loop on indoor temperature (acting
//! on the cooling coil) and indoor humidity (acting on the reheat coil).
//!
//! The balances are linear once the coil saturation curve is replaced by its
//! tangent at a chosen temperature `θs0`; [`AirHandler::linear_solve`] solves
//! that 16×16 system directly and [`AirHandler::solve`] repeats it, moving
//! `θs0` to the coil surface temperature, until the tangent point and the
//! solution agree.

pub mod air_handler;
pub mod equations;
pub mod error;
pub mod linear;
pub mod params;
pub mod solution;
pub mod sweep;
pub mod unknowns;
pub mod vav;

pub use air_handler::{AirHandler, LinearizationConfig};
pub use equations::{BalanceInputs, Equation, EquationSet};
pub use error::{SolverError, SolverResult};
pub use params::{DesignParameters, Field, Inputs, Parameters};
pub use solution::AhuSolution;
pub use sweep::{SweepPoint, linspace, sweep};
pub use unknowns::{Element, Point, Unknown};
pub use vav::{VavConfig, VavOutcome};
