//! pf-psychro: moist-air property calculations for psychroflow.
//!
//! Provides:
//! - `Psychrometrics` trait: the property oracle the AHU solver consumes
//! - `MoistAir`: closed-form backend (saturation pressure correlation + ideal
//!   gas mixing of dry air and water vapour at a fixed total pressure)
//!
//! # Architecture
//!
//! The solver only ever talks to the trait, so the backend can be swapped
//! (a different saturation correlation, a site pressure other than sea level)
//! without touching the balance equations.
//!
//! # Example
//!
//! ```
//! use pf_psychro::{MoistAir, Psychrometrics};
//!
//! let air = MoistAir::default();
//! let w = air.humidity_ratio(26.0, 0.5).unwrap();
//! assert!((w - 0.0105).abs() < 1e-3);
//! ```

pub mod error;
pub mod model;
pub mod moist_air;

// Re-exports for ergonomics
pub use error::{PsychroError, PsychroResult};
pub use model::{MoistAirState, Psychrometrics};
pub use moist_air::{MoistAir, PHI_MAX, PHI_MIN, THETA_MAX, THETA_MIN};
