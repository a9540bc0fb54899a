//! pf-core: stable foundation for psychroflow.
//!
//! Contains:
//! - units (uom SI types, constructors and moist-air constants)
//! - numeric (Real + finiteness and range checks)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PfError, PfResult};
pub use numeric::*;
pub use units::*;
