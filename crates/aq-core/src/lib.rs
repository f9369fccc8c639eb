//! aq-core: stable foundation for aquanet.
//!
//! Contains:
//! - units (uom SI types + constructors + water constants)
//! - numeric (tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{AqError, AqResult};
pub use numeric::*;
pub use units::*;
