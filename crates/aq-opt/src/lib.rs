//! aq-opt: population-based diameter optimization.
//!
//! The optimizer searches over genomes of length = pipe count, one gene
//! per pipe, each gene drawn from a fixed ascending catalog of
//! commercially available diameters. Every fitness evaluation is one full
//! network + engine round trip through the [`aq_model::HydraulicSolver`]
//! seam.

pub mod config;
pub mod error;
pub mod fitness;
mod ga;
pub mod optimizer;

pub use config::GaConfig;
pub use error::{OptError, OptResult};
pub use fitness::{evaluate, fitness_of, PENALTY_SCALE};
pub use optimizer::{Optimizer, Outcome};
