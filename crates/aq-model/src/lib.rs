//! aq-model: typed representation of a water-distribution network.
//!
//! A [`Network`] is built fresh per optimization trial from an immutable
//! [`NetworkTemplate`], mutated only through diameter assignment, populated
//! with result fields by a [`HydraulicSolver`] exactly once, and discarded
//! after fitness extraction.

pub mod error;
pub mod network;
pub mod node;
pub mod pipe;
pub mod solver;

pub use error::{ModelError, ModelResult};
pub use network::{Network, NetworkTemplate};
pub use node::{Junction, Node, Reservoir};
pub use pipe::Pipe;
pub use solver::{HydraulicSolver, SolveError, SolveResult};
