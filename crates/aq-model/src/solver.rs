//! The seam between the optimizer and a hydraulic engine.

use crate::error::ModelError;
use crate::network::Network;
use thiserror::Error;

pub type SolveResult<T> = Result<T, SolveError>;

/// Failure of one hydraulic solve.
#[derive(Error, Debug)]
pub enum SolveError {
    /// The engine rejected the network topology or failed to converge.
    #[error("the network is invalid")]
    InvalidNetwork,

    /// Unclassified engine failure (nonzero exit, IO fault, bad output).
    #[error("hydraulic engine failure: {message}")]
    Engine { message: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Steady-state hydraulic feasibility oracle.
///
/// Implementations fill in junction heads and pipe discharge/velocity/
/// headloss on the given network, exactly once per trial.
pub trait HydraulicSolver: Sync {
    fn solve(&self, network: &mut Network) -> SolveResult<()>;
}
