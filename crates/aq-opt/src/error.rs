//! Error types for the optimization loop.

use aq_model::{ModelError, SolveError};
use thiserror::Error;

pub type OptResult<T> = Result<T, OptError>;

#[derive(Error, Debug)]
pub enum OptError {
    #[error("invalid search configuration: {what}")]
    Config { what: &'static str },

    /// A fitness evaluation failed. There is no retry policy: the run
    /// aborts with the underlying solver error.
    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error(transparent)]
    Model(#[from] ModelError),
}
