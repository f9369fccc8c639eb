//! Error types for the network data model.

use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("{what} of pipe {pipe} has not been set yet")]
    UnsetResult { what: &'static str, pipe: u32 },

    #[error("actual head of junction {junction} has not been set yet")]
    UnsetHead { junction: u32 },

    #[error("pipe {pipe}: {what} cannot be negative (got {value})")]
    NegativeValue {
        what: &'static str,
        pipe: u32,
        value: f64,
    },

    #[error("pipe {pipe}: length must be positive (got {value})")]
    NonPositiveLength { pipe: u32, value: f64 },

    #[error("duplicate {what} id {id}")]
    DuplicateId { what: &'static str, id: u32 },

    #[error("diameter vector length {actual} does not match pipe count {expected}")]
    DiameterCount { expected: usize, actual: usize },

    #[error("index {index} out of bounds for {what} (len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("node {id} is not a junction")]
    NotAJunction { id: u32 },
}
