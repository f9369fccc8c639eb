//! Error types for the engine bridge.

use aq_model::{ModelError, SolveError};
use thiserror::Error;

pub type BridgeResult<T> = Result<T, BridgeError>;

#[derive(Error, Debug)]
pub enum BridgeError {
    /// The engine rejected the network (exit code 100 or its POSIX
    /// wait-status equivalent).
    #[error("the network is invalid")]
    InvalidNetwork,

    /// Any other nonzero engine exit; unclassified.
    #[error("hydraulic engine exited with code {code}")]
    EngineFailure { code: i32 },

    #[error("hydraulic engine terminated by a signal")]
    EngineKilled,

    #[error("hydraulic engine did not finish within {seconds} s")]
    Timeout { seconds: u64 },

    /// Result file shorter than the layout requires for the serialized
    /// node/link counts. Corruption, not a silent skip.
    #[error("result file truncated: expected at least {expected} bytes, got {actual}")]
    TruncatedOutput { expected: usize, actual: usize },

    #[error("this operating system is not supported; try Windows or Linux")]
    UnsupportedPlatform,

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("engine IO failure: {0}")]
    Io(#[from] std::io::Error),
}

impl From<BridgeError> for SolveError {
    fn from(e: BridgeError) -> Self {
        match e {
            BridgeError::InvalidNetwork => SolveError::InvalidNetwork,
            BridgeError::Model(m) => SolveError::Model(m),
            other => SolveError::Engine {
                message: other.to_string(),
            },
        }
    }
}
