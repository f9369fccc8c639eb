//! Error types for project file IO.

use aq_model::ModelError;
use thiserror::Error;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("expected {expected} labeled rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row}: expected label '{expected}', found '{found}'")]
    LabelMismatch {
        row: usize,
        expected: &'static str,
        found: String,
    },

    #[error("rows '{a}' and '{b}' carry different value counts ({len_a} vs {len_b})")]
    FieldCount {
        a: &'static str,
        b: &'static str,
        len_a: usize,
        len_b: usize,
    },

    #[error("row '{row}': invalid {what}: '{value}'")]
    Parse {
        row: &'static str,
        what: &'static str,
        value: String,
    },

    #[error("pipe {pipe}: endpoint index {index} outside 1..={nodes}")]
    EndpointIndex { pipe: u32, index: usize, nodes: usize },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("project IO failure: {0}")]
    Io(#[from] std::io::Error),
}
