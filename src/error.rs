//! Error taxonomy for pool construction, wiring and stepping.
//!
//! Every error is a caller setup mistake. Nothing here is transient, so
//! nothing is retried or defaulted: the first failing check is returned and
//! no state has been touched.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IaError {
    /// `step` was called on a pool that never received weight matrices.
    #[error("pool '{pool}': weights were never set")]
    MissingWeights { pool: String },

    /// Number of inputs handed to `step` differs from the number of weight matrices.
    #[error("pool '{pool}': input count ({actual}) must match weight count ({expected})")]
    InputCount {
        pool: String,
        expected: usize,
        actual: usize,
    },

    /// Input vector `index` does not match the row count of weight matrix `index`.
    #[error("pool '{pool}': input {index} has length {actual}, weight matrix expects {expected}")]
    InputShape {
        pool: String,
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// Weight matrix `index` does not have one column per unit.
    #[error("pool '{pool}': weight matrix {index} has {actual} columns, pool has {expected} units")]
    WeightShape {
        pool: String,
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// Engine-level length mismatch between per-unit vectors.
    #[error("state shape mismatch: expected length {expected}, got {actual}")]
    StateShape { expected: usize, actual: usize },

    /// Out-of-range or inconsistent configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type IaResult<T> = Result<T, IaError>;
