//! Error type shared by the order mixer and the hash chain

use thiserror::Error;

use crate::palette::Algorithm;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum X16Error {
    #[error("Input too short: {len} bytes, need at least {min}")]
    InputTooShort { len: usize, min: usize },

    #[error("Output buffer too short: {len} bytes, need at least {min}")]
    OutputTooShort { len: usize, min: usize },

    #[error("{algorithm} produced {len} bytes, expected {expected}")]
    PrimitiveOutputSizeMismatch {
        algorithm: Algorithm,
        len: usize,
        expected: usize,
    },

    #[error("No engine registered for {0}")]
    MissingPrimitive(Algorithm),
}
