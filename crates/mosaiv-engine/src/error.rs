use thiserror::Error;

use mosaiv_core::error::CoreError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("out of memory: {requested} bytes requested, limit {limit}")]
    OutOfMemory { requested: usize, limit: usize },

    #[error("buffer length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("invalid image handle")]
    InvalidHandle,

    #[error("could not load image: {0}")]
    DecodeFailed(String),

    #[error("transform failed: {0}")]
    TransformFailed(String),

    #[error("no image loaded")]
    NoSource,

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
