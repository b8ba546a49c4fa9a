use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("image dimensions must be positive, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("pixel count {actual} does not match {width}x{height}={expected}")]
    PixelCountMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("viewport bounds must be positive, got {max_width}x{max_height}")]
    InvalidViewport { max_width: u32, max_height: u32 },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
