use thiserror::Error;

/// Contract violations rejected before the pipeline runs.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("pixel buffer holds {actual} bytes, expected {expected} for RGBA8")]
    BufferSize { expected: usize, actual: usize },

    #[error("invalid label thresholds: {0}")]
    InvalidThresholds(String),

    #[error("invalid detection option: {0}")]
    InvalidOption(String),

    #[error("detection task failed: {0}")]
    TaskJoin(String),
}

pub type Result<T> = std::result::Result<T, DetectError>;
