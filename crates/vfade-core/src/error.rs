use thiserror::Error;

#[derive(Error, Debug)]
pub enum FadeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fade direction must be 'in' or 'out': '{0}'")]
    InvalidDirection(String),

    #[error("Expected fade arguments '(in|out):start:frames': '{0}'")]
    InvalidArgs(String),

    #[error("Invalid plane region: {0}")]
    InvalidRegion(String),

    #[error("Invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Frame buffer holds {actual} bytes, expected {expected}")]
    FrameSizeMismatch { expected: usize, actual: usize },

    #[error("Frame index {index} out of range (total: {total})")]
    FrameIndexOutOfRange { index: usize, total: usize },

    #[error("Unsupported pixel format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid YUV4MPEG2 stream: {0}")]
    InvalidY4m(String),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, FadeError>;
