use thiserror::Error;

/// 库内统一的错误类型
#[derive(Error, Debug)]
pub enum SynthError {
    #[error("Expected {which} bounding box to have length 4, but got {len} instead")]
    InvalidBoxArity { which: &'static str, len: usize },
    #[error("model error: {0}")]
    Model(#[from] ort::Error),
    #[error("unexpected model output: {0}")]
    ModelOutput(String),
    #[error("tensor shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
    #[error("image error: {0}")]
    Image(String),
    #[error("background task failed: {0}")]
    Task(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for SynthError {
    fn from(err: image::ImageError) -> Self {
        SynthError::Image(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SynthError>;
