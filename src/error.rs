use thiserror::Error;

/// Everything that can go wrong while evaluating a model at an epoch boundary.
#[derive(Debug, Error)]
pub enum EvalError {
    /// No class in the evaluation result carries a single annotation, so
    /// there is nothing to average over.
    #[error("no class has any annotations; mAP is undefined")]
    NoAnnotations,

    #[error("recall has {recall} points but precision has {precision}")]
    CurveLengthMismatch { recall: usize, precision: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Raised by `Evaluator` implementations.
    #[error("evaluation failed: {0}")]
    Evaluator(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EvalError {
    pub fn evaluator(msg: impl Into<String>) -> Self {
        Self::Evaluator(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, EvalError>;
