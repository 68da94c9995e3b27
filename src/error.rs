use thiserror::Error;

/// Errors raised by the network core.
///
/// Shape mismatches are precondition violations: the vector is rejected before
/// any arithmetic touches the weights.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("{what} has length {actual}, expected {expected}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid network configuration: {0}")]
    InvalidConfig(String),

    #[error("non-finite values in {what}")]
    NonFinite { what: String },

    #[error("weight distribution: {0}")]
    Distribution(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors raised while turning external data (CSV rows, pictures) into vectors.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("dataset contains no samples")]
    Empty,

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = NetworkError> = std::result::Result<T, E>;
