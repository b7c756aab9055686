use imagesmith_core::{AppError, SettingsError};

/// Failures raised while decoding, transforming or encoding an image
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Resize failed: {0}")]
    Resize(String),

    #[error("Failed to encode image")]
    Encode,
}

impl From<ProcessingError> for AppError {
    fn from(err: ProcessingError) -> Self {
        match err {
            ProcessingError::Encode => AppError::EncodeFailed,
            ProcessingError::Settings(err) => err.into(),
            other => AppError::ImageProcessing(other.to_string()),
        }
    }
}
