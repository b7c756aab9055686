//! Error types module
//!
//! All request failures are unified under the `AppError` enum. Each variant
//! describes its own HTTP status, client-facing message and log level through
//! the `ErrorMetadata` trait, so the HTTP layer only has to render it.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for images or settings that could not be processed
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Client-facing message, rendered as the `error` field of the response body
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No image file provided")]
    NoImageProvided,

    #[error("Invalid file type")]
    InvalidFileType,

    #[error("No settings provided")]
    NoSettingsProvided,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("Failed to encode image")]
    EncodeFailed,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidSettings(err.to_string())
    }
}

impl AppError {
    /// Get the error type name for logging
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::NoImageProvided => "NoImageProvided",
            AppError::InvalidFileType => "InvalidFileType",
            AppError::NoSettingsProvided => "NoSettingsProvided",
            AppError::BadRequest(_) => "BadRequest",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::InvalidSettings(_) => "InvalidSettings",
            AppError::ImageProcessing(_) => "ImageProcessing",
            AppError::EncodeFailed => "EncodeFailed",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::NoImageProvided
            | AppError::InvalidFileType
            | AppError::NoSettingsProvided
            | AppError::BadRequest(_) => 400,
            AppError::PayloadTooLarge(_) => 413,
            AppError::InvalidSettings(_)
            | AppError::ImageProcessing(_)
            | AppError::EncodeFailed
            | AppError::Internal(_) => 500,
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::NoImageProvided
            | AppError::InvalidFileType
            | AppError::NoSettingsProvided
            | AppError::EncodeFailed => self.to_string(),
            AppError::BadRequest(ref msg)
            | AppError::PayloadTooLarge(ref msg)
            | AppError::InvalidSettings(ref msg)
            | AppError::ImageProcessing(ref msg)
            | AppError::Internal(ref msg) => msg.clone(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::NoImageProvided
            | AppError::InvalidFileType
            | AppError::NoSettingsProvided
            | AppError::BadRequest(_)
            | AppError::PayloadTooLarge(_) => LogLevel::Debug,
            AppError::InvalidSettings(_) | AppError::ImageProcessing(_) => LogLevel::Warn,
            AppError::EncodeFailed | AppError::Internal(_) => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_use_fixed_messages() {
        let err = AppError::NoImageProvided;
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.client_message(), "No image file provided");
        assert_eq!(err.log_level(), LogLevel::Debug);

        assert_eq!(AppError::InvalidFileType.client_message(), "Invalid file type");
        assert_eq!(
            AppError::NoSettingsProvided.client_message(),
            "No settings provided"
        );
    }

    #[test]
    fn test_encode_failed_metadata() {
        let err = AppError::EncodeFailed;
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.client_message(), "Failed to encode image");
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_processing_errors_expose_their_message() {
        let err = AppError::ImageProcessing("Failed to decode image: bad header".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.client_message(), "Failed to decode image: bad header");
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_json_error_becomes_invalid_settings() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = AppError::from(json_err);
        assert!(matches!(err, AppError::InvalidSettings(_)));
        assert_eq!(err.http_status_code(), 500);
    }

    #[test]
    fn test_payload_too_large_status() {
        let err = AppError::PayloadTooLarge("length limit exceeded".to_string());
        assert_eq!(err.http_status_code(), 413);
        assert_eq!(err.error_type(), "PayloadTooLarge");
    }
}
