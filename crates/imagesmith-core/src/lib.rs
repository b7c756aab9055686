//! Imagesmith Core Library
//!
//! This crate provides the configuration, error types and the transform
//! settings model shared by the processing and API crates.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{CropSettings, FlipMode, SettingsError, TransformSettings};
