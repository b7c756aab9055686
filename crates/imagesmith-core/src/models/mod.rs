//! Domain models

pub mod settings;

pub use settings::{CropSettings, FlipMode, SettingsError, TransformSettings};
