//! Image transform module
//!
//! Each submodule wraps one geometric operation over an RGB8 buffer:
//! - resize (cubic when enlarging, area averaging when shrinking)
//! - rotation (lossless quarter turns, white-filled arbitrary angles)
//! - orientation (mirroring)
//! - crop (clamped rectangle extraction)

pub mod crop;
pub mod orientation;
pub mod resize;
pub mod rotation;

pub use crop::{CropRect, ImageCrop};
pub use orientation::ImageOrientation;
pub use resize::{ImageResize, ResizeInterpolation};
pub use rotation::{ImageRotation, RotationPlan};
