//! Transform pipeline - applies the requested transforms in a fixed order
//!
//! 1. Resize (when both `width` and `height` are set)
//! 2. Rotate (when `rotation` is set)
//! 3. Flip (when `flip` names an axis)
//! 4. Crop (when `cropEnabled` is truthy and the crop record is complete)
//!
//! Each step sees the dimensions left by the previous one. The first failing
//! step aborts the whole run; there is no partial result.

use image::{DynamicImage, RgbImage};
use imagesmith_core::TransformSettings;

use crate::codec;
use crate::error::ProcessingError;
use crate::image::{CropRect, ImageCrop, ImageOrientation, ImageResize, ImageRotation};

#[derive(Debug, Clone)]
pub struct TransformPipeline {
    max_dimension: u32,
}

impl TransformPipeline {
    pub fn new(max_dimension: u32) -> Self {
        Self { max_dimension }
    }

    /// Decode, transform and re-encode an uploaded file as PNG.
    pub fn process(
        &self,
        data: &[u8],
        settings: &TransformSettings,
    ) -> Result<Vec<u8>, ProcessingError> {
        let decoded = codec::decode(data)?;
        let transformed = self.apply(decoded, settings)?;
        codec::encode_png(&transformed)
    }

    /// Apply every requested step and return an RGB8 image.
    ///
    /// The decoded image is normalized to RGB8 up front; the geometric steps
    /// never reorder channels, so the result is RGB regardless of the source
    /// layout.
    pub fn apply(
        &self,
        image: DynamicImage,
        settings: &TransformSettings,
    ) -> Result<RgbImage, ProcessingError> {
        let mut img = image.into_rgb8();

        if settings.is_identity() {
            tracing::debug!("No transforms requested");
            return Ok(img);
        }

        if let Some((width, height)) = settings.resize_target()? {
            let width = self.check_dimension("width", width)?;
            let height = self.check_dimension("height", height)?;
            img = ImageResize::resize_exact(img, width, height)?;
        }

        if let Some(angle) = settings.rotation {
            img = ImageRotation::rotate(&img, angle)?;
        }

        if let Some(mode) = settings.flip {
            img = ImageOrientation::flip(img, mode);
        }

        if let Some(crop) = settings.crop_rect()? {
            let rect = CropRect::clamp(
                crop.x,
                crop.y,
                crop.width,
                crop.height,
                img.width(),
                img.height(),
            );
            if rect.is_empty() {
                tracing::warn!(crop = ?crop, "Crop rectangle is empty after clamping");
            }
            img = ImageCrop::crop(&img, rect);
        }

        Ok(img)
    }

    fn check_dimension(&self, name: &str, value: i64) -> Result<u32, ProcessingError> {
        match u32::try_from(value) {
            Ok(v) if v >= 1 && v <= self.max_dimension => Ok(v),
            _ => Err(ProcessingError::InvalidParameter(format!(
                "{} must be between 1 and {}, got {}",
                name, self.max_dimension, value
            ))),
        }
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::new(10_000)
    }
}
