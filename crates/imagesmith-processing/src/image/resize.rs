use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::RgbImage;

use crate::error::ProcessingError;

/// Interpolation chosen for a resize request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeInterpolation {
    /// Bicubic (Catmull-Rom), used when either axis grows
    Cubic,
    /// Box convolution over the covered source area, used when shrinking
    Area,
}

impl ResizeInterpolation {
    /// One decision for both axes: enlarging if either target axis exceeds the source.
    pub fn select(src_width: u32, src_height: u32, dst_width: u32, dst_height: u32) -> Self {
        if dst_width > src_width || dst_height > src_height {
            ResizeInterpolation::Cubic
        } else {
            ResizeInterpolation::Area
        }
    }

    fn algorithm(self) -> ResizeAlg {
        match self {
            ResizeInterpolation::Cubic => ResizeAlg::Convolution(FilterType::CatmullRom),
            ResizeInterpolation::Area => ResizeAlg::Convolution(FilterType::Box),
        }
    }
}

pub struct ImageResize;

impl ImageResize {
    /// Resize to exactly `width` x `height`; aspect ratio is not preserved.
    pub fn resize_exact(
        image: RgbImage,
        width: u32,
        height: u32,
    ) -> Result<RgbImage, ProcessingError> {
        let (src_width, src_height) = image.dimensions();
        let interpolation = ResizeInterpolation::select(src_width, src_height, width, height);

        tracing::debug!(
            src_width,
            src_height,
            width,
            height,
            interpolation = ?interpolation,
            "Resizing image"
        );

        let src_image = Image::from_vec_u8(src_width, src_height, image.into_raw(), PixelType::U8x3)
            .map_err(|e| ProcessingError::Resize(e.to_string()))?;
        let mut dst_image = Image::new(width, height, PixelType::U8x3);

        let options = ResizeOptions::new().resize_alg(interpolation.algorithm());
        Resizer::new()
            .resize(&src_image, &mut dst_image, &options)
            .map_err(|e| ProcessingError::Resize(e.to_string()))?;

        RgbImage::from_raw(width, height, dst_image.into_vec()).ok_or_else(|| {
            ProcessingError::Resize("resized buffer does not match target dimensions".to_string())
        })
    }
}
