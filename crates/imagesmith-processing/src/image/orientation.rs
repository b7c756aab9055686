use image::metadata::Orientation;
use image::{imageops, DynamicImage, RgbImage};
use imagesmith_core::FlipMode;

/// Mirror operations and EXIF orientation correction
pub struct ImageOrientation;

impl ImageOrientation {
    /// Turn a decoded image upright according to its EXIF orientation
    pub fn apply_exif_orientation(mut img: DynamicImage, orientation: Orientation) -> DynamicImage {
        if orientation != Orientation::NoTransforms {
            tracing::debug!(orientation = ?orientation, "Applying EXIF orientation");
            img.apply_orientation(orientation);
        }
        img
    }

    pub fn flip(mut image: RgbImage, mode: FlipMode) -> RgbImage {
        tracing::debug!(mode = %mode, "Flipping image");
        match mode {
            FlipMode::Horizontal => imageops::flip_horizontal_in_place(&mut image),
            FlipMode::Vertical => imageops::flip_vertical_in_place(&mut image),
            FlipMode::Both => {
                imageops::flip_horizontal_in_place(&mut image);
                imageops::flip_vertical_in_place(&mut image);
            }
        }
        image
    }
}
