//! Rotation by an arbitrary angle in degrees.
//!
//! Exactly 90, 180 and 270 take lossless quarter-turn paths. Every other
//! angle is warped onto an enlarged canvas sized to the rotated bounding box,
//! with bilinear sampling and a white border.
//!
//! The affine matrix uses the classic 2x3 layout for a rotation about
//! `(cx, cy)` by `theta` (counter-clockwise positive, y axis down):
//!
//! ```text
//! [  cos  sin  (1 - cos) * cx - sin * cy ]
//! [ -sin  cos  sin * cx + (1 - cos) * cy ]
//! ```
//!
//! `theta` is the negated request angle, so positive requests turn clockwise.
//!
//! imageproc's bilinear sampler gives up on a sample as soon as one of its
//! four neighbours is out of bounds, even at zero weight. The source is
//! therefore warped with a one-pixel white frame around it, so edge samples
//! blend with the fill colour instead of being replaced by it.

use image::{imageops, Rgb, RgbImage};
use imageproc::geometric_transformations::{warp_into, Interpolation, Projection};

use crate::error::ProcessingError;

const BORDER_FILL: Rgb<u8> = Rgb([255, 255, 255]);

/// Output canvas and source-to-output matrix for a general rotation
#[derive(Debug, Clone, PartialEq)]
pub struct RotationPlan {
    /// Row-major 2x3 affine matrix mapping source to output coordinates
    pub matrix: [f64; 6],
    pub width: u32,
    pub height: u32,
}

impl RotationPlan {
    pub fn new(width: u32, height: u32, angle: f64) -> Self {
        // Integer halves, so odd sizes round the center down
        let cx = f64::from(width / 2);
        let cy = f64::from(height / 2);

        let theta = (-angle).to_radians();
        let (sin, cos) = theta.sin_cos();
        let mut matrix = [
            cos,
            sin,
            (1.0 - cos) * cx - sin * cy,
            -sin,
            cos,
            sin * cx + (1.0 - cos) * cy,
        ];

        let abs_cos = matrix[0].abs();
        let abs_sin = matrix[1].abs();
        let (w, h) = (f64::from(width), f64::from(height));
        let new_width = (h * abs_sin + w * abs_cos) as u32;
        let new_height = (h * abs_cos + w * abs_sin) as u32;

        matrix[2] += f64::from(new_width) / 2.0 - cx;
        matrix[5] += f64::from(new_height) / 2.0 - cy;

        Self {
            matrix,
            width: new_width,
            height: new_height,
        }
    }

    /// Map a source coordinate into the output canvas
    #[cfg(test)]
    fn map(&self, x: f64, y: f64) -> (f64, f64) {
        let m = &self.matrix;
        (m[0] * x + m[1] * y + m[2], m[3] * x + m[4] * y + m[5])
    }

    /// Projection from a source padded by `pad` pixels on every side.
    ///
    /// Padded coordinate `p` is source coordinate `p - pad`, so the
    /// translation absorbs `-A * (pad, pad)`.
    fn padded_projection(&self, pad: f64) -> Option<Projection> {
        let m = &self.matrix;
        let tx = m[2] - (m[0] + m[1]) * pad;
        let ty = m[5] - (m[3] + m[4]) * pad;
        Projection::from_matrix([
            m[0] as f32,
            m[1] as f32,
            tx as f32,
            m[3] as f32,
            m[4] as f32,
            ty as f32,
            0.0,
            0.0,
            1.0,
        ])
    }
}

pub struct ImageRotation;

impl ImageRotation {
    /// Rotate clockwise by `angle` degrees.
    ///
    /// The quarter-turn match is exact equality: 450 or 90.5 take the general path.
    pub fn rotate(image: &RgbImage, angle: f64) -> Result<RgbImage, ProcessingError> {
        if angle == 90.0 {
            return Ok(imageops::rotate90(image));
        }
        if angle == 180.0 {
            return Ok(imageops::rotate180(image));
        }
        if angle == 270.0 {
            return Ok(imageops::rotate270(image));
        }
        Self::rotate_arbitrary(image, angle)
    }

    fn rotate_arbitrary(image: &RgbImage, angle: f64) -> Result<RgbImage, ProcessingError> {
        if !angle.is_finite() {
            return Err(ProcessingError::InvalidParameter(format!(
                "rotation must be a finite number, got {}",
                angle
            )));
        }

        let (width, height) = image.dimensions();
        let plan = RotationPlan::new(width, height, angle);

        tracing::debug!(
            angle,
            width,
            height,
            new_width = plan.width,
            new_height = plan.height,
            "Rotating image"
        );

        let projection = plan.padded_projection(1.0).ok_or_else(|| {
            ProcessingError::InvalidParameter(format!(
                "rotation by {} degrees is not invertible",
                angle
            ))
        })?;

        let mut framed = RgbImage::from_pixel(width + 2, height + 2, BORDER_FILL);
        imageops::replace(&mut framed, image, 1, 1);

        let mut out = RgbImage::from_pixel(plan.width, plan.height, BORDER_FILL);
        warp_into(
            &framed,
            &projection,
            Interpolation::Bilinear,
            BORDER_FILL,
            &mut out,
        );
        Ok(out)
    }
}
