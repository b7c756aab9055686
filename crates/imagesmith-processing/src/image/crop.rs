use image::{imageops, RgbImage};

/// Crop rectangle clamped to the bounds of the image it applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Clamp a requested rectangle against a `image_width` x `image_height` image.
    ///
    /// The origin is clamped into `[0, size]` first, then the extent into what
    /// remains past the origin, so the result may have zero area but never
    /// reaches outside the image.
    pub fn clamp(x: i64, y: i64, width: i64, height: i64, image_width: u32, image_height: u32) -> Self {
        let (iw, ih) = (i64::from(image_width), i64::from(image_height));
        let x = x.clamp(0, iw);
        let y = y.clamp(0, ih);
        let width = width.clamp(0, iw - x);
        let height = height.clamp(0, ih - y);

        // Every value is within [0, u32::MAX] after clamping against u32 sizes
        Self {
            x: x as u32,
            y: y as u32,
            width: width as u32,
            height: height as u32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

pub struct ImageCrop;

impl ImageCrop {
    pub fn crop(image: &RgbImage, rect: CropRect) -> RgbImage {
        tracing::debug!(
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height,
            "Cropping image"
        );
        imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_clamp_oversized_request() {
        let rect = CropRect::clamp(5, 5, 10_000, 10_000, 100, 100);
        assert_eq!(
            rect,
            CropRect {
                x: 5,
                y: 5,
                width: 95,
                height: 95
            }
        );
    }

    #[test]
    fn test_clamp_negative_values() {
        let rect = CropRect::clamp(-10, -3, -5, 20, 50, 40);
        assert_eq!(rect.x, 0);
        assert_eq!(rect.y, 0);
        assert_eq!(rect.width, 0);
        assert_eq!(rect.height, 20);
        assert!(rect.is_empty());
    }

    #[test]
    fn test_clamp_origin_past_edge() {
        let rect = CropRect::clamp(500, 10, 20, 20, 100, 100);
        assert_eq!(rect.x, 100);
        assert_eq!(rect.width, 0);
        assert!(rect.is_empty());
    }

    #[test]
    fn test_crop_extracts_region() {
        let img = RgbImage::from_fn(10, 8, |x, y| Rgb([x as u8, y as u8, 0]));
        let rect = CropRect::clamp(2, 3, 4, 2, 10, 8);
        let out = ImageCrop::crop(&img, rect);
        assert_eq!(out.dimensions(), (4, 2));
        assert_eq!(out.get_pixel(0, 0), &Rgb([2, 3, 0]));
        assert_eq!(out.get_pixel(3, 1), &Rgb([5, 4, 0]));
    }

    #[test]
    fn test_crop_oversized_never_exceeds_image() {
        let img = RgbImage::new(100, 100);
        let rect = CropRect::clamp(5, 5, 10_000, 10_000, 100, 100);
        let out = ImageCrop::crop(&img, rect);
        assert_eq!(out.dimensions(), (95, 95));
    }
}
