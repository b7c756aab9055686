//! Decode and encode boundary.
//!
//! Decoders hand back whatever layout the file carries (paletted GIF, RGBA
//! PNG, grayscale JPEG, ...). The pipeline works on RGB8 only, so the
//! conversion happens once in [`TransformPipeline`](crate::TransformPipeline)
//! and the encoder only ever sees RGB8. Channel order is carried by the
//! buffer type end to end.
//!
//! EXIF orientation is applied on decode, so every later width, height and
//! crop coordinate refers to the upright image.

use std::io::Cursor;

use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageFormat, RgbImage};

use crate::error::ProcessingError;
use crate::image::ImageOrientation;

/// Decode an uploaded file, sniffing the format from its content.
pub fn decode(data: &[u8]) -> Result<DynamicImage, ProcessingError> {
    let reader = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ProcessingError::Decode(e.to_string()))?;

    if reader.format().is_none() {
        return Err(ProcessingError::Decode(
            "unrecognized image format".to_string(),
        ));
    }

    let mut decoder = reader
        .into_decoder()
        .map_err(|e| ProcessingError::Decode(e.to_string()))?;
    let orientation = decoder.orientation().unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Unreadable EXIF orientation, ignoring");
        Orientation::NoTransforms
    });

    let image =
        DynamicImage::from_decoder(decoder).map_err(|e| ProcessingError::Decode(e.to_string()))?;

    Ok(ImageOrientation::apply_exif_orientation(image, orientation))
}

/// Encode an RGB8 image as PNG.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, ProcessingError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        tracing::warn!(width, height, "Refusing to encode an empty image");
        return Err(ProcessingError::Encode);
    }

    let mut buffer = Vec::with_capacity(width as usize * height as usize * 3 / 2);
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| {
            tracing::error!(error = %e, width, height, "PNG encoding failed");
            ProcessingError::Encode
        })?;

    Ok(buffer)
}
