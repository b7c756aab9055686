use std::io::Cursor;

use axum_test::multipart::{MultipartForm, Part};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

/// Horizontal gradient with a red marker in the top-left corner
pub fn sample_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if x < 4 && y < 4 {
            Rgb([255, 0, 0])
        } else {
            Rgb([(x * 255 / width.max(1)) as u8, 80, 160])
        }
    })
}

pub fn encode(image: &RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut data = Vec::new();
    DynamicImage::ImageRgb8(image.clone())
        .write_to(&mut Cursor::new(&mut data), format)
        .expect("Failed to encode fixture");
    data
}

pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    encode(&sample_image(width, height), ImageFormat::Png)
}

pub fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(&sample_image(width, height), ImageFormat::Jpeg)
}

pub fn image_part(data: Vec<u8>, filename: &str, mime: &str) -> Part {
    Part::bytes(data).file_name(filename).mime_type(mime)
}

/// Form with both an `image` file part and a `settings` text part
pub fn process_form(data: Vec<u8>, filename: &str, settings: &str) -> MultipartForm {
    MultipartForm::new()
        .add_part("image", image_part(data, filename, "application/octet-stream"))
        .add_text("settings", settings.to_string())
}

/// Decode a response body, asserting it is a PNG
pub fn decode_png(body: &[u8]) -> DynamicImage {
    assert_eq!(&body[..8], b"\x89PNG\r\n\x1a\n", "response is not a PNG");
    image::load_from_memory_with_format(body, ImageFormat::Png).expect("Failed to decode response")
}
