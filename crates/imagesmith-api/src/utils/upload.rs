//! Multipart extraction for the process-image form

use axum::extract::Multipart;
use bytes::Bytes;

use crate::error::HttpAppError;

/// The `image` file part
#[derive(Debug)]
pub struct ImagePart {
    pub filename: String,
    pub data: Bytes,
}

/// Parts of the process-image form that the handler cares about
#[derive(Debug, Default)]
pub struct ProcessImageForm {
    pub image: Option<ImagePart>,
    pub settings: Option<String>,
}

/// Read the whole multipart body, keeping the first `image` file part and
/// the first `settings` text part. Other fields are drained and ignored.
///
/// An `image` part without a filename is a plain form field, not a file,
/// and does not count as an uploaded image.
pub async fn extract_process_image_form(
    mut multipart: Multipart,
) -> Result<ProcessImageForm, HttpAppError> {
    let mut form = ProcessImageForm::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "image" if form.image.is_none() => {
                let Some(filename) = field.file_name().map(|s| s.to_string()) else {
                    continue;
                };
                let data = field.bytes().await?;
                form.image = Some(ImagePart { filename, data });
            }
            "settings" if form.settings.is_none() => {
                form.settings = Some(field.text().await?);
            }
            _ => {
                field.bytes().await?;
            }
        }
    }

    Ok(form)
}
