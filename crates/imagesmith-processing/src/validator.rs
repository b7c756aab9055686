use imagesmith_core::AppError;

/// Upload validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Missing file extension (filename: {0})")]
    MissingExtension(String),

    #[error("Empty file")]
    EmptyFile,
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::FileTooLarge { size, max } => {
                AppError::PayloadTooLarge(format!("{} bytes exceeds max {} bytes", size, max))
            }
            ValidationError::InvalidExtension { .. } | ValidationError::MissingExtension(_) => {
                AppError::InvalidFileType
            }
            ValidationError::EmptyFile => AppError::ImageProcessing("Image file is empty".to_string()),
        }
    }
}

/// Upload gate for the image part of a request
#[derive(Debug, Clone)]
pub struct UploadValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
}

impl UploadValidator {
    pub fn new(allowed_extensions: Vec<String>, max_file_size: usize) -> Self {
        Self {
            max_file_size,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// Validate the extension after the last `.`, case-insensitively.
    ///
    /// A name without any dot, or ending in one, has no extension.
    pub fn validate_filename(&self, filename: &str) -> Result<(), ValidationError> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .filter(|ext| !ext.is_empty())
            .ok_or_else(|| ValidationError::MissingExtension(filename.to_string()))?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(())
    }

    /// Validate file size
    pub fn validate_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_validator() -> UploadValidator {
        UploadValidator::new(
            vec![
                "png".to_string(),
                "jpg".to_string(),
                "jpeg".to_string(),
                "gif".to_string(),
            ],
            1024 * 1024,
        )
    }

    #[test]
    fn test_validate_filename_ok() {
        let validator = test_validator();
        assert!(validator.validate_filename("photo.jpg").is_ok());
        assert!(validator.validate_filename("photo.JPEG").is_ok()); // case insensitive
        assert!(validator.validate_filename("archive.tar.png").is_ok());
        assert!(validator.validate_filename(".gif").is_ok());
    }

    #[test]
    fn test_validate_filename_invalid() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate_filename("diagram.bmp"),
            Err(ValidationError::InvalidExtension { .. })
        ));
        assert!(validator.validate_filename("image.png.exe").is_err());
    }

    #[test]
    fn test_validate_filename_without_extension() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate_filename("png"),
            Err(ValidationError::MissingExtension(_))
        ));
        assert!(validator.validate_filename("photo.").is_err());
        assert!(validator.validate_filename("").is_err());
    }

    #[test]
    fn test_validate_size() {
        let validator = test_validator();
        assert!(validator.validate_size(512 * 1024).is_ok());
        assert!(matches!(
            validator.validate_size(0),
            Err(ValidationError::EmptyFile)
        ));
        assert!(matches!(
            validator.validate_size(2 * 1024 * 1024),
            Err(ValidationError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_extension_errors_map_to_invalid_file_type() {
        let validator = test_validator();
        let err: AppError = validator.validate_filename("diagram.bmp").unwrap_err().into();
        assert!(matches!(err, AppError::InvalidFileType));
    }

    #[test]
    fn test_allowed_extensions_are_normalized() {
        let validator = UploadValidator::new(vec!["PNG".to_string()], 10);
        assert_eq!(validator.allowed_extensions(), &["png".to_string()]);
        assert!(validator.validate_filename("a.png").is_ok());
    }
}
