//! Application state shared by every handler.

use imagesmith_core::Config;
use imagesmith_processing::{TransformPipeline, UploadValidator};

/// Immutable after startup; handlers receive it as `State<Arc<AppState>>`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub validator: UploadValidator,
    pub pipeline: TransformPipeline,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let validator = UploadValidator::new(
            config.allowed_extensions.clone(),
            config.max_file_size_bytes,
        );
        let pipeline = TransformPipeline::new(config.max_dimension);
        Self {
            config,
            validator,
            pipeline,
        }
    }
}
