//! Imagesmith processing
//!
//! Upload validation, the decode/encode boundary and the geometric
//! transforms applied by [`TransformPipeline`].

pub mod codec;
pub mod error;
pub mod image;
pub mod pipeline;
pub mod validator;

pub use error::ProcessingError;
pub use pipeline::TransformPipeline;
pub use validator::{UploadValidator, ValidationError};
