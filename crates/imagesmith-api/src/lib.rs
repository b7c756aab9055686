//! Imagesmith API Library
//!
//! HTTP handlers, error rendering and application setup for the image
//! transform service.

mod handlers;
mod telemetry;
mod utils;

pub mod error;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
pub use telemetry::init_telemetry;
