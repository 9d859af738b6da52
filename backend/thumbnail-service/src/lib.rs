//! Thumbnail Service
//!
//! Reacts to S3 "object created" notifications for keys under `/original/`
//! and writes small, medium and large JPEG thumbnails under `/thumbnails/<size>/`.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod telemetry;

// Public re-exports
pub use config::Config;
pub use error::{AppError, ErrorKind, Result};
