//! Query Export Library
//!
//! This library turns tabular SQL query results into downloadable files:
//! CSV or JSON generation with type preservation, filesystem-safe filename
//! generation, and file saves with byte-accurate size reporting.

pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod models;
pub mod pipeline;
pub mod preview;

pub use config::Config;
pub use error::{ExportError, ExportResult};
pub use pipeline::ExportPipeline;
