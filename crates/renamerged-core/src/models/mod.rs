//! Data models for invoice metadata and naming configuration.

pub mod config;
pub mod metadata;
pub mod settings;

pub use config::{ProcessingMode, RenamergedConfig};
pub use metadata::ExtractedMetadata;
pub use settings::{Component, NamingSettings};
