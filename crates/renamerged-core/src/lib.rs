//! Core library for renaming and merging Indonesian tax invoice PDFs.
//!
//! This crate provides:
//! - PDF processing (text extraction, validation, page merging)
//! - e-Faktur metadata extraction (partner name, seller ID, date, invoice number, reference)
//! - Filename generation under a length budget
//! - Batch orchestration with progress reporting and cooperative cancellation

pub mod batch;
pub mod error;
pub mod invoice;
pub mod models;
pub mod naming;
pub mod pdf;

pub use batch::{BatchProcessor, BatchStats, CancellationFlag, ProcessingStage, ProgressSink};
pub use error::{RenamergedError, Result};
pub use invoice::{FakturParser, MetadataParser};
pub use models::config::{ProcessingMode, RenamergedConfig};
pub use models::metadata::ExtractedMetadata;
pub use models::settings::{Component, NamingSettings};
pub use naming::{FilenameBuilder, LongFilenameReport, check_long_filenames};
pub use pdf::{PdfExtractor, PdfProcessor, merge_documents};
