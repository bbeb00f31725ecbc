//! Error types for the renamerged-core library.

use thiserror::Error;

/// Main error type for the renamerged library.
#[derive(Error, Debug)]
pub enum RenamergedError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Naming settings failed validation.
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    /// PDF merge error.
    #[error("merge error: {0}")]
    Merge(#[from] MergeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading a PDF.
///
/// These are the only extraction faults: a field missing from the text is
/// never an error.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Failed to read the file from disk.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while validating naming settings.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    /// A separator-like field contains a filesystem-reserved character.
    #[error("{field} {value:?} contains a reserved character (one of <>:\"/\\|?*)")]
    ReservedCharacter { field: &'static str, value: String },

    /// A separator-like field is longer than one character.
    #[error("{field} {value:?} must be at most one character")]
    TooLong { field: &'static str, value: String },

    /// The component order is not a permutation of the four components.
    #[error("invalid component order: {0}")]
    ComponentOrder(String),

    /// The filename length budget is too small to hold a usable name.
    #[error("max filename length {0} is below the minimum of {min}", min = crate::models::settings::MIN_FILENAME_LENGTH)]
    BudgetTooSmall(usize),
}

/// Errors related to merging PDFs.
#[derive(Error, Debug)]
pub enum MergeError {
    /// Nothing was given to merge, or no input could be read.
    #[error("no readable PDF to merge")]
    NoInput,

    /// The merged document could not be written.
    #[error("failed to save merged PDF: {0}")]
    Save(String),
}

/// Result type for the renamerged library.
pub type Result<T> = std::result::Result<T, RenamergedError>;
