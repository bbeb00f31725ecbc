//! PDF processing module.

mod extractor;
#[cfg(test)]
pub(crate) mod fixtures;
mod merge;

pub use extractor::PdfExtractor;
pub use merge::{MergedDocument, merge_bytes, merge_documents};

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern, glob_with};
use tracing::warn;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// List the `.pdf` files directly inside `dir` (extension matched
/// case-insensitively), sorted by path.
pub fn list_pdf_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("not a directory: {}", dir.display()),
        ));
    }

    let pattern = format!("{}/*.pdf", Pattern::escape(&dir.to_string_lossy()));
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };
    let entries = glob_with(&pattern, options)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract the text of every page, in page order.
    fn extract_pages(&self) -> Result<Vec<String>>;

    /// Extract text from the entire PDF.
    ///
    /// Each page with non-empty text contributes its text followed by a
    /// newline.
    fn extract_text(&self) -> Result<String> {
        let text = self
            .extract_pages()?
            .into_iter()
            .filter(|page| !page.is_empty())
            .fold(String::new(), |mut acc, page| {
                acc.push_str(&page);
                acc.push('\n');
                acc
            });
        Ok(text)
    }
}
