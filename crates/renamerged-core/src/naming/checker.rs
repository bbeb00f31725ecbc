//! Pre-flight check for filenames that would need truncation.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use super::FilenameBuilder;
use crate::invoice::FakturParser;
use crate::pdf::{PdfExtractor, list_pdf_files};

/// Untruncated names longer than this are reported.
pub const LONG_FILENAME_THRESHOLD: usize = 150;

/// Number of files examined.
const FILES_TO_CHECK: usize = 5;

/// Number of sample names kept.
const SAMPLES_TO_KEEP: usize = 3;

/// A generated name for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilenameSample {
    pub original_file: String,
    pub generated_filename: String,
    pub length: usize,
}

/// A generated name over the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LongFilename {
    #[serde(flatten)]
    pub sample: FilenameSample,
    pub partner_name: String,
    pub reference: String,
}

/// Outcome of [`check_long_filenames`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LongFilenameReport {
    pub long_filenames: Vec<LongFilename>,
    pub samples: Vec<FilenameSample>,
}

impl LongFilenameReport {
    pub fn has_long_filenames(&self) -> bool {
        !self.long_filenames.is_empty()
    }
}

/// Build untruncated names for the first few PDFs in `input_dir` and report
/// those longer than [`LONG_FILENAME_THRESHOLD`].
///
/// Invalid PDFs and files without a partner name are skipped; extraction
/// failures are logged and skipped.
pub fn check_long_filenames(
    input_dir: &Path,
    builder: &FilenameBuilder,
) -> std::io::Result<LongFilenameReport> {
    let parser = FakturParser::new();
    let mut report = LongFilenameReport::default();

    for path in list_pdf_files(input_dir)?.into_iter().take(FILES_TO_CHECK) {
        let original_file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !PdfExtractor::validate_file(&path) {
            debug!("Skipping invalid PDF {}", original_file);
            continue;
        }

        let metadata = match parser.parse_file(&path) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Error checking {}: {}", original_file, e);
                continue;
            }
        };

        let Some(partner_name) = metadata.partner_name.clone() else {
            continue;
        };

        let generated_filename = builder.untruncated(&metadata);
        let sample = FilenameSample {
            original_file,
            length: generated_filename.chars().count(),
            generated_filename,
        };

        if sample.length > LONG_FILENAME_THRESHOLD {
            report.long_filenames.push(LongFilename {
                sample: sample.clone(),
                partner_name,
                reference: metadata.reference.clone(),
            });
        }
        if report.samples.len() < SAMPLES_TO_KEEP {
            report.samples.push(sample);
        }
    }

    if report.has_long_filenames() {
        warn!(
            "Found {} file(s) with names longer than {} characters",
            report.long_filenames.len(),
            LONG_FILENAME_THRESHOLD
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::NamingSettings;
    use crate::pdf::fixtures::{faktur_pdf, single_page_pdf};
    use pretty_assertions::assert_eq;

    const LONG_REFERENCE: &str = "Pembayaran Termin Kedua Proyek Pembangunan Gedung Kantor \
        Cabang Jakarta Selatan Tahap Akhir Sesuai Kontrak Kerja";

    #[test]
    fn test_empty_directory_has_no_long_names() {
        let dir = tempfile::tempdir().unwrap();
        let builder = FilenameBuilder::new(NamingSettings::new()).unwrap();
        let report = check_long_filenames(dir.path(), &builder).unwrap();
        assert_eq!(report, LongFilenameReport::default());
        assert!(!report.has_long_filenames());
    }

    #[test]
    fn test_invalid_pdfs_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rusak.pdf"), b"broken").unwrap();
        let builder = FilenameBuilder::new(NamingSettings::new()).unwrap();
        let report = check_long_filenames(dir.path(), &builder).unwrap();
        assert!(report.samples.is_empty());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let builder = FilenameBuilder::new(NamingSettings::new()).unwrap();
        assert!(check_long_filenames(Path::new("/nonexistent/dir"), &builder).is_err());
    }

    #[test]
    fn test_long_reference_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.pdf"), faktur_pdf(LONG_REFERENCE)).unwrap();
        // No buyer block, so no partner name
        std::fs::write(dir.path().join("b.pdf"), single_page_pdf("Halo")).unwrap();

        let builder = FilenameBuilder::new(NamingSettings::new()).unwrap();
        let report = check_long_filenames(dir.path(), &builder).unwrap();

        assert!(report.has_long_filenames());
        assert_eq!(report.long_filenames.len(), 1);
        assert_eq!(report.samples.len(), 1);

        let long = &report.long_filenames[0];
        assert_eq!(long.sample.original_file, "a.pdf");
        assert_eq!(long.partner_name, "Pt Contoh Makmur");
        assert_eq!(long.reference, LONG_REFERENCE);
        assert_eq!(
            long.sample.generated_filename,
            format!("Pt Contoh Makmur-5-01-2024-{}-04002400123456789.pdf", LONG_REFERENCE)
        );
        assert_eq!(long.sample.length, 161);
        assert_eq!(report.samples[0], long.sample);
    }

    #[test]
    fn test_short_names_are_sampled_but_not_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.pdf"), faktur_pdf("PO 77")).unwrap();

        let builder = FilenameBuilder::new(NamingSettings::new()).unwrap();
        let report = check_long_filenames(dir.path(), &builder).unwrap();

        assert!(!report.has_long_filenames());
        assert_eq!(
            report.samples[0].generated_filename,
            "Pt Contoh Makmur-5-01-2024-PO 77-04002400123456789.pdf"
        );
    }
}
