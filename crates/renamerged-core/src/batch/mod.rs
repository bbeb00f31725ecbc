//! Batch orchestration over a folder of invoices.
//!
//! A run has three stages: every PDF is read and named, merge groups are
//! written (in merge mode), then each file is copied under its new name.
//! One unreadable file never stops the run; it is logged and counted.

mod copy;
mod progress;

pub use copy::{copy_with_unique_name, unique_path};
pub use progress::{CancellationFlag, ProcessingStage, ProgressSink, TracingSink};

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::invoice::FakturParser;
use crate::models::config::ProcessingMode;
use crate::models::metadata::ExtractedMetadata;
use crate::naming::{FilenameBuilder, clean_component, fit_to_budget};
use crate::pdf::{PdfExtractor, list_pdf_files, merge_documents};

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    /// PDF files found in the input folder.
    pub total: usize,
    /// Files copied under their generated name.
    pub renamed: usize,
    /// Merged documents written.
    pub merged: usize,
    /// Skipped files plus failed copies and merges.
    pub errors: usize,
    /// Whether the run stopped early.
    pub cancelled: bool,
}

/// A source file after extraction.
#[derive(Debug, Clone)]
struct NamedFile {
    source: PathBuf,
    metadata: ExtractedMetadata,
    filename: String,
}

/// Renames (and optionally merges) every PDF of a folder into an output
/// folder.
pub struct BatchProcessor {
    builder: FilenameBuilder,
    mode: ProcessingMode,
    parser: FakturParser,
    cancellation: CancellationFlag,
}

impl BatchProcessor {
    pub fn new(builder: FilenameBuilder, mode: ProcessingMode) -> Self {
        Self {
            builder,
            mode,
            parser: FakturParser::new(),
            cancellation: CancellationFlag::new(),
        }
    }

    /// Use an externally owned flag to stop the run between files.
    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = flag;
        self
    }

    pub fn mode(&self) -> ProcessingMode {
        self.mode
    }

    /// Process every PDF directly inside `input_dir`.
    pub fn run(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        sink: &dyn ProgressSink,
    ) -> Result<BatchStats> {
        let files = list_pdf_files(input_dir)?;
        fs::create_dir_all(output_dir)?;

        let mut stats = BatchStats {
            total: files.len(),
            ..Default::default()
        };
        info!(
            "Processing {} PDF file(s) from {} ({})",
            files.len(),
            input_dir.display(),
            self.mode
        );

        let Some(named) = self.read_all(&files, sink, &mut stats) else {
            return Ok(self.cancelled(stats, sink));
        };

        if self.mode == ProcessingMode::RenameAndMerge
            && !self.merge_groups(&named, output_dir, sink, &mut stats)
        {
            return Ok(self.cancelled(stats, sink));
        }

        if !self.copy_all(&named, output_dir, sink, &mut stats) {
            return Ok(self.cancelled(stats, sink));
        }

        sink.log(&format!(
            "Done: {} renamed, {} merged, {} error(s) out of {} file(s)",
            stats.renamed, stats.merged, stats.errors, stats.total
        ));
        Ok(stats)
    }

    /// Extract metadata and a filename for each file. `None` when cancelled.
    fn read_all(
        &self,
        files: &[PathBuf],
        sink: &dyn ProgressSink,
        stats: &mut BatchStats,
    ) -> Option<Vec<NamedFile>> {
        let mut named = Vec::with_capacity(files.len());
        for (i, path) in files.iter().enumerate() {
            if self.cancellation.is_cancelled() {
                return None;
            }

            let name = display_name(path);
            if !PdfExtractor::validate_file(path) {
                warn!("Skipping invalid PDF {}", path.display());
                sink.log(&format!("Skipped {}: not a readable PDF", name));
                stats.errors += 1;
            } else {
                match self.parser.parse_file(path) {
                    Ok(metadata) => {
                        let filename = self.builder.build(&metadata);
                        debug!("{} -> {}", name, filename);
                        named.push(NamedFile {
                            source: path.clone(),
                            metadata,
                            filename,
                        });
                    }
                    Err(e) => {
                        warn!("Failed to read {}: {}", path.display(), e);
                        sink.log(&format!("Skipped {}: {}", name, e));
                        stats.errors += 1;
                    }
                }
            }

            sink.progress(ProcessingStage::Reading, i + 1, files.len());
        }
        Some(named)
    }

    /// Write one merged PDF per (seller ID, partner) group. `false` when
    /// cancelled.
    fn merge_groups(
        &self,
        named: &[NamedFile],
        output_dir: &Path,
        sink: &dyn ProgressSink,
        stats: &mut BatchStats,
    ) -> bool {
        let groups = group_for_merge(named);
        let total = groups.len();

        for (i, ((seller_id, partner), mut members)) in groups.into_iter().enumerate() {
            if self.cancellation.is_cancelled() {
                return false;
            }

            members.sort_by(|a, b| a.filename.cmp(&b.filename));
            let target = self.merge_target(output_dir, &seller_id, &partner);
            let sources: Vec<&Path> = members.iter().map(|m| m.source.as_path()).collect();

            match write_merged(&sources, &target) {
                Ok(written) => {
                    stats.merged += 1;
                    sink.log(&format!(
                        "Merged {} file(s) into {}",
                        sources.len(),
                        written.display()
                    ));
                }
                Err(e) => {
                    warn!("Failed to merge group {}/{}: {}", seller_id, partner, e);
                    sink.log(&format!("Merge failed for {}: {}", partner, e));
                    stats.errors += 1;
                }
            }

            sink.progress(ProcessingStage::Processing, i + 1, total);
        }
        true
    }

    /// Copy each file to the output folder under its generated name. `false`
    /// when cancelled.
    fn copy_all(
        &self,
        named: &[NamedFile],
        output_dir: &Path,
        sink: &dyn ProgressSink,
        stats: &mut BatchStats,
    ) -> bool {
        for (i, file) in named.iter().enumerate() {
            if self.cancellation.is_cancelled() {
                return false;
            }

            match copy_with_unique_name(&file.source, &output_dir.join(&file.filename)) {
                Ok(_) => stats.renamed += 1,
                Err(e) => {
                    warn!("Failed to copy {}: {}", file.source.display(), e);
                    sink.log(&format!(
                        "Copy failed for {}: {}",
                        display_name(&file.source),
                        e
                    ));
                    stats.errors += 1;
                }
            }

            sink.progress(ProcessingStage::Finalizing, i + 1, named.len());
        }
        true
    }

    /// `<output>/<seller id>/<partner name>.pdf`, with both parts cleaned.
    fn merge_target(&self, output_dir: &Path, seller_id: &str, partner: &str) -> PathBuf {
        let settings = self.builder.settings();
        let folder = clean_component(seller_id, settings.slash_replacement());
        let name = fit_to_budget(
            &[clean_component(partner, settings.slash_replacement())],
            settings.separator(),
            settings.budget(),
        );
        output_dir.join(folder).join(name)
    }

    fn cancelled(&self, mut stats: BatchStats, sink: &dyn ProgressSink) -> BatchStats {
        stats.cancelled = true;
        warn!("Batch cancelled");
        sink.log("Processing cancelled");
        stats
    }
}

/// Group files by seller ID and partner name, missing values included.
fn group_for_merge(named: &[NamedFile]) -> BTreeMap<(String, String), Vec<&NamedFile>> {
    let mut groups: BTreeMap<(String, String), Vec<&NamedFile>> = BTreeMap::new();
    for file in named {
        let key = (
            file.metadata.seller_id_or_sentinel().to_string(),
            file.metadata.partner_name_or_sentinel().to_string(),
        );
        groups.entry(key).or_default().push(file);
    }
    groups
}

fn write_merged(sources: &[&Path], target: &Path) -> Result<PathBuf> {
    let merged = merge_documents(sources)?;
    if !merged.skipped.is_empty() {
        warn!("{} file(s) left out of {}", merged.skipped.len(), target.display());
    }

    let parent = target
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "merge target has no parent"))?;
    fs::create_dir_all(parent)?;

    let target = unique_path(target);
    merged.save(&target)?;
    Ok(target)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::NamingSettings;
    use crate::pdf::fixtures::{faktur_pdf, single_page_pdf};
    use lopdf::Document;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    const UNKNOWN_NAME: &str = "Nama tidak ditemukan-Tanggal tidak ditemukan-NoRef.pdf";

    #[derive(Default)]
    struct RecordingSink {
        progress: Mutex<Vec<(ProcessingStage, usize, usize)>>,
        lines: Mutex<Vec<String>>,
    }

    impl ProgressSink for RecordingSink {
        fn progress(&self, stage: ProcessingStage, current: usize, total: usize) {
            self.progress.lock().unwrap().push((stage, current, total));
        }

        fn log(&self, message: &str) {
            self.lines.lock().unwrap().push(message.to_string());
        }
    }

    fn processor(mode: ProcessingMode) -> BatchProcessor {
        BatchProcessor::new(FilenameBuilder::new(NamingSettings::new()).unwrap(), mode)
    }

    fn input_with(files: &[(&str, Vec<u8>)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, data) in files {
            fs::write(dir.path().join(name), data).unwrap();
        }
        dir
    }

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_empty_input_folder() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let stats = processor(ProcessingMode::Rename)
            .run(input.path(), output.path(), &TracingSink)
            .unwrap();
        assert_eq!(stats, BatchStats::default());
    }

    #[test]
    fn test_missing_input_folder_is_an_error() {
        let output = tempfile::tempdir().unwrap();
        let result = processor(ProcessingMode::Rename).run(
            Path::new("/nonexistent/input"),
            output.path(),
            &TracingSink,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rename_copies_and_counts_bad_files() {
        let input = input_with(&[
            ("a.pdf", single_page_pdf("Halo")),
            ("b.pdf", single_page_pdf("Dunia")),
            ("c.pdf", b"not a pdf".to_vec()),
        ]);
        let output = tempfile::tempdir().unwrap();
        let sink = RecordingSink::default();

        let stats = processor(ProcessingMode::Rename)
            .run(input.path(), output.path(), &sink)
            .unwrap();

        assert_eq!(
            stats,
            BatchStats {
                total: 3,
                renamed: 2,
                merged: 0,
                errors: 1,
                cancelled: false,
            }
        );
        assert_eq!(
            listing(output.path()),
            vec![
                "Nama tidak ditemukan-Tanggal tidak ditemukan-NoRef (1).pdf".to_string(),
                UNKNOWN_NAME.to_string(),
            ]
        );
        // Sources are left in place
        assert_eq!(listing(input.path()).len(), 3);

        let progress = sink.progress.lock().unwrap();
        assert_eq!(
            *progress,
            vec![
                (ProcessingStage::Reading, 1, 3),
                (ProcessingStage::Reading, 2, 3),
                (ProcessingStage::Reading, 3, 3),
                (ProcessingStage::Finalizing, 1, 2),
                (ProcessingStage::Finalizing, 2, 2),
            ]
        );
        assert!(sink.lines.lock().unwrap().iter().any(|l| l.contains("c.pdf")));
    }

    #[test]
    fn test_merge_mode_writes_group_per_seller_and_partner() {
        let input = input_with(&[
            ("a.pdf", single_page_pdf("Halo")),
            ("b.pdf", single_page_pdf("Dunia")),
        ]);
        let output = tempfile::tempdir().unwrap();
        let sink = RecordingSink::default();

        let stats = processor(ProcessingMode::RenameAndMerge)
            .run(input.path(), output.path(), &sink)
            .unwrap();

        assert_eq!(stats.renamed, 2);
        assert_eq!(stats.merged, 1);
        assert_eq!(stats.errors, 0);

        let merged = output
            .path()
            .join("IDTKU_Tidak_Ditemukan")
            .join("Nama tidak ditemukan.pdf");
        let document = Document::load(&merged).unwrap();
        assert_eq!(document.get_pages().len(), 2);

        let progress = sink.progress.lock().unwrap();
        assert!(progress.contains(&(ProcessingStage::Processing, 1, 1)));
    }

    #[test]
    fn test_cancelled_before_start_copies_nothing() {
        let input = input_with(&[("a.pdf", single_page_pdf("Halo"))]);
        let output = tempfile::tempdir().unwrap();
        let flag = CancellationFlag::new();
        flag.cancel();

        let stats = processor(ProcessingMode::Rename)
            .with_cancellation(flag)
            .run(input.path(), output.path(), &TracingSink)
            .unwrap();

        assert!(stats.cancelled);
        assert_eq!(stats.total, 1);
        assert_eq!(stats.renamed, 0);
        assert!(listing(output.path()).is_empty());
    }

    #[test]
    fn test_groups_keyed_by_seller_and_partner() {
        let file = |seller: Option<&str>, partner: Option<&str>, name: &str| NamedFile {
            source: PathBuf::from(name),
            metadata: ExtractedMetadata {
                seller_id: seller.map(str::to_string),
                partner_name: partner.map(str::to_string),
                ..Default::default()
            },
            filename: name.to_string(),
        };
        let named = vec![
            file(Some("1"), Some("Pt A"), "x.pdf"),
            file(Some("1"), Some("Pt B"), "y.pdf"),
            file(Some("1"), Some("Pt A"), "z.pdf"),
            file(None, Some("Pt A"), "w.pdf"),
        ];
        let groups = group_for_merge(&named);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[&("1".to_string(), "Pt A".to_string())].len(), 2);
    }

    #[test]
    fn test_rename_uses_extracted_fields() {
        let input = input_with(&[("scan-001.pdf", faktur_pdf("Pembayaran Invoice No 99"))]);
        let output = tempfile::tempdir().unwrap();

        let stats = processor(ProcessingMode::Rename)
            .run(input.path(), output.path(), &TracingSink)
            .unwrap();

        assert_eq!(stats.renamed, 1);
        assert_eq!(stats.errors, 0);
        assert_eq!(
            listing(output.path()),
            vec!["Pt Contoh Makmur-5-01-2024-Pembayaran Invoice No 99-04002400123456789.pdf"]
        );
    }

    #[test]
    fn test_merge_groups_under_seller_id() {
        let input = input_with(&[
            ("a.pdf", faktur_pdf("PO 1")),
            ("b.pdf", faktur_pdf("PO 2")),
        ]);
        let output = tempfile::tempdir().unwrap();

        let stats = processor(ProcessingMode::RenameAndMerge)
            .run(input.path(), output.path(), &TracingSink)
            .unwrap();

        assert_eq!(stats.renamed, 2);
        assert_eq!(stats.merged, 1);
        let merged = output
            .path()
            .join("0012345678901000000000")
            .join("Pt Contoh Makmur.pdf");
        assert_eq!(Document::load(&merged).unwrap().get_pages().len(), 2);
    }
}
