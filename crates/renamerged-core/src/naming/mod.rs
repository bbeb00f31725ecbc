//! Filename generation and length enforcement.

mod builder;
mod checker;
pub mod truncate;

pub use builder::{FilenameBuilder, FilenameCandidate, UNNAMED, clean_component};
pub use checker::{
    FilenameSample, LONG_FILENAME_THRESHOLD, LongFilename, LongFilenameReport,
    check_long_filenames,
};
pub use truncate::fit_to_budget;
