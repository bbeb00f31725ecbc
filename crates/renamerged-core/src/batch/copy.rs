//! Copying into the output folder without overwriting.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

/// Attempts made for a copy that fails with a transient error.
const COPY_ATTEMPTS: u32 = 3;

/// Delay before the first retry; doubled after each one.
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// Highest ` (n)` counter tried before falling back to a timestamp.
const MAX_COUNTER: u32 = 1000;

/// First path based on `dest` that does not exist yet.
///
/// `dir/name.pdf` becomes `dir/name (1).pdf`, `dir/name (2).pdf`, and so on.
/// After [`MAX_COUNTER`] taken names a `__<unix-timestamp>` suffix is used.
pub fn unique_path(dest: &Path) -> PathBuf {
    if !dest.exists() {
        return dest.to_path_buf();
    }

    let parent = dest.parent().unwrap_or_else(|| Path::new(""));
    let stem = dest
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = dest
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    for counter in 1..=MAX_COUNTER {
        let candidate = parent.join(format!("{} ({}){}", stem, counter, extension));
        if !candidate.exists() {
            return candidate;
        }
    }

    let timestamp = chrono::Utc::now().timestamp();
    parent.join(format!("{}__{}{}", stem, timestamp, extension))
}

/// Copy `src` to a free path derived from `dest` and return where it landed.
///
/// The source must be readable. Failed copies are retried with exponential
/// backoff.
pub fn copy_with_unique_name(src: &Path, dest: &Path) -> io::Result<PathBuf> {
    File::open(src)?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let target = unique_path(dest);
    let mut delay = INITIAL_BACKOFF;
    let mut attempt = 1;
    loop {
        match fs::copy(src, &target) {
            Ok(_) => {
                debug!("Copied {} to {}", src.display(), target.display());
                return Ok(target);
            }
            Err(e) if attempt < COPY_ATTEMPTS && is_transient(&e) => {
                warn!(
                    "Copy of {} failed (attempt {}/{}): {}",
                    src.display(),
                    attempt,
                    COPY_ATTEMPTS,
                    e
                );
                thread::sleep(delay);
                delay *= 2;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn is_transient(error: &io::Error) -> bool {
    !matches!(
        error.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::InvalidInput
    )
}
