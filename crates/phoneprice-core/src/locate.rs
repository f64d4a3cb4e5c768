//! Upward directory search for artifact files.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

/// Find `filename` in `start_dir` or the nearest ancestor that contains it.
///
/// Checks `start_dir` first, then each parent up to the filesystem root.
/// Returns `None` if no directory on that chain holds a regular file of
/// that name. Relative start directories are searched as given, so their
/// ancestors stop at the first path component.
pub fn locate(filename: &str, start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let candidate = dir.join(filename);
        if candidate.is_file() {
            debug!(file = filename, path = %candidate.display(), "located artifact");
            return Some(candidate);
        }
        trace!(file = filename, dir = %dir.display(), "not here");
    }
    debug!(file = filename, start = %start_dir.display(), "artifact not found in any ancestor");
    None
}

/// Directory the search starts from when none is configured: the folder
/// holding the running executable, else the working directory.
pub fn default_start_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
