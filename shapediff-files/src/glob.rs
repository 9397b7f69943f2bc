//! File enumeration under a root directory, filtered by a glob.
//!
//! Names are relative to the root and always `/`-separated. `*` does not cross
//! a separator; `**/` matches zero or more directories.

use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};
use walkdir::WalkDir;

use crate::error::{pattern_err, DiffError};

/// Pattern used when the caller does not narrow the file set.
pub const MATCH_ALL: &str = "**/*";

/// Compile a glob pattern into a matcher over relative file names.
pub fn compile(pattern: &str) -> Result<GlobMatcher, DiffError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| pattern_err(pattern, source))
}

/// List regular files under `root` whose relative name matches, sorted.
///
/// A missing root yields an empty list, like a glob over a missing directory.
pub fn enumerate(root: &Path, matcher: &GlobMatcher) -> Vec<String> {
    if !root.is_dir() {
        tracing::warn!(root = %root.display(), "directory does not exist; treating as empty");
        return Vec::new();
    }

    let mut names: Vec<String> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(root = %root.display(), error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| relative_name(root, entry.path()))
        .filter(|name| matcher.is_match(name))
        .collect();
    names.sort();
    names
}

fn relative_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(segments.join("/"))
}
