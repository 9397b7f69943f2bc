//! File comparator: one left/right pair, one loader strategy.

use std::path::Path;

use serde_yaml::Mapping;
use shapediff_core::{diff_mappings, Discrepancy, IgnorePaths};

use crate::loader::{DocumentLoader, SopsLoader, YamlLoader};
use crate::sops::SopsCli;

/// Diff two plain YAML files.
pub fn diff_files(left: &Path, right: &Path, ignore: &IgnorePaths) -> Vec<Discrepancy> {
    diff_files_with(&YamlLoader, left, right, ignore)
}

/// Diff two SOPS-encrypted files, decrypting both with the `sops` binary.
pub fn diff_sops_files(left: &Path, right: &Path, ignore: &IgnorePaths) -> Vec<Discrepancy> {
    diff_files_with(&SopsLoader::<SopsCli>::default(), left, right, ignore)
}

/// Load both sides with `loader` and diff them.
///
/// Both loads always run, so two broken files yield two discrepancies. The
/// structural diff only runs when both sides loaded. `$LEFT` / `$RIGHT` in the
/// returned messages are replaced by the two paths.
pub fn diff_files_with<L: DocumentLoader + ?Sized>(
    loader: &L,
    left: &Path,
    right: &Path,
    ignore: &IgnorePaths,
) -> Vec<Discrepancy> {
    tracing::debug!(left = %left.display(), right = %right.display(), "diffing files");

    let mut differences = Vec::new();
    let left_doc = load_recorded(loader, left, &mut differences);
    let right_doc = load_recorded(loader, right, &mut differences);

    if let (Some(left_doc), Some(right_doc)) = (&left_doc, &right_doc) {
        differences.extend(diff_mappings(left_doc, right_doc, ignore));
    }

    let (left_label, right_label) = (left.display().to_string(), right.display().to_string());
    for difference in &mut differences {
        difference.resolve_placeholders(&left_label, &right_label);
    }
    differences
}

fn load_recorded<L: DocumentLoader + ?Sized>(
    loader: &L,
    path: &Path,
    differences: &mut Vec<Discrepancy>,
) -> Option<Mapping> {
    match loader.load(path) {
        Ok(mapping) => Some(mapping),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "load failed");
            differences.push(Discrepancy::file(err.path(), err.to_string()));
            None
        }
    }
}
