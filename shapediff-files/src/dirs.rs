//! Directory comparator.
//!
//! Reconciles the file sets of two roots and diffs every pair:
//!
//! 1. Enumerate both roots with the file-name glob.
//! 2. Every left file is diffed against its right counterpart (secret loader
//!    when the name matches the secret glob) unless its policy is
//!    [`FileIgnore::All`].
//! 3. Right-only files are diffed against the missing left path with the plain
//!    loader, which reports them through the usual existence check.

use std::collections::BTreeSet;
use std::path::Path;

use shapediff_core::{Discrepancy, IgnorePaths};

use crate::error::DiffError;
use crate::file::diff_files_with;
use crate::glob::{self, MATCH_ALL};
use crate::loader::{DocumentLoader, SopsLoader, YamlLoader};
use crate::sops::SopsCli;

/// Per-file ignore policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileIgnore {
    /// Leave the file out of the comparison entirely.
    All,
    /// Suppress discrepancies at these property paths.
    Paths(IgnorePaths),
}

impl Default for FileIgnore {
    fn default() -> Self {
        Self::Paths(IgnorePaths::new())
    }
}

impl From<IgnorePaths> for FileIgnore {
    fn from(paths: IgnorePaths) -> Self {
        Self::Paths(paths)
    }
}

type IgnoreFn = dyn Fn(&str) -> FileIgnore;

/// Options for [`diff_dirs`]. Built with chained setters.
pub struct DiffDirsOptions {
    file_name_glob: String,
    secret_files_glob: Option<String>,
    ignore: Box<IgnoreFn>,
    plain_loader: Box<dyn DocumentLoader>,
    secret_loader: Box<dyn DocumentLoader>,
}

impl Default for DiffDirsOptions {
    fn default() -> Self {
        Self {
            file_name_glob: MATCH_ALL.to_string(),
            secret_files_glob: None,
            ignore: Box::new(|_: &str| FileIgnore::default()),
            plain_loader: Box::new(YamlLoader),
            secret_loader: Box::new(SopsLoader::<SopsCli>::default()),
        }
    }
}

impl DiffDirsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict both file sets to names matching `pattern`.
    pub fn file_name_glob(mut self, pattern: impl Into<String>) -> Self {
        self.file_name_glob = pattern.into();
        self
    }

    /// Route names matching `pattern` through the secret loader.
    pub fn secret_files_glob(mut self, pattern: impl Into<String>) -> Self {
        self.secret_files_glob = Some(pattern.into());
        self
    }

    /// Resolve a per-file [`FileIgnore`] from the relative file name.
    pub fn ignore_with(mut self, policy: impl Fn(&str) -> FileIgnore + 'static) -> Self {
        self.ignore = Box::new(policy);
        self
    }

    pub fn plain_loader(mut self, loader: impl DocumentLoader + 'static) -> Self {
        self.plain_loader = Box::new(loader);
        self
    }

    pub fn secret_loader(mut self, loader: impl DocumentLoader + 'static) -> Self {
        self.secret_loader = Box::new(loader);
        self
    }

    pub fn file_name_pattern(&self) -> &str {
        &self.file_name_glob
    }

    pub fn secret_files_pattern(&self) -> Option<&str> {
        self.secret_files_glob.as_deref()
    }

    /// Policy for one relative file name.
    pub fn ignore_for(&self, file_name: &str) -> FileIgnore {
        (self.ignore)(file_name)
    }
}

/// Diff every file under `left_dir` against its counterpart under `right_dir`.
///
/// Only an invalid glob pattern fails the call; missing, unreadable and
/// undecryptable files are reported as discrepancies.
pub fn diff_dirs(
    left_dir: &Path,
    right_dir: &Path,
    options: &DiffDirsOptions,
) -> Result<Vec<Discrepancy>, DiffError> {
    let files = glob::compile(&options.file_name_glob)?;
    let secrets = options
        .secret_files_glob
        .as_deref()
        .map(glob::compile)
        .transpose()?;

    let left_names = glob::enumerate(left_dir, &files);
    let mut right_only: BTreeSet<String> = glob::enumerate(right_dir, &files).into_iter().collect();
    tracing::debug!(
        left = %left_dir.display(),
        right = %right_dir.display(),
        left_files = left_names.len(),
        right_files = right_only.len(),
        "enumerated directories"
    );

    let mut differences = Vec::new();
    for name in &left_names {
        right_only.remove(name);

        let ignore = match options.ignore_for(name) {
            FileIgnore::All => {
                tracing::debug!(file = %name, "file ignored");
                continue;
            }
            FileIgnore::Paths(paths) => paths,
        };

        let is_secret = secrets.as_ref().is_some_and(|m| m.is_match(name));
        let loader: &dyn DocumentLoader = if is_secret {
            &*options.secret_loader
        } else {
            &*options.plain_loader
        };
        differences.extend(diff_files_with(
            loader,
            &left_dir.join(name),
            &right_dir.join(name),
            &ignore,
        ));
    }

    for name in &right_only {
        if options.ignore_for(name) == FileIgnore::All {
            tracing::debug!(file = %name, "file ignored");
            continue;
        }
        differences.extend(diff_files_with(
            &*options.plain_loader,
            &left_dir.join(name),
            &right_dir.join(name),
            &IgnorePaths::new(),
        ));
    }

    Ok(differences)
}
