//! Error types for shapediff-files.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;

use shapediff_core::ValueKind;

/// A document could not be turned into a mapping.
///
/// The `Display` text is the discrepancy message reported for the file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The existence check failed.
    #[error("File '{}' does not exist", .path.display())]
    Missing { path: PathBuf },

    /// The content is not valid YAML.
    #[error("Loading yaml from '{}' has failed with {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The path exists but could not be read (a directory, permissions).
    #[error("Loading yaml from '{}' has failed with {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The decryptor rejected the file.
    #[error("Loading sops file from '{}' has failed with: {source}", .path.display())]
    Sops {
        path: PathBuf,
        #[source]
        source: DecryptError,
    },

    /// Parsed fine, but the root is a scalar or a sequence.
    #[error("Loading document from '{}' has failed with: root is {found}, expected a mapping", .path.display())]
    NotMapping { path: PathBuf, found: ValueKind },
}

impl LoadError {
    /// The file the error is about.
    pub fn path(&self) -> &Path {
        match self {
            Self::Missing { path }
            | Self::Yaml { path, .. }
            | Self::Read { path, .. }
            | Self::Sops { path, .. }
            | Self::NotMapping { path, .. } => path.as_path(),
        }
    }
}

/// Failure reported by a [`Decrypt`](crate::Decrypt) implementation.
#[derive(Debug, Error)]
pub enum DecryptError {
    /// The decryptor process could not be started.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// sops ran and exited non-zero; `stderr` is trimmed.
    #[error("sops exited with {status}: {stderr}")]
    Exit { status: ExitStatus, stderr: String },

    /// Decrypted output did not parse.
    #[error("decrypted content is not valid yaml: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Free-form failure from a custom decryptor.
    #[error("{0}")]
    Other(String),
}

/// Hard failures of a directory comparison.
#[derive(Debug, Error)]
pub enum DiffError {
    /// A file-name or secret-file glob did not compile.
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Errors from loading a `.shapediff.yaml` configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML or has unknown fields.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// An ignore rule carries an invalid glob.
    #[error(transparent)]
    Pattern(#[from] DiffError),
}

/// Convenience constructor for [`DiffError::Pattern`].
pub(crate) fn pattern_err(pattern: &str, source: globset::Error) -> DiffError {
    DiffError::Pattern {
        pattern: pattern.to_string(),
        source,
    }
}
