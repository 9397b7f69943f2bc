//! # shapediff-files
//!
//! File and directory orchestration around the structural comparator.
//!
//! Call [`diff_files`] / [`diff_sops_files`] for a single pair of documents, or
//! [`diff_dirs`] to reconcile two directory trees and diff every file pair.

pub mod config;
pub mod dirs;
pub mod error;
pub mod file;
pub mod glob;
pub mod loader;
pub mod sops;

pub use config::{DiffConfig, IgnoreRule, DEFAULT_CONFIG_FILE};
pub use dirs::{diff_dirs, DiffDirsOptions, FileIgnore};
pub use error::{ConfigError, DecryptError, DiffError, LoadError};
pub use file::{diff_files, diff_files_with, diff_sops_files};
pub use loader::{DocumentLoader, SopsLoader, YamlLoader};
pub use sops::{Decrypt, SopsCli};
