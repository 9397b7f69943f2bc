//! `shapediff files <left> <right>` — compare one pair of documents.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use shapediff_core::{Discrepancy, IgnorePaths};
use shapediff_files::{diff_files, diff_files_with, SopsCli, SopsLoader};

use super::output::OutputArgs;

/// Arguments for `shapediff files`.
#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Left-hand document.
    pub left: PathBuf,

    /// Right-hand document.
    pub right: PathBuf,

    /// Decrypt both documents with sops before comparing.
    #[arg(long)]
    pub sops: bool,

    /// Dot-path to leave out of the comparison (repeatable).
    #[arg(long = "ignore", value_name = "PATH")]
    pub ignore: Vec<String>,

    /// sops executable used with `--sops`.
    #[arg(long, value_name = "PATH", requires = "sops")]
    pub sops_bin: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl FilesArgs {
    pub fn run(self) -> Result<Vec<Discrepancy>> {
        let ignore: IgnorePaths = self.ignore.into_iter().collect();

        if !self.sops {
            return Ok(diff_files(&self.left, &self.right, &ignore));
        }

        let decryptor = self.sops_bin.map(SopsCli::new).unwrap_or_default();
        Ok(diff_files_with(
            &SopsLoader::new(decryptor),
            &self.left,
            &self.right,
            &ignore,
        ))
    }
}
