//! `shapediff dirs <left> <right>` — compare two directory trees.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use shapediff_core::Discrepancy;
use shapediff_files::{diff_dirs, DiffConfig, SopsCli, SopsLoader, DEFAULT_CONFIG_FILE};

use super::output::OutputArgs;

/// Arguments for `shapediff dirs`.
#[derive(Args, Debug)]
pub struct DirsArgs {
    /// Left-hand root directory.
    pub left: PathBuf,

    /// Right-hand root directory.
    pub right: PathBuf,

    /// Config file with globs and ignore rules (default: ./.shapediff.yaml if present).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only compare files whose relative name matches this glob.
    #[arg(long, value_name = "GLOB")]
    pub files: Option<String>,

    /// Decrypt files whose relative name matches this glob with sops.
    #[arg(long, value_name = "GLOB")]
    pub secret_files: Option<String>,

    /// sops executable used for secret files.
    #[arg(long, value_name = "PATH")]
    pub sops_bin: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl DirsArgs {
    pub fn run(self) -> Result<Vec<Discrepancy>> {
        let config = load_config(self.config.as_deref())?;
        let mut options = config
            .to_options()
            .context("invalid ignore rule in config")?;

        if let Some(files) = self.files {
            options = options.file_name_glob(files);
        }
        if let Some(secret_files) = self.secret_files {
            options = options.secret_files_glob(secret_files);
        }
        if let Some(program) = self.sops_bin {
            options = options.secret_loader(SopsLoader::new(SopsCli::new(program)));
        }

        diff_dirs(&self.left, &self.right, &options).with_context(|| {
            format!(
                "diff failed for '{}' and '{}'",
                self.left.display(),
                self.right.display()
            )
        })
    }
}

fn load_config(explicit: Option<&Path>) -> Result<DiffConfig> {
    if let Some(path) = explicit {
        return DiffConfig::load(path)
            .with_context(|| format!("failed to load config '{}'", path.display()));
    }

    let fallback = Path::new(DEFAULT_CONFIG_FILE);
    if !fallback.exists() {
        return Ok(DiffConfig::default());
    }
    tracing::debug!(path = %fallback.display(), "using config from working directory");
    DiffConfig::load(fallback)
        .with_context(|| format!("failed to load config '{}'", fallback.display()))
}
