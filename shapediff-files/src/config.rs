//! `.shapediff.yaml` — declarative options for directory comparisons.
//!
//! ```yaml
//! files: "**/*.yml"
//! secret_files: "**/*.sops.yml"
//! ignore:
//!   - file: "generated/**"
//!     all: true
//!   - file: "app.yml"
//!     paths: [database.password]
//! ```
//!
//! Ignore rules are tried in order; the first rule whose glob matches the
//! relative file name decides.

use std::fs;
use std::path::Path;

use globset::GlobMatcher;
use serde::{Deserialize, Serialize};
use shapediff_core::IgnorePaths;

use crate::dirs::{DiffDirsOptions, FileIgnore};
use crate::error::{ConfigError, DiffError};
use crate::glob;

/// File name looked up in the working directory when no config is given.
pub const DEFAULT_CONFIG_FILE: &str = ".shapediff.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffConfig {
    /// Glob selecting files under both roots.
    pub files: Option<String>,
    /// Glob selecting files that need decryption.
    pub secret_files: Option<String>,
    pub ignore: Vec<IgnoreRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IgnoreRule {
    /// Glob over the relative file name.
    pub file: String,
    #[serde(default)]
    pub all: bool,
    #[serde(default)]
    pub paths: Vec<String>,
}

impl DiffConfig {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Compile the ignore rules into a per-file policy.
    pub fn ignore_policy(&self) -> Result<impl Fn(&str) -> FileIgnore + 'static, DiffError> {
        let rules: Vec<(GlobMatcher, FileIgnore)> = self
            .ignore
            .iter()
            .map(|rule| {
                let matcher = glob::compile(&rule.file)?;
                let policy = if rule.all {
                    FileIgnore::All
                } else {
                    FileIgnore::Paths(rule.paths.iter().cloned().collect::<IgnorePaths>())
                };
                Ok::<_, DiffError>((matcher, policy))
            })
            .collect::<Result<_, _>>()?;

        Ok(move |file_name: &str| {
            rules
                .iter()
                .find(|(matcher, _)| matcher.is_match(file_name))
                .map(|(_, policy)| policy.clone())
                .unwrap_or_default()
        })
    }

    /// Build [`DiffDirsOptions`] from this config.
    pub fn to_options(&self) -> Result<DiffDirsOptions, ConfigError> {
        let mut options = DiffDirsOptions::new().ignore_with(self.ignore_policy()?);
        if let Some(files) = &self.files {
            options = options.file_name_glob(files.clone());
        }
        if let Some(secret_files) = &self.secret_files {
            options = options.secret_files_glob(secret_files.clone());
        }
        Ok(options)
    }
}
