//! Secret decryption collaborator.
//!
//! [`SopsCli`] shells out to the `sops` binary; anything else that can turn an
//! encrypted file into a YAML tree can implement [`Decrypt`].

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_yaml::Value;

use crate::error::DecryptError;

/// Decrypt a protected document and return its parsed tree.
pub trait Decrypt {
    fn decrypt(&self, path: &Path) -> Result<Value, DecryptError>;
}

impl<F> Decrypt for F
where
    F: Fn(&Path) -> Result<Value, DecryptError>,
{
    fn decrypt(&self, path: &Path) -> Result<Value, DecryptError> {
        self(path)
    }
}

/// Runs `sops --decrypt <path>` and parses stdout as YAML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SopsCli {
    program: PathBuf,
}

impl SopsCli {
    /// Use a specific `sops` executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for SopsCli {
    fn default() -> Self {
        Self::new("sops")
    }
}

impl Decrypt for SopsCli {
    fn decrypt(&self, path: &Path) -> Result<Value, DecryptError> {
        tracing::debug!(program = %self.program.display(), path = %path.display(), "decrypting");
        let output = Command::new(&self.program)
            .arg("--decrypt")
            .arg(path)
            .output()
            .map_err(|source| DecryptError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(DecryptError::Exit {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let plaintext = String::from_utf8_lossy(&output.stdout);
        Ok(serde_yaml::from_str(&plaintext)?)
    }
}
