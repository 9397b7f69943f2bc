//! Document loaders: turn a path into a mapping, or explain why not.

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};
use shapediff_core::ValueKind;

use crate::error::LoadError;
use crate::sops::{Decrypt, SopsCli};

/// Strategy for loading one side of a file comparison.
pub trait DocumentLoader {
    fn load(&self, path: &Path) -> Result<Mapping, LoadError>;
}

impl<L: DocumentLoader + ?Sized> DocumentLoader for &L {
    fn load(&self, path: &Path) -> Result<Mapping, LoadError> {
        (**self).load(path)
    }
}

impl<L: DocumentLoader + ?Sized> DocumentLoader for Box<L> {
    fn load(&self, path: &Path) -> Result<Mapping, LoadError> {
        (**self).load(path)
    }
}

// ---------------------------------------------------------------------------
// Plain YAML
// ---------------------------------------------------------------------------

/// Reads the file and parses it as YAML (JSON documents parse too).
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlLoader;

impl DocumentLoader for YamlLoader {
    fn load(&self, path: &Path) -> Result<Mapping, LoadError> {
        ensure_exists(path)?;
        let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_yaml::from_str(&content).map_err(|source| LoadError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        into_mapping(path, value)
    }
}

// ---------------------------------------------------------------------------
// SOPS
// ---------------------------------------------------------------------------

/// Decrypts the file through a [`Decrypt`] collaborator before comparison.
#[derive(Debug, Clone, Default)]
pub struct SopsLoader<D = SopsCli> {
    decryptor: D,
}

impl<D: Decrypt> SopsLoader<D> {
    pub fn new(decryptor: D) -> Self {
        Self { decryptor }
    }
}

impl<D: Decrypt> DocumentLoader for SopsLoader<D> {
    fn load(&self, path: &Path) -> Result<Mapping, LoadError> {
        ensure_exists(path)?;
        let value = self
            .decryptor
            .decrypt(path)
            .map_err(|source| LoadError::Sops {
                path: path.to_path_buf(),
                source,
            })?;
        into_mapping(path, value)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ensure_exists(path: &Path) -> Result<(), LoadError> {
    if path.exists() {
        Ok(())
    } else {
        Err(LoadError::Missing {
            path: path.to_path_buf(),
        })
    }
}

/// An empty document is an empty mapping; scalars and sequences are rejected.
fn into_mapping(path: &Path, value: Value) -> Result<Mapping, LoadError> {
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        Value::Tagged(tagged) => into_mapping(path, tagged.value),
        other => Err(LoadError::NotMapping {
            path: path.to_path_buf(),
            found: ValueKind::of(Some(&other)),
        }),
    }
}
