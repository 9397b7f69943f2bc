//! Domain types for structural comparison.
//!
//! Messages produced below the file layer carry the [`LEFT_PLACEHOLDER`] and
//! [`RIGHT_PLACEHOLDER`] tokens; the file comparator swaps them for real paths.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Token standing in for the left document's location inside a message.
pub const LEFT_PLACEHOLDER: &str = "$LEFT";

/// Token standing in for the right document's location inside a message.
pub const RIGHT_PLACEHOLDER: &str = "$RIGHT";

// ---------------------------------------------------------------------------
// Discrepancy
// ---------------------------------------------------------------------------

/// One structural difference between two configuration trees or files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrepancy {
    /// Dot-joined key path from the document root. `None` for file-level records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_path: Option<String>,
    /// File the record is about. Only set for existence and load failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    /// Human-readable description.
    pub message: String,
}

impl Discrepancy {
    /// A discrepancy located at `path` inside a document.
    pub fn property(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property_path: Some(path.into()),
            file_path: None,
            message: message.into(),
        }
    }

    /// A discrepancy about a whole file (missing, unreadable, undecryptable).
    pub fn file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            property_path: None,
            file_path: Some(path.into()),
            message: message.into(),
        }
    }

    /// Replace the first `$LEFT` and the first `$RIGHT` token in the message.
    pub fn resolve_placeholders(&mut self, left: &str, right: &str) {
        self.message = self
            .message
            .replacen(LEFT_PLACEHOLDER, left, 1)
            .replacen(RIGHT_PLACEHOLDER, right, 1);
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.message.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// IgnorePaths
// ---------------------------------------------------------------------------

/// Dot-paths whose discrepancies (and those of their descendants) are suppressed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IgnorePaths(BTreeSet<String>);

impl IgnorePaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.0.insert(path.into())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for IgnorePaths {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for IgnorePaths {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

// ---------------------------------------------------------------------------
// ValueKind
// ---------------------------------------------------------------------------

/// Variant tag compared by the type-mismatch check.
///
/// Mappings and sequences share [`ValueKind::Object`], so swapping one for the
/// other is not reported as a type difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Boolean,
    Number,
    String,
    Object,
    Null,
    /// The key is absent on that side.
    Undefined,
}

impl ValueKind {
    /// Kind of an optional value; `None` means the key does not exist.
    pub fn of(value: Option<&Value>) -> Self {
        match value {
            None => Self::Undefined,
            Some(Value::Null) => Self::Null,
            Some(Value::Bool(_)) => Self::Boolean,
            Some(Value::Number(_)) => Self::Number,
            Some(Value::String(_)) => Self::String,
            Some(Value::Sequence(_) | Value::Mapping(_)) => Self::Object,
            Some(Value::Tagged(tagged)) => Self::of(Some(&tagged.value)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Object => "object",
            Self::Null => "null",
            Self::Undefined => "undefined",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

/// Which of the two compared inputs something refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Strip any number of YAML tags (`!Tag value`) off a value.
pub fn untagged(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untagged(&tagged.value),
        other => other,
    }
}

/// Render a mapping key as a path segment.
pub(crate) fn key_segment(key: &Value) -> String {
    match untagged(key) {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Join a parent path and a segment with `.`; the root path is empty.
pub(crate) fn child_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}.{segment}")
    }
}
