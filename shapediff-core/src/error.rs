//! Error types for shapediff-core.

use thiserror::Error;

use crate::types::{Side, ValueKind};

/// Errors raised by the structural comparator.
///
/// Data conditions (missing keys, type mismatches) are never errors; they are
/// reported as [`Discrepancy`](crate::Discrepancy) records instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    /// A document root was null/absent or not a mapping.
    #[error("cannot compare against a {found} {side} document; both sides must be mappings")]
    InvalidInput { side: Side, found: ValueKind },
}
