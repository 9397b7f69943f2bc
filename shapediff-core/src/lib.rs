//! shapediff core library — discrepancy model and the structural comparator.
//!
//! Public API surface:
//! - [`types`] — [`Discrepancy`], [`IgnorePaths`], [`ValueKind`], [`Side`]
//! - [`error`] — [`CompareError`]
//! - [`properties`] — [`diff_properties`] / [`diff_mappings`]

pub mod error;
pub mod properties;
pub mod types;

pub use error::CompareError;
pub use properties::{diff_mappings, diff_properties};
pub use types::{Discrepancy, IgnorePaths, Side, ValueKind, LEFT_PLACEHOLDER, RIGHT_PLACEHOLDER};

pub use serde_yaml::{Mapping, Value};
