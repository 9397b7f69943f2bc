//! Structural comparator.
//!
//! Walks the left tree in key order and reports, per key:
//!
//! 1. missing on the right,
//! 2. differing [`ValueKind`],
//! 3. nested differences when the left value is a mapping.
//!
//! Keys present only on the right are reported after the left walk of the same
//! mapping. A left sequence is a leaf: its contents and length are never
//! compared. A right sequence facing a left mapping is compared by index, so
//! `{host, port}` against `[a, b]` reports `host`/`port` and `0`/`1`.
//! Keys match on their rendered text. An ignored path silences the key and
//! everything beneath it.

use serde_yaml::{Mapping, Value};

use crate::error::CompareError;
use crate::types::{child_path, key_segment, untagged, Discrepancy, IgnorePaths, Side, ValueKind};

/// Compare two document roots.
///
/// Both roots must be mappings; anything else (including null) is a contract
/// violation reported as [`CompareError::InvalidInput`].
pub fn diff_properties(
    left: &Value,
    right: &Value,
    ignore: &IgnorePaths,
) -> Result<Vec<Discrepancy>, CompareError> {
    let left = root_mapping(left, Side::Left)?;
    let right = root_mapping(right, Side::Right)?;
    Ok(diff_mappings(left, right, ignore))
}

/// Compare two mappings. Infallible counterpart of [`diff_properties`].
pub fn diff_mappings(left: &Mapping, right: &Mapping, ignore: &IgnorePaths) -> Vec<Discrepancy> {
    let mut differences = Vec::new();
    diff_into(
        &mapping_entries(left),
        &mapping_entries(right),
        ignore,
        "",
        &mut differences,
    );
    differences
}

fn root_mapping(value: &Value, side: Side) -> Result<&Mapping, CompareError> {
    match untagged(value) {
        Value::Mapping(mapping) => Ok(mapping),
        other => Err(CompareError::InvalidInput {
            side,
            found: ValueKind::of(Some(other)),
        }),
    }
}

/// Keys rendered as path segments, in iteration order.
type Entries<'a> = Vec<(String, &'a Value)>;

/// Keys are matched on their rendered text, so `8080` and `'8080'` are one key.
fn mapping_entries(mapping: &Mapping) -> Entries<'_> {
    mapping
        .iter()
        .map(|(key, value)| (key_segment(key), value))
        .collect()
}

/// A sequence seen where a mapping was expected is keyed by index.
fn sequence_entries(sequence: &[Value]) -> Entries<'_> {
    sequence
        .iter()
        .enumerate()
        .map(|(index, value)| (index.to_string(), value))
        .collect()
}

fn lookup<'a>(entries: &Entries<'a>, segment: &str) -> Option<&'a Value> {
    entries
        .iter()
        .find(|(key, _)| key == segment)
        .map(|(_, value)| *value)
}

fn diff_into(
    left: &Entries<'_>,
    right: &Entries<'_>,
    ignore: &IgnorePaths,
    parent: &str,
    differences: &mut Vec<Discrepancy>,
) {
    for &(ref segment, left_value) in left {
        let path = child_path(parent, segment);
        if ignore.contains(&path) {
            continue;
        }

        let right_value = lookup(right, segment);
        if right_value.is_none() {
            differences.push(Discrepancy::property(
                path.clone(),
                format!("Property '{path}' is missing in '$RIGHT'"),
            ));
        }

        let left_kind = ValueKind::of(Some(left_value));
        let right_kind = ValueKind::of(right_value);
        if left_kind != right_kind {
            differences.push(Discrepancy::property(
                path.clone(),
                format!(
                    "Values are of different types ({left_kind} in '$LEFT', {right_kind} in '$RIGHT')"
                ),
            ));
        }

        let Value::Mapping(left_nested) = untagged(left_value) else {
            continue;
        };
        // Missing and scalar counterparts are already reported above.
        let right_nested = match right_value.map(untagged) {
            Some(Value::Mapping(mapping)) => mapping_entries(mapping),
            Some(Value::Sequence(sequence)) => sequence_entries(sequence),
            _ => continue,
        };
        diff_into(
            &mapping_entries(left_nested),
            &right_nested,
            ignore,
            &path,
            differences,
        );
    }

    for (segment, _) in right {
        if lookup(left, segment).is_some() {
            continue;
        }
        let path = child_path(parent, segment);
        if ignore.contains(&path) {
            continue;
        }
        differences.push(Discrepancy::property(
            path.clone(),
            format!("Property '{path}' is missing in '$LEFT'"),
        ));
    }
}
