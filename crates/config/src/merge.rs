// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recursive default application.
//!
//! A project spec starts from a deep copy of `defaults`; keys present in
//! the project win, and nested mappings merge element-wise. Applying the
//! defaults to an already-merged spec is a no-op.

use serde_yaml::Value;

/// Merge `defaults` under `child`: the result carries every key of
/// `defaults`, overridden by `child` wherever `child` declares one.
pub fn apply_defaults(child: &Value, defaults: &Value) -> Value {
    match (child, defaults) {
        (Value::Mapping(child_map), Value::Mapping(defaults_map)) => {
            let mut merged = defaults_map.clone();
            for (key, child_value) in child_map {
                let value = match defaults_map.get(key) {
                    Some(default_value) => apply_defaults(child_value, default_value),
                    None => child_value.clone(),
                };
                merged.insert(key.clone(), value);
            }
            Value::Mapping(merged)
        }
        // A non-mapping child always wins, even over a mapping default.
        _ => child.clone(),
    }
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
