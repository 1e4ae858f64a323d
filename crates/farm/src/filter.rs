// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server-side filter rendering.
//!
//! Each listing endpoint declares a static schema of filterable fields. A
//! term renders as `<flag>_<field>_eq_<value>` where the flag encodes the
//! field type: `n` for integers (`d` when the field name contains `time`),
//! `s` for strings, `b` for booleans.

use crate::error::FarmError;

/// Type tag of a filterable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    String,
    Boolean,
}

/// Per-endpoint field schema: field name to type tag.
pub type FieldSchema = &'static [(&'static str, FieldType)];

/// A caller-supplied filter value. Construction is typed, so a mismatch
/// against the schema is a validation error rather than a silent coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl FilterValue {
    fn field_type(&self) -> FieldType {
        match self {
            FilterValue::Int(_) => FieldType::Integer,
            FilterValue::Str(_) => FieldType::String,
            FilterValue::Bool(_) => FieldType::Boolean,
        }
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Int(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Str(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Str(v)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Bool(v)
    }
}

/// Render filter terms against `schema`.
///
/// Unknown fields and type mismatches fail with
/// [`FarmError::InvalidFilter`]; the caller's request is never sent with a
/// filter the server would misinterpret.
pub fn render_filter(
    schema: FieldSchema,
    terms: &[(&str, FilterValue)],
) -> Result<Vec<String>, FarmError> {
    let mut rendered = Vec::with_capacity(terms.len());
    for (field, value) in terms {
        let declared = schema
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, ty)| *ty)
            .ok_or_else(|| FarmError::InvalidFilter(format!("unknown field {field}")))?;
        if declared != value.field_type() {
            return Err(FarmError::InvalidFilter(format!(
                "field {field} expects {declared:?}, got {:?}",
                value.field_type()
            )));
        }
        let (flag, text) = match value {
            FilterValue::Int(n) => {
                let flag = if field.contains("time") { "d" } else { "n" };
                (flag, n.to_string())
            }
            FilterValue::Str(s) => ("s", s.clone()),
            FilterValue::Bool(b) => ("b", b.to_string()),
        };
        rendered.push(format!("{flag}_{field}_eq_{text}"));
    }
    Ok(rendered)
}

pub(crate) mod schema {
    use super::FieldType::{Boolean, Integer, String};
    use super::FieldSchema;

    pub const DEVICES: FieldSchema = &[
        ("displayname", String),
        ("enabled", Boolean),
        ("id", Integer),
        ("locked", Boolean),
        ("online", Boolean),
        ("ostype", String),
    ];

    pub const DEVICE_GROUPS: FieldSchema =
        &[("displayname", String), ("id", Integer), ("ostype", String)];

    pub const DEVICE_GROUP_DEVICES: FieldSchema = &[
        ("displayname", String),
        ("enabled", Boolean),
        ("id", Integer),
        ("locked", Boolean),
        ("online", Boolean),
        ("ostype", String),
    ];

    pub const FRAMEWORKS: FieldSchema = &[
        ("id", Integer),
        ("jobconfigid", Integer),
        ("labelname", String),
        ("name", String),
        ("ostype", String),
        ("type", String),
    ];

    pub const FILES: FieldSchema = &[
        ("createtime", Integer),
        ("direction", String),
        ("id", Integer),
        ("inputtype", String),
        ("mimetype", String),
        ("name", String),
        ("size", Integer),
        ("state", String),
    ];

    pub const PROJECTS: FieldSchema = &[
        ("frameworkid", Integer),
        ("id", Integer),
        ("name", String),
        ("ostype", String),
    ];
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
