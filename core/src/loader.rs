//! Reading schema definitions from JSON, YAML or files.
//!
//! All formats go through an untyped [`serde_json::Value`] first so that
//! shape problems (no schema, not a list, list entries that are not objects)
//! are reported before any schema rule is checked.
//!
//! # Example JSON
//!
//! ```json
//! [
//!   { "name": "l", "type": "boolean", "default": "false" },
//!   { "name": "p", "type": "integer", "default": "8080" },
//!   { "name": "d", "type": "string", "default": "/usr/home" }
//! ]
//! ```

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::{FlagDefinition, SchemaError};

/// Extracts flag definitions from an untyped value.
///
/// # Examples
///
/// ```
/// use args_schema_core::{SchemaError, definitions_from_value};
/// use serde_json::json;
///
/// let defs = definitions_from_value(json!([{"name": "l", "type": "boolean"}])).unwrap();
/// assert_eq!(defs.len(), 1);
///
/// assert!(matches!(definitions_from_value(json!(null)), Err(SchemaError::Missing)));
/// assert!(matches!(definitions_from_value(json!(1)), Err(SchemaError::NotAnArray)));
/// ```
pub fn definitions_from_value(value: Value) -> Result<Vec<FlagDefinition>, SchemaError> {
    let items = match value {
        Value::Null => return Err(SchemaError::Missing),
        Value::Array(items) => items,
        _ => return Err(SchemaError::NotAnArray),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(SchemaError::NotAnObject(index));
            }
            serde_json::from_value(item).map_err(|source| SchemaError::Malformed { index, source })
        })
        .collect()
}

/// Reads flag definitions from JSON text.
pub fn definitions_from_json_str(text: &str) -> Result<Vec<FlagDefinition>, SchemaError> {
    definitions_from_value(serde_json::from_str(text)?)
}

/// Reads flag definitions from YAML text.
///
/// ```
/// use args_schema_core::definitions_from_yaml_str;
///
/// let defs = definitions_from_yaml_str(
///     "- name: p\n  type: integer\n  default: \"8080\"\n",
/// )
/// .unwrap();
/// assert_eq!(defs[0].default.as_deref(), Some("8080"));
/// ```
pub fn definitions_from_yaml_str(text: &str) -> Result<Vec<FlagDefinition>, SchemaError> {
    definitions_from_value(serde_yaml::from_str(text)?)
}

/// Reads flag definitions from a file.
///
/// Files ending in `.yaml` or `.yml` are read as YAML, everything else as
/// JSON.
pub fn definitions_from_path(path: impl AsRef<Path>) -> Result<Vec<FlagDefinition>, SchemaError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    debug!(path = %path.display(), yaml = is_yaml, "loading schema file");

    if is_yaml {
        definitions_from_yaml_str(&text)
    } else {
        definitions_from_json_str(&text)
    }
}
