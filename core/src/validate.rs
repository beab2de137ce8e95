//! Schema definition validation.
//!
//! Checks a list of [`FlagDefinition`] records before a [`Schema`] is built
//! from them. Rules run in a fixed order over the whole list and the first
//! rule that any record breaks is reported:
//!
//! 1. the list is not empty
//! 2. every record has a non-empty name
//! 3. every record has a non-empty type
//! 4. every record declares a default (an empty default is fine)
//! 5. every type is `boolean`, `integer` or `string`
//! 6. no two records share a name
//!
//! # Examples
//!
//! ```
//! use args_schema_core::*;
//!
//! let ok = [FlagDefinition::boolean("l", "false")];
//! assert_eq!(validate_definitions(&ok), Ok(()));
//!
//! let missing_name = [FlagDefinition {
//!     name: None,
//!     flag_type: None,
//!     default: Some("x".into()),
//! }];
//! // Name is checked before type.
//! assert_eq!(validate_definitions(&missing_name), Err(InvalidSchema::MissingName));
//! ```
//!
//! [`Schema`]: crate::Schema

use std::collections::HashSet;

use thiserror::Error;

use crate::{FlagDefinition, FlagType};

/// Reasons a schema definition is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSchema {
    /// The definition contains no records.
    #[error("The schema cannot be empty.")]
    Empty,
    /// A record has no name, or an empty one.
    #[error("Missing arg name")]
    MissingName,
    /// A record has no type, or an empty one.
    #[error("Missing arg type")]
    MissingType,
    /// A record does not declare a default value.
    #[error("Missing arg default value")]
    MissingDefault,
    /// A record names a type outside the supported set.
    #[error("Invalid arg type: {0}")]
    InvalidType(String),
    /// Two records share a name.
    #[error("Duplicate arg name: {0}")]
    DuplicateName(String),
}

/// Validates a schema definition.
///
/// Returns the first violated rule, in rule order. A record breaking rule 5
/// is only reported when every record passes rules 1 through 4.
pub fn validate_definitions(definitions: &[FlagDefinition]) -> Result<(), InvalidSchema> {
    if definitions.is_empty() {
        return Err(InvalidSchema::Empty);
    }

    if definitions.iter().any(|def| is_blank(&def.name)) {
        return Err(InvalidSchema::MissingName);
    }

    if definitions.iter().any(|def| is_blank(&def.flag_type)) {
        return Err(InvalidSchema::MissingType);
    }

    if definitions.iter().any(|def| def.default.is_none()) {
        return Err(InvalidSchema::MissingDefault);
    }

    if let Some(bad) = definitions
        .iter()
        .filter_map(|def| def.flag_type.as_deref())
        .find(|ty| ty.parse::<FlagType>().is_err())
    {
        return Err(InvalidSchema::InvalidType(bad.to_string()));
    }

    let mut seen = HashSet::new();
    for name in definitions.iter().filter_map(|def| def.name.as_deref()) {
        if !seen.insert(name) {
            return Err(InvalidSchema::DuplicateName(name.to_string()));
        }
    }

    Ok(())
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().is_none_or(str::is_empty)
}
