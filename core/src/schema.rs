//! Validated flag schema with O(1) lookup by name.

use std::collections::HashMap;

use crate::{FlagDefinition, FlagType, FlagValue, InvalidSchema, SchemaEntry, validate_definitions};

/// Converts a raw token into a typed value; see [`FlagType::coerce`].
pub type ValueParser = fn(&str) -> Option<FlagValue>;

/// Checks a raw token against a type; see [`FlagType::validate`].
pub type ValueValidator = fn(&str) -> bool;

/// The set of flags a parser recognizes.
///
/// Built once from a definition list and read-only afterwards. Entries keep
/// their declaration order; lookups go through a name index.
///
/// # Examples
///
/// ```
/// use args_schema_core::*;
///
/// let schema = Schema::new(&[
///     FlagDefinition::boolean("l", "false"),
///     FlagDefinition::integer("p", "8080"),
/// ])
/// .unwrap();
///
/// assert!(schema.contains("p"));
/// assert_eq!(schema.get_type("p"), Some(FlagType::Integer));
/// assert_eq!(schema.get_default("p"), Some("8080"));
///
/// let parse = schema.value_parser("p").unwrap();
/// assert_eq!(parse("8080"), Some(FlagValue::Integer(8080)));
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    entries: Vec<SchemaEntry>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Validates `definitions` and builds the schema.
    pub fn new(definitions: &[FlagDefinition]) -> Result<Self, InvalidSchema> {
        validate_definitions(definitions)?;

        let mut entries = Vec::with_capacity(definitions.len());
        let mut index = HashMap::with_capacity(definitions.len());
        for def in definitions {
            let name = def.name.clone().ok_or(InvalidSchema::MissingName)?;
            let ty = def.flag_type.as_deref().ok_or(InvalidSchema::MissingType)?;
            let default = def.default.clone().ok_or(InvalidSchema::MissingDefault)?;
            let flag_type = ty
                .parse::<FlagType>()
                .map_err(|_| InvalidSchema::InvalidType(ty.to_string()))?;

            index.insert(name.clone(), entries.len());
            entries.push(SchemaEntry {
                name,
                flag_type,
                default,
            });
        }

        Ok(Self { entries, index })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&SchemaEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn get_type(&self, name: &str) -> Option<FlagType> {
        self.get(name).map(|entry| entry.flag_type)
    }

    pub fn get_default(&self, name: &str) -> Option<&str> {
        self.get(name).map(|entry| entry.default.as_str())
    }

    /// Returns the coercion function for the flag's declared type.
    pub fn value_parser(&self, name: &str) -> Option<ValueParser> {
        self.get_type(name).map(|ty| -> ValueParser {
            match ty {
                FlagType::Boolean => |raw| FlagType::Boolean.coerce(raw),
                FlagType::Integer => |raw| FlagType::Integer.coerce(raw),
                FlagType::String => |raw| FlagType::String.coerce(raw),
            }
        })
    }

    /// Returns the format check for the flag's declared type.
    pub fn value_validator(&self, name: &str) -> Option<ValueValidator> {
        self.get_type(name).map(|ty| -> ValueValidator {
            match ty {
                FlagType::Boolean => |raw| FlagType::Boolean.validate(raw),
                FlagType::Integer => |raw| FlagType::Integer.validate(raw),
                FlagType::String => |raw| FlagType::String.validate(raw),
            }
        })
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: an empty definition is rejected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schema {
        Schema::new(&[
            FlagDefinition::boolean("l", "true"),
            FlagDefinition::integer("p", "8080"),
            FlagDefinition::string("d", "/usr/home"),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_by_name() {
        let schema = sample();
        assert!(schema.contains("l"));
        assert!(!schema.contains("x"));
        assert_eq!(schema.get_type("d"), Some(FlagType::String));
        assert_eq!(schema.get_default("d"), Some("/usr/home"));
        assert_eq!(schema.get_type("x"), None);
        assert_eq!(schema.get_default("x"), None);
    }

    #[test]
    fn test_preserves_declaration_order() {
        let schema = sample();
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["l", "p", "d"]);
        assert_eq!(schema.len(), 3);
        assert!(!schema.is_empty());
    }

    #[test]
    fn test_value_functions_follow_declared_type() {
        let schema = sample();

        let validate = schema.value_validator("l").unwrap();
        assert!(validate("false"));
        assert!(!validate("1"));

        let parse = schema.value_parser("p").unwrap();
        assert_eq!(parse("42abc"), Some(FlagValue::Integer(42)));

        let parse = schema.value_parser("d").unwrap();
        assert_eq!(parse("-l"), Some(FlagValue::String("-l".to_string())));

        assert!(schema.value_parser("x").is_none());
        assert!(schema.value_validator("x").is_none());
    }

    #[test]
    fn test_invalid_definition_is_rejected() {
        let err = Schema::new(&[FlagDefinition::new("l", "mariola", "mariola")]).unwrap_err();
        assert_eq!(err, InvalidSchema::InvalidType("mariola".to_string()));
    }
}
