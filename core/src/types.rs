//! Flag types, typed values and schema records.
//!
//! A schema is described by a list of [`FlagDefinition`] records. Once a
//! definition passes validation it becomes a [`SchemaEntry`] with a resolved
//! [`FlagType`]. Raw command-line values are checked and converted through
//! the type, producing a [`FlagValue`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Declared type of a flag.
///
/// The set is closed: every flag is a boolean, an integer or a string. Each
/// variant knows how to validate and coerce a raw token.
///
/// # Examples
///
/// ```
/// use args_schema_core::{FlagType, FlagValue};
///
/// let ty: FlagType = "integer".parse().unwrap();
/// assert_eq!(ty, FlagType::Integer);
/// assert!(ty.validate("8080"));
/// assert_eq!(ty.coerce("8080"), Some(FlagValue::Integer(8080)));
///
/// assert!(!FlagType::Boolean.validate("TRUE"));
/// assert_eq!(FlagType::Boolean.coerce("TRUE"), Some(FlagValue::Boolean(true)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagType {
    /// `true` / `false`; may be given without a value.
    Boolean,
    /// Whole number.
    Integer,
    /// Arbitrary text, taken verbatim.
    String,
}

impl FlagType {
    /// All supported types, in declaration order.
    pub const ALL: [FlagType; 3] = [FlagType::Boolean, FlagType::Integer, FlagType::String];

    /// Returns the lowercase name used in schema definitions.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::String => "string",
        }
    }

    /// Checks whether a raw token is acceptable input for this type.
    ///
    /// Booleans accept exactly `"true"` or `"false"`. Integers accept any
    /// finite number that starts with a whole part (`"42"`, `"-7"`, `"1.5"`).
    /// Strings accept anything.
    pub fn validate(self, raw: &str) -> bool {
        match self {
            Self::Boolean => raw == "true" || raw == "false",
            Self::Integer => {
                let trimmed = raw.trim();
                trimmed.parse::<f64>().is_ok_and(f64::is_finite)
                    && leading_integer(trimmed).is_some()
            }
            Self::String => true,
        }
    }

    /// Converts a raw token into a typed value.
    ///
    /// Coercion is more lenient than [`validate`](Self::validate): booleans
    /// compare case-insensitively against `"true"`, and integers take the
    /// leading whole number and ignore anything after it. Returns `None` only
    /// for integers without a leading number or outside the `i64` range.
    pub fn coerce(self, raw: &str) -> Option<FlagValue> {
        match self {
            Self::Boolean => Some(FlagValue::Boolean(raw.eq_ignore_ascii_case("true"))),
            Self::Integer => leading_integer(raw).map(FlagValue::Integer),
            Self::String => Some(FlagValue::String(raw.to_string())),
        }
    }
}

impl fmt::Display for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlagType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| format!("unknown flag type: {s}"))
    }
}

/// Parses the whole number at the start of `raw`.
///
/// Leading whitespace and a single sign are allowed; parsing stops at the
/// first non-digit.
fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with(['-', '+']));
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

/// A coerced flag value.
///
/// Serializes without a tag, so a map of values renders as plain JSON
/// (`{"l": true, "p": 8080, "d": "/usr/logs"}`).
///
/// # Examples
///
/// ```
/// use args_schema_core::FlagValue;
///
/// let port = FlagValue::Integer(8080);
/// assert_eq!(port.as_integer(), Some(8080));
/// assert_eq!(port.as_bool(), None);
/// assert_eq!(port.to_string(), "8080");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl FlagValue {
    /// Returns the type this value was coerced to.
    pub fn flag_type(&self) -> FlagType {
        match self {
            Self::Boolean(_) => FlagType::Boolean,
            Self::Integer(_) => FlagType::Integer,
            Self::String(_) => FlagType::String,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::String(value) => f.write_str(value),
        }
    }
}

/// A flag record as supplied by the caller, before validation.
///
/// Every field is optional so that a missing field can be told apart from an
/// empty one: an empty `default` is valid, a missing one is not. The `type`
/// is kept as text because an unknown type name is a schema error, not a
/// deserialization failure.
///
/// # Examples
///
/// ```
/// use args_schema_core::FlagDefinition;
///
/// let port = FlagDefinition::integer("p", "8080");
/// assert_eq!(port.name.as_deref(), Some("p"));
/// assert_eq!(port.flag_type.as_deref(), Some("integer"));
///
/// let raw: FlagDefinition =
///     serde_json::from_str(r#"{"name": "l", "type": "boolean"}"#).unwrap();
/// assert!(raw.default.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagDefinition {
    /// Flag name without the leading `-`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Type name: `boolean`, `integer` or `string`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub flag_type: Option<String>,
    /// Raw default value, used when the flag is not supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl FlagDefinition {
    /// Creates a definition with every field present.
    pub fn new(
        name: impl Into<String>,
        flag_type: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            flag_type: Some(flag_type.into()),
            default: Some(default.into()),
        }
    }

    pub fn boolean(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(name, FlagType::Boolean.as_str(), default)
    }

    pub fn integer(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(name, FlagType::Integer.as_str(), default)
    }

    pub fn string(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(name, FlagType::String.as_str(), default)
    }
}

/// A validated flag declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub flag_type: FlagType,
    pub default: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_type_from_str() {
        assert_eq!("boolean".parse::<FlagType>(), Ok(FlagType::Boolean));
        assert_eq!("integer".parse::<FlagType>(), Ok(FlagType::Integer));
        assert_eq!("string".parse::<FlagType>(), Ok(FlagType::String));
        assert!("Boolean".parse::<FlagType>().is_err());
        assert!("mariola".parse::<FlagType>().is_err());
    }

    #[test]
    fn test_boolean_validation_is_case_sensitive() {
        assert!(FlagType::Boolean.validate("true"));
        assert!(FlagType::Boolean.validate("false"));
        assert!(!FlagType::Boolean.validate("True"));
        assert!(!FlagType::Boolean.validate("yes"));
        assert!(!FlagType::Boolean.validate(""));
    }

    #[test]
    fn test_boolean_coercion_is_case_insensitive() {
        assert_eq!(FlagType::Boolean.coerce("TRUE"), Some(FlagValue::Boolean(true)));
        assert_eq!(FlagType::Boolean.coerce("true"), Some(FlagValue::Boolean(true)));
        assert_eq!(FlagType::Boolean.coerce("false"), Some(FlagValue::Boolean(false)));
        assert_eq!(FlagType::Boolean.coerce(""), Some(FlagValue::Boolean(false)));
    }

    #[test]
    fn test_integer_validation() {
        assert!(FlagType::Integer.validate("8080"));
        assert!(FlagType::Integer.validate("-12"));
        assert!(FlagType::Integer.validate(" 7 "));
        assert!(FlagType::Integer.validate("1.5"));
        assert!(!FlagType::Integer.validate(""));
        assert!(!FlagType::Integer.validate("abc"));
        assert!(!FlagType::Integer.validate("12abc"));
        assert!(!FlagType::Integer.validate("inf"));
        assert!(!FlagType::Integer.validate("NaN"));
        assert!(!FlagType::Integer.validate(".5"));
    }

    #[test]
    fn test_integer_coercion_takes_leading_number() {
        assert_eq!(FlagType::Integer.coerce("8080"), Some(FlagValue::Integer(8080)));
        assert_eq!(FlagType::Integer.coerce("  -42"), Some(FlagValue::Integer(-42)));
        assert_eq!(FlagType::Integer.coerce("+3"), Some(FlagValue::Integer(3)));
        assert_eq!(FlagType::Integer.coerce("12abc"), Some(FlagValue::Integer(12)));
        assert_eq!(FlagType::Integer.coerce("1.9"), Some(FlagValue::Integer(1)));
        assert_eq!(FlagType::Integer.coerce(""), None);
        assert_eq!(FlagType::Integer.coerce("-"), None);
        assert_eq!(FlagType::Integer.coerce("99999999999999999999"), None);
    }

    #[test]
    fn test_string_passthrough() {
        assert!(FlagType::String.validate(""));
        assert!(FlagType::String.validate("-l"));
        assert_eq!(
            FlagType::String.coerce("/usr/home"),
            Some(FlagValue::String("/usr/home".to_string()))
        );
    }

    #[test]
    fn test_flag_value_serializes_untagged() {
        let values = vec![
            FlagValue::Boolean(true),
            FlagValue::Integer(8080),
            FlagValue::String("x".to_string()),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[true,8080,"x"]"#);
    }

    #[test]
    fn test_definition_keeps_empty_default_distinct_from_missing() {
        let empty: FlagDefinition =
            serde_json::from_str(r#"{"name": "l", "type": "integer", "default": ""}"#).unwrap();
        assert_eq!(empty.default.as_deref(), Some(""));

        let missing: FlagDefinition =
            serde_json::from_str(r#"{"name": "l", "type": "integer"}"#).unwrap();
        assert_eq!(missing.default, None);
    }
}
