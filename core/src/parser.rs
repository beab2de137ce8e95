//! Token parsing against a [`Schema`].
//!
//! Input is a flat list of `-name value` pairs. A boolean flag may drop its
//! value: when it is the last token, or the next token is another flag, it
//! is read as `true`. Parsing runs in two passes:
//!
//! 1. **expansion** — walk the tokens and insert a `"true"` after every
//!    value-less boolean flag, so every known flag is followed by exactly
//!    one value token;
//! 2. **pairing** — take the expanded list two tokens at a time and store
//!    each `(flag, value)` pair after checking, in this order, that the flag
//!    exists, that the value fits its type and that it was not given before.
//!
//! Values are stored raw and converted on every [`ArgsParser::get_value`]
//! call, falling back to the schema default when a flag was not supplied.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::{
    ArgsError, FlagDefinition, FlagType, FlagValue, Schema, SchemaError, definitions_from_json_str,
    definitions_from_path, definitions_from_value, definitions_from_yaml_str,
};

/// Value inserted after a boolean flag given without one.
const IMPLICIT_TRUE: &str = "true";

/// Checks whether a token looks like a flag: `-` followed by an ASCII letter.
///
/// # Examples
///
/// ```
/// use args_schema_core::is_flag_marker;
///
/// assert!(is_flag_marker("-l"));
/// assert!(is_flag_marker("-FakeFlag"));
/// assert!(!is_flag_marker("--long"));
/// assert!(!is_flag_marker("-1"));
/// assert!(!is_flag_marker("value"));
/// ```
pub fn is_flag_marker(token: &str) -> bool {
    let mut bytes = token.bytes();
    bytes.next() == Some(b'-') && bytes.next().is_some_and(|b| b.is_ascii_alphabetic())
}

/// Whether a parser has consumed input yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseState {
    /// No input yet; every lookup returns the schema default.
    #[default]
    Unparsed,
    /// Input was consumed; further input is rejected.
    Parsed,
}

/// Parses command-line tokens into typed flag values.
///
/// # Examples
///
/// ```
/// use args_schema_core::*;
///
/// let mut parser = ArgsParser::new(&[
///     FlagDefinition::boolean("l", "false"),
///     FlagDefinition::integer("p", "8080"),
///     FlagDefinition::string("d", "/usr/home"),
/// ])
/// .unwrap();
///
/// parser.parse(&["-l", "-d", "/usr/logs"]).unwrap();
///
/// assert_eq!(parser.get_value("l").unwrap(), FlagValue::Boolean(true));
/// assert_eq!(parser.get_value("p").unwrap(), FlagValue::Integer(8080));
/// assert_eq!(parser.get_value("d").unwrap(), FlagValue::String("/usr/logs".into()));
///
/// let err = parser.get_value("x").unwrap_err();
/// assert_eq!(err, ArgsError::ArgumentNotDefined("x".into()));
/// ```
#[derive(Debug, Clone)]
pub struct ArgsParser {
    schema: Schema,
    arguments: HashMap<String, String>,
    state: ParseState,
}

impl ArgsParser {
    /// Builds a parser from typed flag definitions.
    pub fn new(definitions: &[FlagDefinition]) -> std::result::Result<Self, SchemaError> {
        let schema = Schema::new(definitions)?;
        debug!(flags = schema.len(), "schema accepted");
        Ok(Self {
            schema,
            arguments: HashMap::new(),
            state: ParseState::Unparsed,
        })
    }

    /// Builds a parser from an untyped schema value.
    ///
    /// `null` and non-array values are rejected before any schema rule runs.
    pub fn from_value(value: Value) -> std::result::Result<Self, SchemaError> {
        Self::new(&definitions_from_value(value)?)
    }

    pub fn from_json_str(text: &str) -> std::result::Result<Self, SchemaError> {
        Self::new(&definitions_from_json_str(text)?)
    }

    pub fn from_yaml_str(text: &str) -> std::result::Result<Self, SchemaError> {
        Self::new(&definitions_from_yaml_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> std::result::Result<Self, SchemaError> {
        Self::new(&definitions_from_path(path)?)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn is_parsed(&self) -> bool {
        self.state == ParseState::Parsed
    }

    /// Consumes a token list.
    ///
    /// An empty list is a no-op. Otherwise the parser moves to
    /// [`ParseState::Parsed`] and a later non-empty call fails with
    /// [`ArgsError::AlreadyParsed`]. On error, pairs stored before the
    /// failing one are kept.
    pub fn parse<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<()> {
        if tokens.is_empty() {
            return Ok(());
        }
        if self.is_parsed() {
            return Err(ArgsError::AlreadyParsed);
        }
        self.state = ParseState::Parsed;

        let expanded = self.expand_booleans(tokens);
        debug!(tokens = tokens.len(), expanded = expanded.len(), "parsing arguments");

        for pair in expanded.chunks(2) {
            let flag = pair[0];
            let name = flag.strip_prefix('-').unwrap_or(flag);
            self.store(name, pair.get(1).copied())?;
        }

        Ok(())
    }

    /// Inserts the implicit `"true"` after value-less boolean flags.
    ///
    /// A known non-boolean flag takes the next token as its value verbatim,
    /// even when that token looks like a flag. Unknown flags are copied
    /// through untouched so pairing can report them by name.
    fn expand_booleans<'a, S: AsRef<str>>(&self, tokens: &'a [S]) -> Vec<&'a str> {
        let mut expanded = Vec::with_capacity(tokens.len() + 1);
        let mut rest = tokens.iter().map(|token| token.as_ref()).peekable();

        while let Some(token) = rest.next() {
            expanded.push(token);
            if !is_flag_marker(token) {
                continue;
            }

            match self.schema.get_type(&token[1..]) {
                None => {}
                Some(FlagType::Boolean) => {
                    if rest.peek().is_none_or(|next| is_flag_marker(next)) {
                        expanded.push(IMPLICIT_TRUE);
                    }
                }
                Some(FlagType::Integer | FlagType::String) => {
                    if let Some(value) = rest.next() {
                        expanded.push(value);
                    }
                }
            }
        }

        expanded
    }

    fn store(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        let validate = self
            .schema
            .value_validator(name)
            .ok_or_else(|| ArgsError::ArgumentNotDefined(name.to_string()))?;
        let value = value.ok_or_else(|| ArgsError::MissingValue(name.to_string()))?;

        if !validate(value) {
            return Err(ArgsError::InvalidArgumentType {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
        if self.arguments.contains_key(name) {
            return Err(ArgsError::DuplicateInput(name.to_string()));
        }

        debug!(flag = name, value, "argument stored");
        self.arguments.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Returns the typed value of a flag.
    ///
    /// Uses the parsed value when the flag was supplied, the schema default
    /// otherwise. The value is converted on every call.
    pub fn get_value(&self, name: &str) -> Result<FlagValue> {
        let entry = self
            .schema
            .get(name)
            .ok_or_else(|| ArgsError::ArgumentNotDefined(name.to_string()))?;
        let coerce = self
            .schema
            .value_parser(name)
            .ok_or_else(|| ArgsError::ArgumentNotDefined(name.to_string()))?;

        match self.arguments.get(name) {
            Some(raw) => coerce(raw).ok_or_else(|| ArgsError::InvalidArgumentType {
                name: name.to_string(),
                value: raw.clone(),
            }),
            None => coerce(&entry.default).ok_or_else(|| ArgsError::InvalidDefault {
                name: name.to_string(),
                value: entry.default.clone(),
            }),
        }
    }

    /// True when the flag was supplied in the parsed input.
    pub fn is_present(&self, name: &str) -> bool {
        self.arguments.contains_key(name)
    }

    /// Resolves every schema flag, in declaration order.
    pub fn values(&self) -> Result<Vec<(&str, FlagValue)>> {
        self.schema
            .names()
            .map(|name| Ok((name, self.get_value(name)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bool_and_string() -> ArgsParser {
        ArgsParser::new(&[
            FlagDefinition::boolean("l", "false"),
            FlagDefinition::string("d", "/usr/local"),
        ])
        .unwrap()
    }

    #[test]
    fn test_expansion_inserts_true_for_bare_booleans() {
        let parser = bool_and_string();
        assert_eq!(parser.expand_booleans(&["-l"]), vec!["-l", "true"]);
        assert_eq!(
            parser.expand_booleans(&["-l", "-d", "x"]),
            vec!["-l", "true", "-d", "x"]
        );
        assert_eq!(parser.expand_booleans(&["-l", "false"]), vec!["-l", "false"]);
    }

    #[test]
    fn test_expansion_keeps_flag_like_values_of_string_flags() {
        let parser = bool_and_string();
        assert_eq!(
            parser.expand_booleans(&["-d", "-l", "-l", "false"]),
            vec!["-d", "-l", "-l", "false"]
        );
    }

    #[test]
    fn test_expansion_leaves_unknown_flags_alone() {
        let parser = bool_and_string();
        assert_eq!(
            parser.expand_booleans(&["-l", "-FakeFlag", "-d", "value"]),
            vec!["-l", "true", "-FakeFlag", "-d", "value"]
        );
    }

    #[test]
    fn test_empty_input_is_a_no_op() {
        let mut parser = bool_and_string();
        parser.parse::<&str>(&[]).unwrap();
        assert_eq!(parser.state(), ParseState::Unparsed);
        assert_eq!(parser.get_value("d").unwrap(), FlagValue::String("/usr/local".into()));
    }

    #[test]
    fn test_second_parse_is_rejected() {
        let mut parser = bool_and_string();
        parser.parse(&["-l"]).unwrap();
        assert!(parser.is_parsed());
        assert_eq!(parser.parse(&["-d", "x"]), Err(ArgsError::AlreadyParsed));
        assert_eq!(parser.get_value("d").unwrap(), FlagValue::String("/usr/local".into()));
    }

    #[test]
    fn test_failed_parse_keeps_earlier_pairs() {
        let mut parser = bool_and_string();
        let err = parser.parse(&["-d", "kept", "-x", "1"]).unwrap_err();
        assert_eq!(err, ArgsError::ArgumentNotDefined("x".into()));
        assert!(parser.is_present("d"));
        assert!(!parser.is_present("l"));
        assert_eq!(parser.get_value("d").unwrap(), FlagValue::String("kept".into()));
    }

    #[test]
    fn test_value_flag_without_value() {
        let mut parser = bool_and_string();
        assert_eq!(
            parser.parse(&["-l", "-d"]),
            Err(ArgsError::MissingValue("d".into()))
        );
    }

    #[test]
    fn test_check_order_type_before_duplicate() {
        let mut parser = bool_and_string();
        assert_eq!(
            parser.parse(&["-l", "true", "-l", "maybe"]),
            Err(ArgsError::InvalidArgumentType {
                name: "l".into(),
                value: "maybe".into()
            })
        );
    }

    #[test]
    fn test_unknown_flag_reported_before_bad_value() {
        let mut parser = bool_and_string();
        assert_eq!(
            parser.parse(&["-x", "not-a-bool"]),
            Err(ArgsError::ArgumentNotDefined("x".into()))
        );
    }

    #[test]
    fn test_token_without_marker_is_reported_verbatim() {
        let mut parser = bool_and_string();
        assert_eq!(
            parser.parse(&["value", "-l"]),
            Err(ArgsError::ArgumentNotDefined("value".into()))
        );
    }

    #[test]
    fn test_uncoercible_default_fails_on_lookup() {
        let parser = ArgsParser::new(&[FlagDefinition::integer("p", "")]).unwrap();
        assert_eq!(
            parser.get_value("p"),
            Err(ArgsError::InvalidDefault {
                name: "p".into(),
                value: String::new()
            })
        );
    }

    #[test]
    fn test_values_follow_schema_order() {
        let mut parser = bool_and_string();
        parser.parse(&["-d", "/tmp"]).unwrap();
        assert_eq!(
            parser.values().unwrap(),
            vec![
                ("l", FlagValue::Boolean(false)),
                ("d", FlagValue::String("/tmp".into())),
            ]
        );
    }
}
