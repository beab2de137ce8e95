//! Error types for schema construction and argument parsing.
//!
//! Construction problems ([`SchemaError`]) and parse/lookup problems
//! ([`ArgsError`]) are kept apart: the first can only happen while building
//! an [`ArgsParser`](crate::ArgsParser), the second only while using one.

use std::path::PathBuf;

use thiserror::Error;

use crate::InvalidSchema;

/// Errors raised while building a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// No schema was supplied (e.g. a JSON `null`).
    #[error("Should inform a schema")]
    Missing,

    /// The schema is not a list of flag definitions.
    #[error("The schema should be an array of objects.")]
    NotAnArray,

    /// A list element is not an object.
    #[error("The schema should be an array of objects: entry {0} is not an object.")]
    NotAnObject(usize),

    /// A list element could not be read as a flag definition.
    #[error("The schema should be an array of objects: entry {index}: {source}")]
    Malformed {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The definition broke one of the schema rules.
    #[error("The provided schema was in an invalid format: {0}")]
    Invalid(#[from] InvalidSchema),

    /// Schema text was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Schema text was not valid YAML.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The schema file could not be read.
    #[error("failed to read schema '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SchemaError {
    /// True for errors about the shape of the input rather than its content.
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            Self::Missing | Self::NotAnArray | Self::NotAnObject(_) | Self::Malformed { .. }
        )
    }
}

/// Errors raised while parsing tokens or looking up values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    /// The flag is not declared in the schema.
    #[error("The argument \"{0}\" was not defined in the schema.")]
    ArgumentNotDefined(String),

    /// The supplied value does not match the flag's declared type.
    #[error("The argument \"{name}\" received \"{value}\", which is not a valid value for its type.")]
    InvalidArgumentType { name: String, value: String },

    /// The flag was supplied more than once.
    #[error("The argument \"{0}\" was defined more than once on the input.")]
    DuplicateInput(String),

    /// A value-taking flag was the last token.
    #[error("The argument \"{0}\" requires a value.")]
    MissingValue(String),

    /// The schema default could not be converted to the declared type.
    #[error("The default \"{value}\" of argument \"{name}\" cannot be converted to its type.")]
    InvalidDefault { name: String, value: String },

    /// Input was already parsed on this parser.
    #[error("Arguments were already parsed; build a new parser to parse again.")]
    AlreadyParsed,
}

impl ArgsError {
    /// Name of the flag the error refers to, if any.
    pub fn flag_name(&self) -> Option<&str> {
        match self {
            Self::ArgumentNotDefined(name)
            | Self::DuplicateInput(name)
            | Self::MissingValue(name)
            | Self::InvalidArgumentType { name, .. }
            | Self::InvalidDefault { name, .. } => Some(name),
            Self::AlreadyParsed => None,
        }
    }
}

/// Convenience alias for results with [`ArgsError`].
pub type Result<T> = std::result::Result<T, ArgsError>;
