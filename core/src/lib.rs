//! Schema-driven command-line argument parsing.
//!
//! A caller describes the flags a program accepts as a list of
//! [`FlagDefinition`] records (name, type, default). [`ArgsParser`] validates
//! that list into a [`Schema`], parses raw `-name value` tokens against it,
//! and answers typed lookups:
//!
//! - [`FlagType`] — the closed set of flag types (`boolean`, `integer`,
//!   `string`) with per-type validation and coercion.
//! - [`FlagValue`] — a coerced value.
//! - [`Schema`] — the validated flag set, looked up by name.
//! - [`ArgsParser`] — parses tokens and resolves values, falling back to
//!   schema defaults.
//!
//! Validation ([`validate_definitions`]) rejects empty schemas, records with
//! missing fields, unknown types and duplicate names. Loading helpers
//! ([`definitions_from_json_str`], [`definitions_from_yaml_str`],
//! [`definitions_from_path`]) read definitions from text or files.
//!
//! # Example
//!
//! ```
//! use args_schema_core::*;
//!
//! let mut parser = ArgsParser::from_json_str(
//!     r#"[
//!         {"name": "l", "type": "boolean", "default": "false"},
//!         {"name": "p", "type": "integer", "default": "8080"},
//!         {"name": "d", "type": "string", "default": "/usr/home"}
//!     ]"#,
//! )
//! .unwrap();
//!
//! parser.parse(&["-l", "-p", "9090"]).unwrap();
//!
//! assert_eq!(parser.get_value("l").unwrap().as_bool(), Some(true));
//! assert_eq!(parser.get_value("p").unwrap().as_integer(), Some(9090));
//! assert_eq!(parser.get_value("d").unwrap().as_str(), Some("/usr/home"));
//! ```

mod error;
mod loader;
mod parser;
mod schema;
mod types;
mod validate;

pub use error::{ArgsError, Result, SchemaError};
pub use loader::{
    definitions_from_json_str, definitions_from_path, definitions_from_value,
    definitions_from_yaml_str,
};
pub use parser::{ArgsParser, ParseState, is_flag_marker};
pub use schema::{Schema, ValueParser, ValueValidator};
pub use types::*;
pub use validate::{InvalidSchema, validate_definitions};
