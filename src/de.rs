//! Decoding querystrings into nested mappings.
//!
//! Decoding happens in two independent steps:
//!
//! 1. `parse` splits the querystring into `key=value` pairs, percent-decodes
//!    both halves, splits each key on `_` and writes the value into a
//!    [`Mapping`]. Values containing `|` become array leaves.
//! 2. Optionally, `ValueDeserializer` reads a Rust type out of that mapping.
//!    Since every leaf is a string, primitives are parsed from their string
//!    form at this point and not before.
//!
//! Keeping the two apart means the mapping can be inspected, edited and
//! re-encoded without ever knowing its Rust type.

mod parse;
mod string_parser;
mod value;

use std::io::Read;

use serde::de;

use crate::error::*;
use crate::value::{Mapping, Value};

pub use value::ValueDeserializer;

/// Decodes a querystring from a `&str`.
///
/// A leading `?` is ignored.
///
/// ```
/// use structured_qs::Value;
///
/// let mapping = structured_qs::from_str("?filters_toyline=355&filters_tags=a|b").unwrap();
/// assert_eq!(
///     mapping["filters"],
///     Value::from_iter([
///         ("toyline", Value::from("355")),
///         ("tags", Value::from(["a", "b"])),
///     ])
/// );
/// ```
pub fn from_str(input: &str) -> Result<Mapping> {
    from_bytes(input.as_bytes())
}

/// Decodes a querystring from a `&[u8]`.
pub fn from_bytes(input: &[u8]) -> Result<Mapping> {
    crate::Config::default().deserialize_bytes(input)
}

/// Convenience function that reads all bytes from `reader` and decodes
/// them with `from_bytes`.
pub fn from_reader<R: Read>(mut reader: R) -> Result<Mapping> {
    let mut buf = vec![];
    let _ = reader.read_to_end(&mut buf).map_err(Error::from)?;
    from_bytes(&buf)
}

/// Decodes a querystring straight into a Rust type.
///
/// ```
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct Filters {
///     toyline: u32,
///     tags: Vec<String>,
/// }
///
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct Query {
///     filters: Filters,
/// }
///
/// let query: Query = structured_qs::from_str_as("filters_toyline=3&filters_tags=foo|bar").unwrap();
/// assert_eq!(query.filters.toyline, 3);
/// assert_eq!(query.filters.tags, ["foo", "bar"]);
/// ```
pub fn from_str_as<T: de::DeserializeOwned>(input: &str) -> Result<T> {
    crate::Config::default().deserialize_str_as(input)
}

/// Reads a Rust type out of a decoded mapping.
pub fn from_mapping<T: de::DeserializeOwned>(mapping: Mapping) -> Result<T> {
    from_value(Value::Map(mapping))
}

/// Reads a Rust type out of any node of a mapping.
pub fn from_value<T: de::DeserializeOwned>(value: Value) -> Result<T> {
    T::deserialize(ValueDeserializer::new(value))
}

pub(crate) fn parse(input: &[u8], config: crate::Config) -> Result<Mapping> {
    parse::parse(input, config)
}
