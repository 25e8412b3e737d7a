use std::io::Write;

use serde::de;

use crate::error::Result;
use crate::ser::Serializer;
use crate::value::Mapping;

/// Configuration for encoding and decoding querystrings.
///
/// ## Nesting depth
///
/// By default a key is split on every `_` while decoding. Setting
/// `max_depth` bounds the number of splits when decoding untrusted input.
/// Whatever is left after the last split stays in the final segment, so a
/// `max_depth` of 0 keeps every key flat.
///
/// Default value: unlimited (`max_depth = usize::MAX`)
///
/// ```
/// use structured_qs::{Config, Value};
///
/// let config = Config::new().max_depth(0);
/// let mapping = config.deserialize_str("filters_toyline=3").unwrap();
/// assert_eq!(mapping["filters_toyline"], Value::from("3"));
///
/// let config = Config::new().max_depth(1);
/// let mapping = config.deserialize_str("a_b_c=1").unwrap();
/// assert_eq!(mapping["a"], Value::from_iter([("b_c", "1")]));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub(crate) max_depth: usize,
    pub(crate) use_form_encoding: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            max_depth: usize::MAX,
            use_form_encoding: cfg!(feature = "default_to_form_encoding"),
        }
    }

    /// Specifies how many times a key may be split while decoding.
    /// Default is unlimited.
    ///
    /// A limit below the nesting depth of a mapping means that mapping no
    /// longer reads back unchanged after encoding.
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// By default, keys and values are encoded the way ECMAScript's
    /// `encodeURIComponent` does it, and `+` decodes to a literal `+`.
    ///
    /// With form encoding, spaces are written as `+` and a `+` in the input
    /// decodes to a space, as in `application/x-www-form-urlencoded`.
    ///
    /// To use form encoding, set this to `true`.
    /// Alternatively, you can use the `default_to_form_encoding` Cargo feature
    /// to set this to `true` by default.
    pub const fn use_form_encoding(mut self, use_form_encoding: bool) -> Self {
        self.use_form_encoding = use_form_encoding;
        self
    }

    /// Decodes a querystring from a `&[u8]` using this `Config`.
    pub fn deserialize_bytes(self, input: &[u8]) -> Result<Mapping> {
        crate::de::parse(input, self)
    }

    /// Decodes a querystring from a `&str` using this `Config`.
    pub fn deserialize_str(self, input: &str) -> Result<Mapping> {
        self.deserialize_bytes(input.as_bytes())
    }

    /// Decodes a querystring using this `Config` and reads a Rust type out
    /// of the result.
    pub fn deserialize_str_as<T: de::DeserializeOwned>(self, input: &str) -> Result<T> {
        crate::de::from_mapping(self.deserialize_str(input)?)
    }

    /// Encodes a mapping as a querystring using this `Config`.
    pub fn serialize_string(self, input: &Mapping) -> Result<String> {
        let mut buffer = Vec::with_capacity(128);
        self.serialize_to_writer(input, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| crate::Error::from(e.utf8_error()))
    }

    /// Encodes a mapping into a writer using this `Config`.
    pub fn serialize_to_writer<W: Write>(self, input: &Mapping, writer: &mut W) -> Result<()> {
        let mut serializer = Serializer::new(writer, self);
        serializer.serialize_mapping(input)
    }
}
