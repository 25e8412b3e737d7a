//! Encoding nested mappings as querystrings.

mod encode;
mod key;
mod value;

use encode::{ENCODED_ARRAY_DELIMITER, encode};

use serde::ser;

use crate::error::*;
use crate::path::WIRE_SEPARATOR;
use crate::value::{Mapping, Value};

use std::io::Write;

pub use value::ValueSerializer;

/// Encodes a mapping as a querystring.
///
/// Nested keys are joined with `_`, array leaves are joined with `|`, and
/// both keys and values are percent-encoded. No leading `?` is written.
///
/// ```
/// use structured_qs::Value;
///
/// let filters = Value::from_iter([
///     ("filters", Value::from_iter([("tags", ["Walmart", "Dollar Store"])])),
/// ]);
///
/// assert_eq!(
///     structured_qs::to_string(filters.as_map().unwrap()).unwrap(),
///     "filters_tags=Walmart%7CDollar%20Store"
/// );
/// ```
pub fn to_string(input: &Mapping) -> Result<String> {
    let config = crate::Config::default();
    config.serialize_string(input)
}

/// Encodes a mapping into a generic writer object.
pub fn to_writer<W: Write>(input: &Mapping, writer: &mut W) -> Result<()> {
    let config = crate::Config::default();
    config.serialize_to_writer(input, writer)
}

/// Converts any serializable value into a nested mapping.
///
/// Numbers and booleans are written in their string form, `None` fields are
/// left out, and sequences become array leaves.
///
/// ```
/// use serde::Serialize;
/// use structured_qs::Value;
///
/// #[derive(Serialize)]
/// struct Filters {
///     toyline: u32,
///     tags: Vec<&'static str>,
///     puppies: Option<bool>,
/// }
///
/// #[derive(Serialize)]
/// struct Query {
///     filters: Filters,
/// }
///
/// let query = Query {
///     filters: Filters { toyline: 3, tags: vec!["foo", "bar"], puppies: None },
/// };
/// let mapping = structured_qs::to_mapping(&query).unwrap();
/// assert_eq!(
///     mapping["filters"],
///     Value::from_iter([("toyline", Value::from("3")), ("tags", Value::from(["foo", "bar"]))])
/// );
/// ```
pub fn to_mapping<T: ser::Serialize + ?Sized>(input: &T) -> Result<Mapping> {
    match to_value(input)? {
        Some(Value::Map(mapping)) => Ok(mapping),
        None => Ok(Mapping::new()),
        Some(_) => Err(Error::Unsupported(
            "only structs and maps can be converted into a mapping",
        )),
    }
}

/// Converts any serializable value into a single node.
///
/// Returns `None` for values that have no representation at all, such as
/// `Option::None`.
pub fn to_value<T: ser::Serialize + ?Sized>(input: &T) -> Result<Option<Value>> {
    input.serialize(ValueSerializer)
}

/// Writes a mapping out as a querystring.
///
/// The serializer keeps a stack of (already percent-encoded) key segments
/// while it walks the mapping depth-first. For example, when writing
/// `{filters: {toyline: "3"}}` it pushes `filters`, then `toyline`, and
/// writes `filters_toyline=3` when it reaches the leaf.
pub struct Serializer<W: Write> {
    writer: W,
    first_kv: bool,
    key: Vec<Vec<u8>>,
    config: crate::Config,
}

impl<W: Write> Serializer<W> {
    /// Creates a new `Serializer` with the given writer.
    pub fn new(writer: W, config: crate::Config) -> Self {
        Self {
            writer,
            first_kv: true,
            key: Vec::with_capacity(4),
            config,
        }
    }

    /// Writes every leaf of `mapping` as a `key=value` pair.
    pub fn serialize_mapping(&mut self, mapping: &Mapping) -> Result<()> {
        for (key, value) in mapping {
            self.push_key(key.as_bytes());
            match value {
                Value::Map(child) => self.serialize_mapping(child)?,
                Value::String(s) => self.write_value(s.as_bytes())?,
                Value::Array(items) => self.write_array(items)?,
            }
            self.pop_key()?;
        }
        Ok(())
    }

    /// Pushes a new key segment onto the key stack for nested mappings.
    fn push_key(&mut self, newkey: &[u8]) {
        let mut segment = Vec::with_capacity(newkey.len());
        if newkey
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_' || *b == b'.')
        {
            // nothing in here needs percent-encoding
            segment.extend_from_slice(newkey);
        } else {
            for encoded in encode(newkey, self.config.use_form_encoding) {
                segment.extend_from_slice(&encoded);
            }
        }
        self.key.push(segment);
    }

    fn pop_key(&mut self) -> Result<()> {
        let popped = self.key.pop();
        if popped.is_none() {
            return Err(Error::Custom("internal error: no key found".to_string()));
        }
        Ok(())
    }

    fn write_key_stack(&mut self) -> Result<()> {
        if self.first_kv {
            self.first_kv = false;
        } else {
            self.writer.write_all(b"&")?;
        }
        let mut separator = [0; 4];
        let separator = WIRE_SEPARATOR.encode_utf8(&mut separator).as_bytes();
        for (idx, segment) in self.key.iter().enumerate() {
            if idx > 0 {
                self.writer.write_all(separator)?;
            }
            self.writer.write_all(segment)?;
        }
        Ok(())
    }

    fn write_value(&mut self, value: &[u8]) -> Result<()> {
        self.write_key_stack()?;
        self.writer.write_all(b"=")?;
        for encoded in encode(value, self.config.use_form_encoding) {
            self.writer.write_all(&encoded)?;
        }
        Ok(())
    }

    /// Writes all elements of an array leaf under a single key.
    ///
    /// An element that itself contains `|` will be split apart again when
    /// the querystring is decoded.
    fn write_array(&mut self, items: &[String]) -> Result<()> {
        self.write_key_stack()?;
        self.writer.write_all(b"=")?;
        for (idx, item) in items.iter().enumerate() {
            if idx > 0 {
                self.writer.write_all(ENCODED_ARRAY_DELIMITER)?;
            }
            for encoded in encode(item.as_bytes(), self.config.use_form_encoding) {
                self.writer.write_all(&encoded)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::Serializer;
    use crate::Config;
    use crate::value::{Mapping, Value};

    use pretty_assertions::assert_eq;

    fn serialize(value: Value, config: Config) -> String {
        let mut buffer = Vec::new();
        Serializer::new(&mut buffer, config)
            .serialize_mapping(value.as_map().unwrap())
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn empty_mapping() {
        assert_eq!(serialize(Value::Map(Mapping::new()), Config::new()), "");
    }

    #[test]
    fn nested_keys() {
        let value = Value::from_iter([(
            "a",
            Value::from_iter([("b", Value::from_iter([("c", "1")])), ("d", Value::from("2"))]),
        )]);
        assert_eq!(serialize(value, Config::new()), "a_b_c=1&a_d=2");
    }

    #[test]
    fn empty_nested_mapping_writes_nothing() {
        let value = Value::from_iter([("a", Value::new_map()), ("b", Value::from("1"))]);
        assert_eq!(serialize(value, Config::new()), "b=1");
    }

    #[test]
    fn encodes_keys() {
        let value = Value::from_iter([("a b", Value::from_iter([("c&d", "e")]))]);
        assert_eq!(serialize(value, Config::new()), "a%20b_c%26d=e");
    }

    #[test]
    fn arrays() {
        let value = Value::from_iter([
            ("many", Value::from(["a b", "c"])),
            ("none", Value::Array(vec![])),
            ("one", Value::from(["x"])),
        ]);
        assert_eq!(serialize(value.clone(), Config::new()), "many=a%20b%7Cc&none=&one=x");
        assert_eq!(
            serialize(value, Config::new().use_form_encoding(true)),
            "many=a+b%7Cc&none=&one=x"
        );
    }
}
