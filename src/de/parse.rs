use std::borrow::Cow;

use tracing::{debug, trace};

use crate::access;
use crate::error::Result;
use crate::path::{ARRAY_DELIMITER, Path};
use crate::value::{Mapping, Value};

use super::string_parser::decode_utf8;

mod decode;

pub fn parse(encoded_string: &[u8], config: crate::Config) -> Result<Mapping> {
    let mut parser = Parser::new(encoded_string, config);
    let mut output = Mapping::new();
    parser.parse(&mut output)?;

    Ok(output)
}

/// Walks the `&`-separated pairs of a querystring and writes each one into
/// a nested mapping.
///
/// The grammar is deliberately forgiving: there are no malformed inputs,
/// only pairs that decode to something unexpected.
struct Parser<'qs> {
    inner: &'qs [u8],
    config: crate::Config,
}

impl<'qs> Parser<'qs> {
    pub fn new(encoded: &'qs [u8], config: crate::Config) -> Self {
        Parser {
            inner: encoded.strip_prefix(b"?").unwrap_or(encoded),
            config,
        }
    }

    fn decode(&self, bytes: &'qs [u8]) -> Result<Cow<'qs, str>> {
        let decoded = decode::decode(bytes, self.config.use_form_encoding);
        Ok(decode_utf8(decoded)?)
    }

    fn parse(&mut self, root_map: &mut Mapping) -> Result<()> {
        let inner = self.inner;
        if inner.is_empty() {
            // empty string -- nothing to parse
            return Ok(());
        }

        for pair in inner.split(|&b| b == b'&') {
            if pair.is_empty() {
                // `a=1&&b=2` or a trailing `&`
                continue;
            }

            let (raw_key, raw_value) = match pair.iter().position(|&b| b == b'=') {
                Some(idx) => (&pair[..idx], Some(&pair[idx + 1..])),
                None => (pair, None),
            };

            let key = self.decode(raw_key)?;
            let path = Path::from_wire_key(&key, self.config.max_depth);

            match raw_value {
                Some(raw_value) => {
                    let value = self.decode(raw_value)?;
                    trace!(key = %key, value = %value, "decoded pair");
                    access::set(root_map, &path, Some(leaf(value)));
                }
                None => {
                    // a key without `=` carries no value at all: whatever an
                    // earlier pair stored under this key is dropped
                    debug!(key = %key, "pair without a value, removing key");
                    access::clear(root_map, &path);
                }
            }
        }
        Ok(())
    }
}

/// A value containing the array delimiter becomes an array leaf.
fn leaf(value: Cow<'_, str>) -> Value {
    if value.contains(ARRAY_DELIMITER) {
        Value::Array(value.split(ARRAY_DELIMITER).map(str::to_owned).collect())
    } else {
        Value::String(value.into_owned())
    }
}

#[cfg(test)]
mod test {
    use super::parse;
    use crate::Config;
    use crate::value::{Mapping, Value};

    use pretty_assertions::assert_eq;

    const DEFAULT_CONFIG: Config = Config {
        max_depth: 10,
        use_form_encoding: false,
    };
    const FORM_ENCODING_CONFIG: Config = Config {
        use_form_encoding: true,
        ..DEFAULT_CONFIG
    };

    fn mapping(value: Value) -> Mapping {
        value.into_map().unwrap()
    }

    #[test]
    fn parse_empty() {
        assert_eq!(parse(b"", DEFAULT_CONFIG).unwrap(), Mapping::new());
        assert_eq!(parse(b"?", DEFAULT_CONFIG).unwrap(), Mapping::new());
    }

    #[test]
    fn parse_flat() {
        let parsed = parse(b"abc=def", DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, mapping(Value::from_iter([("abc", "def")])));
    }

    #[test]
    fn parse_nested() {
        let parsed = parse(b"?a_b=355", DEFAULT_CONFIG).unwrap();
        assert_eq!(
            parsed,
            mapping(Value::from_iter([("a", Value::from_iter([("b", "355")]))]))
        );
    }

    #[test]
    fn parse_only_strips_one_question_mark() {
        let parsed = parse(b"??a=1", DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, mapping(Value::from_iter([("?a", "1")])));
    }

    #[test]
    fn parse_array() {
        let parsed = parse(b"tags=foo|bar&empty=|", DEFAULT_CONFIG).unwrap();
        assert_eq!(
            parsed,
            mapping(Value::from_iter([
                ("tags", ["foo", "bar"]),
                ("empty", ["", ""]),
            ]))
        );
    }

    #[test]
    fn parse_encoded_pipe_is_still_a_delimiter() {
        let parsed = parse(b"tags=foo%7Cbar", DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, mapping(Value::from_iter([("tags", ["foo", "bar"])])));
    }

    #[test]
    fn parse_empty_value() {
        let parsed = parse(b"abc=", DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, mapping(Value::from_iter([("abc", "")])));
    }

    #[test]
    fn parse_no_value() {
        let parsed = parse(b"abc", DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, Mapping::new());

        // removes an earlier value without touching siblings
        let parsed = parse(b"a_b=1&a_c=2&a_b", DEFAULT_CONFIG).unwrap();
        assert_eq!(
            parsed,
            mapping(Value::from_iter([("a", Value::from_iter([("c", "2")]))]))
        );
    }

    #[test]
    fn parse_skips_empty_pairs() {
        let parsed = parse(b"a=1&&b=2&", DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, mapping(Value::from_iter([("a", "1"), ("b", "2")])));
    }

    #[test]
    fn parse_empty_key() {
        let parsed = parse(b"=1", DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, mapping(Value::from_iter([("", "1")])));
    }

    #[test]
    fn parse_value_with_equals() {
        let parsed = parse(b"a=b=c", DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, mapping(Value::from_iter([("a", "b=c")])));
    }

    #[test]
    fn parse_last_wins() {
        let parsed = parse(b"a=1&a=2", DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, mapping(Value::from_iter([("a", "2")])));
    }

    #[test]
    fn parse_leaf_then_nested() {
        // a later nested key replaces an earlier leaf
        let parsed = parse(b"a=1&a_b=2", DEFAULT_CONFIG).unwrap();
        assert_eq!(
            parsed,
            mapping(Value::from_iter([("a", Value::from_iter([("b", "2")]))]))
        );

        // and a later leaf replaces an earlier subtree
        let parsed = parse(b"a_b=2&a=1", DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, mapping(Value::from_iter([("a", "1")])));
    }

    #[test]
    fn parse_encoded_separator_nests() {
        let parsed = parse(b"a%5Fb=1", DEFAULT_CONFIG).unwrap();
        assert_eq!(
            parsed,
            mapping(Value::from_iter([("a", Value::from_iter([("b", "1")]))]))
        );
    }

    #[test]
    fn parse_max_depth() {
        let parsed = parse(
            b"a_b_c_d_e=f",
            Config {
                max_depth: 2,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(
            parsed,
            mapping(Value::from_iter([(
                "a",
                Value::from_iter([("b", Value::from_iter([("c_d_e", "f")]))])
            )]))
        );
    }

    #[test]
    fn parse_plus() {
        let parsed = parse(b"q=a+b", DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, mapping(Value::from_iter([("q", "a+b")])));

        let parsed = parse(b"q=a+b", FORM_ENCODING_CONFIG).unwrap();
        assert_eq!(parsed, mapping(Value::from_iter([("q", "a b")])));
    }

    #[test]
    fn parse_invalid_utf8() {
        let err = parse(b"a=%FF", DEFAULT_CONFIG).unwrap_err();
        assert!(err.to_string().contains("invalid UTF-8"), "got: {}", err);
    }
}
