//! The nested mapping and its node type.

use std::fmt;

use crate::map::Map;

/// A nested mapping: string keys to [`Value`] nodes.
pub type Mapping = Map<String, Value>;

/// A single node of a nested mapping.
///
/// Leaves are either a single string or an ordered list of strings. There is
/// no "absent" variant: a missing key is simply not present in its parent
/// mapping, and APIs that may not find a node return `Option<&Value>`.
///
/// Numbers and booleans only exist on the way in: `Value::from(5)` is the
/// string leaf `"5"`. Getting typed values back out is the job of a
/// [`Schema`](crate::Schema) or [`SearchParams::get_as`](crate::SearchParams::get_as).
#[derive(Clone, PartialEq, Eq)]
pub enum Value {
    Map(Mapping),
    String(String),
    Array(Vec<String>),
}

impl Value {
    /// Returns an empty mapping node.
    pub fn new_map() -> Self {
        Value::Map(Mapping::new())
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_map()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn into_map(self) -> Option<Mapping> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns this node as a mapping, first replacing it with an empty
    /// mapping if it is currently a leaf.
    ///
    /// Any leaf content is discarded.
    pub fn coerce_map(&mut self) -> &mut Mapping {
        if !self.is_map() {
            *self = Value::new_map();
        }
        match self {
            Value::Map(map) => map,
            _ => unreachable!(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Map(m) => f.debug_map().entries(m.iter()).finish(),
            Value::Array(items) => f.debug_list().entries(items.iter()).finish(),
            Value::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Map(map)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::String(if b { "true" } else { "false" }.to_owned())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::String(c.to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::Array(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::Array(items.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Value {
    fn from(items: [&str; N]) -> Self {
        Value::Array(items.into_iter().map(str::to_owned).collect())
    }
}

macro_rules! from_itoa {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    let mut buffer = itoa::Buffer::new();
                    Value::String(buffer.format(v).to_owned())
                }
            }
        )*
    };
}

macro_rules! from_ryu {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    let mut buffer = ryu::Buffer::new();
                    Value::String(buffer.format(v).to_owned())
                }
            }
        )*
    };
}

from_itoa! { u8 u16 u32 u64 usize i8 i16 i32 i64 isize }
from_ryu! { f32 f64 }

/// Builds a mapping node from key/value pairs.
///
/// ```
/// use structured_qs::Value;
///
/// let filters = Value::from_iter([("toyline", "355")]);
/// assert_eq!(filters.as_map().unwrap()["toyline"], Value::from("355"));
/// ```
impl<K, V> FromIterator<(K, V)> for Value
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod test {
    use super::{Mapping, Value};

    use pretty_assertions::assert_eq;

    #[test]
    fn numbers_become_strings() {
        assert_eq!(Value::from(5), Value::from("5"));
        assert_eq!(Value::from(-12i64), Value::from("-12"));
        assert_eq!(Value::from(1.5f64), Value::from("1.5"));
        assert_eq!(Value::from(true), Value::from("true"));
    }

    #[test]
    fn coerce_map_replaces_leaf() {
        let mut value = Value::from(["a", "b"]);
        value.coerce_map().insert("x".to_owned(), "1".into());
        assert_eq!(value, Value::from_iter([("x", "1")]));
    }

    #[test]
    fn coerce_map_keeps_existing_map() {
        let mut value = Value::from_iter([("x", "1")]);
        value.coerce_map().insert("y".to_owned(), "2".into());
        assert_eq!(value.as_map().map(Mapping::len), Some(2));
    }
}
