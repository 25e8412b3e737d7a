//! Typed reads out of a nested mapping.
//!
//! `ValueDeserializer` drives any `Deserialize` type from an owned [`Value`]:
//! mappings become maps/structs, arrays become sequences, and string leaves
//! go through `StringParsingDeserializer` so that numbers and booleans can be
//! read back out of their string form.

use serde::de::{self, Deserializer as _, IntoDeserializer, Unexpected, value::SeqDeserializer};

use crate::error::{Error, Result};
use crate::map::IntoIter;
use crate::value::{Mapping, Value};

use super::string_parser::StringParsingDeserializer;

pub struct ValueDeserializer(Value);

impl ValueDeserializer {
    pub fn new(value: Value) -> Self {
        ValueDeserializer(value)
    }

    fn unexpected(&self) -> Unexpected<'_> {
        match &self.0 {
            Value::Map(_) => Unexpected::Map,
            Value::Array(_) => Unexpected::Seq,
            Value::String(s) => Unexpected::Str(s),
        }
    }
}

impl<'de> IntoDeserializer<'de, Error> for ValueDeserializer {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self::Deserializer {
        self
    }
}

fn array_deserializer(
    items: Vec<String>,
) -> SeqDeserializer<impl Iterator<Item = StringParsingDeserializer<'static>>, Error> {
    SeqDeserializer::new(items.into_iter().map(StringParsingDeserializer::new))
}

macro_rules! forward_to_leaf {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                match self.0 {
                    Value::String(s) => StringParsingDeserializer::new(s).$method(visitor),
                    other => ValueDeserializer(other).deserialize_any(visitor),
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.0 {
            Value::Map(map) => visitor.visit_map(MapDeserializer::new(map)),
            Value::Array(items) => visitor.visit_seq(array_deserializer(items)),
            Value::String(s) => visitor.visit_string(s),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.0 {
            Value::String(s) => StringParsingDeserializer::new(s).deserialize_option(visitor),
            other => visitor.visit_some(ValueDeserializer(other)),
        }
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.0 {
            Value::Array(items) => visitor.visit_seq(array_deserializer(items)),
            Value::String(s) => StringParsingDeserializer::new(s).deserialize_seq(visitor),
            Value::Map(_) => Err(de::Error::invalid_type(self.unexpected(), &visitor)),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    /// Unit variants come from a string leaf (`sort=asc`); other variants
    /// from a mapping with a single key naming the variant
    /// (`sort_by=price`).
    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.0 {
            Value::String(s) => {
                StringParsingDeserializer::new(s).deserialize_enum(name, variants, visitor)
            }
            Value::Map(map) => visitor.visit_enum(MapDeserializer::new(map)),
            Value::Array(_) => Err(de::Error::invalid_type(self.unexpected(), &visitor)),
        }
    }

    forward_to_leaf! {
        deserialize_bool
        deserialize_i8
        deserialize_i16
        deserialize_i32
        deserialize_i64
        deserialize_u8
        deserialize_u16
        deserialize_u32
        deserialize_u64
        deserialize_f32
        deserialize_f64
        deserialize_char
        deserialize_str
        deserialize_string
        deserialize_bytes
        deserialize_byte_buf
        deserialize_unit
        deserialize_identifier
    }

    serde::forward_to_deserialize_any! {
        map struct ignored_any
    }
}

/// Visits the entries of a mapping.
pub struct MapDeserializer {
    iter: IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    pub fn new(map: Mapping) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        if let Some((key, value)) = self.iter.next() {
            self.value = Some(value);
            return seed.deserialize(StringParsingDeserializer::new(key)).map(Some);
        };
        Ok(None)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        if let Some(v) = self.value.take() {
            seed.deserialize(ValueDeserializer(v))
        } else {
            Err(de::Error::custom(
                "Somehow the map was empty after a non-empty key was returned",
            ))
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

impl<'de> de::EnumAccess<'de> for MapDeserializer {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<V>(mut self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        if let Some((key, value)) = self.iter.next() {
            self.value = Some(value);
            Ok((seed.deserialize(StringParsingDeserializer::new(key))?, self))
        } else {
            Err(de::Error::custom("No more values"))
        }
    }
}

impl<'de> de::VariantAccess<'de> for MapDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        Ok(())
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        if let Some(value) = self.value {
            seed.deserialize(ValueDeserializer(value))
        } else {
            Err(de::Error::custom("no value to deserialize"))
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if let Some(value) = self.value {
            de::Deserializer::deserialize_seq(ValueDeserializer(value), visitor)
        } else {
            Err(de::Error::custom("no value to deserialize"))
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if let Some(value) = self.value {
            de::Deserializer::deserialize_map(ValueDeserializer(value), visitor)
        } else {
            Err(de::Error::custom("no value to deserialize"))
        }
    }
}
