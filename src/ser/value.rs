use serde::ser::{self, Serialize};

use crate::error::{Error, Result};
use crate::value::{Mapping, Value};

use super::key::KeySerializer;

/// Converts any `Serialize` type into a [`Value`].
///
/// The output is `None` when there is nothing to write: `Option::None`, and
/// structs or maps without a single present field. Such entries are left out
/// of their parent mapping entirely, which is also how they read back from a
/// querystring.
///
/// Sequences may only contain leaves. A sequence of structs, or of other
/// sequences, has no wire representation and is an error.
#[derive(Clone, Copy, Debug)]
pub struct ValueSerializer;

macro_rules! serialize_itoa {
    ($($ty:ty => $meth:ident,)*) => {
        $(
            fn $meth(self, v: $ty) -> Result<Self::Ok> {
                let mut buffer = itoa::Buffer::new();
                Ok(Some(Value::String(buffer.format(v).to_owned())))
            }
        )*
    };
}

macro_rules! serialize_ryu {
    ($($ty:ty => $meth:ident,)*) => {
        $(
            fn $meth(self, v: $ty) -> Result<Self::Ok> {
                let mut buffer = ryu::Buffer::new();
                Ok(Some(Value::String(buffer.format(v).to_owned())))
            }
        )*
    };
}

impl ser::Serializer for ValueSerializer {
    type Ok = Option<Value>;
    type Error = Error;
    type SerializeSeq = ArraySerializer;
    type SerializeTuple = ArraySerializer;
    type SerializeTupleStruct = ArraySerializer;
    type SerializeTupleVariant = ArraySerializer;
    type SerializeMap = MappingSerializer;
    type SerializeStruct = MappingSerializer;
    type SerializeStructVariant = MappingSerializer;

    serialize_itoa! {
        u8  => serialize_u8,
        u16 => serialize_u16,
        u32 => serialize_u32,
        u64 => serialize_u64,
        i8  => serialize_i8,
        i16 => serialize_i16,
        i32 => serialize_i32,
        i64 => serialize_i64,
    }
    serialize_ryu! {
        f32 => serialize_f32,
        f64 => serialize_f64,
    }

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        Ok(Some(Value::from(std::str::from_utf8(v)?)))
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Self::Ok> {
        value.serialize(self)
    }

    /// Written as `key=`.
    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(Some(Value::String(String::new())))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        Ok(Some(Value::from(variant)))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok> {
        Ok(value
            .serialize(self)?
            .map(|inner| Value::Map(Mapping::from_iter([(variant.to_owned(), inner)]))))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(ArraySerializer::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        Ok(ArraySerializer::new(len, None))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Ok(ArraySerializer::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(ArraySerializer::new(len, Some(variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(MappingSerializer::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(MappingSerializer::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(MappingSerializer::new(Some(variant)))
    }
}

/// Wraps `value` as `{variant: value}` when serializing an enum variant.
fn wrap_variant(variant: Option<&'static str>, value: Value) -> Value {
    match variant {
        Some(variant) => Value::Map(Mapping::from_iter([(variant.to_owned(), value)])),
        None => value,
    }
}

#[doc(hidden)]
pub struct ArraySerializer {
    items: Vec<String>,
    variant: Option<&'static str>,
}

impl ArraySerializer {
    fn new(len: usize, variant: Option<&'static str>) -> Self {
        Self {
            items: Vec::with_capacity(len),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        match value.serialize(ValueSerializer)? {
            Some(Value::String(s)) => {
                self.items.push(s);
                Ok(())
            }
            None => Ok(()),
            Some(_) => Err(Error::Unsupported(
                "sequences may only contain strings, numbers and booleans",
            )),
        }
    }

    fn finish(self) -> Result<Option<Value>> {
        Ok(Some(wrap_variant(self.variant, Value::Array(self.items))))
    }
}

impl ser::SerializeSeq for ArraySerializer {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeTuple for ArraySerializer {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for ArraySerializer {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for ArraySerializer {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

#[doc(hidden)]
pub struct MappingSerializer {
    map: Mapping,
    next_key: Option<String>,
    variant: Option<&'static str>,
}

impl MappingSerializer {
    fn new(variant: Option<&'static str>) -> Self {
        Self {
            map: Mapping::new(),
            next_key: None,
            variant,
        }
    }

    fn insert<T: ?Sized + Serialize>(&mut self, key: String, value: &T) -> Result<()> {
        if let Some(value) = value.serialize(ValueSerializer)? {
            self.map.insert(key, value);
        }
        Ok(())
    }

    fn finish(self) -> Result<Option<Value>> {
        if self.map.is_empty() {
            return Ok(None);
        }
        Ok(Some(wrap_variant(self.variant, Value::Map(self.map))))
    }
}

impl ser::SerializeMap for MappingSerializer {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        self.next_key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let Some(key) = self.next_key.take() else {
            return Err(Error::Custom("internal error: value without a key".to_string()));
        };
        self.insert(key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeStruct for MappingSerializer {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.insert(key.to_owned(), value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for MappingSerializer {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.insert(key.to_owned(), value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}
