// Serializer lowering values into a `serde_json::Value` tree.
//
// Floats (including NaN and infinities) fail at the point they are
// serialized, with the JSON path of the offending value. Map keys must
// lower to strings or integers.

use serde::ser::{self, Serialize};
use serde_json::{Map, Value};

use super::error::{HashError, HashResult};

pub(crate) fn to_value<T>(value: &T) -> HashResult<Value>
where
    T: Serialize + ?Sized,
{
    value.serialize(ValueSerializer { path: "$".to_string() })
}

struct ValueSerializer {
    path: String,
}

fn serialize_at<T>(value: &T, path: String) -> HashResult<Value>
where
    T: Serialize + ?Sized,
{
    value.serialize(ValueSerializer { path })
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = HashError;

    type SerializeSeq = SeqSerializer;
    type SerializeTuple = SeqSerializer;
    type SerializeTupleStruct = SeqSerializer;
    type SerializeTupleVariant = VariantSerializer<SeqSerializer>;
    type SerializeMap = MapSerializer;
    type SerializeStruct = MapSerializer;
    type SerializeStructVariant = VariantSerializer<MapSerializer>;

    fn serialize_bool(self, v: bool) -> HashResult<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> HashResult<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> HashResult<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> HashResult<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> HashResult<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> HashResult<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> HashResult<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> HashResult<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> HashResult<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f32(self, _v: f32) -> HashResult<Value> {
        Err(HashError::float_at(&self.path))
    }

    fn serialize_f64(self, _v: f64) -> HashResult<Value> {
        Err(HashError::float_at(&self.path))
    }

    fn serialize_char(self, v: char) -> HashResult<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> HashResult<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> HashResult<Value> {
        Ok(Value::Array(v.iter().copied().map(Value::from).collect()))
    }

    fn serialize_none(self) -> HashResult<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> HashResult<Value>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> HashResult<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> HashResult<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> HashResult<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> HashResult<Value>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> HashResult<Value>
    where
        T: Serialize + ?Sized,
    {
        let inner = serialize_at(value, format!("{}.{variant}", self.path))?;
        let mut fields = Map::new();
        fields.insert(variant.to_string(), inner);
        Ok(Value::Object(fields))
    }

    fn serialize_seq(self, len: Option<usize>) -> HashResult<SeqSerializer> {
        Ok(SeqSerializer { path: self.path, items: Vec::with_capacity(len.unwrap_or(0)) })
    }

    fn serialize_tuple(self, len: usize) -> HashResult<SeqSerializer> {
        ser::Serializer::serialize_seq(self, Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> HashResult<SeqSerializer> {
        ser::Serializer::serialize_seq(self, Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> HashResult<VariantSerializer<SeqSerializer>> {
        let path = format!("{}.{variant}", self.path);
        Ok(VariantSerializer {
            variant,
            inner: SeqSerializer { path, items: Vec::with_capacity(len) },
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> HashResult<MapSerializer> {
        Ok(MapSerializer { path: self.path, fields: Map::new(), next_key: None })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> HashResult<MapSerializer> {
        ser::Serializer::serialize_map(self, Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> HashResult<VariantSerializer<MapSerializer>> {
        let path = format!("{}.{variant}", self.path);
        Ok(VariantSerializer {
            variant,
            inner: MapSerializer { path, fields: Map::new(), next_key: None },
        })
    }
}

struct SeqSerializer {
    path: String,
    items: Vec<Value>,
}

impl SeqSerializer {
    fn push<T>(&mut self, value: &T) -> HashResult<()>
    where
        T: Serialize + ?Sized,
    {
        let path = format!("{}[{}]", self.path, self.items.len());
        self.items.push(serialize_at(value, path)?);
        Ok(())
    }
}

impl ser::SerializeSeq for SeqSerializer {
    type Ok = Value;
    type Error = HashError;

    fn serialize_element<T>(&mut self, value: &T) -> HashResult<()>
    where
        T: Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> HashResult<Value> {
        Ok(Value::Array(self.items))
    }
}

impl ser::SerializeTuple for SeqSerializer {
    type Ok = Value;
    type Error = HashError;

    fn serialize_element<T>(&mut self, value: &T) -> HashResult<()>
    where
        T: Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> HashResult<Value> {
        Ok(Value::Array(self.items))
    }
}

impl ser::SerializeTupleStruct for SeqSerializer {
    type Ok = Value;
    type Error = HashError;

    fn serialize_field<T>(&mut self, value: &T) -> HashResult<()>
    where
        T: Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> HashResult<Value> {
        Ok(Value::Array(self.items))
    }
}

struct MapSerializer {
    path: String,
    fields: Map<String, Value>,
    next_key: Option<String>,
}

impl MapSerializer {
    fn insert<T>(&mut self, key: String, value: &T) -> HashResult<()>
    where
        T: Serialize + ?Sized,
    {
        let inner = serialize_at(value, format!("{}.{key}", self.path))?;
        self.fields.insert(key, inner);
        Ok(())
    }
}

impl ser::SerializeMap for MapSerializer {
    type Ok = Value;
    type Error = HashError;

    fn serialize_key<T>(&mut self, key: &T) -> HashResult<()>
    where
        T: Serialize + ?Sized,
    {
        let key = match serialize_at(key, self.path.clone())? {
            Value::String(key) => key,
            Value::Number(number) => number.to_string(),
            _ => return Err(HashError::Serialization("key must be a string".to_string())),
        };
        self.next_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> HashResult<()>
    where
        T: Serialize + ?Sized,
    {
        let key = self.next_key.take().ok_or_else(|| {
            HashError::Serialization("map value serialized before its key".to_string())
        })?;
        self.insert(key, value)
    }

    fn end(self) -> HashResult<Value> {
        Ok(Value::Object(self.fields))
    }
}

impl ser::SerializeStruct for MapSerializer {
    type Ok = Value;
    type Error = HashError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> HashResult<()>
    where
        T: Serialize + ?Sized,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> HashResult<Value> {
        Ok(Value::Object(self.fields))
    }
}

/// Wraps the payload of a tuple or struct variant as `{variant: payload}`.
struct VariantSerializer<S> {
    variant: &'static str,
    inner: S,
}

impl<S> VariantSerializer<S> {
    fn wrap(variant: &'static str, payload: Value) -> Value {
        let mut fields = Map::new();
        fields.insert(variant.to_string(), payload);
        Value::Object(fields)
    }
}

impl ser::SerializeTupleVariant for VariantSerializer<SeqSerializer> {
    type Ok = Value;
    type Error = HashError;

    fn serialize_field<T>(&mut self, value: &T) -> HashResult<()>
    where
        T: Serialize + ?Sized,
    {
        self.inner.push(value)
    }

    fn end(self) -> HashResult<Value> {
        Ok(Self::wrap(self.variant, Value::Array(self.inner.items)))
    }
}

impl ser::SerializeStructVariant for VariantSerializer<MapSerializer> {
    type Ok = Value;
    type Error = HashError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> HashResult<()>
    where
        T: Serialize + ?Sized,
    {
        self.inner.insert(key.to_string(), value)
    }

    fn end(self) -> HashResult<Value> {
        Ok(Self::wrap(self.variant, Value::Object(self.inner.fields)))
    }
}
