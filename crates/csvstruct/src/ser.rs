/*!
# Record Capture

Serde serializers that turn any `Serialize` value into a [`Record`].

Structs become structured records with their fields in declaration order, so
`#[serde(rename = "...")]` picks the column name and `#[serde(skip)]` keeps a
field out of the output. Maps become mapping records. `None` is the nil record.

Field values are captured without failing: a value of a kind that has no cell
representation is recorded as [`Value::Unsupported`] and only reported if its
field lands in a column.
*/

use crate::{
    errors::{EncodeError, EncodeResult},
    record::{Field, Record},
    value::Value,
};
use serde::ser::{
    Impossible, Serialize, SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant,
    SerializeTuple, SerializeTupleStruct, SerializeTupleVariant, Serializer,
};
use std::fmt::Display;

/// Capture `value` as a record. `Ok(None)` means the value was nil.
pub fn to_record<T: Serialize + ?Sized>(value: &T) -> EncodeResult<Option<Record>> {
    value.serialize(RecordSerializer)
}

// ================================================================================================
// Record level
// ================================================================================================

struct RecordSerializer;

fn unsupported_record(kind: &str) -> EncodeResult<Option<Record>> {
    Err(EncodeError::UnsupportedRecord(kind.to_string()))
}

impl Serializer for RecordSerializer {
    type Ok = Option<Record>;
    type Error = EncodeError;

    type SerializeSeq = Impossible<Option<Record>, EncodeError>;
    type SerializeTuple = Impossible<Option<Record>, EncodeError>;
    type SerializeTupleStruct = Impossible<Option<Record>, EncodeError>;
    type SerializeTupleVariant = Impossible<Option<Record>, EncodeError>;
    type SerializeMap = MapRecord;
    type SerializeStruct = StructRecord;
    type SerializeStructVariant = StructRecord;

    fn serialize_bool(self, _v: bool) -> EncodeResult<Self::Ok> {
        unsupported_record("bool")
    }

    fn serialize_i8(self, _v: i8) -> EncodeResult<Self::Ok> {
        unsupported_record("i8")
    }

    fn serialize_i16(self, _v: i16) -> EncodeResult<Self::Ok> {
        unsupported_record("i16")
    }

    fn serialize_i32(self, _v: i32) -> EncodeResult<Self::Ok> {
        unsupported_record("i32")
    }

    fn serialize_i64(self, _v: i64) -> EncodeResult<Self::Ok> {
        unsupported_record("i64")
    }

    fn serialize_i128(self, _v: i128) -> EncodeResult<Self::Ok> {
        unsupported_record("i128")
    }

    fn serialize_u8(self, _v: u8) -> EncodeResult<Self::Ok> {
        unsupported_record("u8")
    }

    fn serialize_u16(self, _v: u16) -> EncodeResult<Self::Ok> {
        unsupported_record("u16")
    }

    fn serialize_u32(self, _v: u32) -> EncodeResult<Self::Ok> {
        unsupported_record("u32")
    }

    fn serialize_u64(self, _v: u64) -> EncodeResult<Self::Ok> {
        unsupported_record("u64")
    }

    fn serialize_u128(self, _v: u128) -> EncodeResult<Self::Ok> {
        unsupported_record("u128")
    }

    fn serialize_f32(self, _v: f32) -> EncodeResult<Self::Ok> {
        unsupported_record("f32")
    }

    fn serialize_f64(self, _v: f64) -> EncodeResult<Self::Ok> {
        unsupported_record("f64")
    }

    fn serialize_char(self, _v: char) -> EncodeResult<Self::Ok> {
        unsupported_record("char")
    }

    fn serialize_str(self, _v: &str) -> EncodeResult<Self::Ok> {
        unsupported_record("string")
    }

    fn serialize_bytes(self, _v: &[u8]) -> EncodeResult<Self::Ok> {
        unsupported_record("bytes")
    }

    fn serialize_none(self) -> EncodeResult<Self::Ok> {
        Ok(None)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> EncodeResult<Self::Ok> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> EncodeResult<Self::Ok> {
        unsupported_record("unit")
    }

    fn serialize_unit_struct(self, _name: &'static str) -> EncodeResult<Self::Ok> {
        // A struct without fields; locks an empty schema.
        Ok(Some(Record::Structured(Vec::new())))
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> EncodeResult<Self::Ok> {
        unsupported_record(&format!("{}::{}", name, variant))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> EncodeResult<Self::Ok> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> EncodeResult<Self::Ok> {
        unsupported_record(&format!("{}::{}", name, variant))
    }

    fn serialize_seq(self, _len: Option<usize>) -> EncodeResult<Self::SerializeSeq> {
        Err(EncodeError::UnsupportedRecord("sequence".to_string()))
    }

    fn serialize_tuple(self, _len: usize) -> EncodeResult<Self::SerializeTuple> {
        Err(EncodeError::UnsupportedRecord("tuple".to_string()))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> EncodeResult<Self::SerializeTupleStruct> {
        Err(EncodeError::UnsupportedRecord(format!("tuple struct {}", name)))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> EncodeResult<Self::SerializeTupleVariant> {
        Err(EncodeError::UnsupportedRecord(format!(
            "tuple variant {}::{}",
            name, variant
        )))
    }

    fn serialize_map(self, len: Option<usize>) -> EncodeResult<Self::SerializeMap> {
        Ok(MapRecord {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> EncodeResult<Self::SerializeStruct> {
        Ok(StructRecord {
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        len: usize,
    ) -> EncodeResult<Self::SerializeStructVariant> {
        Ok(StructRecord {
            fields: Vec::with_capacity(len),
        })
    }
}

struct StructRecord {
    fields: Vec<Field>,
}

impl StructRecord {
    fn push<T: Serialize + ?Sized>(&mut self, key: &'static str, value: &T) -> EncodeResult<()> {
        self.fields.push(Field {
            name: key.to_string(),
            value: value.serialize(ValueSerializer)?,
        });
        Ok(())
    }
}

impl SerializeStruct for StructRecord {
    type Ok = Option<Record>;
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> EncodeResult<()> {
        self.push(key, value)
    }

    fn end(self) -> EncodeResult<Self::Ok> {
        Ok(Some(Record::Structured(self.fields)))
    }
}

impl SerializeStructVariant for StructRecord {
    type Ok = Option<Record>;
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> EncodeResult<()> {
        self.push(key, value)
    }

    fn end(self) -> EncodeResult<Self::Ok> {
        Ok(Some(Record::Structured(self.fields)))
    }
}

struct MapRecord {
    entries: Vec<(String, Value)>,
    pending_key: Option<String>,
}

impl SerializeMap for MapRecord {
    type Ok = Option<Record>;
    type Error = EncodeError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> EncodeResult<()> {
        let key = match key.serialize(ValueSerializer)? {
            Value::Text(s) | Value::Custom(s) => s,
            other => {
                return Err(EncodeError::UnsupportedRecord(format!(
                    "map with non-string key {:?}",
                    other
                )))
            }
        };
        self.pending_key = Some(key);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> EncodeResult<()> {
        let key = self.pending_key.take().ok_or_else(|| {
            EncodeError::Serialize("map value serialized before its key".to_string())
        })?;
        self.entries.push((key, value.serialize(ValueSerializer)?));
        Ok(())
    }

    fn end(self) -> EncodeResult<Self::Ok> {
        Ok(Some(Record::Mapping(self.entries)))
    }
}

// ================================================================================================
// Field level
// ================================================================================================

struct ValueSerializer;

impl Serializer for ValueSerializer {
    type Ok = Value;
    type Error = EncodeError;

    type SerializeSeq = UnsupportedCompound;
    type SerializeTuple = UnsupportedCompound;
    type SerializeTupleStruct = UnsupportedCompound;
    type SerializeTupleVariant = UnsupportedCompound;
    type SerializeMap = UnsupportedCompound;
    type SerializeStruct = UnsupportedCompound;
    type SerializeStructVariant = UnsupportedCompound;

    fn serialize_bool(self, v: bool) -> EncodeResult<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> EncodeResult<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> EncodeResult<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> EncodeResult<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> EncodeResult<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> EncodeResult<Value> {
        Ok(Value::Int(v))
    }

    fn serialize_u8(self, v: u8) -> EncodeResult<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> EncodeResult<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> EncodeResult<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> EncodeResult<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> EncodeResult<Value> {
        Ok(Value::Uint(v))
    }

    fn serialize_f32(self, v: f32) -> EncodeResult<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> EncodeResult<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> EncodeResult<Value> {
        Ok(Value::from(v))
    }

    fn serialize_str(self, v: &str) -> EncodeResult<Value> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, _v: &[u8]) -> EncodeResult<Value> {
        Ok(Value::Unsupported("bytes".to_string()))
    }

    fn serialize_none(self) -> EncodeResult<Value> {
        Ok(Value::Optional(None))
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> EncodeResult<Value> {
        Ok(Value::Optional(Some(Box::new(value.serialize(self)?))))
    }

    // JSON null and `()` both mean "nothing here".
    fn serialize_unit(self) -> EncodeResult<Value> {
        Ok(Value::Optional(None))
    }

    fn serialize_unit_struct(self, name: &'static str) -> EncodeResult<Value> {
        Ok(Value::Unsupported(name.to_string()))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> EncodeResult<Value> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> EncodeResult<Value> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> EncodeResult<Value> {
        Ok(Value::Unsupported(format!("{}::{}", name, variant)))
    }

    fn serialize_seq(self, _len: Option<usize>) -> EncodeResult<Self::SerializeSeq> {
        Ok(UnsupportedCompound::new("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> EncodeResult<Self::SerializeTuple> {
        Ok(UnsupportedCompound::new("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> EncodeResult<Self::SerializeTupleStruct> {
        Ok(UnsupportedCompound::new(name))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> EncodeResult<Self::SerializeTupleVariant> {
        Ok(UnsupportedCompound::new(&format!("{}::{}", name, variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> EncodeResult<Self::SerializeMap> {
        Ok(UnsupportedCompound::new("map"))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> EncodeResult<Self::SerializeStruct> {
        Ok(UnsupportedCompound::new(name))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> EncodeResult<Self::SerializeStructVariant> {
        Ok(UnsupportedCompound::new(&format!("{}::{}", name, variant)))
    }

    fn collect_str<T: Display + ?Sized>(self, value: &T) -> EncodeResult<Value> {
        Ok(Value::display(value))
    }
}

/// Swallows the elements of a nested compound value and yields
/// [`Value::Unsupported`] naming it.
struct UnsupportedCompound {
    kind: String,
}

impl UnsupportedCompound {
    fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
        }
    }

    fn finish(self) -> EncodeResult<Value> {
        Ok(Value::Unsupported(self.kind))
    }
}

impl SerializeSeq for UnsupportedCompound {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, _value: &T) -> EncodeResult<()> {
        Ok(())
    }

    fn end(self) -> EncodeResult<Value> {
        self.finish()
    }
}

impl SerializeTuple for UnsupportedCompound {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, _value: &T) -> EncodeResult<()> {
        Ok(())
    }

    fn end(self) -> EncodeResult<Value> {
        self.finish()
    }
}

impl SerializeTupleStruct for UnsupportedCompound {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, _value: &T) -> EncodeResult<()> {
        Ok(())
    }

    fn end(self) -> EncodeResult<Value> {
        self.finish()
    }
}

impl SerializeTupleVariant for UnsupportedCompound {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, _value: &T) -> EncodeResult<()> {
        Ok(())
    }

    fn end(self) -> EncodeResult<Value> {
        self.finish()
    }
}

impl SerializeMap for UnsupportedCompound {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, _key: &T) -> EncodeResult<()> {
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, _value: &T) -> EncodeResult<()> {
        Ok(())
    }

    fn end(self) -> EncodeResult<Value> {
        self.finish()
    }
}

impl SerializeStruct for UnsupportedCompound {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        _key: &'static str,
        _value: &T,
    ) -> EncodeResult<()> {
        Ok(())
    }

    fn end(self) -> EncodeResult<Value> {
        self.finish()
    }
}

impl SerializeStructVariant for UnsupportedCompound {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        _key: &'static str,
        _value: &T,
    ) -> EncodeResult<()> {
        Ok(())
    }

    fn end(self) -> EncodeResult<Value> {
        self.finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
