use std::collections::HashMap;

use serde::ser::{self, Impossible, Serialize};
use serde_json::Number;

use super::error::NormalizeError;
use super::timestamp::{Timestamp, TIMESTAMP_TOKEN};

/// JSON-compatible tree built from a handler result, with timestamps still
/// tagged so they can be localized in one pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Node>),
    /// Keys keep declaration order.
    Object(Vec<(String, Node)>),
    Timestamp(Timestamp),
}

impl Node {
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Node, NormalizeError> {
        value.serialize(NodeSerializer)
    }
}

/// Serializer producing a [`Node`]. Mirrors `serde_json::value::Serializer`
/// except that `Timestamp` survives as its own variant.
pub struct NodeSerializer;

impl ser::Serializer for NodeSerializer {
    type Ok = Node;
    type Error = NormalizeError;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Node, NormalizeError> {
        Ok(Node::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Node, NormalizeError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Node, NormalizeError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Node, NormalizeError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Node, NormalizeError> {
        Ok(Node::Number(v.into()))
    }

    fn serialize_i128(self, v: i128) -> Result<Node, NormalizeError> {
        if let Ok(v) = i64::try_from(v) {
            Ok(Node::Number(v.into()))
        } else if let Ok(v) = u64::try_from(v) {
            Ok(Node::Number(v.into()))
        } else {
            Err(NormalizeError::NumberOutOfRange(v.to_string()))
        }
    }

    fn serialize_u8(self, v: u8) -> Result<Node, NormalizeError> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Node, NormalizeError> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Node, NormalizeError> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Node, NormalizeError> {
        Ok(Node::Number(v.into()))
    }

    fn serialize_u128(self, v: u128) -> Result<Node, NormalizeError> {
        u64::try_from(v)
            .map(|v| Node::Number(v.into()))
            .map_err(|_| NormalizeError::NumberOutOfRange(v.to_string()))
    }

    fn serialize_f32(self, v: f32) -> Result<Node, NormalizeError> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Node, NormalizeError> {
        Number::from_f64(v)
            .map(Node::Number)
            .ok_or(NormalizeError::NonFiniteFloat(v))
    }

    fn serialize_char(self, v: char) -> Result<Node, NormalizeError> {
        Ok(Node::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Node, NormalizeError> {
        Ok(Node::String(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Node, NormalizeError> {
        Ok(Node::Array(v.iter().map(|b| Node::Number((*b).into())).collect()))
    }

    fn serialize_none(self) -> Result<Node, NormalizeError> {
        Ok(Node::Null)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Node, NormalizeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Node, NormalizeError> {
        Ok(Node::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Node, NormalizeError> {
        Ok(Node::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<Node, NormalizeError> {
        Ok(Node::String(variant.to_owned()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<Node, NormalizeError> {
        let inner = value.serialize(self)?;
        if name != TIMESTAMP_TOKEN {
            return Ok(inner);
        }
        // Unparseable timestamp payloads stay as plain strings.
        Ok(match inner {
            Node::String(raw) => match Timestamp::parse(&raw) {
                Some(ts) => Node::Timestamp(ts),
                None => Node::String(raw),
            },
            other => other,
        })
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Node, NormalizeError> {
        Ok(Node::Object(vec![(variant.to_owned(), value.serialize(self)?)]))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec, NormalizeError> {
        Ok(SerializeVec { items: Vec::with_capacity(len.unwrap_or(0)) })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec, NormalizeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeVec, NormalizeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant, NormalizeError> {
        Ok(SerializeTupleVariant {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap, NormalizeError> {
        let len = len.unwrap_or(0);
        Ok(SerializeMap {
            entries: Vec::with_capacity(len),
            positions: HashMap::with_capacity(len),
            next_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeMap, NormalizeError> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant, NormalizeError> {
        Ok(SerializeStructVariant {
            variant,
            entries: Vec::with_capacity(len),
        })
    }
}

pub struct SerializeVec {
    items: Vec<Node>,
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Node;
    type Error = NormalizeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), NormalizeError> {
        self.items.push(value.serialize(NodeSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Node, NormalizeError> {
        Ok(Node::Array(self.items))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Node;
    type Error = NormalizeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), NormalizeError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Node, NormalizeError> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Node;
    type Error = NormalizeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), NormalizeError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Node, NormalizeError> {
        ser::SerializeSeq::end(self)
    }
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    items: Vec<Node>,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Node;
    type Error = NormalizeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), NormalizeError> {
        self.items.push(value.serialize(NodeSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Node, NormalizeError> {
        Ok(Node::Object(vec![(self.variant.to_owned(), Node::Array(self.items))]))
    }
}

pub struct SerializeMap {
    entries: Vec<(String, Node)>,
    /// Index into `entries` by key.
    positions: HashMap<String, usize>,
    next_key: Option<String>,
}

impl SerializeMap {
    fn insert(&mut self, key: String, value: Node) {
        // Later duplicates win in place, as a JSON object would keep them.
        match self.positions.get(&key) {
            Some(&at) => self.entries[at].1 = value,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Node;
    type Error = NormalizeError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), NormalizeError> {
        self.next_key = Some(key.serialize(MapKeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), NormalizeError> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| NormalizeError::Custom("map value serialized before its key".into()))?;
        let value = value.serialize(NodeSerializer)?;
        self.insert(key, value);
        Ok(())
    }

    fn end(self) -> Result<Node, NormalizeError> {
        Ok(Node::Object(self.entries))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Node;
    type Error = NormalizeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), NormalizeError> {
        let value = value.serialize(NodeSerializer)?;
        self.insert(key.to_owned(), value);
        Ok(())
    }

    fn end(self) -> Result<Node, NormalizeError> {
        Ok(Node::Object(self.entries))
    }
}

pub struct SerializeStructVariant {
    variant: &'static str,
    entries: Vec<(String, Node)>,
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Node;
    type Error = NormalizeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), NormalizeError> {
        self.entries.push((key.to_owned(), value.serialize(NodeSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Node, NormalizeError> {
        Ok(Node::Object(vec![(self.variant.to_owned(), Node::Object(self.entries))]))
    }
}

/// Object keys must end up as strings; numbers, chars and bools are
/// stringified the way `serde_json` does it.
struct MapKeySerializer;

fn key_must_be_a_string(kind: &'static str) -> NormalizeError {
    NormalizeError::KeyMustBeString(kind)
}

impl ser::Serializer for MapKeySerializer {
    type Ok = String;
    type Error = NormalizeError;

    type SerializeSeq = Impossible<String, NormalizeError>;
    type SerializeTuple = Impossible<String, NormalizeError>;
    type SerializeTupleStruct = Impossible<String, NormalizeError>;
    type SerializeTupleVariant = Impossible<String, NormalizeError>;
    type SerializeMap = Impossible<String, NormalizeError>;
    type SerializeStruct = Impossible<String, NormalizeError>;
    type SerializeStructVariant = Impossible<String, NormalizeError>;

    fn serialize_bool(self, v: bool) -> Result<String, NormalizeError> {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String, NormalizeError> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String, NormalizeError> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String, NormalizeError> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String, NormalizeError> {
        Ok(v.to_string())
    }

    fn serialize_i128(self, v: i128) -> Result<String, NormalizeError> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String, NormalizeError> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String, NormalizeError> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String, NormalizeError> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String, NormalizeError> {
        Ok(v.to_string())
    }

    fn serialize_u128(self, v: u128) -> Result<String, NormalizeError> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, _v: f32) -> Result<String, NormalizeError> {
        Err(key_must_be_a_string("f32"))
    }

    fn serialize_f64(self, _v: f64) -> Result<String, NormalizeError> {
        Err(key_must_be_a_string("f64"))
    }

    fn serialize_char(self, v: char) -> Result<String, NormalizeError> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String, NormalizeError> {
        Ok(v.to_owned())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String, NormalizeError> {
        Err(key_must_be_a_string("bytes"))
    }

    fn serialize_none(self) -> Result<String, NormalizeError> {
        Err(key_must_be_a_string("none"))
    }

    fn serialize_some<T: Serialize + ?Sized>(self, _value: &T) -> Result<String, NormalizeError> {
        Err(key_must_be_a_string("option"))
    }

    fn serialize_unit(self) -> Result<String, NormalizeError> {
        Err(key_must_be_a_string("unit"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String, NormalizeError> {
        Err(key_must_be_a_string("unit struct"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<String, NormalizeError> {
        Ok(variant.to_owned())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, NormalizeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String, NormalizeError> {
        Err(key_must_be_a_string("newtype variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, NormalizeError> {
        Err(key_must_be_a_string("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, NormalizeError> {
        Err(key_must_be_a_string("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, NormalizeError> {
        Err(key_must_be_a_string("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, NormalizeError> {
        Err(key_must_be_a_string("tuple variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, NormalizeError> {
        Err(key_must_be_a_string("map"))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, NormalizeError> {
        Err(key_must_be_a_string("struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, NormalizeError> {
        Err(key_must_be_a_string("struct variant"))
    }
}
