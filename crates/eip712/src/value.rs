//! Field values.

use std::collections::BTreeMap;

use ethers_core::types::{I256, U256};
use primitives_ethereum::EthereumAddress;
use serde_json::{Map, Value as JsonValue};

use crate::{
    primitive::{self, PrimitiveType},
    Error, FieldDef, Types, ValueError,
};

/// A struct value: field values by field name.
pub type Struct = BTreeMap<String, Value>;

/// A field value.
///
/// The variant must match the declared type of the field it is assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A `string` value.
    String(String),
    /// A `bytes` value.
    Bytes(Vec<u8>),
    /// A `uint8` to `uint256` value.
    Uint(U256),
    /// An `int8` to `int256` value.
    Int(I256),
    /// An `address` value.
    Address(EthereumAddress),
    /// A `bool` value.
    Bool(bool),
    /// A `bytes1` to `bytes32` value.
    FixedBytes(Vec<u8>),
    /// A nested struct value.
    Struct(Struct),
    /// An array value. Arrays can be loaded but not encoded.
    Array(Vec<Value>),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Uint(value.into())
    }
}

impl From<U256> for Value {
    fn from(value: U256) -> Self {
        Self::Uint(value)
    }
}

impl From<I256> for Value {
    fn from(value: I256) -> Self {
        Self::Int(value)
    }
}

impl From<EthereumAddress> for Value {
    fn from(value: EthereumAddress) -> Self {
        Self::Address(value)
    }
}

impl From<Struct> for Value {
    fn from(value: Struct) -> Self {
        Self::Struct(value)
    }
}

/// Convert an untyped JSON object into a [`Struct`] of the given type.
///
/// Members that the type does not declare are dropped, missing members are left out
/// and reported by the encoder.
pub(crate) fn struct_from_json(
    types: &Types,
    type_name: &str,
    object: &Map<String, JsonValue>,
) -> Result<Struct, Error> {
    JsonLoader { types }.load_struct(type_name, object, 0)
}

/// Walks the JSON document along the declared types.
struct JsonLoader<'a> {
    /// The schema.
    types: &'a Types,
}

impl<'a> JsonLoader<'a> {
    /// Load a struct value.
    fn load_struct(
        &self,
        type_name: &str,
        object: &Map<String, JsonValue>,
        depth: usize,
    ) -> Result<Struct, Error> {
        let fields = self
            .types
            .get(type_name)
            .ok_or_else(|| Error::UnknownRootType(type_name.to_owned()))?;

        let mut values = Struct::new();
        for field in fields {
            let Some(json) = object.get(&field.name) else {
                continue;
            };
            let value = self.load_value(type_name, field, &field.ty, json, depth)?;
            values.insert(field.name.clone(), value);
        }
        Ok(values)
    }

    /// Load the value of a field, or of an element of an array field.
    fn load_value(
        &self,
        owner: &str,
        field: &FieldDef,
        ty: &str,
        json: &JsonValue,
        depth: usize,
    ) -> Result<Value, Error> {
        let malformed = |reason| Error::malformed(owner, &field.name, depth, reason);

        match ty {
            "string" => json
                .as_str()
                .map(|s| Value::String(s.to_owned()))
                .ok_or_else(|| malformed(ValueError::TypeMismatch { expected: "string" })),
            "bytes" => primitive::bytes_from_json(json)
                .map(Value::Bytes)
                .map_err(malformed),
            _ if self.types.contains_key(ty) => {
                let object = json
                    .as_object()
                    .ok_or_else(|| malformed(ValueError::TypeMismatch { expected: "object" }))?;
                self.load_struct(ty, object, depth + 1).map(Value::Struct)
            }
            _ if ty.ends_with(']') => {
                let element_ty = array_element_type(ty);
                let items = json
                    .as_array()
                    .ok_or_else(|| malformed(ValueError::TypeMismatch { expected: "array" }))?;
                items
                    .iter()
                    .map(|item| self.load_value(owner, field, element_ty, item, depth))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
            _ => match PrimitiveType::parse(ty) {
                Some(primitive) => primitive.value_from_json(json).map_err(malformed),
                None => Err(Error::UnknownFieldType {
                    type_name: owner.to_owned(),
                    field: field.name.clone(),
                    field_type: ty.to_owned(),
                    depth,
                }),
            },
        }
    }
}

/// Strip the last `[...]` suffix off an array type.
fn array_element_type(ty: &str) -> &str {
    match ty.rfind('[') {
        Some(idx) => &ty[..idx],
        None => ty,
    }
}
