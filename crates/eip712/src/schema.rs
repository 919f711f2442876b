//! Type schema and typed data containers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{value, Error, Struct};

/// The reserved name of the domain struct type.
pub const EIP712_DOMAIN_TYPE: &str = "EIP712Domain";

/// A single member of a struct type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// The member name.
    pub name: String,
    /// The member type, either a primitive (`uint256`, `string`, ...) or a struct name.
    #[serde(rename = "type")]
    pub ty: String,
}

impl FieldDef {
    /// Create a new [`FieldDef`].
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Struct type declarations by type name.
///
/// The member order of every declaration is a part of the encoding.
pub type Types = BTreeMap<String, Vec<FieldDef>>;

/// Typed data that is yet to be populated with the domain and the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDataSchema {
    /// The struct type declarations, including `EIP712Domain`.
    pub types: Types,
    /// The type of the message.
    pub primary_type: String,
}

impl TypedDataSchema {
    /// Create a new [`TypedDataSchema`].
    pub fn new(types: Types, primary_type: impl Into<String>) -> Self {
        Self {
            types,
            primary_type: primary_type.into(),
        }
    }

    /// Read the `types` and `primaryType` of a typed data JSON document.
    ///
    /// Other members of the document are ignored.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Attach the domain and the message.
    pub fn initialize(self, domain: Struct, message: Struct) -> TypedData {
        TypedData {
            schema: self,
            domain,
            message,
        }
    }
}

/// Typed data ready to be hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedData {
    /// The types and the primary type.
    pub schema: TypedDataSchema,
    /// The `EIP712Domain` value.
    pub domain: Struct,
    /// The `primaryType` value.
    pub message: Struct,
}

impl TypedData {
    /// The struct type declarations.
    pub fn types(&self) -> &Types {
        &self.schema.types
    }

    /// The type of the message.
    pub fn primary_type(&self) -> &str {
        &self.schema.primary_type
    }

    /// Load a typed data JSON document, the same one `eth_signTypedData_v4` accepts.
    ///
    /// The `domain` and `message` members are converted according to the declared types.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let raw: RawTypedData = serde_json::from_str(json)?;
        let domain = value::struct_from_json(&raw.types, EIP712_DOMAIN_TYPE, &raw.domain)?;
        let message = value::struct_from_json(&raw.types, &raw.primary_type, &raw.message)?;
        Ok(TypedDataSchema::new(raw.types, raw.primary_type).initialize(domain, message))
    }
}

/// The JSON layout of the typed data document.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTypedData {
    /// The struct type declarations.
    types: Types,
    /// The type of the message.
    primary_type: String,
    /// The untyped domain.
    domain: serde_json::Map<String, serde_json::Value>,
    /// The untyped message.
    message: serde_json::Map<String, serde_json::Value>,
}
