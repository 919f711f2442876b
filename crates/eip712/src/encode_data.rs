//! Struct data encoding.

use ethers_core::abi::{self, Token};

use crate::{
    hash::{Eip712, Hasher},
    primitive::PrimitiveType,
    Error, FieldDef, Struct, Types, Value, ValueError,
};

/// Encodes struct values into the `typeHash ‖ word ‖ word ...` form.
pub(crate) struct DataEncoder<'a, H> {
    /// The engine providing the type hashes and the keccak primitive.
    engine: &'a Eip712<H>,
    /// The schema.
    types: &'a Types,
    /// The struct types currently being encoded, outermost first.
    active: Vec<&'a str>,
}

impl<'a, H: Hasher> DataEncoder<'a, H> {
    /// Create a new [`DataEncoder`].
    pub(crate) fn new(engine: &'a Eip712<H>, types: &'a Types) -> Self {
        Self {
            engine,
            types,
            active: Vec::new(),
        }
    }

    /// Encode the values of a struct of the given type.
    ///
    /// The result is not hashed.
    pub(crate) fn encode(&mut self, type_name: &'a str, values: &Struct) -> Result<Vec<u8>, Error> {
        let types = self.types;
        let fields = types
            .get(type_name)
            .ok_or_else(|| Error::UnknownRootType(type_name.to_owned()))?;

        let depth = self.active.len();
        if self.active.contains(&type_name) {
            return Err(Error::CyclicData {
                type_name: type_name.to_owned(),
                depth,
            });
        }

        self.active.push(type_name);
        let result = self.encode_fields(type_name, fields, values, depth);
        self.active.pop();
        result
    }

    /// Encode the type hash followed by every field, in the declaration order.
    fn encode_fields(
        &mut self,
        type_name: &'a str,
        fields: &'a [FieldDef],
        values: &Struct,
        depth: usize,
    ) -> Result<Vec<u8>, Error> {
        let type_hash = self.engine.type_hash(self.types, type_name)?;

        let mut tokens = Vec::with_capacity(fields.len() + 1);
        tokens.push(Token::FixedBytes(type_hash.to_vec()));
        for field in fields {
            tokens.push(self.encode_field(type_name, field, values, depth)?);
        }

        Ok(abi::encode(&tokens))
    }

    /// Encode a single field into its ABI word.
    fn encode_field(
        &mut self,
        type_name: &str,
        field: &'a FieldDef,
        values: &Struct,
        depth: usize,
    ) -> Result<Token, Error> {
        let ty = field.ty.as_str();
        let is_struct = self.types.contains_key(ty);

        if !is_struct && ty.ends_with(']') {
            return Err(Error::UnsupportedFieldType {
                type_name: type_name.to_owned(),
                field: field.name.clone(),
                field_type: field.ty.clone(),
                depth,
            });
        }

        let malformed = |reason| Error::malformed(type_name, &field.name, depth, reason);
        let value = values
            .get(&field.name)
            .ok_or_else(|| malformed(ValueError::MissingField))?;

        match (ty, value) {
            ("string", Value::String(value)) => Ok(self.hashed(value.as_bytes())),
            ("string", _) => Err(malformed(ValueError::TypeMismatch { expected: "string" })),
            ("bytes", Value::Bytes(value)) => Ok(self.hashed(value)),
            ("bytes", _) => Err(malformed(ValueError::TypeMismatch { expected: "bytes" })),
            (_, Value::Struct(nested)) if is_struct => {
                let encoded = self.encode(ty, nested)?;
                Ok(self.hashed(&encoded))
            }
            _ if is_struct => Err(malformed(ValueError::TypeMismatch { expected: "struct" })),
            _ => {
                let primitive =
                    PrimitiveType::parse(ty).ok_or_else(|| Error::UnknownFieldType {
                        type_name: type_name.to_owned(),
                        field: field.name.clone(),
                        field_type: field.ty.clone(),
                        depth,
                    })?;
                primitive.token(value).map_err(malformed)
            }
        }
    }

    /// Hash the data into a `bytes32` word.
    fn hashed(&self, data: &[u8]) -> Token {
        Token::FixedBytes(self.engine.hasher().keccak_256(data).to_vec())
    }
}
