//! The EIP-712 typed data hashing.
//!
//! The free functions below use the [`Keccak256`] hasher; use [`Eip712`] directly to
//! substitute the keccak primitive.

mod dependencies;
mod domain;
mod encode_data;
mod encode_type;
mod error;
mod hash;
mod primitive;
mod schema;
mod value;

pub use dependencies::dependencies;
pub use domain::Domain;
pub use encode_type::encode_type;
pub use error::{Error, ValueError};
pub use ethers_core::types::{I256, U256};
pub use hash::{Eip712, Hasher, Keccak256};
pub use primitives_ethereum::EthereumAddress;
pub use schema::{FieldDef, TypedData, TypedDataSchema, Types, EIP712_DOMAIN_TYPE};
pub use value::{Struct, Value};

/// Compute the keccak-256 hash of the canonical type string of `type_name`.
pub fn type_hash(types: &Types, type_name: &str) -> Result<[u8; 32], Error> {
    Eip712::<Keccak256>::default().type_hash(types, type_name)
}

/// Encode the struct values: the type hash followed by one 32-byte word per field.
pub fn encode_data(types: &Types, type_name: &str, values: &Struct) -> Result<Vec<u8>, Error> {
    Eip712::<Keccak256>::default().encode_data(types, type_name, values)
}

/// Compute the keccak-256 hash of the encoded struct values.
pub fn struct_hash(types: &Types, type_name: &str, values: &Struct) -> Result<[u8; 32], Error> {
    Eip712::<Keccak256>::default().struct_hash(types, type_name, values)
}

/// Compute the hash to be signed for the typed data.
pub fn sign_hash(typed_data: &TypedData) -> Result<[u8; 32], Error> {
    Eip712::<Keccak256>::default().sign_hash(typed_data)
}

/// Attach the domain and the message to the schema and compute the struct hash of the message.
pub fn hash_typed(
    schema: TypedDataSchema,
    domain: Struct,
    message: Struct,
) -> Result<[u8; 32], Error> {
    Eip712::<Keccak256>::default().hash_typed(schema, domain, message)
}
