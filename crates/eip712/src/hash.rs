//! The EIP-712 hash composition.

use sha3::Digest;
use tracing::{debug, trace};

use crate::{
    encode_data::DataEncoder, encode_type, Error, Struct, TypedData, TypedDataSchema, Types,
    EIP712_DOMAIN_TYPE,
};

/// A first number of an EIP191 message.
const EIP191_MAGIC_BYTE: u8 = 0x19;
/// The EIP191 version for the EIP-712 structured data.
const EIP191_VERSION_STRUCTURED_DATA: u8 = 0x01;

/// The keccak-256 primitive.
pub trait Hasher {
    /// Compute the keccak-256 digest of the data.
    fn keccak_256(&self, data: &[u8]) -> [u8; 32];
}

/// The original keccak-256 (not the NIST SHA3-256), as used by Ethereum.
#[derive(Debug, Clone, Copy, Default)]
pub struct Keccak256;

impl Hasher for Keccak256 {
    fn keccak_256(&self, data: &[u8]) -> [u8; 32] {
        sha3::Keccak256::digest(data).into()
    }
}

/// The EIP-712 hashing engine.
#[derive(Debug, Clone, Default)]
pub struct Eip712<H = Keccak256> {
    /// The keccak-256 primitive.
    hasher: H,
}

impl<H: Hasher> Eip712<H> {
    /// Create a new [`Eip712`] engine with the given hasher.
    pub fn new(hasher: H) -> Self {
        Self { hasher }
    }

    /// The keccak-256 primitive in use.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Compute the hash of the canonical type string.
    pub fn type_hash(&self, types: &Types, type_name: &str) -> Result<[u8; 32], Error> {
        let encoded_type = encode_type(types, type_name)?;
        trace!(message = "Encoded type", %type_name, %encoded_type);
        Ok(self.hasher.keccak_256(encoded_type.as_bytes()))
    }

    /// Encode the struct values: the type hash followed by one 32-byte word per field.
    pub fn encode_data(
        &self,
        types: &Types,
        type_name: &str,
        values: &Struct,
    ) -> Result<Vec<u8>, Error> {
        DataEncoder::new(self, types).encode(type_name, values)
    }

    /// Compute the hash of the encoded struct values.
    pub fn struct_hash(
        &self,
        types: &Types,
        type_name: &str,
        values: &Struct,
    ) -> Result<[u8; 32], Error> {
        let encoded = self.encode_data(types, type_name, values)?;
        Ok(self.hasher.keccak_256(&encoded))
    }

    /// Compute the struct hash of the `EIP712Domain` value.
    pub fn domain_separator(&self, typed_data: &TypedData) -> Result<[u8; 32], Error> {
        self.struct_hash(typed_data.types(), EIP712_DOMAIN_TYPE, &typed_data.domain)
    }

    /// Compute the hash to be signed:
    /// `keccak256(0x19 ‖ 0x01 ‖ domainSeparator ‖ hashStruct(message))`.
    pub fn sign_hash(&self, typed_data: &TypedData) -> Result<[u8; 32], Error> {
        let domain_separator = self.domain_separator(typed_data)?;
        let message_hash = self.struct_hash(
            typed_data.types(),
            typed_data.primary_type(),
            &typed_data.message,
        )?;

        let mut msg: [u8; 66] = [0; 66];
        msg[0] = EIP191_MAGIC_BYTE;
        msg[1] = EIP191_VERSION_STRUCTURED_DATA;
        msg[2..34].copy_from_slice(&domain_separator);
        msg[34..66].copy_from_slice(&message_hash);
        let sign_hash = self.hasher.keccak_256(&msg);

        debug!(
            message = "Computed typed data sign hash",
            primary_type = %typed_data.primary_type(),
            sign_hash = %hex::encode(sign_hash),
        );
        Ok(sign_hash)
    }

    /// Attach the domain and the message to the schema and compute the struct hash
    /// of the message.
    ///
    /// This is the digest of the message alone, without the domain.
    pub fn hash_typed(
        &self,
        schema: TypedDataSchema,
        domain: Struct,
        message: Struct,
    ) -> Result<[u8; 32], Error> {
        let typed_data = schema.initialize(domain, message);
        self.struct_hash(
            typed_data.types(),
            typed_data.primary_type(),
            &typed_data.message,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use assert_matches::assert_matches;
    use eip712_common_test_utils::{
        reference_domain_separator, reference_sign_hash, reference_struct_hash, ETHER_MAIL_JSON,
    };
    use hex_literal::hex;
    use tracing_test::traced_test;

    use super::*;
    use crate::Value;

    fn ether_mail() -> TypedData {
        TypedData::from_json_str(ETHER_MAIL_JSON).unwrap()
    }

    #[test]
    fn keccak_is_not_sha3() {
        assert_eq!(
            Keccak256.keccak_256(b""),
            hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );
    }

    #[test]
    fn ether_mail_type_hash() {
        let typed_data = ether_mail();
        assert_eq!(
            Eip712::<Keccak256>::default()
                .type_hash(typed_data.types(), "Mail")
                .unwrap(),
            hex!("a0cedeb2dc280ba39b857546d74f5549c3a1d7bdc2dd96bf881f76108e23dac2")
        );
    }

    #[test]
    fn ether_mail_encode_data() {
        let typed_data = ether_mail();
        let encoded = Eip712::<Keccak256>::default()
            .encode_data(typed_data.types(), "Mail", &typed_data.message)
            .unwrap();
        assert_eq!(
            encoded,
            hex!(
                "a0cedeb2dc280ba39b857546d74f5549c3a1d7bdc2dd96bf881f76108e23dac2"
                "fc71e5fa27ff56c350aa531bc129ebdf613b772b6604664f5d8dbe21b85eb0c8"
                "cd54f074a4af31b4411ff6a60c9719dbd559c221c8ac3492d9d872b041d703d1"
                "b5aadf3154a261abdd9086fc627b61efca26ae5702701d05cd2305f7c52a2fc8"
            )
        );
    }

    #[test]
    fn ether_mail_struct_hash() {
        let typed_data = ether_mail();
        let engine = Eip712::<Keccak256>::default();
        assert_eq!(
            engine
                .struct_hash(typed_data.types(), "Mail", &typed_data.message)
                .unwrap(),
            hex!("c52c0ee5d84264471806290a3f2c4cecfc5490626bf912d01f240d7a274b371e")
        );
    }

    #[test]
    fn ether_mail_domain_separator() {
        // See https://github.com/ethereum/EIPs/blob/fcaec3dc70e758fe80abd86f0c70bbbedbec6e61/assets/eip-712/Example.sol#L101
        assert_eq!(
            Eip712::<Keccak256>::default()
                .domain_separator(&ether_mail())
                .unwrap(),
            hex!("f2cee375fa42b42143804025fc449deafd50cc031ca257e0b194a650a912090f")
        );
    }

    #[test]
    #[traced_test]
    fn ether_mail_sign_hash() {
        assert_eq!(
            Eip712::<Keccak256>::default()
                .sign_hash(&ether_mail())
                .unwrap(),
            hex!("be609aee343fb3c4b28e1df9e632fca64fcfaede20f02e86244efddf30957bd2")
        );
        assert!(logs_contain(
            "be609aee343fb3c4b28e1df9e632fca64fcfaede20f02e86244efddf30957bd2"
        ));
    }

    #[test]
    fn sign_hash_composition() {
        let typed_data = ether_mail();
        let engine = Eip712::<Keccak256>::default();

        let mut msg = vec![0x19, 0x01];
        msg.extend_from_slice(&engine.domain_separator(&typed_data).unwrap());
        msg.extend_from_slice(
            &engine
                .struct_hash(typed_data.types(), "Mail", &typed_data.message)
                .unwrap(),
        );

        assert_eq!(
            engine.sign_hash(&typed_data).unwrap(),
            Keccak256.keccak_256(&msg)
        );
    }

    #[test]
    fn hash_typed_returns_message_struct_hash() {
        let typed_data = ether_mail();
        let hash = Eip712::<Keccak256>::default()
            .hash_typed(
                typed_data.schema.clone(),
                typed_data.domain.clone(),
                typed_data.message.clone(),
            )
            .unwrap();
        assert_eq!(
            hash,
            hex!("c52c0ee5d84264471806290a3f2c4cecfc5490626bf912d01f240d7a274b371e")
        );
    }

    #[test]
    fn missing_domain_type() {
        let mut typed_data = ether_mail();
        typed_data.schema.types.remove(EIP712_DOMAIN_TYPE);
        assert_matches!(
            Eip712::<Keccak256>::default().sign_hash(&typed_data),
            Err(Error::UnknownRootType(name)) if name == EIP712_DOMAIN_TYPE
        );
    }

    #[test]
    fn cyclic_schema_still_hashes_its_type() {
        let types = Types::from([
            (
                "A".to_owned(),
                vec![crate::FieldDef::new("b", "B"), crate::FieldDef::new("x", "uint256")],
            ),
            ("B".to_owned(), vec![crate::FieldDef::new("a", "A")]),
        ]);
        let engine = Eip712::<Keccak256>::default();
        assert_eq!(
            engine.type_hash(&types, "A").unwrap(),
            Keccak256.keccak_256(b"A(B b,uint256 x)B(A a)")
        );
    }

    /// A hasher that counts the invocations, to observe the collaborator seam.
    #[derive(Default)]
    struct CountingHasher {
        calls: Cell<usize>,
    }

    impl Hasher for CountingHasher {
        fn keccak_256(&self, data: &[u8]) -> [u8; 32] {
            self.calls.set(self.calls.get() + 1);
            Keccak256.keccak_256(data)
        }
    }

    #[test]
    fn injected_hasher_is_used() {
        let typed_data = ether_mail();
        let engine = Eip712::new(CountingHasher::default());

        let hash = engine.sign_hash(&typed_data).unwrap();

        assert_eq!(
            hash,
            hex!("be609aee343fb3c4b28e1df9e632fca64fcfaede20f02e86244efddf30957bd2")
        );
        // Domain: type hash, 2 strings, struct hash.
        // Mail: type hash, 2 x (Person type hash, name, struct hash), contents, struct hash.
        // Plus the final hash.
        assert_eq!(engine.hasher().calls.get(), 4 + 9 + 1);
    }

    /// Compare the domain separator, the message struct hash and the sign hash with the
    /// ethers implementation.
    ///
    /// ethers only reads signed integers as two's complement hex, so the document it gets
    /// can spell those values differently from ours.
    fn assert_matches_reference(json: &str, reference_json: &str) {
        let engine = Eip712::<Keccak256>::default();
        let typed_data = TypedData::from_json_str(json).unwrap();

        assert_eq!(
            engine.domain_separator(&typed_data).unwrap(),
            reference_domain_separator(reference_json)
        );
        assert_eq!(
            engine
                .struct_hash(
                    typed_data.types(),
                    typed_data.primary_type(),
                    &typed_data.message
                )
                .unwrap(),
            reference_struct_hash(reference_json)
        );
        assert_eq!(
            engine.sign_hash(&typed_data).unwrap(),
            reference_sign_hash(reference_json)
        );
    }

    #[test]
    fn ether_mail_matches_reference() {
        assert_matches_reference(ETHER_MAIL_JSON, ETHER_MAIL_JSON);
    }

    #[test]
    fn all_primitive_kinds_match_reference() {
        let json = r#"{
            "types": {
                "EIP712Domain": [
                    { "name": "name", "type": "string" },
                    { "name": "chainId", "type": "uint256" }
                ],
                "Order": [
                    { "name": "maker", "type": "address" },
                    { "name": "amount", "type": "uint128" },
                    { "name": "delta", "type": "int32" },
                    { "name": "salt", "type": "bytes32" },
                    { "name": "payload", "type": "bytes" },
                    { "name": "active", "type": "bool" },
                    { "name": "asset", "type": "Asset" }
                ],
                "Asset": [
                    { "name": "symbol", "type": "string" },
                    { "name": "decimals", "type": "uint8" }
                ]
            },
            "primaryType": "Order",
            "domain": { "name": "Exchange", "chainId": "0x1472" },
            "message": {
                "maker": "0xbBbBBBBbbBBBbbbBbbBbbbbBBbBbbbbBbBbbBBbB",
                "amount": "340282366920938463463374607431768211455",
                "delta": "0x2a",
                "salt": "0xd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d",
                "payload": "0xdeadbeef",
                "active": true,
                "asset": { "symbol": "HMND", "decimals": 18 }
            }
        }"#;

        assert_matches_reference(json, json);
    }

    #[test]
    fn negative_ints_match_reference() {
        let document = |delta: &str, floor: &str, tick: &str| {
            format!(
                r#"{{
                    "types": {{
                        "EIP712Domain": [
                            {{ "name": "name", "type": "string" }},
                            {{ "name": "version", "type": "string" }}
                        ],
                        "Move": [
                            {{ "name": "delta", "type": "int32" }},
                            {{ "name": "floor", "type": "int256" }},
                            {{ "name": "tick", "type": "int8" }}
                        ]
                    }},
                    "primaryType": "Move",
                    "domain": {{ "name": "Ledger", "version": "2" }},
                    "message": {{ "delta": "{delta}", "floor": "{floor}", "tick": "{tick}" }}
                }}"#
            )
        };

        let json = document("-42", "-1000000000000000000", "-1");
        let reference_json = document(
            &format!("0x{}d6", "f".repeat(62)),
            &format!("0x{}f21f494c589c0000", "f".repeat(48)),
            &format!("0x{}", "f".repeat(64)),
        );

        assert_matches_reference(&json, &reference_json);
    }

    #[test]
    fn message_values_change_the_hash() {
        let mut typed_data = ether_mail();
        let engine = Eip712::<Keccak256>::default();
        let before = engine.sign_hash(&typed_data).unwrap();

        typed_data
            .message
            .insert("contents".to_owned(), Value::from("Hello, Alice!"));

        assert_ne!(engine.sign_hash(&typed_data).unwrap(), before);
    }
}
