//! Common test utils for EIP-712 typed data hashing and signing.

use ethers_core::types::transaction::eip712::{Eip712, TypedData};
use primitives_ethereum::{EcdsaSignature, EthereumAddress};
use sha3::Digest;

/// The typed data example from the EIP-712 specification.
///
/// See https://github.com/ethereum/EIPs/blob/fcaec3dc70e758fe80abd86f0c70bbbedbec6e61/assets/eip-712/Example.js
pub const ETHER_MAIL_JSON: &str = r#"{
    "types": {
        "EIP712Domain": [
            { "name": "name", "type": "string" },
            { "name": "version", "type": "string" },
            { "name": "chainId", "type": "uint256" },
            { "name": "verifyingContract", "type": "address" }
        ],
        "Person": [
            { "name": "name", "type": "string" },
            { "name": "wallet", "type": "address" }
        ],
        "Mail": [
            { "name": "from", "type": "Person" },
            { "name": "to", "type": "Person" },
            { "name": "contents", "type": "string" }
        ]
    },
    "primaryType": "Mail",
    "domain": {
        "name": "Ether Mail",
        "version": "1",
        "chainId": 1,
        "verifyingContract": "0xCcCCccccCCCCcCCCCCCcCcCccCcCCCcCcccccccC"
    },
    "message": {
        "from": {
            "name": "Cow",
            "wallet": "0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826"
        },
        "to": {
            "name": "Bob",
            "wallet": "0xbBbBBBBbbBBBbbbBbbBbbbbBBbBbbbbBbBbbBBbB"
        },
        "contents": "Hello, Bob!"
    }
}"#;

/// Keccak-256 of the data.
fn keccak_256(data: &[u8]) -> [u8; 32] {
    sha3::Keccak256::digest(data).into()
}

/// Create a private key from the seed.
pub fn ecdsa_private_key(seed: &[u8]) -> [u8; 32] {
    keccak_256(seed)
}

/// Create an Ethereum address from the given public key.
fn ethereum_address(public: &libsecp256k1::PublicKey) -> EthereumAddress {
    let mut public_bytes = [0u8; 64];
    public_bytes.copy_from_slice(&public.serialize()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&keccak_256(&public_bytes)[12..]);
    EthereumAddress(address)
}

/// Create an Ethereum address from the given seed.
///
/// This algorithm will return the addresses corresponding to the private keys generated
/// by [`ecdsa_private_key`] with the same `seed`.
pub fn ethereum_address_from_seed(seed: &[u8]) -> EthereumAddress {
    let secret = libsecp256k1::SecretKey::parse(&ecdsa_private_key(seed)).unwrap();
    ethereum_address(&libsecp256k1::PublicKey::from_secret_key(&secret))
}

/// Extract the signer address from the signature and the message.
pub fn recover_signer(sig: &EcdsaSignature, msg: &[u8; 32]) -> Option<EthereumAddress> {
    let mut rs = [0u8; 64];
    rs.copy_from_slice(&sig.0[..64]);
    let signature = libsecp256k1::Signature::parse_standard(&rs).ok()?;
    let recovery_id = libsecp256k1::RecoveryId::parse(sig.recovery_id()).ok()?;
    let public =
        libsecp256k1::recover(&libsecp256k1::Message::parse(msg), &signature, &recovery_id).ok()?;
    Some(ethereum_address(&public))
}

/// Parse the typed data JSON with the ethers implementation.
fn reference_typed_data(type_data_json: &str) -> TypedData {
    serde_json::from_str(type_data_json).unwrap()
}

/// Compute the domain separator of the typed data JSON with the ethers implementation.
pub fn reference_domain_separator(type_data_json: &str) -> [u8; 32] {
    reference_typed_data(type_data_json)
        .domain_separator()
        .unwrap()
}

/// Compute the message struct hash of the typed data JSON with the ethers implementation.
pub fn reference_struct_hash(type_data_json: &str) -> [u8; 32] {
    reference_typed_data(type_data_json).struct_hash().unwrap()
}

/// Compute the sign hash of the typed data JSON with the ethers implementation.
pub fn reference_sign_hash(type_data_json: &str) -> [u8; 32] {
    reference_typed_data(type_data_json)
        .encode_eip712()
        .unwrap()
}
