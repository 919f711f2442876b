//! Deterministic ECDSA signing of the EIP-712 typed data.

use eip712::{Struct, TypedDataSchema};
use primitives_ethereum::EthereumAddress;

mod error;
mod primitives;
mod signature;
mod signer;

pub use error::Error;
#[cfg(test)]
pub(crate) use primitives::MockEcdsaPrimitives;
pub use primitives::{EcdsaPrimitives, PrimitiveError, Secp256k1};
pub use signature::Signature;
pub use signer::Signer;

/// Sign the typed data with the secp256k1 private key.
///
/// See [`Signer::prepare_signature`].
pub fn prepare_signature(
    schema: TypedDataSchema,
    domain: Struct,
    message: Struct,
    private_key: &[u8; 32],
    expected_address: Option<&EthereumAddress>,
) -> Result<Signature, Error> {
    Signer::<Secp256k1>::default().prepare_signature(
        schema,
        domain,
        message,
        private_key,
        expected_address,
    )
}

/// Parse a hex encoded private key, with or without the `0x` prefix.
pub fn parse_private_key(hex_key: &str) -> Result<[u8; 32], Error> {
    let hex_key = hex_key.strip_prefix("0x").unwrap_or(hex_key);
    hex::decode(hex_key)
        .ok()
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(Error::MalformedPrivateKey)
}
