//! The typed data signer.

use eip712::{Eip712, Hasher, Keccak256, Struct, TypedDataSchema};
use primitives_ethereum::EthereumAddress;
use tracing::{debug, warn};

use crate::{EcdsaPrimitives, Error, Secp256k1, Signature};

/// Signs the EIP-712 sign hashes.
///
/// The private keys are only borrowed for the duration of a call.
#[derive(Debug, Clone, Default)]
pub struct Signer<P = Secp256k1, H = Keccak256> {
    /// The elliptic curve primitives.
    primitives: P,
    /// The hashing engine.
    engine: Eip712<H>,
}

impl<P: EcdsaPrimitives> Signer<P> {
    /// Create a new [`Signer`] with the given primitives and the keccak-256 hashing engine.
    pub fn new(primitives: P) -> Self {
        Self::with_engine(primitives, Eip712::default())
    }
}

impl<P: EcdsaPrimitives, H: Hasher> Signer<P, H> {
    /// Create a new [`Signer`] with the given primitives and hashing engine.
    pub fn with_engine(primitives: P, engine: Eip712<H>) -> Self {
        Self { primitives, engine }
    }

    /// Sign the digest.
    ///
    /// If the `expected_address` is given, the private key must control it, otherwise
    /// nothing is signed and [`Error::InvalidKeyForAddress`] is returned.
    pub fn sign(
        &self,
        digest: &[u8; 32],
        private_key: &[u8; 32],
        expected_address: Option<&EthereumAddress>,
    ) -> Result<Signature, Error> {
        if let Some(expected) = expected_address {
            let derived = self.primitives.private_key_to_address(private_key)?;
            if &derived != expected {
                warn!(
                    message = "Private key does not match the expected address",
                    %expected,
                    %derived,
                );
                return Err(Error::InvalidKeyForAddress { derived });
            }
        }

        let signature = Signature::from(self.primitives.ecsign(digest, private_key)?);
        debug!(
            message = "Signed the digest",
            digest = %hex::encode(digest),
            v = signature.v,
            r = %signature.r_hex(),
            s = %signature.s_hex(),
        );
        Ok(signature)
    }

    /// Attach the domain and the message to the schema, compute the sign hash and sign it.
    pub fn prepare_signature(
        &self,
        schema: TypedDataSchema,
        domain: Struct,
        message: Struct,
        private_key: &[u8; 32],
        expected_address: Option<&EthereumAddress>,
    ) -> Result<Signature, Error> {
        let typed_data = schema.initialize(domain, message);
        let sign_hash = self.engine.sign_hash(&typed_data)?;
        self.sign(&sign_hash, private_key, expected_address)
    }
}
