//! The elliptic curve primitives the signer relies on.

use primitives_ethereum::{EcdsaSignature, EthereumAddress};
use sha3::Digest;

/// An error reported by the [`EcdsaPrimitives`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrimitiveError {
    /// The private key is zero or not below the curve order.
    #[error("invalid secret key")]
    InvalidSecretKey,
}

/// The secp256k1 primitives.
#[cfg_attr(test, mockall::automock)]
pub trait EcdsaPrimitives {
    /// Derive the Ethereum address controlled by the private key.
    fn private_key_to_address(&self, private_key: &[u8; 32])
        -> Result<EthereumAddress, PrimitiveError>;

    /// Sign the prehashed message, producing a recoverable signature.
    fn ecsign(
        &self,
        digest: &[u8; 32],
        private_key: &[u8; 32],
    ) -> Result<EcdsaSignature, PrimitiveError>;
}

/// The [`EcdsaPrimitives`] backed by `libsecp256k1`.
///
/// Signing is deterministic (RFC 6979) and produces low-s signatures.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1;

impl Secp256k1 {
    /// Parse the private key.
    fn secret_key(private_key: &[u8; 32]) -> Result<libsecp256k1::SecretKey, PrimitiveError> {
        libsecp256k1::SecretKey::parse(private_key).map_err(|_| PrimitiveError::InvalidSecretKey)
    }
}

impl EcdsaPrimitives for Secp256k1 {
    fn private_key_to_address(
        &self,
        private_key: &[u8; 32],
    ) -> Result<EthereumAddress, PrimitiveError> {
        let private_key = Self::secret_key(private_key)?;

        // Retrieves the public key.
        let public_key = libsecp256k1::PublicKey::from_secret_key(&private_key);

        // Convert into Ethereum-style address.
        let mut raw_public_key = [0u8; 64];
        raw_public_key.copy_from_slice(&public_key.serialize()[1..65]);

        let digest = sha3::Keccak256::digest(raw_public_key);

        let mut address = [0u8; 20];
        address.copy_from_slice(&digest[12..]);
        Ok(EthereumAddress(address))
    }

    fn ecsign(
        &self,
        digest: &[u8; 32],
        private_key: &[u8; 32],
    ) -> Result<EcdsaSignature, PrimitiveError> {
        let private_key = Self::secret_key(private_key)?;
        let (sig, recovery_id) =
            libsecp256k1::sign(&libsecp256k1::Message::parse(digest), &private_key);

        let mut raw = [0u8; 65];
        raw[0..64].copy_from_slice(&sig.serialize()[..]);
        raw[64] = recovery_id.serialize();
        Ok(EcdsaSignature(raw))
    }
}
