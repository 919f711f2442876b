//! Signing errors.

use primitives_ethereum::EthereumAddress;

use crate::PrimitiveError;

/// An error that aborts a signing call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The private key does not control the expected address.
    #[error("invalid private key for address {derived}")]
    InvalidKeyForAddress {
        /// The address the private key actually controls.
        derived: EthereumAddress,
    },
    /// The private key is not 32 hex encoded bytes.
    #[error("malformed private key")]
    MalformedPrivateKey,
    /// The elliptic curve primitive failed.
    #[error(transparent)]
    Primitive(#[from] PrimitiveError),
    /// The typed data could not be hashed.
    #[error(transparent)]
    Encoding(#[from] eip712::Error),
}
