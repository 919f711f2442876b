//! ECDSA Signature.

/// A recoverable ECDSA signature, as produced by the secp256k1 primitive.
///
/// The layout is `r ‖ s ‖ recovery id`, where the recovery id is `0` or `1`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EcdsaSignature(pub [u8; 65]);

impl EcdsaSignature {
    /// The `r` scalar.
    pub fn r(&self) -> [u8; 32] {
        let mut r = [0u8; 32];
        r.copy_from_slice(&self.0[0..32]);
        r
    }

    /// The `s` scalar.
    pub fn s(&self) -> [u8; 32] {
        let mut s = [0u8; 32];
        s.copy_from_slice(&self.0[32..64]);
        s
    }

    /// The raw recovery id.
    pub fn recovery_id(&self) -> u8 {
        self.0[64]
    }
}
