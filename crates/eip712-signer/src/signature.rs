//! The packaged signature.

use primitives_ethereum::EcdsaSignature;
use serde::{ser::SerializeStruct, Serialize, Serializer};

/// The offset Ethereum adds to the recovery id to get `v`.
const V_OFFSET: u8 = 27;

/// A signature in the `(v, r, s)` form wallets and contracts use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// The recovery id plus 27.
    pub v: u8,
    /// The `r` scalar, big-endian.
    pub r: [u8; 32],
    /// The `s` scalar, big-endian.
    pub s: [u8; 32],
}

impl Signature {
    /// `r` as a 0x-prefixed lowercase hex string.
    pub fn r_hex(&self) -> String {
        format!("0x{}", hex::encode(self.r))
    }

    /// `s` as a 0x-prefixed lowercase hex string.
    pub fn s_hex(&self) -> String {
        format!("0x{}", hex::encode(self.s))
    }

    /// The 65-byte `r ‖ s ‖ v` form.
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[0..32].copy_from_slice(&self.r);
        bytes[32..64].copy_from_slice(&self.s);
        bytes[64] = self.v;
        bytes
    }
}

impl From<EcdsaSignature> for Signature {
    fn from(sig: EcdsaSignature) -> Self {
        Self {
            v: V_OFFSET + sig.recovery_id(),
            r: sig.r(),
            s: sig.s(),
        }
    }
}

impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Signature", 3)?;
        state.serialize_field("v", &self.v)?;
        state.serialize_field("r", &self.r_hex())?;
        state.serialize_field("s", &self.s_hex())?;
        state.end()
    }
}
