//! Ethereum address.

use core::fmt::Write;

#[cfg(feature = "std")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An Ethereum address (i.e. 20 bytes, used to represent an Ethereum account).
///
/// This gets serialized to the 0x-prefixed hex representation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
pub struct EthereumAddress(pub [u8; 20]);

/// An error that can occur while parsing an [`EthereumAddress`] from its hex form.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ParseAddressError {
    /// The input is not 40 hex characters long (not counting the `0x` prefix).
    BadLength,
    /// The input contains a non-hex character.
    InvalidCharacter {
        /// The offending character.
        ch: char,
        /// Its position after the optional `0x` prefix.
        index: usize,
    },
}

impl core::fmt::Display for ParseAddressError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BadLength => {
                f.write_str("bad length of Ethereum address (should be 42 including '0x')")
            }
            Self::InvalidCharacter { ch, index } => write!(
                f,
                "invalid character '{}' at position {}, expected 0-9 or a-z or A-Z",
                ch, index
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseAddressError {}

impl core::str::FromStr for EthereumAddress {
    type Err = ParseAddressError;

    fn from_str(base_string: &str) -> Result<Self, Self::Err> {
        let s = base_string.strip_prefix("0x").unwrap_or(base_string);
        if s.len() != 40 {
            return Err(ParseAddressError::BadLength);
        }
        let mut iter = rustc_hex::FromHexIter::new(s);

        let mut to_fill = [0u8; 20];
        for slot in to_fill.iter_mut() {
            // We check the length above, so there is always a next item.
            let Some(result) = iter.next() else {
                return Err(ParseAddressError::BadLength);
            };

            *slot = result.map_err(|err| match err {
                rustc_hex::FromHexError::InvalidHexCharacter(ch, index) => {
                    ParseAddressError::InvalidCharacter { ch, index }
                }
                rustc_hex::FromHexError::InvalidHexLength => ParseAddressError::BadLength,
            })?;
        }
        Ok(EthereumAddress(to_fill))
    }
}

impl core::fmt::Display for EthereumAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("0x")?;
        for hex in rustc_hex::ToHexIter::new(self.0.iter()) {
            f.write_char(hex)?;
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl Serialize for EthereumAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "std")]
impl<'de> Deserialize<'de> for EthereumAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let base_string = String::deserialize(deserializer)?;
        base_string.parse().map_err(serde::de::Error::custom)
    }
}
