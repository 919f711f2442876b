//! Fixed-width primitive types and their ABI words.

use ethers_core::{
    abi::Token,
    types::{H160, I256, U256},
};
use serde_json::Value as JsonValue;

use crate::{Value, ValueError};

/// A primitive type that occupies exactly one ABI word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PrimitiveType {
    /// `address`.
    Address,
    /// `bool`.
    Bool,
    /// `uintN`, with `N` bits.
    Uint(usize),
    /// `intN`, with `N` bits.
    Int(usize),
    /// `bytesN`, with `N` bytes.
    FixedBytes(usize),
}

impl PrimitiveType {
    /// Parse the type tag. Returns `None` for anything that is not a fixed-width primitive,
    /// including dynamic `bytes` and `string`.
    pub(crate) fn parse(ty: &str) -> Option<Self> {
        match ty {
            "address" => return Some(Self::Address),
            "bool" => return Some(Self::Bool),
            _ => {}
        }

        if let Some(bits) = ty.strip_prefix("uint") {
            return parse_width(bits, 8, 256, 8).map(Self::Uint);
        }
        if let Some(bits) = ty.strip_prefix("int") {
            return parse_width(bits, 8, 256, 8).map(Self::Int);
        }
        if let Some(len) = ty.strip_prefix("bytes") {
            return parse_width(len, 1, 32, 1).map(Self::FixedBytes);
        }
        None
    }

    /// Convert the value into the ABI token for this type, checking its shape and range.
    pub(crate) fn token(&self, value: &Value) -> Result<Token, ValueError> {
        match (self, value) {
            (Self::Address, Value::Address(address)) => Ok(Token::Address(H160(address.0))),
            (Self::Bool, Value::Bool(value)) => Ok(Token::Bool(*value)),
            (Self::Uint(bits), Value::Uint(value)) => {
                if value.bits() > *bits {
                    return Err(ValueError::OutOfRange);
                }
                Ok(Token::Uint(*value))
            }
            (Self::Int(bits), Value::Int(value)) => {
                if !fits_signed(value, *bits) {
                    return Err(ValueError::OutOfRange);
                }
                Ok(Token::Int(value.into_raw()))
            }
            (Self::FixedBytes(len), Value::FixedBytes(bytes)) => {
                if bytes.len() != *len {
                    return Err(ValueError::InvalidLength {
                        expected: *len,
                        actual: bytes.len(),
                    });
                }
                Ok(Token::FixedBytes(bytes.clone()))
            }
            _ => Err(ValueError::TypeMismatch {
                expected: self.kind(),
            }),
        }
    }

    /// Convert an untyped JSON value into a [`Value`] of this type.
    pub(crate) fn value_from_json(&self, json: &JsonValue) -> Result<Value, ValueError> {
        match self {
            Self::Address => {
                let s = json.as_str().ok_or(ValueError::TypeMismatch {
                    expected: "address",
                })?;
                s.parse()
                    .map(Value::Address)
                    .map_err(|_| ValueError::InvalidHex)
            }
            Self::Bool => json
                .as_bool()
                .map(Value::Bool)
                .ok_or(ValueError::TypeMismatch { expected: "bool" }),
            Self::Uint(_) => uint_from_json(json).map(Value::Uint),
            Self::Int(_) => int_from_json(json).map(Value::Int),
            Self::FixedBytes(_) => bytes_from_json(json).map(Value::FixedBytes),
        }
    }

    /// The human readable kind of value this type takes.
    fn kind(&self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Bool => "bool",
            Self::Uint(_) => "unsigned integer",
            Self::Int(_) => "signed integer",
            Self::FixedBytes(_) => "fixed bytes",
        }
    }
}

/// Parse the numeric suffix of a sized type, i.e. the `64` in `uint64`.
fn parse_width(suffix: &str, min: usize, max: usize, step: usize) -> Option<usize> {
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) || suffix.starts_with('0')
    {
        return None;
    }
    let width: usize = suffix.parse().ok()?;
    if width < min || width > max || width % step != 0 {
        return None;
    }
    Some(width)
}

/// Whether the value is representable as a two's complement integer of `bits` bits.
fn fits_signed(value: &I256, bits: usize) -> bool {
    let raw = value.into_raw();
    let magnitude = if value.is_negative() { !raw } else { raw };
    magnitude.bits() < bits
}

/// Decode a `0x`-prefixed hex string.
pub(crate) fn bytes_from_json(json: &JsonValue) -> Result<Vec<u8>, ValueError> {
    let s = json.as_str().ok_or(ValueError::TypeMismatch {
        expected: "hex string",
    })?;
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map_err(|_| ValueError::InvalidHex)
}

/// Read an unsigned integer from a JSON number, a decimal string or a `0x` hex string.
fn uint_from_json(json: &JsonValue) -> Result<U256, ValueError> {
    match json {
        JsonValue::Number(number) => number
            .as_u64()
            .map(U256::from)
            .ok_or(ValueError::InvalidNumber),
        JsonValue::String(s) => parse_uint_str(s),
        _ => Err(ValueError::TypeMismatch {
            expected: "unsigned integer",
        }),
    }
}

/// Read a signed integer from a JSON number, a decimal string or a `0x` hex string,
/// the strings optionally starting with `-`.
fn int_from_json(json: &JsonValue) -> Result<I256, ValueError> {
    match json {
        JsonValue::Number(number) => number
            .as_i64()
            .map(I256::from)
            .ok_or(ValueError::InvalidNumber),
        JsonValue::String(s) => {
            let (negative, magnitude) = match s.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, s.as_str()),
            };
            let magnitude = parse_uint_str(magnitude)?;
            if negative && magnitude == I256::MIN.into_raw() {
                return Ok(I256::MIN);
            }
            let value = I256::try_from(magnitude).map_err(|_| ValueError::OutOfRange)?;
            if negative {
                Ok(-value)
            } else {
                Ok(value)
            }
        }
        _ => Err(ValueError::TypeMismatch {
            expected: "signed integer",
        }),
    }
}

/// Parse a decimal or `0x` hex string.
fn parse_uint_str(s: &str) -> Result<U256, ValueError> {
    let parsed = match s.strip_prefix("0x") {
        Some(hex) if !hex.is_empty() => U256::from_str_radix(hex, 16).ok(),
        None if !s.is_empty() => U256::from_dec_str(s).ok(),
        _ => None,
    };
    parsed.ok_or(ValueError::InvalidNumber)
}
