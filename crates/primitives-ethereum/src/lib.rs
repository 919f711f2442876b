//! Common ethereum related primitives.

#![cfg_attr(not(feature = "std"), no_std)]

mod ecdsa_signature;
mod ethereum_address;

pub use ecdsa_signature::*;
pub use ethereum_address::*;
