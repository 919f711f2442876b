//! The EIP-712 domain.

use ethers_core::types::U256;
use primitives_ethereum::EthereumAddress;

use crate::{FieldDef, Struct, Value};

/// A data type representing the domain of the EIP-712.
/// Compatible with `eth_signTypedData` versions 3 and 4.
///
/// Every member is optional; the absent ones are left out of both the `EIP712Domain` type
/// and its value.
#[derive(Debug, Clone, Default)]
pub struct Domain<'a> {
    /// The user readable name of signing domain, i.e. the name of the DApp or the protocol.
    pub name: Option<&'a str>,
    /// The current major version of the signing domain.
    /// Signatures from different versions are not compatible.
    pub version: Option<&'a str>,
    /// The EIP-155 chain id.
    /// The user-agent should refuse signing if it does not match the currently active chain.
    pub chain_id: Option<U256>,
    /// The Ethereum address of the contract that will verify the resulting signature.
    pub verifying_contract: Option<EthereumAddress>,
    /// A unique 32-byte value hardcoded into both the contract and the dApp meant as a last-resort
    /// means to distinguish the dApp from others.
    pub salt: Option<&'a [u8; 32]>,
}

impl<'a> Domain<'a> {
    /// The `EIP712Domain` type declaration for the present members, in the canonical order.
    pub fn fields(&self) -> Vec<FieldDef> {
        [
            self.name.map(|_| ("name", "string")),
            self.version.map(|_| ("version", "string")),
            self.chain_id.map(|_| ("chainId", "uint256")),
            self.verifying_contract
                .map(|_| ("verifyingContract", "address")),
            self.salt.map(|_| ("salt", "bytes32")),
        ]
        .into_iter()
        .flatten()
        .map(|(name, ty)| FieldDef::new(name, ty))
        .collect()
    }

    /// The `EIP712Domain` value.
    pub fn to_struct(&self) -> Struct {
        let mut domain = Struct::new();

        if let Some(name) = self.name {
            domain.insert("name".to_owned(), Value::from(name));
        }

        if let Some(version) = self.version {
            domain.insert("version".to_owned(), Value::from(version));
        }

        if let Some(chain_id) = self.chain_id {
            domain.insert("chainId".to_owned(), Value::Uint(chain_id));
        }

        if let Some(verifying_contract) = self.verifying_contract {
            domain.insert(
                "verifyingContract".to_owned(),
                Value::Address(verifying_contract),
            );
        }

        if let Some(salt) = self.salt {
            domain.insert("salt".to_owned(), Value::FixedBytes(salt.to_vec()));
        }

        domain
    }
}
