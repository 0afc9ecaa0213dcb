//! Credentials, addresses and the ledger's binary address format.
//!
//! # Address bytes
//! | Field | Size (bytes) | Description |
//! | --- | --- | --- |
//! | header | 1 | Address type in the high nibble, network id in the low nibble. |
//! | payment | 28 | Payment credential hash. |
//! | stake | 0 or 28 | Stake credential hash, present for base addresses only. |
//!
//! ## Address types
//! | Type | Payment | Stake |
//! | --- | --- | --- |
//! | 0 | key | key |
//! | 1 | script | key |
//! | 2 | key | script |
//! | 3 | script | script |
//! | 6 | key | none |
//! | 7 | script | none |

use crate::Hash28;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const HASH_LEN: usize = 28;
const ENTERPRISE_LEN: usize = 1 + HASH_LEN;
const BASE_LEN: usize = 1 + 2 * HASH_LEN;

/// The network an address belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// The main network.
    Mainnet,
    /// Any test network.
    #[default]
    #[serde(alias = "preview", alias = "preprod")]
    Testnet,
}

/// A payment or stake credential.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credential {
    /// The hash of a verification key.
    VerificationKey(Hash28),
    /// The hash of a script.
    Script(Hash28),
}

/// A ledger address, without its network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address {
    /// The credential that controls spending.
    pub payment_credential: Credential,
    /// The inline stake credential, if any.
    #[serde(default)]
    pub stake_credential: Option<Credential>,
}

/// Address bytes that could not be parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AddressError {
    /// No header byte.
    #[error("empty address")]
    Empty,
    /// The header names an address type this crate does not handle.
    #[error("unsupported address type {0}")]
    UnsupportedType(u8),
    /// The header names an unknown network.
    #[error("unknown network id {0}")]
    UnknownNetwork(u8),
    /// The byte length does not match the address type.
    #[error("invalid address length: expected {expected} bytes, found {found}")]
    InvalidLength {
        /// Length required by the address type.
        expected: usize,
        /// Length of the given bytes.
        found: usize,
    },
}

impl Network {
    /// The network id used in address headers.
    pub fn id(self) -> u8 {
        match self {
            Network::Mainnet => 1,
            Network::Testnet => 0,
        }
    }

    /// The network for the given header id.
    pub fn from_id(id: u8) -> Result<Self, AddressError> {
        match id {
            1 => Ok(Network::Mainnet),
            0 => Ok(Network::Testnet),
            other => Err(AddressError::UnknownNetwork(other)),
        }
    }
}

impl Credential {
    /// The hash this credential carries.
    pub fn hash(&self) -> &Hash28 {
        match self {
            Credential::VerificationKey(hash) | Credential::Script(hash) => hash,
        }
    }

    /// Whether this is a script credential.
    pub fn is_script(&self) -> bool {
        matches!(self, Credential::Script(_))
    }
}

impl Address {
    /// An address with no stake credential.
    pub fn enterprise(payment_credential: Credential) -> Self {
        Self {
            payment_credential,
            stake_credential: None,
        }
    }

    /// An address with both a payment and a stake credential.
    pub fn base(payment_credential: Credential, stake_credential: Credential) -> Self {
        Self {
            payment_credential,
            stake_credential: Some(stake_credential),
        }
    }

    /// The address type nibble of the header.
    fn type_id(&self) -> u8 {
        let payment = u8::from(self.payment_credential.is_script());
        match self.stake_credential {
            Some(stake) => payment | (u8::from(stake.is_script()) << 1),
            None => 0b0110 | payment,
        }
    }

    /// Encode the address for the given network.
    pub fn to_bytes(&self, network: Network) -> Vec<u8> {
        let header = (self.type_id() << 4) | network.id();
        let mut bytes = Vec::with_capacity(BASE_LEN);
        bytes.push(header);
        bytes.extend_from_slice(&self.payment_credential.hash().0);
        if let Some(stake) = &self.stake_credential {
            bytes.extend_from_slice(&stake.hash().0);
        }
        bytes
    }

    /// Decode address bytes, returning the network named in the header.
    pub fn from_bytes(bytes: &[u8]) -> Result<(Network, Self), AddressError> {
        let Some(&header) = bytes.first() else {
            return Err(AddressError::Empty);
        };
        let network = Network::from_id(header & 0x0f)?;
        let type_id = header >> 4;
        let expected = match type_id {
            0..=3 => BASE_LEN,
            6 | 7 => ENTERPRISE_LEN,
            other => return Err(AddressError::UnsupportedType(other)),
        };
        if bytes.len() != expected {
            return Err(AddressError::InvalidLength {
                expected,
                found: bytes.len(),
            });
        }
        let hash_at = |start: usize| {
            let mut hash = [0u8; HASH_LEN];
            hash.copy_from_slice(&bytes[start..start + HASH_LEN]);
            Hash28(hash)
        };
        let credential = |is_script: bool, hash| {
            if is_script {
                Credential::Script(hash)
            } else {
                Credential::VerificationKey(hash)
            }
        };
        let payment_credential = credential(type_id & 0b0001 != 0, hash_at(1));
        let stake_credential = match type_id {
            0..=3 => Some(credential(type_id & 0b0010 != 0, hash_at(1 + HASH_LEN))),
            _ => None,
        };
        let address = Address {
            payment_credential,
            stake_credential,
        };
        Ok((network, address))
    }
}
