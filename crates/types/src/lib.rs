//! Base types for signing and verifying Bullet intents.
//!
//! The crate is organised around the ledger's closed datum type,
//! [`PlutusData`], and its canonical CBOR encoding. Every type that takes part
//! in the signed wire format implements [`plutus::ToPlutusData`] and
//! [`plutus::FromPlutusData`] so that the bytes produced off-chain match the
//! bytes an on-chain consumer produces when it re-serialises the same value.
//!
//! - [`intent`]: the [`Intent`] schema and its codec.
//! - [`signed`]: [`SignedIntention`] and the [`IntentionRedeemer`] wrapper.
//! - [`address`]: credentials, addresses and their ledger byte encoding.
//! - [`config`]: deployment configuration, loaded once at startup.

#![deny(missing_docs)]
#![deny(unsafe_code)]

use ::serde::{Deserialize, Serialize};

pub mod address;
pub mod config;
mod fmt;
pub mod intent;
pub mod plutus;
pub mod serde;
pub mod signed;

#[doc(inline)]
pub use address::{Address, Credential, Network};
#[doc(inline)]
pub use intent::Intent;
#[doc(inline)]
pub use plutus::PlutusData;
#[doc(inline)]
pub use signed::{IntentionRedeemer, SignedIntention};

/// Maximum length of an asset name in bytes.
pub const MAX_ASSET_NAME_LEN: usize = 32;

/// A 28-byte hash: credential hashes, policy ids and script hashes.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Hash28(#[serde(with = "crate::serde")] pub [u8; 28]);

/// The id of a minting policy.
pub type PolicyId = Hash28;

/// The hash of a script.
pub type ScriptHash = Hash28;

/// A 32-byte transaction id.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TxHash(#[serde(with = "crate::serde")] pub [u8; 32]);

/// An Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature(#[serde(with = "crate::serde")] pub [u8; 64]);

/// The name of an asset under a policy. At most [`MAX_ASSET_NAME_LEN`] bytes.
///
/// Ordering is lexicographic over the raw bytes, which is the order asset
/// maps are encoded in.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetName(Vec<u8>);

/// An asset name longer than [`MAX_ASSET_NAME_LEN`] bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("asset name of {0} bytes exceeds the {MAX_ASSET_NAME_LEN} byte limit")]
pub struct AssetNameTooLong(pub usize);

/// A reference to a transaction output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OutputRef {
    /// The transaction that created the output.
    pub tx_id: TxHash,
    /// The index of the output within that transaction.
    pub output_index: u64,
}

impl AssetName {
    /// Construct an asset name, checking its length.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, AssetNameTooLong> {
        let bytes = bytes.into();
        if bytes.len() > MAX_ASSET_NAME_LEN {
            return Err(AssetNameTooLong(bytes.len()));
        }
        Ok(Self(bytes))
    }

    /// The raw bytes of the name.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<Vec<u8>> for AssetName {
    type Error = AssetNameTooLong;
    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

impl TryFrom<&[u8]> for AssetName {
    type Error = AssetNameTooLong;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

impl From<AssetName> for Vec<u8> {
    fn from(name: AssetName) -> Self {
        name.0
    }
}

impl AsRef<[u8]> for AssetName {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 28]> for Hash28 {
    fn from(bytes: [u8; 28]) -> Self {
        Self(bytes)
    }
}

impl From<Hash28> for [u8; 28] {
    fn from(hash: Hash28) -> Self {
        hash.0
    }
}

impl From<[u8; 32]> for TxHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<[u8; 64]> for Signature {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

impl From<Signature> for [u8; 64] {
    fn from(sig: Signature) -> Self {
        sig.0
    }
}
