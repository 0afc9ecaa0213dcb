//! # Intents
//! Types needed to represent an intent: the constraints a future transaction
//! must satisfy, the value it may move out of the custody account, and the
//! nonce that prevents replay.
//!
//! Use [`encode_intent`] and [`decode_intent`] for the canonical bytes that
//! get signed.

use crate::{Address, AssetName, Credential, Hash28, OutputRef, PlutusData, PolicyId, ScriptHash};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, num::NonZeroU64};

pub mod decode;
pub mod encode;

#[cfg(test)]
mod tests;

#[doc(inline)]
pub use crate::plutus::DecodeError;
#[doc(inline)]
pub use decode::decode_intent;
#[doc(inline)]
pub use encode::encode_intent;

/// Quantities of native assets, keyed by policy and then asset name.
///
/// Both levels are ordered by raw bytes, which is the order they are encoded in.
pub type Assets = BTreeMap<PolicyId, BTreeMap<AssetName, NonZeroU64>>;

/// A declarative bundle of constraints a future transaction must satisfy.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Intent {
    /// Constraints, evaluated in order by the consumer.
    pub constraints: Vec<Constraint>,
    /// The value that leaves the custody account when the intent executes.
    pub value_leaving: ValueLeaving,
    /// Replay protection.
    pub nonce: Nonce,
}

/// Value leaving the custody account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueLeaving {
    /// Lovelace, may be zero.
    pub lovelace: u64,
    /// Native assets, every quantity strictly positive.
    #[serde(default)]
    pub assets: Assets,
}

/// Replay protection for an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nonce {
    /// Consumed in increasing order.
    Sequential(NonZeroU64),
    /// Bound to a specific unspent output, consumed in any order.
    Parallel(OutputRef),
}

/// A single requirement on the consuming transaction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// Some output must match.
    Output(OutputConstraint),
    /// The credential must also sign the consuming transaction.
    Signed(Hash28),
    /// Another script's redeemer must have the given structure.
    Redeemer(RedeemerConstraint),
    /// Some reference input must match.
    ReferenceInput(InputConstraint),
    /// Some spent input must match.
    Input(InputConstraint),
    /// At least the given quantity must be minted.
    Mint(AssetAmount),
    /// The validity range must start after the given POSIX time.
    After(i64),
    /// The validity range must end before the given POSIX time.
    Before(i64),
}

/// Requirements on a transaction output.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputConstraint {
    /// Required destination.
    pub address: AddressMatch,
    /// Required value.
    pub value: ValueMatch,
    /// Required datum.
    pub datum: DatumMatch,
    /// Required reference script hash, if any.
    #[serde(default)]
    pub reference_script: Option<ScriptHash>,
}

/// An address requirement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressMatch {
    /// The full address must match.
    Address(Address),
    /// Only the payment credential must match.
    Credential(Credential),
    /// No requirement.
    #[default]
    Unconstrained,
}

/// A value requirement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueMatch {
    /// The asset must be present with exactly this quantity.
    Exact(AssetAmount),
    /// The asset must be present in any quantity.
    Asset {
        /// The minting policy.
        policy: PolicyId,
        /// The asset name under the policy.
        asset_name: AssetName,
    },
    /// No requirement.
    #[default]
    Unconstrained,
}

/// A datum requirement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatumMatch {
    /// The inline datum must equal this data.
    Data(PlutusData),
    /// A pair of raw byte strings checked by the consumer.
    Raw(
        #[serde(with = "crate::serde")] Vec<u8>,
        #[serde(with = "crate::serde")] Vec<u8>,
    ),
    /// No requirement.
    #[default]
    Unconstrained,
}

/// A requirement on the redeemer of another script.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RedeemerConstraint {
    /// Which script's redeemer.
    pub purpose: ScriptPurpose,
    /// Field indices to walk into the redeemer.
    #[serde(default)]
    pub field_path: Vec<u64>,
    /// The value expected at the end of the path, if any.
    #[serde(default)]
    pub expected: Option<PlutusData>,
}

/// A requirement on a spent or reference input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputConstraint {
    /// Required address.
    pub address: AddressMatch,
    /// Minimum quantities of assets the input must hold.
    #[serde(default)]
    pub value: Vec<AssetAmount>,
    /// Field indices to walk into the input's datum.
    #[serde(default)]
    pub datum_field: Vec<u64>,
    /// The exact output being consumed, if any.
    #[serde(default)]
    pub output_ref: Option<OutputRef>,
}

/// A positive quantity of one asset.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetAmount {
    /// The minting policy.
    pub policy: PolicyId,
    /// The asset name under the policy.
    pub asset_name: AssetName,
    /// The quantity.
    pub quantity: NonZeroU64,
}

/// The reason a script runs in a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptPurpose {
    /// A minting policy.
    Mint(PolicyId),
    /// A spending validator for the given output.
    Spend(OutputRef),
    /// A withdrawal validator for the given credential.
    Withdraw(Credential),
}

impl Intent {
    /// An intent with no constraints and nothing leaving the account.
    pub fn new(nonce: Nonce) -> Self {
        Self {
            constraints: Vec::new(),
            value_leaving: ValueLeaving::default(),
            nonce,
        }
    }
}

impl ValueLeaving {
    /// Only lovelace leaves the account.
    pub fn lovelace(lovelace: u64) -> Self {
        Self {
            lovelace,
            assets: Assets::new(),
        }
    }
}

impl OutputConstraint {
    /// An output constraint that only requires the given address.
    pub fn to_address(address: AddressMatch) -> Self {
        Self {
            address,
            value: ValueMatch::Unconstrained,
            datum: DatumMatch::Unconstrained,
            reference_script: None,
        }
    }
}
