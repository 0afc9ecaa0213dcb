//! Signed intentions and the redeemer that carries them on-chain.

use crate::{
    intent::{encode_intent, Intent},
    plutus::{self, expect_constr, DecodeError, FromPlutusData, ToPlutusData},
    Hash28, PlutusData, Signature,
};
use serde::{Deserialize, Serialize};

/// An intent together with the detached signatures over its carrier.
///
/// `prefix ++ encode_intent(&intent) ++ postfix` is the carrier encoding the
/// signatures were produced over.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignedIntention {
    /// The stake credential of the owning account.
    pub user_stake: Hash28,
    /// The signed intent.
    pub intent: Intent,
    /// Carrier bytes before the encoded intent.
    #[serde(with = "crate::serde")]
    pub prefix: Vec<u8>,
    /// Carrier bytes after the encoded intent.
    #[serde(with = "crate::serde")]
    pub postfix: Vec<u8>,
    /// One signature per required signer, in signer order.
    pub signatures: Vec<Signature>,
}

/// The redeemer an on-chain consumer receives alongside a batch of signed
/// intentions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntentionRedeemer {
    /// The intentions being executed.
    pub intentions: Vec<SignedIntention>,
    /// Opaque grouping data interpreted by the consumer.
    #[serde(default, with = "crate::serde::seq")]
    pub intention_groups: Vec<Vec<u8>>,
    /// Index of the change output.
    #[serde(default)]
    pub change_output: u64,
    /// Index of the first constrained output.
    #[serde(default)]
    pub constraint_output: u64,
    /// Index of the first constrained redeemer.
    #[serde(default)]
    pub constraint_redeemer: u64,
}

impl SignedIntention {
    /// The carrier encoding the signatures were produced over.
    pub fn carrier(&self) -> Vec<u8> {
        let payload = encode_intent(&self.intent);
        let mut carrier =
            Vec::with_capacity(self.prefix.len() + payload.len() + self.postfix.len());
        carrier.extend_from_slice(&self.prefix);
        carrier.extend_from_slice(&payload);
        carrier.extend_from_slice(&self.postfix);
        carrier
    }
}

/// Encode a signed intention into its canonical bytes.
pub fn encode_signed_intention(signed: &SignedIntention) -> Vec<u8> {
    plutus::encode(&signed.to_plutus_data())
}

/// Decode a signed intention from its canonical bytes.
pub fn decode_signed_intention(bytes: &[u8]) -> Result<SignedIntention, DecodeError> {
    plutus::decode_canonical(bytes)
}

/// Encode a redeemer into its canonical bytes.
pub fn encode_redeemer(redeemer: &IntentionRedeemer) -> Vec<u8> {
    plutus::encode(&redeemer.to_plutus_data())
}

/// Decode a redeemer from its canonical bytes.
pub fn decode_redeemer(bytes: &[u8]) -> Result<IntentionRedeemer, DecodeError> {
    plutus::decode_canonical(bytes)
}

impl ToPlutusData for SignedIntention {
    fn to_plutus_data(&self) -> PlutusData {
        PlutusData::constr(
            0,
            vec![
                self.user_stake.to_plutus_data(),
                self.intent.to_plutus_data(),
                PlutusData::bytes(&self.prefix),
                PlutusData::bytes(&self.postfix),
                self.signatures.to_plutus_data(),
            ],
        )
    }
}

impl FromPlutusData for SignedIntention {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        let [user_stake, intent, prefix, postfix, signatures] =
            expect_constr(data, "signed intention", 0)?;
        Ok(SignedIntention {
            user_stake: Hash28::from_plutus_data(user_stake)?,
            intent: Intent::from_plutus_data(intent)?,
            prefix: prefix.as_bytes("prefix")?.to_vec(),
            postfix: postfix.as_bytes("postfix")?.to_vec(),
            signatures: FromPlutusData::from_plutus_data(signatures)?,
        })
    }
}

impl ToPlutusData for IntentionRedeemer {
    fn to_plutus_data(&self) -> PlutusData {
        let groups = self.intention_groups.iter().map(PlutusData::bytes).collect();
        PlutusData::constr(
            0,
            vec![
                self.intentions.to_plutus_data(),
                PlutusData::List(groups),
                self.change_output.to_plutus_data(),
                self.constraint_output.to_plutus_data(),
                self.constraint_redeemer.to_plutus_data(),
            ],
        )
    }
}

impl FromPlutusData for IntentionRedeemer {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        let [intentions, groups, change_output, constraint_output, constraint_redeemer] =
            expect_constr(data, "intention redeemer", 0)?;
        let intention_groups = groups
            .as_list("intention groups")?
            .iter()
            .map(|group| group.as_bytes("intention group").map(<[u8]>::to_vec))
            .collect::<Result<_, _>>()?;
        Ok(IntentionRedeemer {
            intentions: FromPlutusData::from_plutus_data(intentions)?,
            intention_groups,
            change_output: change_output.as_u64("change output")?,
            constraint_output: constraint_output.as_u64("constraint output")?,
            constraint_redeemer: constraint_redeemer.as_u64("constraint redeemer")?,
        })
    }
}
