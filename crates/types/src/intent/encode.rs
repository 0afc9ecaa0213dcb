//! # Encoding
//! Mapping of intent types onto [`PlutusData`].
//!
//! | Type | Layout |
//! | --- | --- |
//! | `Intent` | `Constr 0 [constraints, [lovelace, assets], nonce]` |
//! | `Nonce` | `Sequential n` = `Constr 0 [n]`, `Parallel r` = `Constr 1 [r]` |
//! | `Constraint` | `Constr i [fields]`, `i` in declaration order |
//! | `OutputConstraint` | `Constr 0 [address, value, datum, Option script]` |
//! | `InputConstraint` | `Constr 0 [address, [[policy, name, qty]], [int], Option ref]` |
//! | match types | `Constr 0 [x]`, `Constr 1 [y]` or `Constr 2 []` |
//! | `ScriptPurpose` | `Mint` 0, `Spend` 1, `Withdraw` 2 |
//! | `Credential` | `VerificationKey` 0, `Script` 1 |
//! | `Address` | `Constr 0 [payment, Option (Constr 0 [stake])]` |

use super::{
    AddressMatch, Assets, Constraint, DatumMatch, InputConstraint, Intent, Nonce,
    OutputConstraint, ScriptPurpose, ValueLeaving, ValueMatch,
};
use crate::{
    plutus::{self, ToPlutusData},
    Address, Credential, PlutusData,
};

/// Encode an intent into its canonical bytes.
///
/// The encoding is a pure function of the intent: equal intents always
/// produce equal bytes.
pub fn encode_intent(intent: &Intent) -> Vec<u8> {
    plutus::encode(&intent.to_plutus_data())
}

/// The third variant of the three-way match types, `Constr 2 []`.
fn unconstrained() -> PlutusData {
    PlutusData::constr(2, vec![])
}

impl ToPlutusData for Intent {
    fn to_plutus_data(&self) -> PlutusData {
        PlutusData::constr(
            0,
            vec![
                self.constraints.to_plutus_data(),
                self.value_leaving.to_plutus_data(),
                self.nonce.to_plutus_data(),
            ],
        )
    }
}

impl ToPlutusData for ValueLeaving {
    fn to_plutus_data(&self) -> PlutusData {
        PlutusData::List(vec![
            self.lovelace.to_plutus_data(),
            assets_to_plutus_data(&self.assets),
        ])
    }
}

fn assets_to_plutus_data(assets: &Assets) -> PlutusData {
    let policies = assets
        .iter()
        .map(|(policy, names)| {
            let names = names
                .iter()
                .map(|(name, quantity)| (name.to_plutus_data(), quantity.to_plutus_data()))
                .collect();
            (policy.to_plutus_data(), PlutusData::Map(names))
        })
        .collect();
    PlutusData::Map(policies)
}

impl ToPlutusData for Nonce {
    fn to_plutus_data(&self) -> PlutusData {
        match self {
            Nonce::Sequential(n) => PlutusData::constr(0, vec![n.to_plutus_data()]),
            Nonce::Parallel(output) => PlutusData::constr(1, vec![output.to_plutus_data()]),
        }
    }
}

impl ToPlutusData for Constraint {
    fn to_plutus_data(&self) -> PlutusData {
        // Tuple variants are flattened into the constructor's fields.
        let (tag, fields) = match self {
            Constraint::Output(c) => (0, vec![c.to_plutus_data()]),
            Constraint::Signed(hash) => (1, vec![hash.to_plutus_data()]),
            Constraint::Redeemer(c) => (
                2,
                vec![
                    c.purpose.to_plutus_data(),
                    c.field_path.to_plutus_data(),
                    c.expected.to_plutus_data(),
                ],
            ),
            Constraint::ReferenceInput(c) => (3, vec![c.to_plutus_data()]),
            Constraint::Input(c) => (4, vec![c.to_plutus_data()]),
            Constraint::Mint(amount) => (
                5,
                vec![
                    amount.policy.to_plutus_data(),
                    amount.asset_name.to_plutus_data(),
                    amount.quantity.to_plutus_data(),
                ],
            ),
            Constraint::After(time) => (6, vec![time.to_plutus_data()]),
            Constraint::Before(time) => (7, vec![time.to_plutus_data()]),
        };
        PlutusData::constr(tag, fields)
    }
}

impl ToPlutusData for OutputConstraint {
    fn to_plutus_data(&self) -> PlutusData {
        PlutusData::constr(
            0,
            vec![
                self.address.to_plutus_data(),
                self.value.to_plutus_data(),
                self.datum.to_plutus_data(),
                self.reference_script.to_plutus_data(),
            ],
        )
    }
}

impl ToPlutusData for AddressMatch {
    fn to_plutus_data(&self) -> PlutusData {
        match self {
            AddressMatch::Address(address) => PlutusData::constr(0, vec![address.to_plutus_data()]),
            AddressMatch::Credential(cred) => PlutusData::constr(1, vec![cred.to_plutus_data()]),
            AddressMatch::Unconstrained => unconstrained(),
        }
    }
}

impl ToPlutusData for ValueMatch {
    fn to_plutus_data(&self) -> PlutusData {
        match self {
            ValueMatch::Exact(amount) => {
                let pair = PlutusData::List(vec![
                    amount.asset_name.to_plutus_data(),
                    amount.quantity.to_plutus_data(),
                ]);
                let payload = PlutusData::List(vec![amount.policy.to_plutus_data(), pair]);
                PlutusData::constr(0, vec![payload])
            }
            ValueMatch::Asset { policy, asset_name } => {
                let payload =
                    PlutusData::List(vec![policy.to_plutus_data(), asset_name.to_plutus_data()]);
                PlutusData::constr(1, vec![payload])
            }
            ValueMatch::Unconstrained => unconstrained(),
        }
    }
}

impl ToPlutusData for DatumMatch {
    fn to_plutus_data(&self) -> PlutusData {
        match self {
            DatumMatch::Data(data) => PlutusData::constr(0, vec![data.clone()]),
            DatumMatch::Raw(a, b) => {
                let payload = PlutusData::List(vec![PlutusData::bytes(a), PlutusData::bytes(b)]);
                PlutusData::constr(1, vec![payload])
            }
            DatumMatch::Unconstrained => unconstrained(),
        }
    }
}

impl ToPlutusData for InputConstraint {
    fn to_plutus_data(&self) -> PlutusData {
        let value = self
            .value
            .iter()
            .map(|amount| {
                PlutusData::List(vec![
                    amount.policy.to_plutus_data(),
                    amount.asset_name.to_plutus_data(),
                    amount.quantity.to_plutus_data(),
                ])
            })
            .collect();
        PlutusData::constr(
            0,
            vec![
                self.address.to_plutus_data(),
                PlutusData::List(value),
                self.datum_field.to_plutus_data(),
                self.output_ref.to_plutus_data(),
            ],
        )
    }
}

impl ToPlutusData for ScriptPurpose {
    fn to_plutus_data(&self) -> PlutusData {
        match self {
            ScriptPurpose::Mint(policy) => PlutusData::constr(0, vec![policy.to_plutus_data()]),
            ScriptPurpose::Spend(output) => PlutusData::constr(1, vec![output.to_plutus_data()]),
            ScriptPurpose::Withdraw(cred) => PlutusData::constr(2, vec![cred.to_plutus_data()]),
        }
    }
}

impl ToPlutusData for Credential {
    fn to_plutus_data(&self) -> PlutusData {
        match self {
            Credential::VerificationKey(hash) => PlutusData::constr(0, vec![hash.to_plutus_data()]),
            Credential::Script(hash) => PlutusData::constr(1, vec![hash.to_plutus_data()]),
        }
    }
}

impl ToPlutusData for Address {
    fn to_plutus_data(&self) -> PlutusData {
        // Stake credentials are always inline.
        let stake = self
            .stake_credential
            .map(|cred| PlutusData::constr(0, vec![cred.to_plutus_data()]));
        PlutusData::constr(
            0,
            vec![self.payment_credential.to_plutus_data(), stake.to_plutus_data()],
        )
    }
}
