//! # Decoding
//! Parsing of intent types from [`PlutusData`], checking every schema bound.

use super::{
    AddressMatch, AssetAmount, Assets, Constraint, DatumMatch, InputConstraint, Intent, Nonce,
    OutputConstraint, RedeemerConstraint, ScriptPurpose, ValueLeaving, ValueMatch,
};
use crate::{
    plutus::{self, expect_constr, expect_tuple, DecodeError, FromPlutusData},
    Address, AssetName, Credential, Hash28, OutputRef, PlutusData, PolicyId,
};
use std::collections::BTreeMap;

/// Decode an intent from its canonical bytes.
///
/// Anything [`encode_intent`](super::encode_intent) would not have produced
/// is rejected, including alternative framings of the same value.
pub fn decode_intent(bytes: &[u8]) -> Result<Intent, DecodeError> {
    plutus::decode_canonical(bytes)
}

/// Reject anything but `Constr 2 []` for the third variant of a match type.
fn expect_unconstrained(data: &PlutusData, field: &'static str) -> Result<(), DecodeError> {
    expect_constr::<0>(data, field, 2).map(|_| ())
}

/// The single field of a one-field variant with the given tag.
fn single<'a>(
    data: &'a PlutusData,
    field: &'static str,
    tag: u64,
) -> Result<&'a PlutusData, DecodeError> {
    let [value] = expect_constr(data, field, tag)?;
    Ok(value)
}

impl FromPlutusData for Intent {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        let [constraints, value_leaving, nonce] = expect_constr(data, "intent", 0)?;
        Ok(Intent {
            constraints: FromPlutusData::from_plutus_data(constraints)?,
            value_leaving: ValueLeaving::from_plutus_data(value_leaving)?,
            nonce: Nonce::from_plutus_data(nonce)?,
        })
    }
}

impl FromPlutusData for ValueLeaving {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        let [lovelace, assets] = expect_tuple(data, "value leaving")?;
        Ok(ValueLeaving {
            lovelace: lovelace.as_u64("lovelace")?,
            assets: assets_from_plutus_data(assets)?,
        })
    }
}

/// Parse an asset map whose keys must be strictly ascending at both levels.
fn assets_from_plutus_data(data: &PlutusData) -> Result<Assets, DecodeError> {
    let mut assets = Assets::new();
    for (policy, names) in data.as_map("assets")? {
        let policy = PolicyId::from_plutus_data(policy)?;
        let mut quantities = BTreeMap::new();
        for (name, quantity) in names.as_map("asset quantities")? {
            let name = AssetName::from_plutus_data(name)?;
            if quantities.last_key_value().is_some_and(|(last, _)| *last >= name) {
                return Err(DecodeError::NonCanonical);
            }
            quantities.insert(name, quantity.as_positive("asset quantity")?);
        }
        if assets.last_key_value().is_some_and(|(last, _)| *last >= policy) {
            return Err(DecodeError::NonCanonical);
        }
        assets.insert(policy, quantities);
    }
    Ok(assets)
}

impl FromPlutusData for Nonce {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        match data.as_constr("nonce")?.0 {
            0 => Ok(Nonce::Sequential(single(data, "nonce", 0)?.as_positive("sequential nonce")?)),
            1 => Ok(Nonce::Parallel(OutputRef::from_plutus_data(single(data, "nonce", 1)?)?)),
            tag => Err(DecodeError::InvalidConstructor { field: "nonce", tag }),
        }
    }
}

impl FromPlutusData for Constraint {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        const FIELD: &str = "constraint";
        let constraint = match data.as_constr(FIELD)?.0 {
            0 => Constraint::Output(OutputConstraint::from_plutus_data(single(data, FIELD, 0)?)?),
            1 => Constraint::Signed(Hash28::from_plutus_data(single(data, FIELD, 1)?)?),
            2 => {
                let [purpose, field_path, expected] = expect_constr(data, FIELD, 2)?;
                Constraint::Redeemer(RedeemerConstraint {
                    purpose: ScriptPurpose::from_plutus_data(purpose)?,
                    field_path: field_path_from_plutus_data(field_path)?,
                    expected: FromPlutusData::from_plutus_data(expected)?,
                })
            }
            3 => Constraint::ReferenceInput(InputConstraint::from_plutus_data(single(
                data, FIELD, 3,
            )?)?),
            4 => Constraint::Input(InputConstraint::from_plutus_data(single(data, FIELD, 4)?)?),
            5 => {
                let [policy, asset_name, quantity] = expect_constr(data, FIELD, 5)?;
                Constraint::Mint(AssetAmount {
                    policy: PolicyId::from_plutus_data(policy)?,
                    asset_name: AssetName::from_plutus_data(asset_name)?,
                    quantity: quantity.as_positive("mint quantity")?,
                })
            }
            6 => Constraint::After(single(data, FIELD, 6)?.as_i64("after")?),
            7 => Constraint::Before(single(data, FIELD, 7)?.as_i64("before")?),
            tag => return Err(DecodeError::InvalidConstructor { field: FIELD, tag }),
        };
        Ok(constraint)
    }
}

fn field_path_from_plutus_data(data: &PlutusData) -> Result<Vec<u64>, DecodeError> {
    data.as_list("field path")?
        .iter()
        .map(|index| index.as_u64("field index"))
        .collect()
}

impl FromPlutusData for OutputConstraint {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        let [address, value, datum, reference_script] =
            expect_constr(data, "output constraint", 0)?;
        Ok(OutputConstraint {
            address: AddressMatch::from_plutus_data(address)?,
            value: ValueMatch::from_plutus_data(value)?,
            datum: DatumMatch::from_plutus_data(datum)?,
            reference_script: FromPlutusData::from_plutus_data(reference_script)?,
        })
    }
}

impl FromPlutusData for AddressMatch {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        const FIELD: &str = "address match";
        match data.as_constr(FIELD)?.0 {
            0 => Ok(AddressMatch::Address(Address::from_plutus_data(single(data, FIELD, 0)?)?)),
            1 => Ok(AddressMatch::Credential(Credential::from_plutus_data(single(
                data, FIELD, 1,
            )?)?)),
            _ => expect_unconstrained(data, FIELD).map(|()| AddressMatch::Unconstrained),
        }
    }
}

impl FromPlutusData for ValueMatch {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        const FIELD: &str = "value match";
        match data.as_constr(FIELD)?.0 {
            0 => {
                let [policy, pair] = expect_tuple(single(data, FIELD, 0)?, FIELD)?;
                let [asset_name, quantity] = expect_tuple(pair, FIELD)?;
                Ok(ValueMatch::Exact(AssetAmount {
                    policy: PolicyId::from_plutus_data(policy)?,
                    asset_name: AssetName::from_plutus_data(asset_name)?,
                    quantity: quantity.as_positive("exact quantity")?,
                }))
            }
            1 => {
                let [policy, asset_name] = expect_tuple(single(data, FIELD, 1)?, FIELD)?;
                Ok(ValueMatch::Asset {
                    policy: PolicyId::from_plutus_data(policy)?,
                    asset_name: AssetName::from_plutus_data(asset_name)?,
                })
            }
            _ => expect_unconstrained(data, FIELD).map(|()| ValueMatch::Unconstrained),
        }
    }
}

impl FromPlutusData for DatumMatch {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        const FIELD: &str = "datum match";
        match data.as_constr(FIELD)?.0 {
            0 => Ok(DatumMatch::Data(single(data, FIELD, 0)?.clone())),
            1 => {
                let [a, b] = expect_tuple(single(data, FIELD, 1)?, FIELD)?;
                Ok(DatumMatch::Raw(
                    a.as_bytes("raw datum")?.to_vec(),
                    b.as_bytes("raw datum")?.to_vec(),
                ))
            }
            _ => expect_unconstrained(data, FIELD).map(|()| DatumMatch::Unconstrained),
        }
    }
}

impl FromPlutusData for InputConstraint {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        let [address, value, datum_field, output_ref] =
            expect_constr(data, "input constraint", 0)?;
        let value = value
            .as_list("input value")?
            .iter()
            .map(|entry| -> Result<_, DecodeError> {
                let [policy, asset_name, quantity] = expect_tuple(entry, "input value")?;
                Ok(AssetAmount {
                    policy: PolicyId::from_plutus_data(policy)?,
                    asset_name: AssetName::from_plutus_data(asset_name)?,
                    quantity: quantity.as_positive("minimum quantity")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(InputConstraint {
            address: AddressMatch::from_plutus_data(address)?,
            value,
            datum_field: field_path_from_plutus_data(datum_field)?,
            output_ref: FromPlutusData::from_plutus_data(output_ref)?,
        })
    }
}

impl FromPlutusData for ScriptPurpose {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        const FIELD: &str = "script purpose";
        match data.as_constr(FIELD)?.0 {
            0 => Ok(ScriptPurpose::Mint(PolicyId::from_plutus_data(single(data, FIELD, 0)?)?)),
            1 => Ok(ScriptPurpose::Spend(OutputRef::from_plutus_data(single(data, FIELD, 1)?)?)),
            2 => Ok(ScriptPurpose::Withdraw(Credential::from_plutus_data(single(
                data, FIELD, 2,
            )?)?)),
            tag => Err(DecodeError::InvalidConstructor { field: FIELD, tag }),
        }
    }
}

impl FromPlutusData for Credential {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        const FIELD: &str = "credential";
        match data.as_constr(FIELD)?.0 {
            0 => Ok(Credential::VerificationKey(Hash28::from_plutus_data(single(data, FIELD, 0)?)?)),
            1 => Ok(Credential::Script(Hash28::from_plutus_data(single(data, FIELD, 1)?)?)),
            tag => Err(DecodeError::InvalidConstructor { field: FIELD, tag }),
        }
    }
}

impl FromPlutusData for Address {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        let [payment, stake] = expect_constr(data, "address", 0)?;
        let stake: Option<PlutusData> = FromPlutusData::from_plutus_data(stake)?;
        let stake_credential = stake
            .map(|inline| Credential::from_plutus_data(single(&inline, "stake credential", 0)?))
            .transpose()?;
        Ok(Address {
            payment_credential: Credential::from_plutus_data(payment)?,
            stake_credential,
        })
    }
}
