use super::*;
use crate::{plutus::ToPlutusData, TxHash};

fn bytes(hex: &str) -> Vec<u8> {
    hex::decode(hex).unwrap()
}

fn positive(n: u64) -> NonZeroU64 {
    NonZeroU64::new(n).unwrap()
}

fn asset(name: &[u8]) -> AssetName {
    AssetName::new(name).unwrap()
}

fn key(byte: u8) -> Credential {
    Credential::VerificationKey(Hash28([byte; 28]))
}

const MINIMAL: &str = "d8799f809f00a0ffd8799f01ffff";

#[test]
fn minimal_intent() {
    let intent = Intent::new(Nonce::Sequential(positive(1)));
    assert_eq!(hex::encode(encode_intent(&intent)), MINIMAL);
    assert_eq!(decode_intent(&bytes(MINIMAL)).unwrap(), intent);
}

#[test]
fn single_output_constraint() {
    let intent = Intent {
        constraints: vec![Constraint::Output(OutputConstraint::to_address(
            AddressMatch::Credential(key(0x11)),
        ))],
        value_leaving: ValueLeaving::lovelace(5_000_000),
        nonce: Nonce::Sequential(positive(1)),
    };
    let expected = concat!(
        "d8799f",
        "9f",
        "d8799f",
        "d8799f",
        // SomeTwo(VerificationKey(h))
        "d87a9fd8799f581c11111111111111111111111111111111111111111111111111111111ffff",
        // value, datum: Nada
        "d87b80d87b80",
        // ref: Nope
        "d87a80",
        "ffff",
        "ff",
        "9f1a004c4b40a0ff",
        "d8799f01ff",
        "ff",
    );
    assert_eq!(hex::encode(encode_intent(&intent)), expected);
    assert_eq!(decode_intent(&bytes(expected)).unwrap(), intent);
}

#[test]
fn parallel_nonce() {
    let intent = Intent::new(Nonce::Parallel(OutputRef {
        tx_id: TxHash([0xab; 32]),
        output_index: 3,
    }));
    let expected = concat!(
        "d8799f809f00a0ff",
        "d87a9fd8799f5820",
        "abababababababababababababababababababababababababababababababab",
        "03ffffff",
    );
    assert_eq!(hex::encode(encode_intent(&intent)), expected);
}

#[test]
fn nonces_change_the_bytes() {
    let one = Intent::new(Nonce::Sequential(positive(1)));
    let two = Intent::new(Nonce::Sequential(positive(2)));
    assert_ne!(encode_intent(&one), encode_intent(&two));
}

#[test]
fn assets_are_emitted_in_key_order() {
    let mut value = ValueLeaving::lovelace(0);
    value
        .assets
        .entry(Hash28([2; 28]))
        .or_default()
        .insert(asset(b"b"), positive(1));
    value
        .assets
        .entry(Hash28([1; 28]))
        .or_default()
        .insert(asset(b"z"), positive(2));
    value
        .assets
        .entry(Hash28([1; 28]))
        .or_default()
        .insert(asset(b"a"), positive(3));

    let PlutusData::List(items) = value.to_plutus_data() else {
        panic!("value leaving is a tuple");
    };
    let PlutusData::Map(policies) = &items[1] else {
        panic!("assets are a map");
    };
    assert_eq!(policies[0].0, PlutusData::bytes([1; 28]));
    assert_eq!(policies[1].0, PlutusData::bytes([2; 28]));
    assert_eq!(
        policies[0].1,
        PlutusData::Map(vec![
            (PlutusData::bytes(b"a"), PlutusData::Integer(3)),
            (PlutusData::bytes(b"z"), PlutusData::Integer(2)),
        ])
    );
}

#[test]
fn tuple_variants_are_flattened() {
    let redeemer = Constraint::Redeemer(RedeemerConstraint {
        purpose: ScriptPurpose::Withdraw(Credential::Script(Hash28([9; 28]))),
        field_path: vec![0, 2],
        expected: None,
    });
    let PlutusData::Constr { tag, fields } = redeemer.to_plutus_data() else {
        panic!("constraints are constructors");
    };
    assert_eq!(tag, 2);
    assert_eq!(fields.len(), 3);
    assert_eq!(
        fields[1],
        PlutusData::List(vec![PlutusData::Integer(0), PlutusData::Integer(2)])
    );

    let mint = Constraint::Mint(AssetAmount {
        policy: Hash28([4; 28]),
        asset_name: asset(b"token"),
        quantity: positive(10),
    });
    let PlutusData::Constr { tag, fields } = mint.to_plutus_data() else {
        panic!("constraints are constructors");
    };
    assert_eq!(tag, 5);
    assert_eq!(fields.len(), 3);
}

#[test]
fn before_uses_the_large_constructor_tag() {
    let mut intent = Intent::new(Nonce::Sequential(positive(1)));
    intent.constraints.push(Constraint::Before(-1));
    // 1280 + (7 - 7), then [-1]
    assert_eq!(
        hex::encode(encode_intent(&intent)),
        "d8799f9fd905009f20ffff9f00a0ffd8799f01ffff"
    );
}

#[test]
fn every_variant_round_trips() {
    let output_ref = OutputRef {
        tx_id: TxHash([7; 32]),
        output_index: 0,
    };
    let amount = AssetAmount {
        policy: Hash28([5; 28]),
        asset_name: asset(&[0xff; 32]),
        quantity: positive(u64::MAX),
    };
    let mut value_leaving = ValueLeaving::lovelace(u64::MAX);
    value_leaving
        .assets
        .entry(amount.policy)
        .or_default()
        .insert(asset(b""), positive(1));
    let intent = Intent {
        constraints: vec![
            Constraint::Output(OutputConstraint {
                address: AddressMatch::Address(Address::base(
                    key(1),
                    Credential::Script(Hash28([2; 28])),
                )),
                value: ValueMatch::Exact(amount.clone()),
                datum: DatumMatch::Data(PlutusData::Map(vec![(
                    PlutusData::Integer(-42),
                    PlutusData::bytes([0u8; 100]),
                )])),
                reference_script: Some(Hash28([3; 28])),
            }),
            Constraint::Output(OutputConstraint {
                address: AddressMatch::Address(Address::enterprise(key(1))),
                value: ValueMatch::Asset {
                    policy: amount.policy,
                    asset_name: amount.asset_name.clone(),
                },
                datum: DatumMatch::Raw(vec![1, 2], vec![]),
                reference_script: None,
            }),
            Constraint::Signed(Hash28([6; 28])),
            Constraint::Redeemer(RedeemerConstraint {
                purpose: ScriptPurpose::Spend(output_ref),
                field_path: vec![],
                expected: Some(PlutusData::constr(300, vec![])),
            }),
            Constraint::Redeemer(RedeemerConstraint {
                purpose: ScriptPurpose::Mint(amount.policy),
                field_path: vec![1],
                expected: None,
            }),
            Constraint::ReferenceInput(InputConstraint {
                address: AddressMatch::Credential(key(8)),
                value: vec![amount.clone()],
                datum_field: vec![0, 1, 2],
                output_ref: Some(output_ref),
            }),
            Constraint::Input(InputConstraint::default()),
            Constraint::Mint(amount),
            Constraint::After(i64::MIN),
            Constraint::Before(i64::MAX),
        ],
        value_leaving,
        nonce: Nonce::Parallel(output_ref),
    };
    let encoded = encode_intent(&intent);
    assert_eq!(decode_intent(&encoded).unwrap(), intent);
    assert_eq!(encode_intent(&intent), encoded);
}

#[test]
fn rejects_zero_sequential_nonce() {
    let zero = "d8799f809f00a0ffd8799f00ffff";
    assert!(matches!(
        decode_intent(&bytes(zero)),
        Err(DecodeError::IntegerOutOfRange { value: 0, .. })
    ));
}

#[test]
fn rejects_short_hash() {
    // Signed with a 27 byte hash.
    let short = format!("d8799f9fd87a9f581b{}ffff9f00a0ffd8799f01ffff", "11".repeat(27));
    assert!(matches!(
        decode_intent(&bytes(&short)),
        Err(DecodeError::InvalidLength {
            expected: 28,
            found: 27,
            ..
        })
    ));
}

#[test]
fn rejects_unknown_constraint() {
    // Constructor 8 with no fields.
    let unknown = "d8799f9fd9050180ff9f00a0ffd8799f01ffff";
    assert!(matches!(
        decode_intent(&bytes(unknown)),
        Err(DecodeError::InvalidConstructor { tag: 8, .. })
    ));
}

#[test]
fn rejects_long_asset_name() {
    let long = format!(
        "d8799f809f00a1581c{}a15821{}01ffd8799f01ffff",
        "01".repeat(28),
        "02".repeat(33)
    );
    assert!(matches!(
        decode_intent(&bytes(&long)),
        Err(DecodeError::AssetNameTooLong(_))
    ));
}

#[test]
fn rejects_zero_quantity() {
    let zero = format!(
        "d8799f809f00a1581c{}a1416100ffd8799f01ffff",
        "01".repeat(28)
    );
    assert!(matches!(
        decode_intent(&bytes(&zero)),
        Err(DecodeError::IntegerOutOfRange { value: 0, .. })
    ));
}

#[test]
fn rejects_unsorted_and_duplicate_keys() {
    let unsorted = format!(
        "d8799f809f00a2581c{}a1416101581c{}a1416101ffd8799f01ffff",
        "02".repeat(28),
        "01".repeat(28)
    );
    assert!(matches!(
        decode_intent(&bytes(&unsorted)),
        Err(DecodeError::NonCanonical)
    ));
    let duplicate = format!(
        "d8799f809f00a1581c{}a2416101416102ffd8799f01ffff",
        "01".repeat(28)
    );
    assert!(matches!(
        decode_intent(&bytes(&duplicate)),
        Err(DecodeError::NonCanonical)
    ));
}

#[test]
fn rejects_alternative_framings() {
    // The minimal intent with definite-length arrays throughout.
    let definite = "d87983808200a0d8798101";
    assert!(matches!(
        decode_intent(&bytes(definite)),
        Err(DecodeError::NonCanonical)
    ));
    // Lovelace as a two byte integer.
    let wide = "d8799f809f190000a0ffd8799f01ffff";
    assert!(matches!(
        decode_intent(&bytes(wide)),
        Err(DecodeError::NonCanonical)
    ));
}

#[test]
fn rejects_trailing_bytes() {
    let trailing = format!("{MINIMAL}00");
    assert!(matches!(
        decode_intent(&bytes(&trailing)),
        Err(DecodeError::Cbor(crate::plutus::CborError::TrailingBytes(1)))
    ));
}

#[test]
fn json_round_trip() {
    let intent = Intent {
        constraints: vec![
            Constraint::Signed(Hash28([6; 28])),
            Constraint::After(1_700_000_000_000),
        ],
        value_leaving: ValueLeaving::lovelace(2),
        nonce: Nonce::Sequential(positive(9)),
    };
    let json = serde_json::to_string(&intent).unwrap();
    let parsed: Intent = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, intent);
}

#[test]
fn datum_integers_are_limited_to_i128() {
    let with_datum = |data: PlutusData| Intent {
        constraints: vec![Constraint::Output(OutputConstraint {
            datum: DatumMatch::Data(data),
            ..OutputConstraint::to_address(AddressMatch::Unconstrained)
        })],
        value_leaving: ValueLeaving::lovelace(0),
        nonce: Nonce::Sequential(positive(1)),
    };

    for n in [i128::MAX, i128::MIN, 1 << 64, -(1 << 64) - 1] {
        let intent = with_datum(PlutusData::Integer(n));
        assert_eq!(decode_intent(&encode_intent(&intent)).unwrap(), intent);
    }

    // A 17 byte bignum in place of a 17 byte string.
    let encoded = hex::encode(encode_intent(&with_datum(PlutusData::bytes([0xee; 17]))));
    let string = format!("51{}", "ee".repeat(17));
    assert_eq!(encoded.matches(&string).count(), 1);
    let wide = encoded.replace(&string, &format!("c2{string}"));
    assert!(matches!(
        decode_intent(&bytes(&wide)),
        Err(DecodeError::Cbor(crate::plutus::CborError::BignumTooLarge(17)))
    ));
}
