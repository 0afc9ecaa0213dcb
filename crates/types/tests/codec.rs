use bullet_types::{
    intent::{
        decode_intent, encode_intent, AddressMatch, AssetAmount, Assets, Constraint, DatumMatch,
        InputConstraint, Intent, Nonce, OutputConstraint, RedeemerConstraint, ScriptPurpose,
        ValueLeaving, ValueMatch,
    },
    plutus::{self, PlutusData},
    signed::{decode_signed_intention, encode_signed_intention},
    Address, AssetName, Credential, Hash28, OutputRef, Signature, SignedIntention, TxHash,
};
use prop::test_runner::FileFailurePersistence;
use proptest::{prelude::*, test_runner::Config};
use std::num::NonZeroU64;

fn hash28() -> impl Strategy<Value = Hash28> {
    any::<[u8; 28]>().prop_map(Hash28)
}

fn signature_bytes() -> impl Strategy<Value = [u8; 64]> {
    prop::collection::vec(any::<u8>(), 64).prop_map(|bytes| bytes.try_into().unwrap())
}

fn positive() -> impl Strategy<Value = NonZeroU64> {
    (1..=u64::MAX).prop_map(|n| NonZeroU64::new(n).unwrap())
}

fn asset_name() -> impl Strategy<Value = AssetName> {
    prop::collection::vec(any::<u8>(), 0..=32).prop_map(|bytes| AssetName::new(bytes).unwrap())
}

fn output_ref() -> impl Strategy<Value = OutputRef> {
    (prop::array::uniform32(any::<u8>()), any::<u64>())
        .prop_map(|(tx_id, output_index)| OutputRef {
            tx_id: TxHash(tx_id),
            output_index,
        })
}

fn credential() -> impl Strategy<Value = Credential> {
    prop_oneof![
        hash28().prop_map(Credential::VerificationKey),
        hash28().prop_map(Credential::Script),
    ]
}

fn address() -> impl Strategy<Value = Address> {
    (credential(), prop::option::of(credential())).prop_map(|(payment, stake)| Address {
        payment_credential: payment,
        stake_credential: stake,
    })
}

fn amount() -> impl Strategy<Value = AssetAmount> {
    (hash28(), asset_name(), positive()).prop_map(|(policy, asset_name, quantity)| AssetAmount {
        policy,
        asset_name,
        quantity,
    })
}

fn plutus_data() -> impl Strategy<Value = PlutusData> {
    let leaf = prop_oneof![
        any::<i128>().prop_map(PlutusData::Integer),
        prop::collection::vec(any::<u8>(), 0..100).prop_map(PlutusData::Bytes),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            (0..300u64, prop::collection::vec(inner.clone(), 0..4))
                .prop_map(|(tag, fields)| PlutusData::Constr { tag, fields }),
            prop::collection::vec(inner.clone(), 0..4).prop_map(PlutusData::List),
            prop::collection::vec((inner.clone(), inner), 0..4).prop_map(PlutusData::Map),
        ]
    })
}

fn address_match() -> impl Strategy<Value = AddressMatch> {
    prop_oneof![
        address().prop_map(AddressMatch::Address),
        credential().prop_map(AddressMatch::Credential),
        Just(AddressMatch::Unconstrained),
    ]
}

fn value_match() -> impl Strategy<Value = ValueMatch> {
    prop_oneof![
        amount().prop_map(ValueMatch::Exact),
        (hash28(), asset_name())
            .prop_map(|(policy, asset_name)| ValueMatch::Asset { policy, asset_name }),
        Just(ValueMatch::Unconstrained),
    ]
}

fn datum_match() -> impl Strategy<Value = DatumMatch> {
    prop_oneof![
        plutus_data().prop_map(DatumMatch::Data),
        (
            prop::collection::vec(any::<u8>(), 0..70),
            prop::collection::vec(any::<u8>(), 0..70)
        )
            .prop_map(|(a, b)| DatumMatch::Raw(a, b)),
        Just(DatumMatch::Unconstrained),
    ]
}

fn input_constraint() -> impl Strategy<Value = InputConstraint> {
    (
        address_match(),
        prop::collection::vec(amount(), 0..3),
        prop::collection::vec(any::<u64>(), 0..3),
        prop::option::of(output_ref()),
    )
        .prop_map(|(address, value, datum_field, output_ref)| InputConstraint {
            address,
            value,
            datum_field,
            output_ref,
        })
}

fn script_purpose() -> impl Strategy<Value = ScriptPurpose> {
    prop_oneof![
        hash28().prop_map(ScriptPurpose::Mint),
        output_ref().prop_map(ScriptPurpose::Spend),
        credential().prop_map(ScriptPurpose::Withdraw),
    ]
}

fn constraint() -> impl Strategy<Value = Constraint> {
    prop_oneof![
        (
            address_match(),
            value_match(),
            datum_match(),
            prop::option::of(hash28())
        )
            .prop_map(|(address, value, datum, reference_script)| {
                Constraint::Output(OutputConstraint {
                    address,
                    value,
                    datum,
                    reference_script,
                })
            }),
        hash28().prop_map(Constraint::Signed),
        (
            script_purpose(),
            prop::collection::vec(any::<u64>(), 0..3),
            prop::option::of(plutus_data())
        )
            .prop_map(|(purpose, field_path, expected)| {
                Constraint::Redeemer(RedeemerConstraint {
                    purpose,
                    field_path,
                    expected,
                })
            }),
        input_constraint().prop_map(Constraint::ReferenceInput),
        input_constraint().prop_map(Constraint::Input),
        amount().prop_map(Constraint::Mint),
        any::<i64>().prop_map(Constraint::After),
        any::<i64>().prop_map(Constraint::Before),
    ]
}

fn assets() -> impl Strategy<Value = Assets> {
    prop::collection::btree_map(
        hash28(),
        prop::collection::btree_map(asset_name(), positive(), 0..3),
        0..3,
    )
}

fn intent() -> impl Strategy<Value = Intent> {
    (
        prop::collection::vec(constraint(), 0..4),
        any::<u64>(),
        assets(),
        prop_oneof![
            positive().prop_map(Nonce::Sequential),
            output_ref().prop_map(Nonce::Parallel),
        ],
    )
        .prop_map(|(constraints, lovelace, assets, nonce)| Intent {
            constraints,
            value_leaving: ValueLeaving { lovelace, assets },
            nonce,
        })
}

proptest! {
    #![proptest_config(Config::with_failure_persistence(FileFailurePersistence::WithSource("regressions")))]

    #[test]
    fn intent_round_trip(intent in intent()) {
        let bytes = encode_intent(&intent);
        let decoded = decode_intent(&bytes).unwrap();
        prop_assert_eq!(&decoded, &intent);
        prop_assert_eq!(encode_intent(&decoded), bytes);
    }

    #[test]
    fn encoding_is_deterministic(intent in intent()) {
        let clone = intent.clone();
        prop_assert_eq!(encode_intent(&intent), encode_intent(&clone));
    }

    #[test]
    fn plutus_data_round_trip(data in plutus_data()) {
        let bytes = plutus::encode(&data);
        prop_assert_eq!(plutus::decode(&bytes).unwrap(), data);
    }

    #[test]
    fn signed_intention_round_trip(
        intent in intent(),
        user_stake in hash28(),
        prefix in prop::collection::vec(any::<u8>(), 0..80),
        postfix in prop::collection::vec(any::<u8>(), 0..80),
        signatures in prop::collection::vec(signature_bytes(), 0..3),
    ) {
        let signed = SignedIntention {
            user_stake,
            intent,
            prefix,
            postfix,
            signatures: signatures.into_iter().map(Signature).collect(),
        };
        let bytes = encode_signed_intention(&signed);
        prop_assert_eq!(decode_signed_intention(&bytes).unwrap(), signed);
    }

    #[test]
    fn truncation_is_rejected(intent in intent(), cut in any::<prop::sample::Index>()) {
        let bytes = encode_intent(&intent);
        let len = cut.index(bytes.len());
        prop_assert!(decode_intent(&bytes[..len]).is_err());
    }
}
