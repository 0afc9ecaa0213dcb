use bullet_types::{AssetName, Hash28, Signature, TxHash};
use prop::test_runner::FileFailurePersistence;
use proptest::{prelude::*, test_runner::Config};

fn signature_bytes() -> impl Strategy<Value = [u8; 64]> {
    prop::collection::vec(any::<u8>(), 64).prop_map(|bytes| bytes.try_into().unwrap())
}

proptest! {
    #![proptest_config(Config::with_failure_persistence(FileFailurePersistence::WithSource("regressions")))]

    #[test]
    fn hash28_roundtrip(bytes in any::<[u8; 28]>()) {
        let hash = Hash28(bytes);

        // `fmt::LowerHex`
        let lower_hex = format!("{hash:x}");
        // `fmt::UpperHex`
        let upper_hex = format!("{hash:X}");
        // `fmt::Display`
        let display = format!("{hash}");

        let parsed: Hash28 = display.parse().unwrap();

        prop_assert_eq!(parsed, hash);
        prop_assert_eq!(lower_hex.len(), 56);
        prop_assert_eq!(upper_hex.len(), 56);
        prop_assert_eq!(upper_hex.to_lowercase(), lower_hex.clone());
        prop_assert_eq!(display, lower_hex);
    }

    #[test]
    fn tx_hash_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = TxHash(bytes);
        let display = format!("{hash}");
        let parsed: TxHash = display.parse().unwrap();
        prop_assert_eq!(parsed, hash);
        prop_assert_eq!(display.len(), 64);
    }

    #[test]
    fn signature_roundtrip(bytes in signature_bytes()) {
        let sig = Signature(bytes);

        // `fmt::LowerHex`
        let lower_hex = format!("{sig:x}");
        // `fmt::UpperHex`
        let upper_hex = format!("{sig:X}");
        // `fmt::Display`
        let display = format!("{sig}");

        let parsed: Signature = display.parse().unwrap();

        prop_assert_eq!(parsed, sig);
        prop_assert_eq!(lower_hex.len(), 128);
        prop_assert_eq!(upper_hex.len(), 128);
        prop_assert_eq!(upper_hex.to_lowercase(), lower_hex);
    }

    #[test]
    fn asset_name_display(bytes in prop::collection::vec(any::<u8>(), 0..=32)) {
        let name = AssetName::new(bytes.clone()).unwrap();
        prop_assert_eq!(format!("{name}"), hex::encode(&bytes));
    }
}

#[test]
fn parse_rejects_wrong_length() {
    assert!("00".parse::<Hash28>().is_err());
    assert!("zz".repeat(28).parse::<Hash28>().is_err());
    assert!(AssetName::new(vec![0; 33]).is_err());
}
