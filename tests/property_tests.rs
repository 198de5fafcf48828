//! Property-based tests for the metadata codec and key material

use idemix_params::*;
use num_bigint::BigUint;
use proptest::prelude::*;

fn any_field() -> impl Strategy<Value = MetadataField> {
    prop::sample::select(METADATA_FIELDS.to_vec())
}

fn field_and_value() -> impl Strategy<Value = (MetadataField, Vec<u8>)> {
    any_field().prop_flat_map(|f| (Just(f), prop::collection::vec(any::<u8>(), 0..=f.length())))
}

// Property test: a value written into a field reads back right-aligned
proptest! {
    #[test]
    fn field_round_trip(
        (field, value) in field_and_value(),
        t in 0u64..(u64::from(u16::MAX) * EXPIRY_FACTOR),
    ) {
        let mut b = MetadataBuilder::new_at(t);
        b.set_field(field, &value).unwrap();
        let attr = b.build();

        let got = attr.field(field);
        let pad = field.length() - value.len();
        prop_assert!(got[..pad].iter().all(|&x| x == 0));
        prop_assert_eq!(&got[pad..], &value[..]);
    }
}

// Property test: writing one field never disturbs the others
proptest! {
    #[test]
    fn fields_are_independent(
        (field, value) in field_and_value(),
    ) {
        let before = MetadataBuilder::new_at(1_700_000_123).credential_identifier("x").build();
        let mut b = MetadataBuilder::new_at(1_700_000_123);
        b.credential_identifier("x");
        b.set_field(field, &value).unwrap();
        let after = b.build();
        for other in METADATA_FIELDS.into_iter().filter(|f| *f != field) {
            prop_assert_eq!(before.field(other), after.field(other));
        }
    }
}

// Property test: oversized values are rejected for every field
proptest! {
    #[test]
    fn overflow_rejected(field in any_field(), extra in 1usize..8) {
        let mut b = MetadataBuilder::new_at(0);
        let value = vec![0x5au8; field.length() + extra];
        prop_assert_eq!(
            b.set_field(field, &value).unwrap_err(),
            MetadataError::FieldOverflow { capacity: field.length(), got: field.length() + extra }
        );
    }
}

// Property test: signing date is the instant truncated to whole weeks
proptest! {
    #[test]
    fn signing_date_truncates_to_weeks(t in 0u64..(u64::from(u16::MAX) * EXPIRY_FACTOR)) {
        let attr = MetadataBuilder::new_at(t).build();
        prop_assert_eq!(attr.signing_date(), t - t % EXPIRY_FACTOR);
        prop_assert!(attr.signing_date() <= t);
        prop_assert!(t - attr.signing_date() < EXPIRY_FACTOR);
    }
}

// Property test: expiry arithmetic and its strict boundary
proptest! {
    #[test]
    fn expiry_boundary(
        t in 0u64..(u64::from(u16::MAX) * EXPIRY_FACTOR),
        weeks in any::<u16>(),
    ) {
        let attr = MetadataBuilder::new_at(t).validity_duration(weeks).build();
        let expiry = attr.expiry();
        prop_assert_eq!(expiry, attr.signing_date() + u64::from(weeks) * EXPIRY_FACTOR);
        if expiry > 0 {
            prop_assert!(attr.is_valid_on(expiry - 1));
        }
        prop_assert!(!attr.is_valid_on(expiry));
        prop_assert!(!attr.is_valid_on(expiry + 1));
    }
}

// Property test: the integer form round-trips, whatever the version byte
proptest! {
    #[test]
    fn integer_round_trip(bytes in prop::array::uniform24(any::<u8>())) {
        let attr = MetadataAttribute::try_from(&bytes[..]).unwrap();
        let value = attr.to_int();
        prop_assert_eq!(value.clone(), BigUint::from_bytes_be(&bytes));
        let back = MetadataAttribute::from_int(&value).unwrap();
        prop_assert_eq!(back.bytes(), &bytes);
    }
}

// Property test: companions are (p - 1) / 2 for any non-zero p, odd or even
proptest! {
    #[test]
    fn secret_key_companions(p in 1u128.., q in 1u128..) {
        let sk = SecretKey::new(BigUint::from(p), BigUint::from(q));
        prop_assert_eq!(sk.p_prime, BigUint::from((p - 1) / 2));
        prop_assert_eq!(sk.q_prime, BigUint::from((q - 1) / 2));
    }
}

// Property test: public key documents round-trip
proptest! {
    #[test]
    fn public_key_document_round_trip(
        n in any::<u128>(),
        z in any::<u64>(),
        s in any::<u64>(),
        bases in prop::array::uniform6(any::<u128>()),
        epoch_length in any::<u64>(),
    ) {
        let r: Bases = bases.map(BigUint::from);
        let pk = PublicKey::new(BigUint::from(n), BigUint::from(z), BigUint::from(s), r)
            .with_epoch_length(epoch_length);
        let xml = encode_public_key(&pk).unwrap();
        prop_assert_eq!(decode_public_key(&xml).unwrap(), pk);
    }
}
