//! Round-trip and bound properties over generated values

use abicoder::prelude::*;
use num_bigint::BigInt;
use proptest::prelude::*;

fn coder(name: &str) -> Coder {
    get_coder(&Descriptor::new(name)).unwrap()
}

fn int_bits() -> impl Strategy<Value = usize> {
    (1usize..=32).prop_map(|n| n * 8)
}

proptest! {
    #[test]
    fn signed_integers_round_trip(bits in int_bits(), raw in any::<i128>()) {
        let c = coder(&format!("int{bits}"));
        let val = BigInt::from(raw);
        let half = BigInt::from(1u8) << (bits - 1);
        let in_range = val >= -half.clone() && val < half;
        match c.encode(&Value::Int(val.clone())) {
            Ok(hex) => {
                prop_assert!(in_range);
                prop_assert_eq!(hex.len(), WORD_BYTES);
                prop_assert_eq!(c.decode(hex).unwrap(), Value::Int(val));
            }
            Err(err) => {
                prop_assert!(!in_range);
                prop_assert!(matches!(err, CoderError::Bounds(_)));
            }
        }
    }

    #[test]
    fn unsigned_integers_round_trip(bits in int_bits(), raw in any::<u128>()) {
        let c = coder(&format!("uint{bits}"));
        let val = BigInt::from(raw);
        let in_range = val < (BigInt::from(1u8) << bits);
        let res = c.encode(&Value::Int(val.clone()));
        prop_assert_eq!(res.is_ok(), in_range);
        if let Ok(hex) = res {
            prop_assert_eq!(c.decode(hex).unwrap(), Value::Int(val));
        }
    }

    #[test]
    fn fixed_decodes_to_rounded_value(mantissa in -32_000i64..32_000, scale in 2u32..6) {
        let c = coder("fixed16x2");
        let value = Decimal::new(BigInt::from(mantissa), scale);
        let rounded = value.scale_up(2).round_half_away();
        let hex = c.encode(&Value::Decimal(value)).unwrap();
        prop_assert_eq!(c.decode(hex).unwrap(), Value::Decimal(Decimal::new(rounded, 2)));
    }

    #[test]
    fn strings_round_trip(text in ".{0,80}") {
        let c = coder("string");
        let hex = c.encode(&Value::from(text.as_str())).unwrap();
        prop_assert_eq!(hex.len() % WORD_BYTES, 0);
        prop_assert_eq!(c.decode(hex).unwrap(), Value::from(text));
    }

    #[test]
    fn dynamic_arrays_round_trip(items in proptest::collection::vec(
        proptest::collection::vec(any::<u8>(), 0..70), 0..6)
    ) {
        let c = coder("bytes[]");
        let value = Value::Array(items.into_iter().map(Value::Bytes).collect());
        let hex = c.encode(&value).unwrap();
        prop_assert_eq!(hex.len(), c.encoded_len(&value).unwrap());
        prop_assert_eq!(c.decode(hex).unwrap(), value);
    }

    #[test]
    fn records_round_trip(age in any::<u64>(), name in "[a-z]{0,40}", flags in proptest::collection::vec(any::<bool>(), 2)) {
        let c = get_coder(&Descriptor::new("tuple").with_components(vec![
            Descriptor::new("uint64").named("age"),
            Descriptor::new("string").named("name"),
            Descriptor::new("bool[2]").named("flags"),
        ]))
        .unwrap();
        let value = Value::Array(vec![
            Value::from(age),
            Value::from(name),
            Value::Array(flags.into_iter().map(Value::Bool).collect()),
        ]);
        let decoded = c.decode(c.encode(&value).unwrap()).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn truncated_input_is_rejected(cut in 0usize..7) {
        let c = coder("string[]");
        let value = Value::Array(vec![Value::from("ab"), Value::from("cd")]);
        let hex = c.encode(&value).unwrap();
        prop_assert_eq!(hex.len(), 7 * WORD_BYTES);
        prop_assert!(c.decode_bytes(&hex.as_bytes()[..cut * WORD_BYTES]).is_err());
    }
}
