//! Integration property tests for input-cage.
//!
//! These tests validate cross-module invariants and end-to-end flows
//! using property-based testing.

use input_cage::validate::{self, HostMask};
use input_cage::{
    filter, Cage, CageOptions, Catalog, Container, ErrorKind, Filter, Scalar, Value,
};
use proptest::prelude::*;

// Strategy: Generate nested input bags
fn arb_value() -> impl Strategy<Value = Value> {
    prop::string::string_regex("[ -~]{0,16}")
        .unwrap()
        .prop_map(Value::text)
        .prop_recursive(4, 24, 5, |inner| {
            prop::collection::btree_map("[a-z0-9]{1,6}", inner, 0..5)
                .prop_map(|entries| Value::Map(entries.into_iter().collect()))
        })
}

fn arb_bag() -> impl Strategy<Value = Container> {
    prop::collection::btree_map("[a-z0-9_]{1,8}", arb_value(), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

// Strategy: Generate Luhn-valid card numbers of 13 to 19 digits
fn arb_card() -> impl Strategy<Value = String> {
    prop::collection::vec(0u32..10, 12..=18).prop_map(|mut digits| {
        let sum: u32 = digits
            .iter()
            .rev()
            .enumerate()
            .map(|(i, &d)| match (i % 2, d * 2) {
                (0, doubled) if doubled > 9 => doubled - 9,
                (0, doubled) => doubled,
                _ => d,
            })
            .sum();
        digits.push((10 - sum % 10) % 10);
        digits.iter().map(|&d| char::from(b'0' + d as u8)).collect()
    })
}

fn same_shape(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Scalar(_), Value::Scalar(_)) => true,
        (Value::Map(x), Value::Map(y)) => {
            x.keys().eq(y.keys()) && x.iter().zip(y.iter()).all(|((_, l), (_, r))| same_shape(l, r))
        }
        _ => false,
    }
}

proptest! {
    /// Property: rot13 applied twice by the catalog is the identity on ASCII letters
    #[test]
    fn proptest_rot13_involution(text in "[A-Za-z]{0,40}") {
        let catalog = Catalog::default();
        let once = catalog.filter(Filter::Rot13, &Scalar::text(text.clone()));
        let twice = catalog.filter(Filter::Rot13, &once);
        prop_assert_eq!(twice, Scalar::text(text));
    }

    /// Property: Luhn-valid card numbers of 13 to 19 digits are accepted
    #[test]
    fn proptest_ccnum_accepts_luhn_valid(card in arb_card()) {
        prop_assert!(validate::is_ccnum(&card), "{}", card);
    }

    /// Property: Changing one digit of a valid card number breaks the checksum
    #[test]
    fn proptest_ccnum_rejects_substitution(
        card in arb_card(),
        position in any::<prop::sample::Index>(),
        bump in 1u8..10,
    ) {
        let mut bytes = card.into_bytes();
        let i = position.index(bytes.len());
        bytes[i] = b'0' + (bytes[i] - b'0' + bump) % 10;
        let changed = String::from_utf8(bytes).unwrap();
        prop_assert!(!validate::is_ccnum(&changed), "{}", changed);
    }

    /// Property: Applying get_digits preserves the key set at every nesting level
    #[test]
    fn proptest_apply_preserves_shape(value in arb_value()) {
        let catalog = Catalog::default();
        let filtered = catalog.apply_named(&value, "get_digits").unwrap();
        prop_assert!(same_shape(&value, &filtered));
    }

    /// Property: With keep_original, get_raw returns the ingested value for every key
    #[test]
    fn proptest_cage_raw_round_trip(bag in arb_bag()) {
        let options = CageOptions::new().keep_original(true);
        let cage = Cage::new(bag.clone(), options, Catalog::default());
        for (key, value) in &bag {
            prop_assert_eq!(cage.get_raw(key), Ok(value));
        }
    }

    /// Property: Without keep_original, get_raw always fails with NotPermitted
    #[test]
    fn proptest_cage_raw_not_permitted(bag in arb_bag(), key in "[a-z0-9_]{1,8}") {
        let cage = Cage::new(bag, CageOptions::default(), Catalog::default());
        prop_assert_eq!(cage.get_raw(&key).unwrap_err().kind(), ErrorKind::NotPermitted);
    }

    /// Property: get_alpha output is empty or passes is_alpha
    #[test]
    fn proptest_get_alpha_output_is_alpha(text in any::<String>()) {
        let bag: Container = [("k", text)].into_iter().collect();
        let cage = Cage::new(bag, CageOptions::default(), Catalog::default());
        let value = cage.get_alpha("k").unwrap().into_inner();
        let out = value.as_text().unwrap();
        prop_assert!(out.is_empty() || validate::is_alpha(out));
    }

    /// Property: get_digits output never contains a non-digit
    #[test]
    fn proptest_get_digits_output_is_digits(text in any::<String>()) {
        let out = filter::digits(&text);
        prop_assert!(out.chars().all(|c| c.is_ascii_digit()));
    }

    /// Property: An IP literal is a hostname only when the IP bit is set
    #[test]
    fn proptest_hostname_ip_bit(
        a in 1u8..=255,
        b in any::<u8>(),
        c in any::<u8>(),
        d in any::<u8>(),
        bits in 1i64..=7,
    ) {
        let ip = format!("{}.{}.{}.{}", a, b, c, d);
        let mask = HostMask::from_bits(bits);
        prop_assert_eq!(validate::is_hostname(&ip, mask), mask.allows(HostMask::IP));
    }

    /// Property: Filters never fail on scalar input, whatever the text
    #[test]
    fn proptest_filters_total_on_scalars(text in any::<String>()) {
        let catalog = Catalog::default();
        for filter in Filter::ALL {
            let filtered = catalog.apply(&Value::text(text.clone()), filter);
            prop_assert!(filtered.is_ok());
        }
    }
}
