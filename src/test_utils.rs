//! Shared proptest strategies for unit tests.

use proptest::prelude::*;

use crate::{Container, Scalar, Value};

/// Printable text with some markup and control characters mixed in.
pub(crate) fn arb_text(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => prop::char::range('a', 'z'),
            2 => prop::char::range('0', '9'),
            1 => prop::sample::select(vec!['<', '>', '&', '"', '\'', '/', ' ', '\n', 'é', 'Ж']),
        ],
        0..=max_len,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Any scalar. Floats are finite so that trees compare equal to themselves.
pub(crate) fn arb_scalar() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        Just(Scalar::Null),
        any::<bool>().prop_map(Scalar::Bool),
        any::<i64>().prop_map(Scalar::Int),
        (-1.0e6f64..1.0e6).prop_map(Scalar::Float),
        arb_text(24).prop_map(Scalar::Text),
    ]
}

/// Nested values up to four maps deep.
pub(crate) fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar()
        .prop_map(Value::Scalar)
        .prop_recursive(4, 32, 6, |inner| {
            prop::collection::btree_map("[a-z0-9_]{1,8}", inner, 0..6)
                .prop_map(|entries| Value::Map(entries.into_iter().collect::<Container>()))
        })
}

/// A top-level input bag.
pub(crate) fn arb_container() -> impl Strategy<Value = Container> {
    prop::collection::btree_map("[a-z0-9_]{1,8}", arb_value(), 0..8)
        .prop_map(|entries| entries.into_iter().collect())
}
