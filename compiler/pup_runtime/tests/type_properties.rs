//! Property-based tests for the type algebra.
//!
//! 1. Subtype/value consistency: if `t1.is_assignable(t2)`, every instance
//!    of `t2` is an instance of `t1`. This also holds when both sides refer
//!    to the same alias.
//! 2. Generalization is idempotent.

#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use pup_runtime::{RecursionGuard, Type, TypeAlias, Value};

fn scalar_type() -> impl Strategy<Value = Type> {
    prop_oneof![
        Just(Type::Any),
        Just(Type::Undef),
        Just(Type::Boolean),
        Just(Type::Numeric),
        Just(Type::integer()),
        (-20i64..20, -20i64..20).prop_map(|(a, b)| Type::integer_range(a, b)),
        (-20.0f64..20.0, -20.0f64..20.0).prop_map(|(a, b)| Type::float_range(a, b)),
        (0usize..4, 0usize..4).prop_map(|(a, b)| Type::string_sized(a, b)),
    ]
}

fn any_type() -> impl Strategy<Value = Type> {
    scalar_type().prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            (inner.clone(), 0usize..3, 0usize..3)
                .prop_map(|(element, a, b)| Type::array_sized(element, a, b)),
            (inner.clone(), inner.clone()).prop_map(|(k, v)| Type::hash(k, v)),
            (0usize..3, 0usize..3).prop_map(|(a, b)| Type::collection_sized(a, b)),
            proptest::option::of(inner.clone()).prop_map(Type::type_of),
            inner.prop_map(|target| {
                let alias = TypeAlias::new("Alias");
                let _ = alias.resolve(target);
                Type::Alias(alias)
            }),
        ]
    })
}

/// `alias` wrapped in one of a few shapes, or `other` for shape 4.
fn around(alias: &Type, shape: u8, other: &Type) -> Type {
    match shape {
        0 => alias.clone(),
        1 => Type::array(alias.clone()),
        2 => Type::hash(Type::string(), alias.clone()),
        3 => Type::array(Type::array(alias.clone())),
        _ => other.clone(),
    }
}

/// Two types that share one alias handle.
fn shared_alias_pair() -> impl Strategy<Value = (Type, Type)> {
    (any_type(), any_type(), 0u8..5, 0u8..5).prop_map(|(target, other, left, right)| {
        let alias = TypeAlias::new("Shared");
        let _ = alias.resolve(target);
        let alias = Type::Alias(alias);
        (around(&alias, left, &other), around(&alias, right, &other))
    })
}

fn scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Undef),
        any::<bool>().prop_map(Value::boolean),
        (-25i64..25).prop_map(Value::int),
        (-25.0f64..25.0).prop_map(Value::float),
        "[a-c]{0,4}".prop_map(Value::string),
    ]
}

fn any_value() -> impl Strategy<Value = Value> {
    scalar_value().prop_recursive(2, 12, 3, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::array),
            proptest::collection::vec(("[a-c]{1,2}", inner), 0..3).prop_map(|pairs| {
                Value::hash_from_pairs(pairs.into_iter().map(|(k, v)| (Value::string(k), v)))
            }),
        ]
    })
}

proptest! {
    #[test]
    fn integer_subtype_value_consistency(
        a in -50i64..50, b in -50i64..50,
        c in -50i64..50, d in -50i64..50,
        n in -60i64..60,
    ) {
        let wide = Type::integer_range(a, b);
        let narrow = Type::integer_range(c, d);
        let value = Value::int(n);
        if wide.is_assignable(&narrow, &mut RecursionGuard::new())
            && narrow.is_instance(&value, &mut RecursionGuard::new())
        {
            prop_assert!(wide.is_instance(&value, &mut RecursionGuard::new()));
        }
    }

    #[test]
    fn subtype_value_consistency(t1 in any_type(), t2 in any_type(), value in any_value()) {
        if t1.is_assignable(&t2, &mut RecursionGuard::new())
            && t2.is_instance(&value, &mut RecursionGuard::new())
        {
            prop_assert!(
                t1.is_instance(&value, &mut RecursionGuard::new()),
                "{} accepts {} but not its instance {}", t1, t2, value
            );
        }
    }

    #[test]
    fn shared_alias_subtype_value_consistency(
        (t1, t2) in shared_alias_pair(),
        value in any_value(),
    ) {
        if t1.is_assignable(&t2, &mut RecursionGuard::new())
            && t2.is_instance(&value, &mut RecursionGuard::new())
        {
            prop_assert!(
                t1.is_instance(&value, &mut RecursionGuard::new()),
                "{} accepts {} but not its instance {}", t1, t2, value
            );
        }
    }

    #[test]
    fn generalize_is_idempotent(ty in any_type()) {
        let once = ty.generalize();
        prop_assert_eq!(once.generalize(), once);
    }

    #[test]
    fn generalized_type_is_assignable_from_original(ty in any_type()) {
        prop_assert!(ty.generalize().is_assignable(&ty, &mut RecursionGuard::new()));
    }
}
