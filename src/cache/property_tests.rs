//! Property-Based Tests for Cache Keys
//!
//! Uses proptest to check the key derivation rule over arbitrary inputs.

use proptest::prelude::*;

use crate::cache::{derive_key, KeyArgs};

// == Strategies ==
/// Generates type paths such as `app::svc::Customers`
fn target_strategy() -> impl Strategy<Value = String> {
    "[a-z_]{1,8}(::[A-Za-z_]{1,12}){0,3}".prop_map(|s| s)
}

/// Generates operation names
fn operation_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,16}".prop_map(|s| s)
}

/// Generates rendered argument values, some missing
fn args_strategy() -> impl Strategy<Value = Vec<Option<String>>> {
    prop::collection::vec(prop::option::of("[A-Za-z0-9 ]{0,10}"), 0..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Identical inputs always give identical keys.
    #[test]
    fn prop_key_is_deterministic(
        target in target_strategy(),
        operation in operation_strategy(),
        args in args_strategy(),
    ) {
        prop_assert_eq!(
            derive_key(&target, &operation, &args),
            derive_key(&target, &operation, &args.clone())
        );
    }

    // Dropping every None gives the same key as keeping them.
    #[test]
    fn prop_nulls_are_elided(
        target in target_strategy(),
        operation in operation_strategy(),
        args in args_strategy(),
    ) {
        let present: Vec<Option<String>> = args.iter().flatten().cloned().map(Some).collect();
        prop_assert_eq!(
            derive_key(&target, &operation, &args),
            derive_key(&target, &operation, &present)
        );
    }

    // Swapping two distinct arguments changes the key.
    #[test]
    fn prop_argument_order_matters(
        a in "[a-z]{1,6}",
        b in "[A-Z]{1,6}",
    ) {
        let ab = KeyArgs::new().arg(&a).arg(&b);
        let ba = KeyArgs::new().arg(&b).arg(&a);
        prop_assert_ne!(
            derive_key("T", "m", ab.as_slice()),
            derive_key("T", "m", ba.as_slice())
        );
    }

    // With no present arguments the key ends in empty parentheses.
    #[test]
    fn prop_all_null_is_empty_call(
        target in target_strategy(),
        operation in operation_strategy(),
        nulls in 0usize..6,
    ) {
        let args = vec![None; nulls];
        prop_assert_eq!(
            derive_key(&target, &operation, &args),
            format!("{}.{}()", target, operation)
        );
    }

    // The key is exactly target.operation(joined present args).
    #[test]
    fn prop_key_layout(
        target in target_strategy(),
        operation in operation_strategy(),
        args in args_strategy(),
    ) {
        let joined = args.iter().flatten().cloned().collect::<Vec<_>>().join(",");
        let key = derive_key(&target, &operation, &args);
        let expected_prefix = format!("{}.{}(", target, operation);
        prop_assert!(key.starts_with(&expected_prefix));
        prop_assert_eq!(&key[expected_prefix.len()..key.len() - 1], joined.as_str());
        prop_assert!(key.ends_with(')'));
    }
}
