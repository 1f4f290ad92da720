// crates/envcast/tests/proptest_casts.rs
// ============================================================================
// Module: Cast Property-Based Tests
// Description: Property tests for casting and descriptor text.
// Purpose: Detect panics and invariant breaks across wide input ranges.
// ============================================================================

//! Property-based tests for casting invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::collections::BTreeSet;

use envcast::CastDescriptor;
use envcast::CollectionKind;
use envcast::DescriptorError;
use envcast::Environment;
use envcast::Fallback;
use envcast::MAX_DESCRIPTOR_NESTING;
use envcast::Value;
use envcast::cast;
use proptest::prelude::*;

/// Inserts `_` between every group of three digits.
fn with_separators(number: i64) -> String {
    let digits = number.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('_');
        }
        grouped.push(digit);
    }
    if number < 0 { format!("-{grouped}") } else { grouped }
}

/// Applies a per-character case mask to `word`.
fn mixed_case(word: &str, mask: &[bool]) -> String {
    word.chars()
        .zip(mask.iter().cycle())
        .map(|(ch, upper)| if *upper { ch.to_ascii_uppercase() } else { ch })
        .collect()
}

/// Scalar descriptors that have a text form.
fn scalar_strategy() -> impl Strategy<Value = CastDescriptor> {
    prop_oneof![
        Just(CastDescriptor::raw()),
        Just(CastDescriptor::bool()),
        Just(CastDescriptor::int()),
        Just(CastDescriptor::float()),
        Just(CastDescriptor::decimal()),
        Just(CastDescriptor::str()),
        Just(CastDescriptor::json()),
        Just(CastDescriptor::url()),
    ]
}

/// Collection shapes.
fn shape_strategy() -> impl Strategy<Value = CollectionKind> {
    prop_oneof![
        Just(CollectionKind::List),
        Just(CollectionKind::Set),
        Just(CollectionKind::Tuple),
    ]
}

/// Any valid descriptor that has a text form.
fn descriptor_strategy() -> impl Strategy<Value = CastDescriptor> {
    prop_oneof![
        scalar_strategy(),
        shape_strategy().prop_map(CastDescriptor::from),
        Just(CastDescriptor::dict()),
        (shape_strategy(), scalar_strategy())
            .prop_map(|(shape, element)| CastDescriptor::sequence_of(shape, element)),
        (scalar_strategy(), scalar_strategy())
            .prop_map(|(key, value)| CastDescriptor::dict_of(key, value)),
    ]
}

proptest! {
    #[test]
    fn int_text_with_separators_round_trips(number in any::<i64>()) {
        let env = Environment::from_pairs([("N", with_separators(number))]);
        prop_assert_eq!(env.get_int("N", Fallback::NotSet, true), Ok(Value::Int(number)));
    }

    #[test]
    fn bool_literals_accept_any_case(
        flag in any::<bool>(),
        mask in prop::collection::vec(any::<bool>(), 1 .. 6),
    ) {
        let text = mixed_case(if flag { "true" } else { "false" }, &mask);
        let env = Environment::from_pairs([("B", text)]);
        prop_assert_eq!(env.get_bool("B", Fallback::NotSet, true), Ok(Value::Bool(flag)));
    }

    #[test]
    fn int_lists_cast_every_element(numbers in prop::collection::vec(any::<i64>(), 0 .. 16)) {
        let text = numbers.iter().map(i64::to_string).collect::<Vec<_>>().join(" , ");
        let env = Environment::from_pairs([("L", text)]);
        let expected: Vec<Value> = numbers.iter().copied().map(Value::Int).collect();
        prop_assert_eq!(
            env.get_list("L", Fallback::NotSet, CastDescriptor::int(), true),
            Ok(Value::List(expected.clone()))
        );
        let set: BTreeSet<Value> = expected.into_iter().collect();
        prop_assert_eq!(
            env.get_set("L", Fallback::NotSet, CastDescriptor::int(), true),
            Ok(Value::Set(set))
        );
    }

    #[test]
    fn descriptor_text_round_trips(descriptor in descriptor_strategy()) {
        let text = descriptor.to_string();
        prop_assert_eq!(text.parse::<CastDescriptor>(), Ok(descriptor));
    }

    #[test]
    fn casting_arbitrary_text_never_panics(text in ".*", descriptor in descriptor_strategy()) {
        let _ = cast("ANY", Value::from(text), &descriptor);
    }

    #[test]
    fn parsing_arbitrary_descriptor_text_never_panics(text in ".*") {
        let _ = text.parse::<CastDescriptor>();
    }

    #[test]
    fn deeply_bracketed_descriptor_text_is_rejected(
        depth in (MAX_DESCRIPTOR_NESTING + 1) .. 4_096,
        opener in prop_oneof![Just("list["), Just("set["), Just("tuple["), Just("dict[str:")],
    ) {
        let text = format!("{}int{}", opener.repeat(depth), "]".repeat(depth));
        let is_too_deep =
            matches!(text.parse::<CastDescriptor>(), Err(DescriptorError::NestingTooDeep { .. }));
        prop_assert!(is_too_deep);
    }
}
