/// Property-based roundtrip tests for literal values.
///
/// Generates random `Value` trees and checks that `parse_value(to_source(v))`
/// and `parse_value(to_source_pretty(v))` give back `v`, and that pretty
/// output is a fixed point.
///
/// Strategies keep to values the literal syntax can express exactly:
/// - integers well inside `i64` (the lexer reads magnitudes, so `i64::MIN`
///   comes back as a float)
/// - finite floats only (NaN has no literal form)
/// - object keys unique within one object (duplicates collapse on parse)
use jsexpr_core::{parse_value, to_source, to_source_pretty, Number, Value};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-zA-Z_$][a-zA-Z0-9_$]{0,10}").unwrap(),
        prop::string::string_regex("[a-z0-9 \\-:'\"]{0,8}").unwrap(),
        Just("new".to_string()),
        Just("true".to_string()),
        Just("undefined".to_string()),
    ]
}

fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,20}",
        "\\PC{0,12}",
        Just("".to_string()),
        Just("it's \"quoted\"".to_string()),
        Just("line1\nline2\ttab\\".to_string()),
        Just("caf\u{00e9} \u{1F600}".to_string()),
        Just("// not a comment".to_string()),
    ]
}

fn arb_number() -> impl Strategy<Value = Number> {
    prop_oneof![
        (-1_000_000_000_000i64..1_000_000_000_000i64).prop_map(Number::Integer),
        (-1.0e9f64..1.0e9f64).prop_map(Number::Float),
        (-300i32..300i32).prop_map(|exp| Number::Float(10f64.powi(exp))),
        Just(Number::Float(0.5)),
        Just(Number::Float(-2.0)),
    ]
}

fn arb_primitive() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(Value::Undefined),
        any::<bool>().prop_map(Value::Boolean),
        arb_number().prop_map(Value::Number),
        arb_string().prop_map(Value::String),
    ]
}

fn unique_entries(entries: Vec<(String, Value)>) -> Value {
    let mut seen = Vec::new();
    let mut out = Vec::new();
    for (key, value) in entries {
        if !seen.contains(&key) {
            seen.push(key.clone());
            out.push((key, value));
        }
    }
    Value::Object(out)
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_primitive().prop_recursive(5, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..6).prop_map(unique_entries),
        ]
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn compact_roundtrip(value in arb_value()) {
        let source = to_source(&value);
        let parsed = parse_value(&source).map_err(|e| TestCaseError::fail(format!("{e}: {source}")))?;
        prop_assert_eq!(parsed, value);
    }

    #[test]
    fn pretty_roundtrip(value in arb_value(), indent in 0usize..5) {
        let source = to_source_pretty(&value, indent);
        let parsed = parse_value(&source).map_err(|e| TestCaseError::fail(format!("{e}: {source}")))?;
        prop_assert_eq!(parsed, value);
    }

    #[test]
    fn pretty_is_a_fixed_point(value in arb_value()) {
        let once = to_source_pretty(&value, 2);
        let reparsed = parse_value(&once).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(to_source_pretty(&reparsed, 2), once);
    }

    #[test]
    fn depth_matches_nesting(depth in 1usize..40) {
        let source = format!("{}1{}", "[".repeat(depth), "]".repeat(depth));
        let value = parse_value(&source).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(value.depth(), depth);
    }
}
