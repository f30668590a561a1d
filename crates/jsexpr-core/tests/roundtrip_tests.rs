use jsexpr_core::{parse_value, to_source, to_source_pretty, Number, Value};

const COMPLEX_ARRAY: &str = include_str!("fixtures/complex_array.js");
const PERSON: &str = include_str!("fixtures/person.js");

fn assert_roundtrip(source: &str) {
    let value = parse_value(source).unwrap();
    let compact = to_source(&value);
    assert_eq!(parse_value(&compact).unwrap(), value, "compact: {compact}");
    let pretty = to_source_pretty(&value, 2);
    assert_eq!(parse_value(&pretty).unwrap(), value, "pretty: {pretty}");
}

// ============================================================================
// Fixtures
// ============================================================================

#[test]
fn complex_array_roundtrips() {
    assert_roundtrip(COMPLEX_ARRAY);
}

#[test]
fn person_roundtrips() {
    assert_roundtrip(PERSON);
}

#[test]
fn pretty_output_is_stable() {
    let value = parse_value(PERSON).unwrap();
    let once = to_source_pretty(&value, 4);
    let twice = to_source_pretty(&parse_value(&once).unwrap(), 4);
    assert_eq!(once, twice);
}

#[test]
fn person_compact_form() {
    let value = parse_value("{ firstName: 'John', age: 30, tags: ['a',], }").unwrap();
    assert_eq!(to_source(&value), r#"{firstName: "John", age: 30, tags: ["a"]}"#);
}

// ============================================================================
// Values that are easy to lose
// ============================================================================

#[test]
fn undefined_and_holes_survive() {
    assert_roundtrip("[undefined, , null]");
    let value = parse_value("[1,,2]").unwrap();
    assert_eq!(to_source(&value), "[1, undefined, 2]");
}

#[test]
fn float_and_integer_stay_distinct() {
    let value = parse_value("[1, 1.0, 1e3, -0]").unwrap();
    assert_eq!(to_source(&value), "[1, 1.0, 1000.0, -0.0]");
    assert_eq!(
        parse_value(&to_source(&value)).unwrap().at(3),
        Some(&Value::Number(Number::Float(-0.0)))
    );
}

#[test]
fn awkward_keys_are_quoted() {
    assert_roundtrip(r#"{"": 1, "two words": 2, "3d": 3, 'q"uote': 4, new: 5}"#);
    let value = parse_value(r#"{"two words": 2, plain: 1}"#).unwrap();
    assert_eq!(to_source(&value), r#"{"two words": 2, plain: 1}"#);
}

#[test]
fn escapes_survive() {
    assert_roundtrip(r#"["tab\there", "line\nbreak", "quote\"d", 'back\\slash', "é\u{1F600}"]"#);
}

#[test]
fn infinity_reparses_as_infinity() {
    let value = Value::Number(Number::Float(f64::INFINITY));
    assert_eq!(to_source(&value), "1e999");
    assert_eq!(parse_value("1e999").unwrap(), value);
    assert_eq!(parse_value("-1e999").unwrap(), Value::from(f64::NEG_INFINITY));
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn json_keeps_key_order_and_nulls_undefined() {
    let value = parse_value("{z: 1, a: [undefined, 2.5], m: 'x'}").unwrap();
    let json = value.to_json();
    assert_eq!(
        serde_json::to_string(&json).unwrap(),
        r#"{"z":1,"a":[null,2.5],"m":"x"}"#
    );
    assert_eq!(serde_json::to_value(&value).unwrap(), json);
}

#[test]
fn fixture_to_json() {
    let json = parse_value(COMPLEX_ARRAY).unwrap().to_json();
    assert_eq!(json[0]["details"]["address"]["zipCode"], 10001);
    assert_eq!(json[1]["data"][1]["mixedTypes"][1], serde_json::Value::Null);
    assert_eq!(json[2]["items"][0]["a"][0]["b"], serde_json::Value::Null);
}
