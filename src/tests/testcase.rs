// Unit Tests for the Test Case Data Model
//
// UNIT UNDER TEST: TestCase, TestCaseKind, schema builders, pretty printer
//
// BUSINESS RESPONSIBILITY:
//   - Defines the wire format shared with the LLM providers
//   - Serializes kind under the wire key "type" with the exact
//     "Functional"/"Negative" strings
//   - Produces schema documents for both provider dialects
//   - Pretty-prints results with 4-space indentation for console output

use crate::testcase::{gemini_response_schema, to_pretty_json, TestCase, TestCaseKind};
use crate::tests::helpers::sample_test_cases;

#[test]
fn test_serde_round_trip_preserves_all_fields_and_order() {
    let cases = sample_test_cases();

    let json = serde_json::to_string(&cases).expect("serialize");
    let parsed: Vec<TestCase> = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(parsed, cases);
    assert_eq!(parsed[0].steps, vec!["Enter email", "Submit"]);
    assert_eq!(parsed[1].id, "TC-002");
}

#[test]
fn test_kind_serializes_under_wire_key_type() {
    let case = &sample_test_cases()[1];

    let value = serde_json::to_value(case).expect("serialize");

    assert_eq!(value["type"], "Negative");
    assert!(value.get("kind").is_none(), "internal field name must not leak");
}

#[test]
fn test_extra_keys_are_tolerated_missing_keys_are_not() {
    let with_extra = r#"{"id":"TC-001","type":"Functional","description":"d","steps":["s"],"expected_result":"r","confidence":0.9}"#;
    let missing_field = r#"{"id":"TC-001","type":"Functional","steps":["s"],"expected_result":"r"}"#;

    assert!(serde_json::from_str::<TestCase>(with_extra).is_ok());
    assert!(serde_json::from_str::<TestCase>(missing_field).is_err());
}

#[test]
fn test_kind_display_matches_wire_strings() {
    assert_eq!(TestCaseKind::Functional.to_string(), "Functional");
    assert_eq!(TestCaseKind::Negative.to_string(), "Negative");
}

#[test]
fn test_pretty_json_uses_four_space_indent() {
    let cases = sample_test_cases();

    let json = to_pretty_json(&cases).expect("pretty print");

    assert!(json.contains("\n    {"), "objects indented by 4 spaces");
    assert!(json.contains("\n        \"id\": \"TC-001\""), "fields indented by 8 spaces");

    // Output must parse back to the same list
    let parsed: Vec<TestCase> = serde_json::from_str(&json).expect("round trip");
    assert_eq!(parsed, cases);
}

#[test]
fn test_gemini_schema_uses_uppercase_type_tags() {
    let schema = gemini_response_schema();

    assert_eq!(schema["type"], "ARRAY");
    assert_eq!(schema["items"]["type"], "OBJECT");
    assert_eq!(schema["items"]["properties"]["steps"]["type"], "ARRAY");
    assert_eq!(
        schema["items"]["properties"]["steps"]["items"]["type"],
        "STRING"
    );
}

#[test]
fn test_gemini_schema_requires_all_five_fields() {
    let schema = gemini_response_schema();

    let required = schema["items"]["required"]
        .as_array()
        .expect("required array");
    let names: Vec<&str> = required.iter().filter_map(|v| v.as_str()).collect();
    assert_eq!(
        names,
        vec!["id", "type", "description", "steps", "expected_result"]
    );
}
