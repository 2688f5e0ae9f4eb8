//! Purpose: Regression coverage for parse-failure category mapping.
//! Exports: Integration tests only.
//! Role: Verify stable category labels used by conversion diagnostics.
//! Invariants: Category mapping remains deterministic for representative errors.
//! Notes: Uses source include to exercise internal helper logic without widening API surface.

#[path = "../src/json/parse.rs"]
mod parse;

use parse::ParseFailureCategory;
use serde_json::Value;

#[test]
fn escaped_document_left_escaped_is_a_data_error() {
    // The outer string was decoded once too few times.
    let err = parse::from_slice::<std::collections::BTreeMap<String, Value>>(
        br#""{\"services\":{}}""#,
    )
    .unwrap_err();
    assert_eq!(parse::categorize_error(&err), ParseFailureCategory::Data);
    assert!(parse::hint_for_error(&err, "deployment").contains("\"services\""));
}

#[test]
fn trailing_garbage_is_a_syntax_error() {
    let err = parse::from_slice::<Value>(br#"{"services":{}} x"#).unwrap_err();
    assert_eq!(parse::categorize_error(&err), ParseFailureCategory::Syntax);
    assert_eq!(parse::categorize_error(&err).label(), "syntax");
}

#[test]
fn encode_then_decode_keeps_values() {
    let value: Value = serde_json::json!({"services": {"web": {"image": "nginx"}}});
    let bytes = parse::to_vec(&value).expect("encode");
    let decoded: Value = parse::from_slice(&bytes).expect("decode");
    assert_eq!(decoded, value);
}
