//! Data verb tests.

use parlance::foundation::{ErrorKind, Value};

use crate::sandbox;

#[test]
fn get_using_parses_json() {
    let (_dir, mut engine) = sandbox();
    let result = engine
        .run(r#"GET [user] USING {{"name": "Ada", "tags": [1, 2]}}."#)
        .into_result()
        .unwrap();

    assert_eq!(result.property("name"), Some(&Value::text("Ada")));
    assert_eq!(
        result.property("tags"),
        Some(&Value::from_iter([Value::Int(1), Value::Int(2)]))
    );
}

#[test]
fn get_using_rejects_bad_json() {
    let (_dir, mut engine) = sandbox();
    let outcome = engine.run("GET [x] USING {{not json}}.");
    assert!(matches!(
        outcome.error.map(|e| e.kind),
        Some(ErrorKind::Unresolvable { .. })
    ));
}

#[test]
fn set_resolves_scalars() {
    let (_dir, mut engine) = sandbox();
    let outcome = engine
        .run("SET [i] TO 42 THEN LET [f] TO 2.5 THEN SET [b] TO TRUE THEN SET [s] TO two words.");

    assert!(outcome.is_valid(), "{:?}", outcome.failure_reason());
    let vars = engine.variables();
    assert_eq!(vars.get("i"), Some(&Value::Int(42)));
    assert_eq!(vars.get("f"), Some(&Value::Float(2.5)));
    assert_eq!(vars.get("b"), Some(&Value::Bool(true)));
    assert_eq!(vars.get("s"), Some(&Value::text("two words")));
}

#[test]
fn set_rejects_a_literal_target() {
    let (_dir, mut engine) = sandbox();
    assert!(!engine.run("SET x TO 1.").is_valid());
}

#[test]
fn encode_and_decode() {
    let (_dir, mut engine) = sandbox();

    let encoded = engine.run("ENCODE Hello World USING base64.").into_result().unwrap();
    assert_eq!(encoded, Value::text("SGVsbG8gV29ybGQ="));

    let hex = engine.run("ENCODE hi USING hex.").into_result().unwrap();
    assert_eq!(hex, Value::text("6869"));

    let decoded = engine.run("DECODE 6869 USING hex.").into_result().unwrap();
    assert_eq!(decoded, Value::text("hi"));
}

#[test]
fn encoding_a_variable_replaces_it() {
    let (_dir, mut engine) = sandbox();
    let outcome = engine.run("SET [msg] TO hi THEN ENCODE [msg] USING hex THEN SAY [msg].");

    assert!(outcome.is_valid(), "{:?}", outcome.failure_reason());
    assert_eq!(engine.take_messages(), vec!["6869"]);
}

#[test]
fn unknown_codec_is_unresolvable() {
    let (_dir, mut engine) = sandbox();
    let outcome = engine.run("ENCODE hi USING rot13.");
    assert!(matches!(
        outcome.error.map(|e| e.kind),
        Some(ErrorKind::Unresolvable { .. })
    ));
}

#[test]
fn decode_rejects_invalid_input() {
    let (_dir, mut engine) = sandbox();
    let outcome = engine.run("DECODE xyz USING hex.");
    let reason = outcome.failure_reason().unwrap_or_default().to_string();
    assert!(reason.contains("invalid hex"), "{reason}");
}
