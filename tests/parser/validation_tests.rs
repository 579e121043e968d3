//! Grammar validation tests.
//!
//! Every rejection names its reason; nothing here reaches an action.

use parlance::foundation::ErrorKind;

use crate::common::Fixture;

fn reason(input: &str) -> String {
    let fixture = Fixture::new();
    match fixture.parse(input) {
        Ok(_) => panic!("expected {input:?} to be rejected"),
        Err(err) => err.kind.to_string(),
    }
}

#[test]
fn empty_input() {
    let fixture = Fixture::new();
    for input in ["", "   ", "\n\t"] {
        let err = fixture.parse(input).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::EmptySentence), "{input:?}");
    }
}

#[test]
fn missing_terminator() {
    let fixture = Fixture::new();
    let err = fixture.parse("SAY Hello World").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingTerminator));
}

#[test]
fn must_start_with_a_known_verb() {
    let fixture = Fixture::new();

    let err = fixture.parse("FLY to the moon.").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownVerb(ref w) if w == "FLY"));

    let err = fixture.parse("FROM {a.txt}.").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownVerb(_)));
}

#[test]
fn verbs_are_case_insensitive() {
    let fixture = Fixture::new();
    let sentence = fixture.parse("say hello.").unwrap();
    assert_eq!(sentence.root().name(), "SAY");
}

#[test]
fn preposition_needs_a_direct_object_first() {
    assert!(reason("GET FROM {a.txt}.").contains("GET needs a direct object before FROM"));
}

#[test]
fn preposition_needs_a_value() {
    assert!(reason("GET [x] FROM.").contains("FROM must be followed by a value"));
    assert!(reason("GET [x] FROM USING {a}.").contains("FROM must be followed by a value"));
}

#[test]
fn nothing_after_the_terminator() {
    assert!(reason("SAY a. SAY b.").contains("Nothing may follow the terminator"));
}

#[test]
fn one_qualifier_at_most() {
    assert!(reason("GET LINES TEXT [x] FROM {a}.").contains("another qualifier"));
}

#[test]
fn empty_destructuring_pattern() {
    assert!(reason("GET [{}] USING {{}}.").contains("names no properties"));
}

#[test]
fn any_terminator_is_accepted() {
    let fixture = Fixture::new();
    assert!(fixture.parse("SAY hi.").is_ok());
    assert!(fixture.parse("SAY hi?").is_ok());
    assert!(fixture.parse("SAY hi!").is_ok());
    assert!(fixture.parse("SAY hi .").is_ok());
}

#[test]
fn rejections_carry_the_sentence() {
    let fixture = Fixture::new();
    let err = fixture.parse("GET   FROM {a.txt}.").unwrap_err();
    let context = err.context.unwrap();
    assert_eq!(context.sentence.as_deref(), Some("GET FROM {a.txt}."));
}
