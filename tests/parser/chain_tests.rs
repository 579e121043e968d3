//! `THEN` chain tests.

use parlance::foundation::ErrorKind;

use crate::common::Fixture;

#[test]
fn chain_is_flat_and_ordered() {
    let fixture = Fixture::new();
    let sentence = fixture
        .parse("GET [t] FROM {a.txt} THEN SAY [t] THEN DELETE {a.txt}.")
        .unwrap();

    assert_eq!(sentence.len(), 3);
    let names: Vec<&str> = sentence.steps().map(|s| s.root().name()).collect();
    assert_eq!(names, vec!["GET", "SAY", "DELETE"]);
    assert!(sentence.sub_sentences().iter().all(|s| s.sub_sentences().is_empty()));
}

#[test]
fn failing_step_is_reported_by_index() {
    let fixture = Fixture::new();
    let err = fixture.parse("SAY a THEN FLY b THEN SAY c.").unwrap_err();

    assert!(matches!(err.kind, ErrorKind::UnknownVerb(_)));
    let context = err.context.unwrap();
    assert_eq!(context.segment, Some(1));
    assert_eq!(context.sentence.as_deref(), Some("SAY a THEN FLY b THEN SAY c."));
}

#[test]
fn then_needs_a_sentence_on_both_sides() {
    let fixture = Fixture::new();

    let err = fixture.parse("THEN SAY a.").unwrap_err();
    assert!(err.kind.to_string().contains("THEN must follow a sentence"));
    assert_eq!(err.context.unwrap().segment, Some(0));

    let err = fixture.parse("SAY a THEN THEN SAY b.").unwrap_err();
    assert!(err.kind.to_string().contains("THEN must be followed by a sentence"));
    assert_eq!(err.context.unwrap().segment, Some(1));
}

#[test]
fn later_failure_rejects_the_whole_chain() {
    let fixture = Fixture::new();
    let err = fixture.parse("SAY a THEN GET FROM {b}.").unwrap_err();
    assert!(err.kind.to_string().contains("needs a direct object"));
    assert_eq!(err.context.unwrap().segment, Some(1));
}

#[test]
fn chain_limit() {
    let fixture = Fixture::new();
    let parser = fixture.parser().with_max_chain_len(2);

    assert!(parser.parse("SAY a THEN SAY b.").is_ok());
    let err = parser.parse("SAY a THEN SAY b THEN SAY c.").unwrap_err();
    assert!(err.kind.to_string().contains("Too many chained sentences: 3 (limit 2)"));
}

#[test]
fn then_inside_a_reference_is_payload() {
    let fixture = Fixture::new();
    let sentence = fixture.parse("SAY {first THEN second}.").unwrap();
    assert_eq!(sentence.len(), 1);
}
