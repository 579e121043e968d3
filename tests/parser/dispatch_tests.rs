//! Dispatch tests.
//!
//! GET is registered twice (FROM a file, USING a JSON payload); the
//! sentence's structure picks the implementation.

use parlance::foundation::{ErrorKind, Role};
use parlance::parser::Phrase;

use crate::common::Fixture;

#[test]
fn from_picks_the_file_reader() {
    let fixture = Fixture::new();
    let sentence = fixture.parse("GET [text] FROM {notes.txt}.").unwrap();
    let root = sentence.root();

    assert_eq!(root.name(), "GET");
    assert!(root.descriptor().role(Role::From).is_some());
    assert!(root.descriptor().role(Role::Using).is_none());
    assert_eq!(
        root.binding(Role::From).map(|b| &b.phrase),
        Some(&Phrase::Reference("notes.txt".into()))
    );
}

#[test]
fn using_picks_the_json_reader() {
    let fixture = Fixture::new();
    let sentence = fixture.parse(r#"GET [data] USING {{"a": 1}}."#).unwrap();
    let root = sentence.root();

    assert!(root.descriptor().role(Role::Using).is_some());
    assert_eq!(
        root.binding(Role::Using).map(|b| &b.phrase),
        Some(&Phrase::Reference(r#"{"a": 1}"#.into()))
    );
}

#[test]
fn no_candidate_fits() {
    let fixture = Fixture::new();

    let err = fixture.parse("GET [x] WITH y.").unwrap_err();
    match err.kind {
        ErrorKind::NoMatchingUsage { verb, reason } => {
            assert_eq!(verb, "GET");
            assert!(reason.contains("does not take WITH"), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = fixture.parse("GET [x].").unwrap_err();
    match err.kind {
        ErrorKind::NoMatchingUsage { reason, .. } => {
            assert!(reason.contains("GET needs FROM"), "{reason}");
            assert!(reason.contains("GET needs USING"), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn qualifier_narrows_the_candidates() {
    let fixture = Fixture::new();

    let sentence = fixture.parse("GET LINES [x] FROM {a.txt}.").unwrap();
    assert_eq!(sentence.root().qualifier(), Some("LINES"));

    let err = fixture.parse(r#"GET LINES [x] USING {{"a": 1}}."#).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NoMatchingUsage { .. }));
}

#[test]
fn qualifier_after_a_verb_that_refuses_it_is_text() {
    let fixture = Fixture::new();
    let sentence = fixture.parse("SAY text is fun.").unwrap();
    assert_eq!(sentence.root().name(), "SAY");
    assert_eq!(sentence.root().qualifier(), None);
}

#[test]
fn receivers_need_well_formed_names() {
    let fixture = Fixture::new();
    for input in [r#"GET [ y ] USING {{"a": 1}}."#, "SET [ n ] TO 1."] {
        let err = fixture.parse(input).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::NoMatchingUsage { .. }), "{input}: {err}");
    }
}

#[test]
fn synonyms_dispatch_to_the_canonical_verb() {
    let fixture = Fixture::new();
    assert_eq!(fixture.parse("PRINT hi.").unwrap().root().name(), "SAY");
    assert_eq!(fixture.parse("READ [x] FROM {a}.").unwrap().root().name(), "GET");
    assert_eq!(fixture.parse("LET [n] TO 3.").unwrap().root().name(), "SET");
}

#[test]
fn literal_words_form_one_phrase() {
    let fixture = Fixture::new();
    let sentence = fixture.parse("SAY Hello   World.").unwrap();
    assert_eq!(
        sentence.root().binding(Role::What).map(|b| &b.phrase),
        Some(&Phrase::Literal("Hello World".into()))
    );
}

#[test]
fn optional_preposition_fills_its_role() {
    let fixture = Fixture::new();
    for input in ["DELETE {old.txt}.", "DELETE FROM {old.txt}."] {
        let sentence = fixture.parse(input).unwrap();
        let binding = sentence.root().binding(Role::From).unwrap();
        assert_eq!(binding.phrase, Phrase::Reference("old.txt".into()), "{input}");
    }
}

#[test]
fn receiver_is_the_direct_object_slot() {
    let fixture = Fixture::new();

    let sentence = fixture.parse("GET [x] FROM {a}.").unwrap();
    let receiver = sentence.root().receiver().unwrap();
    assert_eq!(receiver.phrase, Phrase::Variable("x".into()));

    let sentence = fixture.parse("SAY [x].").unwrap();
    assert!(sentence.root().receiver().is_none());
}
