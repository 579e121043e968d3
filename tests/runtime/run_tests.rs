//! `Engine::run` tests.

use std::fs;

use parlance::foundation::{ErrorKind, Value};
use parlance::runtime::{Engine, EngineConfig};
use tempfile::TempDir;

fn engine_in(dir: &TempDir) -> Engine {
    let config = EngineConfig::new().with_base_dir(dir.path());
    Engine::new(config, parlance::stdlib::plugins()).unwrap()
}

#[test]
fn say_hello_world() {
    let mut engine = Engine::with_stdlib().unwrap();
    let outcome = engine.run("SAY Hello World.");

    assert!(outcome.is_valid());
    assert_eq!(outcome.validation.to_string(), "Valid");
    let sentence = outcome.sentence.as_ref().unwrap();
    assert_eq!(sentence.root().name(), "SAY");
    assert_eq!(outcome.result(), Some(&Value::text("Hello World")));
    assert_eq!(engine.take_messages(), vec!["Hello World"]);
}

#[test]
fn read_then_say() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("file.txt"), "one\ntwo\n").unwrap();
    let mut engine = engine_in(&dir);

    let outcome = engine.run("GET [text] FROM {file.txt} THEN SAY [text].");

    assert!(outcome.is_valid(), "{:?}", outcome.failure_reason());
    assert_eq!(outcome.sentence.as_ref().unwrap().len(), 2);
    assert_eq!(engine.take_messages(), vec!["one\ntwo"]);
    assert_eq!(
        engine.variables().get("text"),
        Some(&Value::from_iter([Value::text("one"), Value::text("two")]))
    );
}

#[test]
fn qualifier_words_are_plain_text_for_other_verbs() {
    let mut engine = Engine::with_stdlib().unwrap();
    for (input, said) in [
        ("SAY text is fun.", "text is fun"),
        ("PRINT Lines.", "Lines"),
        ("SAY json rocks.", "json rocks"),
    ] {
        let outcome = engine.run(input);
        assert!(outcome.is_valid(), "{input}: {:?}", outcome.failure_reason());
        assert_eq!(outcome.validation.to_string(), "Valid");
        assert_eq!(engine.take_messages(), vec![said], "{input}");
    }
}

#[test]
fn missing_file_invalidates_the_chain() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);

    let outcome = engine.run("GET [x] FROM {nonexistent} THEN SAY [x].");

    assert!(!outcome.is_valid());
    assert!(outcome.sentence.is_none());
    assert!(outcome.result.is_none());
    assert!(engine.take_messages().is_empty());

    let err = outcome.error.unwrap();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
    assert_eq!(err.context.unwrap().segment, Some(0));
}

#[test]
fn rejected_commands_have_reasons() {
    let mut engine = Engine::with_stdlib().unwrap();
    for (input, expected) in [
        ("", "Empty sentence"),
        ("SAY hi", "terminator"),
        ("FLY away.", "known verb"),
        ("GET FROM {a}.", "direct object"),
    ] {
        let outcome = engine.run(input);
        assert!(!outcome.is_valid(), "{input:?}");
        let reason = outcome.failure_reason().unwrap_or_default();
        assert!(reason.contains(expected), "{input:?}: {reason}");
    }
}

#[test]
fn last_step_result_is_returned() {
    let mut engine = Engine::with_stdlib().unwrap();
    let outcome = engine.run("SET [n] TO 3 THEN SAY done.");
    assert_eq!(outcome.into_result().unwrap(), Value::text("done"));
}

#[test]
fn failing_action_reports_its_step() {
    let mut engine = Engine::with_stdlib().unwrap();
    let outcome = engine.run("SAY first THEN DECODE zz@@ USING base64 THEN SAY never.");

    let err = outcome.error.as_ref().unwrap();
    assert!(matches!(err.kind, ErrorKind::ActionFailed { .. }));
    assert_eq!(err.context.as_ref().unwrap().segment, Some(1));
    assert_eq!(engine.take_messages(), vec!["first"]);
}

#[test]
fn no_plugins_means_no_engine() {
    let err = Engine::new(EngineConfig::new(), Vec::new()).unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn configured_chain_limit() {
    let mut engine = Engine::new(
        EngineConfig::new().with_max_chain_len(1),
        parlance::stdlib::plugins(),
    )
    .unwrap();

    assert!(engine.run("SAY a.").is_valid());
    let outcome = engine.run("SAY a THEN SAY b.");
    assert!(outcome.failure_reason().unwrap().contains("Too many chained sentences"));
}
