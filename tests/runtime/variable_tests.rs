//! Variable tests.

use parlance::foundation::{ErrorKind, Value};
use parlance::runtime::{Engine, EngineConfig, VariableTable};

#[test]
fn names_are_case_insensitive() {
    let mut vars = VariableTable::new();
    vars.register("Total", Value::Int(3));

    assert_eq!(vars.resolve("[total]"), Some(&Value::Int(3)));
    assert_eq!(vars.resolve("[TOTAL]"), Some(&Value::Int(3)));
    assert_eq!(vars.resolve("total"), None);
    assert_eq!(vars.resolve("[]"), None);
}

#[test]
fn reassignment_overwrites() {
    let mut engine = Engine::with_stdlib().unwrap();
    let outcome = engine.run("SET [x] TO 1 THEN SET [X] TO 2 THEN SAY [x].");

    assert!(outcome.is_valid());
    assert_eq!(engine.variables().len(), 1);
    assert_eq!(engine.take_messages(), vec!["2"]);
}

#[test]
fn destructuring_takes_named_properties() {
    let mut engine = Engine::with_stdlib().unwrap();
    let outcome = engine.run(r#"GET [{a,c}] USING {{"a": 1, "b": 2, "c": 3}} THEN SAY [c]."#);

    assert!(outcome.is_valid(), "{:?}", outcome.failure_reason());
    let vars = engine.variables();
    assert_eq!(vars.get("a"), Some(&Value::Int(1)));
    assert_eq!(vars.get("c"), Some(&Value::Int(3)));
    assert!(!vars.contains("b"));
    assert_eq!(engine.take_messages(), vec!["3"]);
}

#[test]
fn destructuring_skips_missing_properties() {
    let mut engine = Engine::with_stdlib().unwrap();
    let outcome = engine.run(r#"GET [{a, z}] USING {{"a": 1}}."#);

    assert!(outcome.is_valid());
    assert!(engine.variables().contains("a"));
    assert!(!engine.variables().contains("z"));
}

#[test]
fn reading_before_writing_fails() {
    let mut engine = Engine::with_stdlib().unwrap();
    let outcome = engine.run("SAY [ghost].");

    assert!(matches!(
        outcome.error.map(|e| e.kind),
        Some(ErrorKind::UnresolvedVariable(name)) if name == "ghost"
    ));
}

#[test]
fn variables_reset_between_runs_by_default() {
    let mut engine = Engine::with_stdlib().unwrap();
    assert!(engine.run("SET [x] TO 1.").is_valid());
    assert!(!engine.run("SAY [x].").is_valid());
}

#[test]
fn persistent_variables_survive_runs() {
    let config = EngineConfig::new().with_persistent_variables(true);
    let mut engine = Engine::new(config, parlance::stdlib::plugins()).unwrap();

    assert!(engine.run("SET [x] TO 1.").is_valid());
    assert!(engine.run("SAY [x].").is_valid());
    assert_eq!(engine.take_messages(), vec!["1"]);

    engine.clear_variables();
    assert!(!engine.run("SAY [x].").is_valid());
}

#[test]
fn braced_variable_reads_without_storing() {
    let mut engine = Engine::with_stdlib().unwrap();
    let outcome = engine.run("SET [who] TO world THEN SAY {[who]}.");

    assert!(outcome.is_valid(), "{:?}", outcome.failure_reason());
    assert_eq!(engine.take_messages(), vec!["world"]);
}

#[test]
fn padded_receivers_are_refused() {
    let mut engine = Engine::with_stdlib().unwrap();
    let outcome = engine.run(r#"GET [ y ] USING {{"a": 1}} THEN SAY [ y ]."#);

    assert!(matches!(
        outcome.error.map(|e| e.kind),
        Some(ErrorKind::NoMatchingUsage { .. })
    ));
    assert!(engine.variables().is_empty());
    assert!(engine.take_messages().is_empty());
}
