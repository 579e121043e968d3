//! File verb tests.

use std::fs;

use parlance::foundation::{ErrorKind, Value};

use crate::sandbox;

#[test]
fn get_reads_lines_by_default() {
    let (dir, mut engine) = sandbox();
    fs::write(dir.path().join("notes.txt"), "alpha\nbeta\n").unwrap();

    let result = engine.run("GET [n] FROM {notes.txt}.").into_result().unwrap();
    assert_eq!(
        result,
        Value::from_iter([Value::text("alpha"), Value::text("beta")])
    );
}

#[test]
fn get_text_and_json() {
    let (dir, mut engine) = sandbox();
    fs::write(dir.path().join("notes.txt"), "alpha\nbeta\n").unwrap();
    fs::write(dir.path().join("config.json"), r#"{"port": 8080, "debug": true}"#).unwrap();

    let text = engine.run("GET TEXT [t] FROM {notes.txt}.").into_result().unwrap();
    assert_eq!(text, Value::text("alpha\nbeta\n"));

    let json = engine
        .run("GET JSON [{port}] FROM {config.json}.")
        .into_result()
        .unwrap();
    assert_eq!(json.property("debug"), Some(&Value::Bool(true)));
    assert_eq!(engine.variables().get("port"), Some(&Value::Int(8080)));
}

#[test]
fn get_json_rejects_other_text() {
    let (dir, mut engine) = sandbox();
    fs::write(dir.path().join("notes.txt"), "not json").unwrap();

    let outcome = engine.run("GET JSON [x] FROM {notes.txt}.");
    assert!(matches!(
        outcome.error.map(|e| e.kind),
        Some(ErrorKind::ActionFailed { .. })
    ));
}

#[test]
fn path_with_spaces() {
    let (dir, mut engine) = sandbox();
    fs::write(dir.path().join("my notes.txt"), "x").unwrap();

    let outcome = engine.run("GET TEXT [t] FROM {my notes.txt}.");
    assert_eq!(outcome.result(), Some(&Value::text("x")));
}

#[test]
fn save_writes_each_shape() {
    let (dir, mut engine) = sandbox();

    engine.run("SAVE Hello World TO {plain.txt}.").into_result().unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("plain.txt")).unwrap(),
        "Hello World"
    );

    engine
        .run(r#"GET [xs] USING {["a", "b"]} THEN SAVE [xs] TO {list.txt}."#)
        .into_result()
        .unwrap();
    assert_eq!(fs::read_to_string(dir.path().join("list.txt")).unwrap(), "a\nb\n");

    engine
        .run(r#"GET [o] USING {{"k": 1}} THEN WRITE [o] TO {obj.json}."#)
        .into_result()
        .unwrap();
    let written = fs::read_to_string(dir.path().join("obj.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed["k"], 1);
}

#[test]
fn save_then_read_back() {
    let (dir, mut engine) = sandbox();
    let outcome = engine.run("SAVE draft TO {d.txt} THEN GET TEXT [back] FROM {d.txt}.");

    assert!(outcome.is_valid(), "{:?}", outcome.failure_reason());
    assert_eq!(engine.variables().get("back"), Some(&Value::text("draft")));
    assert!(dir.path().join("d.txt").exists());
}

#[test]
fn save_needs_an_object() {
    let (_dir, mut engine) = sandbox();
    assert!(!engine.run("SAVE TO {x.txt}.").is_valid());
}

#[test]
fn delete_reports_whether_a_file_was_removed() {
    let (dir, mut engine) = sandbox();
    fs::write(dir.path().join("old.txt"), "bye").unwrap();

    assert_eq!(engine.run("DELETE {old.txt}.").result(), Some(&Value::Bool(true)));
    assert!(!dir.path().join("old.txt").exists());
    assert_eq!(
        engine.run("REMOVE FROM {old.txt}.").result(),
        Some(&Value::Bool(false))
    );
}

#[test]
fn absolute_paths_ignore_the_base_directory() {
    let (_dir, mut engine) = sandbox();
    let other = tempfile::TempDir::new().unwrap();
    let path = other.path().join("abs.txt");
    fs::write(&path, "absolute").unwrap();

    let outcome = engine.run(&format!("GET TEXT [a] FROM {{{}}}.", path.display()));
    assert_eq!(outcome.result(), Some(&Value::text("absolute")));
}
