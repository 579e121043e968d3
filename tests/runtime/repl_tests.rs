//! REPL and script tests.

use std::fs;

use parlance::foundation::{Result, Value};
use parlance::runtime::{Engine, EngineConfig, LineEditor, ReadResult, Repl, Reply};
use tempfile::TempDir;

/// Feeds a fixed list of lines, then EOF.
struct ScriptedEditor {
    lines: std::vec::IntoIter<String>,
}

impl ScriptedEditor {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines
                .iter()
                .map(|l| (*l).to_string())
                .collect::<Vec<_>>()
                .into_iter(),
        }
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(self.lines.next().map_or(ReadResult::Eof, ReadResult::Line))
    }

    fn add_history(&mut self, _line: &str) {}

    fn set_vocabulary(&mut self, _verbs: Vec<String>, _qualifiers: Vec<String>) {}
}

fn repl_in(dir: &TempDir, lines: &[&str]) -> Repl<ScriptedEditor> {
    let config = EngineConfig::new()
        .with_base_dir(dir.path())
        .with_persistent_variables(true);
    let engine = Engine::new(config, parlance::stdlib::plugins()).unwrap();
    Repl::with_editor(ScriptedEditor::new(lines), engine).without_banner()
}

#[test]
fn eval_keeps_variables_between_lines() {
    let dir = TempDir::new().unwrap();
    let mut repl = repl_in(&dir, &[]);

    repl.eval("SET [greeting] TO hello.").unwrap();
    let reply = repl.eval("SAY [greeting].").unwrap();

    assert_eq!(
        reply,
        Reply::Ran {
            output: vec!["hello".to_string()],
            value: Value::text("hello"),
        }
    );
    assert_eq!(repl.eval(":vars").unwrap(), Reply::Info("[greeting] = hello".into()));
}

#[test]
fn eval_reports_failures_as_errors() {
    let dir = TempDir::new().unwrap();
    let mut repl = repl_in(&dir, &[]);

    assert!(repl.eval("FLY away.").is_err());
    assert!(repl.eval(":nonsense").is_err());
    assert_eq!(repl.eval("   ").unwrap(), Reply::Nothing);
}

#[test]
fn run_loop_continues_past_errors() {
    let dir = TempDir::new().unwrap();
    let mut repl = repl_in(
        &dir,
        &["FLY away.", "SET [n] TO 7.", "GET [x] FROM {a.txt", "}.", ":quit", "SET [m] TO 1."],
    );
    fs::write(dir.path().join("a.txt"), "line").unwrap();

    repl.run().unwrap();

    let vars = repl.engine().variables();
    assert_eq!(vars.get("n"), Some(&Value::Int(7)));
    assert_eq!(vars.get("x"), Some(&Value::from_iter([Value::text("line")])));
    assert!(!vars.contains("m"));
}

#[test]
fn script_skips_comments_and_returns_last_value() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("setup.pl");
    fs::write(
        &script,
        "# build a greeting\n\nSET [who] TO world.\nSAY {[who]}.\n",
    )
    .unwrap();
    let mut repl = repl_in(&dir, &[]);

    let last = repl.run_script(&script).unwrap();

    assert_eq!(last, Value::text("world"));
    assert_eq!(repl.engine().variables().get("who"), Some(&Value::text("world")));
}

#[test]
fn script_stops_at_first_failure() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("broken.pl");
    fs::write(&script, "SET [a] TO 1.\nGET [b] FROM {missing.txt}.\nSET [c] TO 3.\n").unwrap();
    let mut repl = repl_in(&dir, &[]);

    assert!(repl.run_script(&script).is_err());
    assert!(repl.engine().variables().contains("a"));
    assert!(!repl.engine().variables().contains("c"));
}

#[test]
fn missing_script_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let mut repl = repl_in(&dir, &[]);
    assert!(repl.run_script(&dir.path().join("nope.pl")).is_err());
}
