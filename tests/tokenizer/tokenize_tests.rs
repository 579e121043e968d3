//! Tokenizer tests.
//!
//! Tests for converting raw input to token streams.

use parlance::parser::{TokenKind, Tokenizer};

fn values(input: &str) -> Vec<String> {
    Tokenizer::tokenize(input)
        .iter()
        .map(|t| t.value().to_string())
        .collect()
}

#[test]
fn empty_and_blank_input_yield_nothing() {
    assert!(Tokenizer::tokenize("").is_empty());
    assert!(Tokenizer::tokenize("   ").is_empty());
    assert!(Tokenizer::tokenize("\t\r\n\x0c").is_empty());
}

#[test]
fn whitespace_runs_collapse() {
    assert_eq!(values("A B C."), vec!["A", "B", "C."]);
    assert_eq!(values("  A \t B\n\nC.  "), vec!["A", "B", "C."]);
}

#[test]
fn braces_keep_inner_whitespace() {
    let tokens = Tokenizer::tokenize("GET {a b} FROM c.");

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[1].value(), "{a b}");
    assert_eq!(tokens[1].kind(), TokenKind::Reference);
}

#[test]
fn nested_braces_are_one_token() {
    let tokens = Tokenizer::tokenize("GET {{{x}}} FROM y.");

    assert_eq!(tokens[1].value(), "{{{x}}}");
}

#[test]
fn brackets_and_braces_count_separately() {
    assert_eq!(
        values("GET [{a, b}] USING {x [y z] w}."),
        vec!["GET", "[{a, b}]", "USING", "{x [y z] w}."]
    );
}

#[test]
fn stray_closer_is_ordinary_content() {
    assert_eq!(values("SAY a} b."), vec!["SAY", "a}", "b."]);
    assert_eq!(values("SAY ] b."), vec!["SAY", "]", "b."]);
}

#[test]
fn unclosed_opener_absorbs_the_rest() {
    assert_eq!(values("SAY {a b c. THEN SAY d."), vec!["SAY", "{a b c. THEN SAY d."]);
}

#[test]
fn terminator_attaches_or_stands_alone() {
    assert_eq!(values("SAY hi."), vec!["SAY", "hi."]);
    assert_eq!(values("SAY hi ."), vec!["SAY", "hi", "."]);

    let tokens = Tokenizer::tokenize("SAY [x]!");
    assert_eq!(tokens[1].kind(), TokenKind::Variable);
    assert_eq!(tokens[1].split_terminator(), ("[x]", Some('!')));
}

#[test]
fn quotes_are_plain_characters() {
    assert_eq!(values("SAY \"a b\"."), vec!["SAY", "\"a", "b\"."]);
}

#[test]
fn token_kinds() {
    let kinds: Vec<TokenKind> = Tokenizer::tokenize("GET [x] FROM {f} .")
        .iter()
        .map(|t| t.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Regular,
            TokenKind::Variable,
            TokenKind::Regular,
            TokenKind::Reference,
            TokenKind::Terminator,
        ]
    );
}
