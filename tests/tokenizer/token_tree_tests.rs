//! Token tree tests.
//!
//! Tests for sentinels, `THEN` splitting, and reconstruction.

use parlance::parser::{Position, TokenTree};

#[test]
fn empty_tree_still_has_sentinels() {
    let tree = TokenTree::parse("");

    assert_eq!(tree.count(), 0);
    assert_eq!(tree.next(Position::Root), Position::Terminal);
    assert_eq!(tree.prev(Position::Terminal), Position::Root);
    assert!(tree.get(Position::Root).is_none());
}

#[test]
fn walking_visits_every_token() {
    let tree = TokenTree::parse("SAY a b.");
    let mut pos = tree.next(Position::Root);
    let mut seen = Vec::new();
    while let Some(token) = tree.get(pos) {
        seen.push(token.value().to_string());
        pos = tree.next(pos);
    }
    assert_eq!(seen, vec!["SAY", "a", "b."]);
    assert_eq!(pos, Position::Terminal);
}

#[test]
fn then_splits_case_insensitively() {
    let tree = TokenTree::parse("GET [x] FROM {a} then SAY [x].");

    assert!(tree.is_chained());
    let segments: Vec<String> = tree.segments().iter().map(ToString::to_string).collect();
    assert_eq!(segments, vec!["GET [x] FROM {a}", "SAY [x]."]);
}

#[test]
fn then_inside_braces_does_not_split() {
    let tree = TokenTree::parse("SAY {stop THEN go}.");

    assert!(!tree.is_chained());
    assert_eq!(tree.segment_count(), 1);
}

#[test]
fn dangling_then_leaves_empty_segment() {
    let tree = TokenTree::parse("SAY a THEN");

    assert_eq!(tree.segment_count(), 2);
    assert!(tree.segments()[1].is_empty());
}

#[test]
fn display_joins_with_single_spaces() {
    let tree = TokenTree::parse("  SAY   {a  b}   c . ");
    assert_eq!(tree.to_string(), "SAY {a  b} c .");
}
