//! Lexicon tests.

use parlance::parser::Keyword;

use crate::common::Fixture;

#[test]
fn usages_cover_every_registration() {
    let fixture = Fixture::new();
    let usages = fixture.lexicon.usages(&fixture.registry, "get");

    assert_eq!(usages.len(), 2);
    let patterns: Vec<&str> = usages.iter().map(|u| u.pattern.as_str()).collect();
    assert!(patterns.iter().any(|p| p.contains("FROM")), "{patterns:?}");
    assert!(patterns.iter().any(|p| p.contains("USING")), "{patterns:?}");
}

#[test]
fn legal_prepositions_and_qualifiers() {
    let fixture = Fixture::new();
    let prepositions = fixture.lexicon.legal_prepositions(&fixture.registry, "GET");
    assert!(prepositions.contains(&Keyword::From));
    assert!(prepositions.contains(&Keyword::Using));
    assert!(!prepositions.contains(&Keyword::With));

    let qualifiers = fixture.lexicon.legal_qualifiers(&fixture.registry, "GET");
    assert!(qualifiers.contains(&"LINES".to_string()));
    assert!(fixture.lexicon.legal_qualifiers(&fixture.registry, "SAY").is_empty());
}

#[test]
fn direct_object_requirement() {
    let fixture = Fixture::new();
    assert!(fixture.lexicon.requires_direct_object(&fixture.registry, "GET"));
    assert!(!fixture.lexicon.requires_direct_object(&fixture.registry, "DELETE"));
}

#[test]
fn successful_parses_are_counted() {
    let fixture = Fixture::new();
    let parser = fixture.parser();

    parser.parse("SAY a.").unwrap();
    parser.parse("PRINT b THEN SAY c.").unwrap();
    parser.parse("FLY.").unwrap_err();

    assert_eq!(fixture.lexicon.use_count("say"), 3);
    assert_eq!(fixture.lexicon.use_count("FLY"), 0);
}
