//! End-to-end partitioning of a small C-like language: block comments,
//! line comments, and string literals with escapes, driven entirely by
//! literal and regex rules.

use partition_core::{ContentType, PartitionedDocument, Position, Region, TransitionRuleSet};
use partition_core_rules::{LiteralTransitionRule, RegexTransitionRule};

const BLOCK_COMMENT: ContentType = ContentType::new(1);
const LINE_COMMENT: ContentType = ContentType::new(2);
const STRING: ContentType = ContentType::new(3);

fn c_like_rules() -> TransitionRuleSet {
    let mut rules = TransitionRuleSet::new();
    rules.add_rule(Box::new(LiteralTransitionRule::new(
        ContentType::DEFAULT,
        BLOCK_COMMENT,
        "/*",
    )));
    rules.add_rule(Box::new(LiteralTransitionRule::new(
        BLOCK_COMMENT,
        ContentType::DEFAULT,
        "*/",
    )));
    rules.add_rule(Box::new(LiteralTransitionRule::new(
        ContentType::DEFAULT,
        LINE_COMMENT,
        "//",
    )));
    // a line comment dies at the line terminator: empty pattern
    rules.add_rule(Box::new(LiteralTransitionRule::new(
        LINE_COMMENT,
        ContentType::DEFAULT,
        "",
    )));
    rules.add_rule(Box::new(LiteralTransitionRule::new(
        ContentType::DEFAULT,
        STRING,
        "\"",
    )));
    rules.add_rule(Box::new(
        LiteralTransitionRule::new(STRING, ContentType::DEFAULT, "\"").with_escape('\\'),
    ));
    rules
}

fn pos(line: usize, offset: usize) -> Position {
    Position::new(line, offset)
}

fn type_at(doc: &PartitionedDocument, line: usize, offset: usize) -> ContentType {
    doc.partition_at(pos(line, offset)).content_type
}

#[test]
fn test_mixed_source_file() {
    let text = "int x; /* note\nspans lines */ int y;\n// trailing\nchar* s = \"a\\\"b\";";
    let doc = PartitionedDocument::new(text, c_like_rules());

    assert_eq!(type_at(&doc, 0, 0), ContentType::DEFAULT);
    assert_eq!(type_at(&doc, 0, 8), BLOCK_COMMENT);
    assert_eq!(type_at(&doc, 1, 0), BLOCK_COMMENT);
    // the closing delimiter opens the following default partition
    assert_eq!(type_at(&doc, 1, 12), ContentType::DEFAULT);
    assert_eq!(type_at(&doc, 2, 0), LINE_COMMENT);
    assert_eq!(type_at(&doc, 2, 8), LINE_COMMENT);
    // the line comment must not leak onto the next line
    assert_eq!(type_at(&doc, 3, 0), ContentType::DEFAULT);
    assert_eq!(type_at(&doc, 3, 10), STRING);
    // the escaped quote stays inside the string
    assert_eq!(type_at(&doc, 3, 13), STRING);
    assert_eq!(type_at(&doc, 3, 16), ContentType::DEFAULT);
}

#[test]
fn test_editing_around_a_string() {
    let mut doc = PartitionedDocument::new("x = \"ab\";", c_like_rules());
    assert_eq!(type_at(&doc, 0, 5), STRING);
    assert_eq!(type_at(&doc, 0, 8), ContentType::DEFAULT);

    // escaping the closing quote swallows the rest of the line
    doc.insert(pos(0, 7), "\\").unwrap();
    assert_eq!(doc.buffer().text(), "x = \"ab\\\";");
    assert_eq!(type_at(&doc, 0, 9), STRING);

    // removing the escape restores the original shape
    doc.erase(Region::new(pos(0, 7), pos(0, 8))).unwrap();
    assert_eq!(type_at(&doc, 0, 5), STRING);
    assert_eq!(type_at(&doc, 0, 8), ContentType::DEFAULT);
}

#[test]
fn test_commenting_out_a_line() {
    let mut doc = PartitionedDocument::new("int a;\nint b;\nint c;", c_like_rules());
    assert_eq!(type_at(&doc, 1, 3), ContentType::DEFAULT);

    doc.insert(pos(1, 0), "// ").unwrap();
    assert_eq!(type_at(&doc, 1, 5), LINE_COMMENT);
    assert_eq!(type_at(&doc, 0, 3), ContentType::DEFAULT);
    assert_eq!(type_at(&doc, 2, 3), ContentType::DEFAULT);

    doc.erase(Region::new(pos(1, 0), pos(1, 3))).unwrap();
    assert_eq!(type_at(&doc, 1, 3), ContentType::DEFAULT);
}

#[test]
fn test_regex_rule_drives_partitioning() {
    // SQL-style comments introduced by two or more dashes
    const DASH_COMMENT: ContentType = ContentType::new(4);
    let mut rules = TransitionRuleSet::new();
    rules.add_rule(Box::new(
        RegexTransitionRule::new(ContentType::DEFAULT, DASH_COMMENT, r"--+").unwrap(),
    ));
    rules.add_rule(Box::new(LiteralTransitionRule::new(
        DASH_COMMENT,
        ContentType::DEFAULT,
        "",
    )));

    let doc = PartitionedDocument::new("select 1 --- hi\nselect 2", rules);
    assert_eq!(type_at(&doc, 0, 5), ContentType::DEFAULT);
    assert_eq!(type_at(&doc, 0, 9), DASH_COMMENT);
    assert_eq!(type_at(&doc, 0, 14), DASH_COMMENT);
    assert_eq!(type_at(&doc, 1, 0), ContentType::DEFAULT);
}
