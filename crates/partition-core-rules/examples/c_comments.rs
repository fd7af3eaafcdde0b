use partition_core::{ContentType, PartitionedDocument, Position, TransitionRuleSet};
use partition_core_rules::LiteralTransitionRule;

const BLOCK_COMMENT: ContentType = ContentType::new(1);
const LINE_COMMENT: ContentType = ContentType::new(2);
const STRING: ContentType = ContentType::new(3);

fn main() {
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
    // An empty pattern matches at end of line: line comments end there.
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

    let mut doc = PartitionedDocument::new(
        "int x; /* block */\nchar* s = \"a\\\"b\"; // trailing note",
        rules,
    );
    for p in doc.partitions() {
        println!("{:?}: {:?} .. {:?}", p.content_type, p.region.beginning(), p.region.end());
    }

    // Typing inside the string keeps the classification stable.
    doc.insert(Position::new(1, 12), "xyz").unwrap();
    assert_eq!(
        doc.partition_at(Position::new(1, 13)).content_type,
        STRING
    );
}
