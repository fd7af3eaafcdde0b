use partition_core::{
    ContentType, MatcherRule, PartitionedDocument, Position, Region, TransitionRuleSet,
};

const COMMENT: ContentType = ContentType::new(1);

fn main() {
    // A block comment grammar built from two closures.
    let mut rules = TransitionRuleSet::new();
    rules.add_rule(Box::new(MatcherRule::new(
        ContentType::DEFAULT,
        COMMENT,
        |line: &str, offset| {
            line.chars().skip(offset).take(2).eq("/*".chars()).then_some(2)
        },
    )));
    rules.add_rule(Box::new(MatcherRule::new(
        COMMENT,
        ContentType::DEFAULT,
        |line: &str, offset| {
            line.chars().skip(offset).take(2).eq("*/".chars()).then_some(2)
        },
    )));

    let mut doc = PartitionedDocument::new("int a; /* note */ int b;", rules);
    for p in doc.partitions() {
        println!("{:?}: {:?} .. {:?}", p.content_type, p.region.beginning(), p.region.end());
    }

    assert_eq!(doc.partition_at(Position::new(0, 10)).content_type, COMMENT);

    // Deleting the closing delimiter extends the comment to the end.
    doc.erase(Region::new(Position::new(0, 15), Position::new(0, 17)))
        .unwrap();
    assert_eq!(
        doc.partition_at(Position::new(0, 20)).content_type,
        COMMENT
    );
}
