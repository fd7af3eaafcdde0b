use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use partition_core::{
    ContentType, MatcherRule, PartitionedDocument, Position, Region, TransitionRuleSet,
};

const COMMENT: ContentType = ContentType::new(1);
const STRING: ContentType = ContentType::new(2);

fn literal(pattern: &'static str) -> impl Fn(&str, usize) -> Option<usize> {
    move |line: &str, offset: usize| {
        let mut chars = line.chars().skip(offset);
        for expected in pattern.chars() {
            if chars.next() != Some(expected) {
                return None;
            }
        }
        Some(pattern.chars().count())
    }
}

fn rules() -> TransitionRuleSet {
    let mut rules = TransitionRuleSet::new();
    rules.add_rule(Box::new(MatcherRule::new(
        ContentType::DEFAULT,
        COMMENT,
        literal("/*"),
    )));
    rules.add_rule(Box::new(MatcherRule::new(
        COMMENT,
        ContentType::DEFAULT,
        literal("*/"),
    )));
    rules.add_rule(Box::new(MatcherRule::new(
        ContentType::DEFAULT,
        STRING,
        literal("\""),
    )));
    rules.add_rule(Box::new(MatcherRule::new(
        STRING,
        ContentType::DEFAULT,
        literal("\""),
    )));
    rules
}

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        match i % 5 {
            0 => out.push_str(&format!("/* block {i} spanning one line */\n")),
            1 => out.push_str(&format!("let s{i} = \"string literal {i}\";\n")),
            _ => out.push_str(&format!("{i:06} plain code without any delimiters here\n")),
        }
    }
    // Remove the final '\n' to avoid creating an extra trailing empty line.
    out.pop();
    out
}

fn bench_initial_partitioning(c: &mut Criterion) {
    let text = large_text(10_000);
    c.bench_function("initial_partitioning/10k_lines", |b| {
        b.iter(|| {
            let doc = PartitionedDocument::new(black_box(&text), rules());
            black_box(doc.partitions().len());
        })
    });
}

fn bench_typing_in_middle(c: &mut Criterion) {
    let text = large_text(10_000);
    c.bench_function("typing_middle/100_inserts", |b| {
        b.iter_batched(
            || PartitionedDocument::new(&text, rules()),
            |mut doc| {
                let mut at = Position::new(5_000, 10);
                for _ in 0..100 {
                    doc.insert(at, "x").unwrap();
                    at.offset += 1;
                }
                black_box(doc.partitions().len());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_toggling_a_delimiter(c: &mut Criterion) {
    // repeatedly open and re-close a block comment in the middle of the
    // document, the worst case for the rescan frontier
    let text = large_text(10_000);
    c.bench_function("delimiter_toggle/50_cycles", |b| {
        b.iter_batched(
            || PartitionedDocument::new(&text, rules()),
            |mut doc| {
                let at = Position::new(5_002, 0);
                for _ in 0..50 {
                    doc.insert(at, "/*").unwrap();
                    doc.erase(Region::new(at, Position::new(5_002, 2))).unwrap();
                }
                black_box(doc.partitions().len());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_partition_queries(c: &mut Criterion) {
    let text = large_text(10_000);
    let doc = PartitionedDocument::new(&text, rules());
    c.bench_function("partition_at/1k_lookups", |b| {
        b.iter(|| {
            for line in (0..10_000).step_by(10) {
                black_box(doc.partition_at(Position::new(line, 3)));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_initial_partitioning,
    bench_typing_in_middle,
    bench_toggling_a_delimiter,
    bench_partition_queries
);
criterion_main!(benches);
