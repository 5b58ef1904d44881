//! Parser throughput benchmark.

use cmc_lex::Lexer;
use cmc_par::{Node, Parser};
use cmc_util::Handler;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn sample_program(copies: usize) -> String {
    let unit = r#"
int values[64];

int sum(int data[], int count) {
    int total = 0;
    int i = 0;
    while (i < count) {
        total = total + data[i];
        i++;
    }
    return total;
}

int classify(int n) {
    if (n < 0) return -1;
    else if (n == 0) return 0;
    return 1;
}
"#;
    unit.repeat(copies)
}

fn bench_parser(c: &mut Criterion) {
    let source = sample_program(32);

    c.bench_function("parse_sample_program", |b| {
        b.iter(|| {
            let handler = Handler::quiet();
            let lexer = Lexer::from_source(black_box(&source), "bench.cm", &handler);
            let mut parser = Parser::new(lexer, &handler);
            let tree = parser.parse_program();
            assert!(matches!(tree, Node::Program(_)));
            tree
        })
    });
}

criterion_group!(benches, bench_parser);
criterion_main!(benches);
