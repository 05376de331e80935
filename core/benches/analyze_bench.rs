use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use robson_core::{Analyzer, InstructionSet, Settings};
use std::hint::black_box;

// A program of `blocks` loops, each pushing, printing and jumping back.
fn make_program(blocks: usize) -> String {
    let mut out = String::new();
    for i in 0..blocks {
        out.push_str(&format!("block_{i}:\n"));
        out.push_str("robson robson robson ; push\n");
        out.push_str(&format!("comeu {i}\n"));
        out.push_str("robson robson robson robson robson robson robson\n");
        out.push_str("robson robson robson robson robson robson robson robson robson\n");
        out.push_str(&format!("lambeu :block_{i}\n"));
        if i % 10 == 0 {
            out.push_str("badName:\nunknown line\n");
        }
    }
    out
}

fn analyze_bench(c: &mut Criterion) {
    let analyzer = Analyzer::new();
    let settings = Settings {
        max_number_of_problems: usize::MAX,
        ..Settings::default()
    };

    let mut group = c.benchmark_group("analyze");
    for blocks in [10usize, 100, 1000] {
        let program = make_program(blocks);
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &program, |b, program| {
            b.iter(|| black_box(analyzer.analyze(black_box(program), &settings)))
        });
    }
    group.finish();

    let program = make_program(100);
    let extended = Settings {
        instruction_set: InstructionSet::Extended,
        ..Settings::default()
    };
    c.bench_function("analyze_extended_100", |b| {
        b.iter(|| black_box(analyzer.analyze(black_box(&program), &extended)))
    });
}

criterion_group!(benches, analyze_bench);
criterion_main!(benches);
