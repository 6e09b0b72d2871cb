//! Checker throughput on generated programs.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use copyck_checker::{CheckerContext, CheckerOptions, CheckerState};
use copyck_model::{NodeArena, ProgramSource, bind_program};
use serde_json::{Value, json};

/// `classes` classes in a single-inheritance chain, each declaring `fields`
/// fields and a copy constructor that chains and copies all but the last.
fn program(classes: usize, fields: usize) -> NodeArena {
    let mut decls = Vec::with_capacity(classes);
    for c in 0..classes {
        let name = format!("C{c}");
        let field_decls: Vec<Value> = (0..fields)
            .map(|f| json!({"name": format!("f{c}_{f}"), "type": "int"}))
            .collect();
        let mut body = Vec::new();
        if c > 0 {
            body.push(json!({"expr": {"call": {"name": "super", "args": [{"name": "other"}]}}}));
        }
        for f in 0..fields.saturating_sub(1) {
            let field = format!("f{c}_{f}");
            body.push(json!({"assign": {
                "lhs": {"field": {"qualifier": "this", "name": field}},
                "rhs": {"binary": {"op": "+", "operands": [
                    {"literal": "0"},
                    {"field": {"qualifier": {"name": "other"}, "name": field}}
                ]}}
            }}));
        }
        let extends = (c > 0).then(|| format!("C{}", c - 1));
        decls.push(json!({
            "name": name,
            "extends": extends,
            "fields": field_decls,
            "constructors": [{"parameters": [{"name": "other", "type": name}], "body": body}]
        }));
    }
    let source: ProgramSource =
        serde_json::from_value(json!({"file": "Bench.java", "classes": decls}))
            .expect("valid program source");
    bind_program(&[source]).expect("program binds")
}

fn bench_bind(c: &mut Criterion) {
    c.bench_function("bind_100_classes", |b| {
        b.iter(|| black_box(program(100, 10).class_count()))
    });
}

fn bench_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("check");
    for &classes in &[10usize, 100, 1000] {
        let arena = program(classes, 10);
        group.bench_with_input(BenchmarkId::new("sequential", classes), &arena, |b, arena| {
            b.iter(|| {
                let state = CheckerState::new(CheckerContext::new(arena), CheckerOptions::default());
                black_box(state.collect_diagnostics(false).len())
            })
        });
        group.bench_with_input(BenchmarkId::new("parallel", classes), &arena, |b, arena| {
            b.iter(|| {
                let state = CheckerState::new(CheckerContext::new(arena), CheckerOptions::default());
                black_box(state.collect_diagnostics(true).len())
            })
        });
    }
    group.finish();
}

criterion_group!(check_benches, bench_bind, bench_check);
criterion_main!(check_benches);
