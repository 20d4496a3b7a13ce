//! Dispatch benchmarks using criterion.
//!
//! Measures resolution cost as the number of overloads sharing a name grows,
//! and the cost of binding keyword arguments and defaults.
//!
//! Run with: cargo bench --bench dispatch_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use unifout_overload::{CallArgs, DispatchTable, Object, Param, TypeTag, Value};

/// Builds a chain `T0 <: T1 <: ... <: object` with one overload per level.
fn chain_table(depth: usize) -> (DispatchTable, TypeTag) {
    let mut table: DispatchTable = DispatchTable::new();
    let mut parent = TypeTag::OBJECT;
    let mut levels = Vec::with_capacity(depth);
    for i in 0..depth {
        parent = table.declare_type(format!("L{i}"), &[parent]).unwrap();
        levels.push(parent);
    }
    for (i, &ty) in levels.iter().enumerate() {
        table
            .register("visit", vec![Param::new("node", ty)], move |_| Value::from(i as i64))
            .unwrap();
    }
    (table, parent)
}

fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolution");

    for depth in [1usize, 4, 16, 64] {
        let (table, leaf) = chain_table(depth);
        let args = CallArgs::new().arg(Object::new(leaf));
        group.bench_with_input(BenchmarkId::new("subtype_chain", depth), &args, |b, args| {
            b.iter(|| black_box(table.invoke("visit", args)))
        });
    }

    group.finish();
}

fn bench_binding(c: &mut Criterion) {
    let mut group = c.benchmark_group("binding");

    let mut table: DispatchTable = DispatchTable::new();
    table
        .register(
            "rgb",
            vec![
                Param::new("red", TypeTag::INT),
                Param::new("green", TypeTag::INT).with_default(0),
                Param::new("blue", TypeTag::INT).with_default(0),
            ],
            |args| Value::from(args.len() as i64),
        )
        .unwrap();

    let positional = CallArgs::new().arg(1).arg(2).arg(3);
    group.bench_function("positional", |b| {
        b.iter(|| black_box(table.invoke("rgb", &positional)))
    });

    let keywords = CallArgs::new().kwarg("blue", 3).kwarg("red", 1);
    group.bench_function("keywords_and_defaults", |b| {
        b.iter(|| black_box(table.invoke("rgb", &keywords)))
    });

    group.finish();
}

criterion_group!(benches, bench_resolution, bench_binding);
criterion_main!(benches);
