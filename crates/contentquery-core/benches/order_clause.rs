use contentquery_core::{
    ContentUri, MemoryProvider, QueryExecutor, QuerySpec, Value,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_order_clause(c: &mut Criterion) {
    let spec = QuerySpec::builder()
        .sort("datetaken")
        .ascending(false)
        .limit(50)
        .build();

    c.bench_function("order_clause", |b| {
        b.iter(|| black_box(&spec).order_clause())
    });

    c.bench_function("build_spec", |b| {
        b.iter(|| {
            QuerySpec::builder()
                .predicate("media_type=? or media_type=?")
                .arguments(black_box([1, 3]))
                .sort("_size")
                .limit(10)
                .build()
        })
    });
}

fn bench_memory_query(c: &mut Criterion) {
    let files = ContentUri::parse("content://media/external/files").unwrap();
    let provider = MemoryProvider::new();
    provider
        .create_table(&files, ["_id", "media_type", "_size"])
        .unwrap();
    for id in 0..1_000i64 {
        provider
            .insert(&files, [Value::from(id), Value::from(id % 4), Value::from(id * 7 % 1013)])
            .unwrap();
    }

    let spec = QuerySpec::builder()
        .target(files)
        .projection(["_id"])
        .predicate("media_type=? or media_type=?")
        .arguments([1, 3])
        .sort("_size")
        .limit(20)
        .build();
    let executor = QueryExecutor::new(&provider);

    c.bench_function("memory_query_1k_rows", |b| {
        b.iter(|| executor.execute(black_box(&spec)).unwrap())
    });
}

criterion_group!(benches, bench_order_clause, bench_memory_query);
criterion_main!(benches);
