#![no_main]

use arbitrary::Arbitrary;
use contentquery::{ContentUri, MemoryProvider, QueryExecutor, QuerySpec, Value};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    rows: Vec<(i64, Option<String>, f64)>,
    projection: Option<Vec<String>>,
    predicate: Option<String>,
    arguments: Vec<String>,
    sort: Option<String>,
    ascending: bool,
    limit: Option<u32>,
}

fuzz_target!(|input: Input| {
    let Ok(uri) = ContentUri::parse("content://fuzz/items") else {
        return;
    };
    let provider = MemoryProvider::new();
    if provider.create_table(&uri, ["_id", "name", "score"]).is_err() {
        return;
    }
    for (id, name, score) in input.rows.into_iter().take(64) {
        let _ = provider.insert(&uri, [Value::from(id), Value::from(name), Value::from(score)]);
    }

    let mut builder = QuerySpec::builder()
        .target(uri)
        .arguments(input.arguments)
        .ascending(input.ascending)
        .limit(input.limit);
    if let Some(projection) = input.projection {
        builder = builder.projection(projection);
    }
    if let Some(predicate) = input.predicate {
        builder = builder.predicate(predicate);
    }
    if let Some(sort) = input.sort {
        builder = builder.sort(sort);
    }
    let spec = builder.build();

    // Clause synthesis is total; execution may fail but must not panic.
    let clause = spec.order_clause();
    assert_eq!(
        clause.is_none(),
        spec.sort_column().is_none() && input.limit.is_none()
    );
    let _ = QueryExecutor::new(&provider).query_results(&spec, |c| c.get_value(0).cloned());
});
