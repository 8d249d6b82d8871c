use contentquery::logging::LogConfig;
use contentquery::{ContentUri, MemoryProvider, QueryExecutor, QuerySpec, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Debug level shows every request the executor issues.
    let _guard = LogConfig::debug().init();

    println!("=== contentquery Logging Demo ===\n");

    let uri: ContentUri = "content://settings/system".parse()?;
    let provider = MemoryProvider::new();
    provider.create_table(&uri, ["name", "value"])?;
    provider.insert(&uri, [Value::from("volume"), Value::from(7)])?;
    provider.insert(&uri, [Value::from("brightness"), Value::from(120)])?;

    let spec = QuerySpec::builder()
        .target(uri)
        .predicate("value > ?")
        .arguments([5])
        .sort("name")
        .ascending(true)
        .limit(10)
        .build();
    let names = QueryExecutor::new(&provider).query_results(&spec, |c| c.get_string(0))?;
    println!("Settings above 5: {:?}", names);

    println!("\n=== Demo Complete ===");
    println!("Check the logs above to see tracing output!");
    Ok(())
}
