use contentquery::{args, ContentUri, MemoryProvider, QueryExecutor, QuerySpec, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== contentquery Query Demo ===\n");

    let contacts: ContentUri = "content://contacts/people".parse()?;
    let provider = MemoryProvider::new();
    provider.create_table(&contacts, ["_id", "name", "city", "age"])?;
    for (id, name, city, age) in [
        (1, "Alice", "Berlin", 31),
        (2, "Bob", "Lisbon", 45),
        (3, "Carol", "Berlin", 27),
        (4, "Dave", "Oslo", 38),
    ] {
        provider.insert(
            &contacts,
            [Value::from(id), name.into(), city.into(), Value::from(age)],
        )?;
    }

    let executor = QueryExecutor::new(&provider);

    println!("1. Everyone in Berlin, youngest first:");
    let spec = QuerySpec::builder()
        .target(contacts.clone())
        .projection(["name", "age"])
        .predicate("city = ?")
        .arguments(args!["Berlin"])
        .sort("age")
        .ascending(true)
        .build();
    println!("   sort order: {:?}", spec.order_clause());
    for (name, age) in executor.query_results(&spec, |c| Ok((c.get_string(0)?, c.get_long(1)?)))? {
        println!("   {} ({})", name.unwrap_or_default(), age);
    }

    println!("\n2. The two oldest contacts:");
    let spec = QuerySpec::builder()
        .target(contacts.clone())
        .projection(["name"])
        .sort("age")
        .limit(2)
        .build();
    println!("   sort order: {:?}", spec.order_clause());
    for name in executor.query_results(&spec, |c| c.get_string(0))? {
        println!("   {}", name.unwrap_or_default());
    }

    println!("\n3. A limit without a sort column orders by the first column:");
    let spec = QuerySpec::builder()
        .target(contacts.clone())
        .projection(["_id", "name"])
        .limit(1)
        .build();
    println!("   sort order: {:?}", spec.order_clause());
    let rows = executor.query_results(&spec, |c| c.get_long(0))?;
    println!("   ids: {:?}", rows);

    println!("\n4. Provider errors come back unchanged:");
    let spec = QuerySpec::builder().target(contacts).sort("nickname").build();
    match executor.execute(&spec) {
        Ok(_) => println!("   unexpected success"),
        Err(e) => println!("   {}", e),
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
